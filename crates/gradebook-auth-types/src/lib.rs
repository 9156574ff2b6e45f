//! Teacher authentication shared by the gradebook service and its tests.
//!
//! Provides JWT issuing/validation, the access-token cookie builders, and the
//! `TeacherIdentity` extractor every protected handler takes.

pub mod cookie;
pub mod identity;
pub mod token;

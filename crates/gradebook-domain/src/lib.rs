//! Domain types shared across the gradebook crates.
//!
//! This crate contains only pure types and arithmetic with no framework dependencies.
//! Import in `usecase/` and `domain/` layers, and in migrations for seed data.

pub mod class;
pub mod score;
pub mod subject;

//! Service plumbing shared by gradebook binaries: health probes, request middleware,
//! serde helpers and tracing setup.

pub mod health;
pub mod middleware;
pub mod serde;
pub mod tracing;

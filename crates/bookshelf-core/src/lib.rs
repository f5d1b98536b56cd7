//! Shared service plumbing: health endpoints, request-id/trace layers,
//! timestamp serialization, and tracing setup.

pub mod health;
pub mod middleware;
pub mod serde;
pub mod tracing;

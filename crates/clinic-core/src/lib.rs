//! HTTP plumbing shared by clinic services: tracing setup, request-id and
//! trace layers, health handlers, and serde helpers.

pub mod health;
pub mod middleware;
pub mod serde;
pub mod tracing;

//! Shared types for the integration-hub client workspace.
//!
//! Wire DTOs live here so the CLI, its tests, and any future frontends agree
//! on one representation of every backend payload.

#![warn(missing_docs)]

/// Request and response bodies of the integration-hub REST API.
pub mod api;

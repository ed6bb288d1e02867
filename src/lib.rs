//! Web front-end and provisioning tooling for a hosted document search
//! service.
//!
//! - [`search`]: query building, the HTTPS gateway and response shaping
//! - [`provisioning`]: loading definition documents and injecting secrets
//! - [`web`]: the axum front-end serving `/`, `/search` and `/filter`

pub mod config;
pub mod error;
pub mod provisioning;
pub mod search;
pub mod telemetry;
pub mod web;

pub use error::{AppError, Result};

//! HTTP request handlers.
//!
//! Controllers resolve the acting user from the session, convert DTOs into parameter
//! models, call the service layer and convert the resulting domain models back into DTOs.

pub mod auth;
pub mod car;

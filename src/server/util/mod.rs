//! Shared helpers for controllers and services.

pub mod db;
pub mod extract;

//! Data transfer objects exchanged with API clients.

pub mod api;
pub mod car;
pub mod user;

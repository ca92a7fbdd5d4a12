//! Domain models and operation parameter types.
//!
//! Domain models are built from SeaORM entity models in the data layer and converted
//! into DTOs at the controller boundary. Parameter models carry the validated input of
//! a single service or repository operation.

pub mod car;
pub mod comment;
pub mod image;
pub mod rating;
pub mod user;

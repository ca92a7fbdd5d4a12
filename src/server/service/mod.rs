//! Service layer for business logic and orchestration.
//!
//! This module contains the service layer of the application, which sits between the
//! controller (API) layer and the data (repository) layer. Services are responsible for:
//!
//! - **Business Logic**: Implementing core business rules and validation
//! - **Authorization**: Applying the car access policy to the acting user
//! - **Orchestration**: Coordinating repository calls and image storage
//! - **Domain Models**: Working with domain models rather than DTOs or entity models

pub mod auth;
pub mod car;

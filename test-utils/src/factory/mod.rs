//! Factory methods for creating test data.
//!
//! This module provides factory methods for creating test entities with sensible defaults,
//! reducing boilerplate in tests. Each entity has its own factory module with both a
//! `Factory` struct for customization and a `create_*` convenience function for quick
//! default creation.
//!
//! # Basic Usage
//!
//! ```rust,ignore
//! use test_utils::factory;
//!
//! let owner = factory::user::create_user(&db).await?;
//! let car = factory::car::create_car(&db, owner.id).await?;
//!
//! // Create with all dependencies
//! let (owner, car) = factory::helpers::create_car_with_owner(&db).await?;
//! ```
//!
//! # Customization
//!
//! ```rust,ignore
//! let car = factory::car::CarFactory::new(&db, owner.id)
//!     .make("Toyota")
//!     .available(false)
//!     .build()
//!     .await?;
//! ```

pub mod car;
pub mod car_image;
pub mod comment;
pub mod helpers;
pub mod rating;
pub mod user;

pub use car::create_car;
pub use car_image::create_car_image;
pub use comment::create_comment;
pub use rating::create_rating;
pub use user::create_user;

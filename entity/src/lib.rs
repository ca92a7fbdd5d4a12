//! SeaORM entities for the car rental listing database.

pub mod prelude;

pub mod car;
pub mod car_image;
pub mod comment;
pub mod rating;
pub mod user;

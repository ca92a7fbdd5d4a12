pub use super::car::Entity as Car;
pub use super::car_image::Entity as CarImage;
pub use super::comment::Entity as Comment;
pub use super::rating::Entity as Rating;
pub use super::user::Entity as User;

//! Car image factory.

use crate::factory::helpers::next_id;
use chrono::Utc;
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};

/// Factory for creating test car images.
pub struct CarImageFactory<'a> {
    db: &'a DatabaseConnection,
    car_id: i32,
    image: String,
    is_primary: bool,
}

impl<'a> CarImageFactory<'a> {
    /// Creates a new CarImageFactory with a unique storage key and `is_primary = false`.
    pub fn new(db: &'a DatabaseConnection, car_id: i32) -> Self {
        Self {
            db,
            car_id,
            image: format!("car_images/test_{}.jpg", next_id()),
            is_primary: false,
        }
    }

    /// Sets the storage key.
    pub fn image(mut self, image: impl Into<String>) -> Self {
        self.image = image.into();
        self
    }

    /// Sets whether the image is the car's primary image.
    pub fn is_primary(mut self, is_primary: bool) -> Self {
        self.is_primary = is_primary;
        self
    }

    /// Builds and inserts the image entity into the database.
    pub async fn build(self) -> Result<entity::car_image::Model, DbErr> {
        entity::car_image::ActiveModel {
            car_id: ActiveValue::Set(self.car_id),
            image: ActiveValue::Set(self.image),
            is_primary: ActiveValue::Set(self.is_primary),
            uploaded_at: ActiveValue::Set(Utc::now()),
            ..Default::default()
        }
        .insert(self.db)
        .await
    }
}

/// Creates a non-primary image for the given car.
pub async fn create_car_image(
    db: &DatabaseConnection,
    car_id: i32,
) -> Result<entity::car_image::Model, DbErr> {
    CarImageFactory::new(db, car_id).build().await
}

//! Car factory for creating test car listings.

use crate::factory::helpers::next_id;
use chrono::Utc;
use rust_decimal::Decimal;
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};

/// Factory for creating test cars with customizable fields.
///
/// # Example
///
/// ```rust,ignore
/// use test_utils::factory::car::CarFactory;
///
/// let car = CarFactory::new(&db, owner.id)
///     .make("Honda")
///     .available(false)
///     .build()
///     .await?;
/// ```
pub struct CarFactory<'a> {
    db: &'a DatabaseConnection,
    owner_id: i32,
    make: String,
    model: String,
    year: i32,
    price_per_day: Decimal,
    description: String,
    location: String,
    available: bool,
}

impl<'a> CarFactory<'a> {
    /// Creates a new CarFactory with default values.
    ///
    /// Defaults:
    /// - make: `"Make {id}"`, model: `"Model {id}"`
    /// - year: `2020`
    /// - price_per_day: `50.00`
    /// - description / location: fixed placeholder text
    /// - available: `true`
    ///
    /// # Arguments
    /// - `db` - Database connection for inserting the entity
    /// - `owner_id` - ID of the user listing the car
    pub fn new(db: &'a DatabaseConnection, owner_id: i32) -> Self {
        let id = next_id();
        Self {
            db,
            owner_id,
            make: format!("Make {}", id),
            model: format!("Model {}", id),
            year: 2020,
            price_per_day: Decimal::new(5000, 2),
            description: "Test car description".to_string(),
            location: "Test City".to_string(),
            available: true,
        }
    }

    /// Sets the make.
    pub fn make(mut self, make: impl Into<String>) -> Self {
        self.make = make.into();
        self
    }

    /// Sets the model.
    pub fn model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Sets the model year.
    pub fn year(mut self, year: i32) -> Self {
        self.year = year;
        self
    }

    /// Sets the daily price.
    pub fn price_per_day(mut self, price_per_day: Decimal) -> Self {
        self.price_per_day = price_per_day;
        self
    }

    /// Sets whether the car is available for rent.
    pub fn available(mut self, available: bool) -> Self {
        self.available = available;
        self
    }

    /// Builds and inserts the car entity into the database.
    ///
    /// # Returns
    /// - `Ok(entity::car::Model)` - Created car entity
    /// - `Err(DbErr)` - Database error during insert
    pub async fn build(self) -> Result<entity::car::Model, DbErr> {
        let now = Utc::now();
        entity::car::ActiveModel {
            owner_id: ActiveValue::Set(self.owner_id),
            make: ActiveValue::Set(self.make),
            model: ActiveValue::Set(self.model),
            year: ActiveValue::Set(self.year),
            price_per_day: ActiveValue::Set(self.price_per_day),
            description: ActiveValue::Set(self.description),
            location: ActiveValue::Set(self.location),
            available: ActiveValue::Set(self.available),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
            ..Default::default()
        }
        .insert(self.db)
        .await
    }
}

/// Creates a car with default values for the given owner.
pub async fn create_car(
    db: &DatabaseConnection,
    owner_id: i32,
) -> Result<entity::car::Model, DbErr> {
    CarFactory::new(db, owner_id).build().await
}

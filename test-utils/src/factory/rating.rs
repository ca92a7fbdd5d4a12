//! Rating factory.

use chrono::Utc;
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};

/// Creates a rating by `user_id` for `car_id`.
///
/// Fails with a unique constraint violation if the user already rated the car.
///
/// # Arguments
/// - `db` - Database connection
/// - `car_id` - Car being rated
/// - `user_id` - User giving the rating
/// - `rating` - Score, not range-checked here
///
/// # Returns
/// - `Ok(entity::rating::Model)` - Created rating entity
/// - `Err(DbErr)` - Database error during insert
pub async fn create_rating(
    db: &DatabaseConnection,
    car_id: i32,
    user_id: i32,
    rating: i32,
) -> Result<entity::rating::Model, DbErr> {
    entity::rating::ActiveModel {
        car_id: ActiveValue::Set(car_id),
        user_id: ActiveValue::Set(user_id),
        rating: ActiveValue::Set(rating),
        created_at: ActiveValue::Set(Utc::now()),
        ..Default::default()
    }
    .insert(db)
    .await
}

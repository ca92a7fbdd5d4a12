//! Comment factory.

use chrono::Utc;
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};

/// Creates a comment by `user_id` on `car_id`.
///
/// # Arguments
/// - `db` - Database connection
/// - `car_id` - Car being commented on
/// - `user_id` - Author of the comment
/// - `content` - Comment text
///
/// # Returns
/// - `Ok(entity::comment::Model)` - Created comment entity
/// - `Err(DbErr)` - Database error during insert
pub async fn create_comment(
    db: &DatabaseConnection,
    car_id: i32,
    user_id: i32,
    content: impl Into<String>,
) -> Result<entity::comment::Model, DbErr> {
    let now = Utc::now();
    entity::comment::ActiveModel {
        car_id: ActiveValue::Set(car_id),
        user_id: ActiveValue::Set(user_id),
        content: ActiveValue::Set(content.into()),
        created_at: ActiveValue::Set(now),
        updated_at: ActiveValue::Set(now),
        ..Default::default()
    }
    .insert(db)
    .await
}

//! Rating data repository.
//!
//! `RatingRepository` is generic over the connection so the rating upsert can run its
//! lookup and write inside a transaction while plain reads use the connection pool.

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait, DatabaseConnection, DbErr,
    EntityTrait, QueryFilter, QueryOrder, QuerySelect,
};
use std::collections::HashMap;

use crate::server::model::rating::{average_rating, Rating};

pub struct RatingRepository<'a, C = DatabaseConnection> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> RatingRepository<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    /// Finds the rating a user gave a car, if any
    pub async fn find_by_car_and_user(
        &self,
        car_id: i32,
        user_id: i32,
    ) -> Result<Option<entity::rating::Model>, DbErr> {
        entity::prelude::Rating::find()
            .filter(entity::rating::Column::CarId.eq(car_id))
            .filter(entity::rating::Column::UserId.eq(user_id))
            .one(self.db)
            .await
    }

    /// Inserts a new rating
    ///
    /// # Returns
    /// - `Ok(Model)` - The created rating
    /// - `Err(DbErr)` - Database error; a rating for the same (car, user) pair fails with
    ///   `SqlErr::UniqueConstraintViolation`
    pub async fn create(
        &self,
        car_id: i32,
        user_id: i32,
        value: i32,
    ) -> Result<entity::rating::Model, DbErr> {
        entity::rating::ActiveModel {
            car_id: ActiveValue::Set(car_id),
            user_id: ActiveValue::Set(user_id),
            rating: ActiveValue::Set(value),
            created_at: ActiveValue::Set(Utc::now()),
            ..Default::default()
        }
        .insert(self.db)
        .await
    }

    /// Overwrites the value of an existing rating, keeping its ID and creation time
    pub async fn update_value(
        &self,
        rating: entity::rating::Model,
        value: i32,
    ) -> Result<entity::rating::Model, DbErr> {
        let mut active_model: entity::rating::ActiveModel = rating.into();
        active_model.rating = ActiveValue::Set(value);

        active_model.update(self.db).await
    }

    /// Gets the ratings of several cars, grouped by car ID and ordered by ID
    pub async fn get_by_car_ids(
        &self,
        car_ids: &[i32],
    ) -> Result<HashMap<i32, Vec<Rating>>, DbErr> {
        let rows = entity::prelude::Rating::find()
            .filter(entity::rating::Column::CarId.is_in(car_ids.iter().copied()))
            .find_also_related(entity::prelude::User)
            .order_by_asc(entity::rating::Column::Id)
            .all(self.db)
            .await?;

        let mut grouped: HashMap<i32, Vec<Rating>> = HashMap::new();
        for (rating, rater) in rows {
            let username = rater.map(|user| user.username).unwrap_or_default();
            grouped
                .entry(rating.car_id)
                .or_default()
                .push(Rating::from_entity(rating, username));
        }

        Ok(grouped)
    }

    /// Mean of a car's current ratings, 0.0 when it has none
    pub async fn average_for_car(&self, car_id: i32) -> Result<f64, DbErr> {
        let values: Vec<i32> = entity::prelude::Rating::find()
            .select_only()
            .column(entity::rating::Column::Rating)
            .filter(entity::rating::Column::CarId.eq(car_id))
            .into_tuple()
            .all(self.db)
            .await?;

        Ok(average_rating(&values))
    }
}

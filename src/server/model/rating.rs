//! Domain models for car ratings and the rating average

use chrono::{DateTime, Utc};

use crate::model::car::{RatingDto, RatingResultDto};

pub const MIN_RATING: i32 = 1;
pub const MAX_RATING: i32 = 5;

/// A user's rating of a car together with the rater's username
#[derive(Debug, Clone)]
pub struct Rating {
    pub id: i32,
    pub user_username: String,
    pub rating: i32,
    pub created_at: DateTime<Utc>,
}

impl Rating {
    pub fn from_entity(entity: entity::rating::Model, user_username: String) -> Self {
        Self {
            id: entity.id,
            user_username,
            rating: entity.rating,
            created_at: entity.created_at,
        }
    }

    pub fn into_dto(self) -> RatingDto {
        RatingDto {
            id: self.id,
            rating: self.rating,
            user_username: self.user_username,
            created_at: self.created_at,
        }
    }
}

/// Outcome of a rating upsert: the written rating and the car's recomputed average
#[derive(Debug, Clone)]
pub struct RatingResult {
    pub rating: Rating,
    pub average_rating: f64,
}

impl RatingResult {
    pub fn into_dto(self) -> RatingResultDto {
        RatingResultDto {
            rating: self.rating.into_dto(),
            average_rating: self.average_rating,
        }
    }
}

/// Returns true if `value` lies within the accepted rating range
pub fn is_valid_rating(value: i32) -> bool {
    (MIN_RATING..=MAX_RATING).contains(&value)
}

/// Arithmetic mean of the given rating values, 0.0 when there are none
pub fn average_rating(values: &[i32]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }

    let sum: i64 = values.iter().map(|&v| v as i64).sum();
    sum as f64 / values.len() as f64
}

//! Domain & parameter models for car listings
//!
//! Defines the car domain model, the aggregate of a car with its images, comments and
//! ratings, and the parameter models for creating, filtering and updating cars.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

use crate::{
    model::car::{CarDto, CarListQuery, CreateCarDto, PatchCarDto},
    server::{
        model::{
            comment::Comment,
            image::CarImage,
            rating::{average_rating, Rating},
        },
        storage::ImageStorage,
    },
};

/// The car domain model
#[derive(Debug, Clone)]
pub struct Car {
    pub id: i32,
    pub owner_id: i32,
    pub make: String,
    pub model: String,
    pub year: i32,
    pub price_per_day: Decimal,
    pub description: String,
    pub location: String,
    pub available: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Car {
    pub fn from_entity(entity: entity::car::Model) -> Self {
        Self {
            id: entity.id,
            owner_id: entity.owner_id,
            make: entity.make,
            model: entity.model,
            year: entity.year,
            price_per_day: entity.price_per_day,
            description: entity.description,
            location: entity.location,
            available: entity.available,
            created_at: entity.created_at,
            updated_at: entity.updated_at,
        }
    }
}

/// A car with its owner's username and every related image, comment and rating
///
/// Images, comments and ratings are ordered by ID, which matches creation order.
#[derive(Debug, Clone)]
pub struct CarDetail {
    pub car: Car,
    pub owner_username: String,
    pub images: Vec<CarImage>,
    pub comments: Vec<Comment>,
    pub ratings: Vec<Rating>,
}

impl CarDetail {
    /// Mean of the car's current ratings, 0.0 when it has none
    pub fn average_rating(&self) -> f64 {
        let values: Vec<i32> = self.ratings.iter().map(|r| r.rating).collect();
        average_rating(&values)
    }

    /// Converts the aggregate into its DTO
    ///
    /// # Arguments
    /// - `storage` - Image storage used to resolve image keys into public URLs
    pub fn into_dto(self, storage: &ImageStorage) -> CarDto {
        let average_rating = self.average_rating();
        let car = self.car;

        CarDto {
            id: car.id,
            owner: car.owner_id,
            owner_username: self.owner_username,
            make: car.make,
            model: car.model,
            year: car.year,
            price_per_day: car.price_per_day,
            description: car.description,
            location: car.location,
            available: car.available,
            images: self
                .images
                .into_iter()
                .map(|image| image.into_dto(storage))
                .collect(),
            comments: self.comments.into_iter().map(Comment::into_dto).collect(),
            ratings: self.ratings.into_iter().map(Rating::into_dto).collect(),
            average_rating,
            created_at: car.created_at,
            updated_at: car.updated_at,
        }
    }
}

/// Optional predicates applied when listing cars; `None` matches every car
#[derive(Debug, Clone, Default)]
pub struct CarFilter {
    pub available: Option<bool>,
    pub owner_id: Option<i32>,
}

impl From<CarListQuery> for CarFilter {
    fn from(query: CarListQuery) -> Self {
        Self {
            available: query.available,
            owner_id: query.owner,
        }
    }
}

/// Parameters for creating a new car owned by `owner_id`
#[derive(Debug, Clone)]
pub struct CreateCarParams {
    pub owner_id: i32,
    pub make: String,
    pub model: String,
    pub year: i32,
    pub price_per_day: Decimal,
    pub description: String,
    pub location: String,
    pub available: bool,
}

impl CreateCarParams {
    /// Builds creation parameters from a validated payload, binding the car to its owner
    pub fn from_dto(owner_id: i32, dto: CreateCarDto) -> Self {
        Self {
            owner_id,
            make: dto.make,
            model: dto.model,
            year: dto.year,
            price_per_day: dto.price_per_day,
            description: dto.description,
            location: dto.location,
            available: dto.available,
        }
    }
}

/// Parameters for updating an existing car
///
/// Fields set to `None` keep their stored value. The owner is never changed.
#[derive(Debug, Clone, Default)]
pub struct UpdateCarParams {
    pub id: i32,
    pub make: Option<String>,
    pub model: Option<String>,
    pub year: Option<i32>,
    pub price_per_day: Option<Decimal>,
    pub description: Option<String>,
    pub location: Option<String>,
    pub available: Option<bool>,
}

impl UpdateCarParams {
    /// Full replacement: every editable field takes the payload's value
    pub fn from_replace_dto(id: i32, dto: CreateCarDto) -> Self {
        Self {
            id,
            make: Some(dto.make),
            model: Some(dto.model),
            year: Some(dto.year),
            price_per_day: Some(dto.price_per_day),
            description: Some(dto.description),
            location: Some(dto.location),
            available: Some(dto.available),
        }
    }

    /// Partial update: only the fields present in the payload change
    pub fn from_patch_dto(id: i32, dto: PatchCarDto) -> Self {
        Self {
            id,
            make: dto.make,
            model: dto.model,
            year: dto.year,
            price_per_day: dto.price_per_day,
            description: dto.description,
            location: dto.location,
            available: dto.available,
        }
    }
}

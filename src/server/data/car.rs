//! Car data repository for database operations.
//!
//! Provides the `CarRepository` for car listings and for loading the car aggregate:
//! the car with its owner's username and all of its images, comments and ratings.

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, DatabaseConnection, DbErr, EntityTrait,
    QueryFilter, QueryOrder, QuerySelect, TransactionTrait,
};

use crate::server::{
    data::{
        car_image::CarImageRepository, comment::CommentRepository, rating::RatingRepository,
        user::UserRepository,
    },
    model::car::{Car, CarDetail, CarFilter, CreateCarParams, UpdateCarParams},
};

pub struct CarRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> CarRepository<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Creates a new car with creation and update timestamps set to now
    pub async fn create(&self, params: CreateCarParams) -> Result<Car, DbErr> {
        let now = Utc::now();

        let entity = entity::car::ActiveModel {
            owner_id: ActiveValue::Set(params.owner_id),
            make: ActiveValue::Set(params.make),
            model: ActiveValue::Set(params.model),
            year: ActiveValue::Set(params.year),
            price_per_day: ActiveValue::Set(params.price_per_day),
            description: ActiveValue::Set(params.description),
            location: ActiveValue::Set(params.location),
            available: ActiveValue::Set(params.available),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
            ..Default::default()
        }
        .insert(self.db)
        .await?;

        Ok(Car::from_entity(entity))
    }

    pub async fn find_by_id(&self, id: i32) -> Result<Option<Car>, DbErr> {
        let entity = entity::prelude::Car::find_by_id(id).one(self.db).await?;

        Ok(entity.map(Car::from_entity))
    }

    /// Gets all cars matching the filter, ordered by ID
    pub async fn get_all(&self, filter: CarFilter) -> Result<Vec<Car>, DbErr> {
        let mut query = entity::prelude::Car::find();

        if let Some(available) = filter.available {
            query = query.filter(entity::car::Column::Available.eq(available));
        }

        if let Some(owner_id) = filter.owner_id {
            query = query.filter(entity::car::Column::OwnerId.eq(owner_id));
        }

        let entities = query
            .order_by_asc(entity::car::Column::Id)
            .all(self.db)
            .await?;

        Ok(entities.into_iter().map(Car::from_entity).collect())
    }

    /// Gets a car with all of its related data
    ///
    /// # Returns
    /// - `Ok(Some(CarDetail))` - Car found with images, comments, ratings and owner username
    /// - `Ok(None)` - No car with that ID
    /// - `Err(DbErr)` - Database error during any of the queries
    pub async fn get_detail_by_id(&self, id: i32) -> Result<Option<CarDetail>, DbErr> {
        let Some(car) = self.find_by_id(id).await? else {
            return Ok(None);
        };

        Ok(self.load_details(vec![car]).await?.pop())
    }

    /// Gets all cars matching the filter with their related data, ordered by ID
    pub async fn get_all_details(&self, filter: CarFilter) -> Result<Vec<CarDetail>, DbErr> {
        let cars = self.get_all(filter).await?;

        self.load_details(cars).await
    }

    /// Loads related data for a batch of cars with one query per relation.
    async fn load_details(&self, cars: Vec<Car>) -> Result<Vec<CarDetail>, DbErr> {
        if cars.is_empty() {
            return Ok(Vec::new());
        }

        let car_ids: Vec<i32> = cars.iter().map(|car| car.id).collect();
        let owner_ids: Vec<i32> = cars.iter().map(|car| car.owner_id).collect();

        let mut images = CarImageRepository::new(self.db)
            .get_by_car_ids(&car_ids)
            .await?;
        let mut comments = CommentRepository::new(self.db)
            .get_by_car_ids(&car_ids)
            .await?;
        let mut ratings = RatingRepository::new(self.db)
            .get_by_car_ids(&car_ids)
            .await?;
        let owners = UserRepository::new(self.db).get_usernames(&owner_ids).await?;

        Ok(cars
            .into_iter()
            .map(|car| CarDetail {
                owner_username: owners.get(&car.owner_id).cloned().unwrap_or_default(),
                images: images.remove(&car.id).unwrap_or_default(),
                comments: comments.remove(&car.id).unwrap_or_default(),
                ratings: ratings.remove(&car.id).unwrap_or_default(),
                car,
            })
            .collect())
    }

    /// Updates the supplied fields of a car and refreshes `updated_at`
    ///
    /// # Returns
    /// - `Ok(Car)` - The updated car
    /// - `Err(DbErr::RecordNotFound)` - No car with that ID
    /// - `Err(DbErr)` - Database error during update
    pub async fn update(&self, params: UpdateCarParams) -> Result<Car, DbErr> {
        let entity = entity::prelude::Car::find_by_id(params.id)
            .one(self.db)
            .await?
            .ok_or_else(|| DbErr::RecordNotFound(format!("Car with id {} not found", params.id)))?;

        let mut active_model: entity::car::ActiveModel = entity.into();

        if let Some(make) = params.make {
            active_model.make = ActiveValue::Set(make);
        }
        if let Some(model) = params.model {
            active_model.model = ActiveValue::Set(model);
        }
        if let Some(year) = params.year {
            active_model.year = ActiveValue::Set(year);
        }
        if let Some(price_per_day) = params.price_per_day {
            active_model.price_per_day = ActiveValue::Set(price_per_day);
        }
        if let Some(description) = params.description {
            active_model.description = ActiveValue::Set(description);
        }
        if let Some(location) = params.location {
            active_model.location = ActiveValue::Set(location);
        }
        if let Some(available) = params.available {
            active_model.available = ActiveValue::Set(available);
        }
        active_model.updated_at = ActiveValue::Set(Utc::now());

        let entity = active_model.update(self.db).await?;

        Ok(Car::from_entity(entity))
    }

    /// Deletes a car together with its ratings, comments and images in one transaction
    ///
    /// # Returns
    /// - `Ok(Vec<String>)` - Storage keys of the deleted image rows, for blob cleanup
    /// - `Err(DbErr)` - Database error, nothing was deleted
    pub async fn delete(&self, id: i32) -> Result<Vec<String>, DbErr> {
        let txn = self.db.begin().await?;

        let image_keys: Vec<String> = entity::prelude::CarImage::find()
            .select_only()
            .column(entity::car_image::Column::Image)
            .filter(entity::car_image::Column::CarId.eq(id))
            .order_by_asc(entity::car_image::Column::Id)
            .into_tuple()
            .all(&txn)
            .await?;

        entity::prelude::Rating::delete_many()
            .filter(entity::rating::Column::CarId.eq(id))
            .exec(&txn)
            .await?;

        entity::prelude::Comment::delete_many()
            .filter(entity::comment::Column::CarId.eq(id))
            .exec(&txn)
            .await?;

        entity::prelude::CarImage::delete_many()
            .filter(entity::car_image::Column::CarId.eq(id))
            .exec(&txn)
            .await?;

        entity::prelude::Car::delete_by_id(id).exec(&txn).await?;

        txn.commit().await?;

        Ok(image_keys)
    }
}

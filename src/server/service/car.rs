//! Car service for business logic.
//!
//! This module provides the `CarService`, which applies the car access policy to the
//! acting user and coordinates the car, image, comment and rating repositories with
//! image storage. All reads return the full car aggregate.

use sea_orm::{DatabaseConnection, DbErr, TransactionTrait};

use crate::server::{
    data::{
        car::CarRepository, car_image::CarImageRepository, comment::CommentRepository,
        rating::RatingRepository,
    },
    error::{auth::AuthError, AppError},
    middleware::policy::{allowed, CarAction},
    model::{
        car::{Car, CarDetail, CarFilter, CreateCarParams, UpdateCarParams},
        comment::{Comment, CreateCommentParams},
        image::{CarImage, NewCarImage, UploadedImage},
        rating::{is_valid_rating, Rating, RatingResult, MAX_RATING, MIN_RATING},
        user::User,
    },
    storage::{validate_image, ImageStorage},
    util::db::is_unique_violation,
};

/// Service providing business logic for car listings and their images, comments
/// and ratings.
pub struct CarService<'a> {
    db: &'a DatabaseConnection,
    storage: &'a ImageStorage,
}

impl<'a> CarService<'a> {
    /// Creates a new CarService instance.
    ///
    /// # Arguments
    /// - `db` - Reference to the database connection
    /// - `storage` - Storage uploaded images are written to and removed from
    pub fn new(db: &'a DatabaseConnection, storage: &'a ImageStorage) -> Self {
        Self { db, storage }
    }

    /// Lists all cars matching the filter, ordered by ID
    pub async fn list(&self, filter: CarFilter) -> Result<Vec<CarDetail>, AppError> {
        Ok(CarRepository::new(self.db).get_all_details(filter).await?)
    }

    /// Lists cars currently available for rent
    pub async fn list_available(&self) -> Result<Vec<CarDetail>, AppError> {
        self.list(CarFilter {
            available: Some(true),
            owner_id: None,
        })
        .await
    }

    /// Lists the cars owned by the acting user
    pub async fn list_owned_by(&self, actor: &User) -> Result<Vec<CarDetail>, AppError> {
        self.list(CarFilter {
            available: None,
            owner_id: Some(actor.id),
        })
        .await
    }

    /// Gets a single car with all related data
    ///
    /// # Returns
    /// - `Ok(CarDetail)` - The car aggregate
    /// - `Err(AppError::NotFound)` - No car with that ID
    pub async fn get_by_id(&self, id: i32) -> Result<CarDetail, AppError> {
        CarRepository::new(self.db)
            .get_detail_by_id(id)
            .await?
            .ok_or_else(|| car_not_found(id))
    }

    /// Gets a single car on behalf of `actor`, `None` for anonymous callers
    ///
    /// # Returns
    /// - `Ok(CarDetail)` - The car aggregate
    /// - `Err(AppError::NotFound)` - No car with that ID
    /// - `Err(AuthError::AccessDenied)` - The read policy rejected the actor
    pub async fn view(&self, actor: Option<&User>, id: i32) -> Result<CarDetail, AppError> {
        let detail = self.get_by_id(id).await?;

        let actor_id = actor.map(|user| user.id);
        if !allowed(actor_id, CarAction::Read, &detail.car) {
            return Err(AuthError::AccessDenied(
                actor_id.unwrap_or_default(),
                format!("Actor attempted to read car {}", detail.car.id),
            )
            .into());
        }

        Ok(detail)
    }

    /// Creates a car owned by the acting user
    ///
    /// The owner is always taken from `params.owner_id`, which the controller binds to
    /// the session's user; it is never read from the request body.
    pub async fn create(&self, params: CreateCarParams) -> Result<CarDetail, AppError> {
        let car = CarRepository::new(self.db).create(params).await?;

        tracing::info!("User {} created car {}", car.owner_id, car.id);

        self.get_by_id(car.id).await
    }

    /// Updates a car owned by the acting user
    ///
    /// # Returns
    /// - `Ok(CarDetail)` - The updated car aggregate
    /// - `Err(AppError::NotFound)` - No car with that ID
    /// - `Err(AuthError::AccessDenied)` - The actor does not own the car
    pub async fn update(
        &self,
        actor: &User,
        params: UpdateCarParams,
    ) -> Result<CarDetail, AppError> {
        let car = self.find_authorized(actor, params.id, CarAction::Update).await?;

        CarRepository::new(self.db).update(params).await?;

        tracing::info!("User {} updated car {}", actor.id, car.id);

        self.get_by_id(car.id).await
    }

    /// Deletes a car with its images, comments and ratings
    ///
    /// Stored image files are removed after the rows are gone. Failing to remove a file
    /// is logged and does not fail the request.
    ///
    /// # Returns
    /// - `Ok(())` - The car and all related rows were deleted
    /// - `Err(AppError::NotFound)` - No car with that ID
    /// - `Err(AuthError::AccessDenied)` - The actor does not own the car
    pub async fn delete(&self, actor: &User, id: i32) -> Result<(), AppError> {
        let car = self.find_authorized(actor, id, CarAction::Delete).await?;

        let image_keys = CarRepository::new(self.db).delete(car.id).await?;

        self.storage.remove_all(&image_keys).await;

        tracing::info!(
            "User {} deleted car {} and {} image(s)",
            actor.id,
            car.id,
            image_keys.len()
        );

        Ok(())
    }

    /// Checks the actor may upload images for a car, before any upload is read
    ///
    /// # Returns
    /// - `Ok(Car)` - The car, owned by the actor
    /// - `Err(AppError::NotFound)` - No car with that ID
    /// - `Err(AuthError::AccessDenied)` - The actor does not own the car
    pub async fn authorize_upload(&self, actor: &User, car_id: i32) -> Result<Car, AppError> {
        self.find_authorized(actor, car_id, CarAction::UploadImages)
            .await
    }

    /// Stores uploaded images for a car and records them in upload order
    ///
    /// Every file is checked before anything is written. Files are then stored, after
    /// which all rows are inserted in one transaction; if that fails, the stored files
    /// are removed again. When `is_primary` is set only the first image is marked primary.
    ///
    /// # Returns
    /// - `Ok(Vec<CarImage>)` - Created images in upload order
    /// - `Err(AppError::NotFound)` - No car with that ID
    /// - `Err(AuthError::AccessDenied)` - The actor does not own the car
    /// - `Err(AppError::BadRequest)` - No images, or a file is empty or not an image
    pub async fn upload_images(
        &self,
        actor: &User,
        car_id: i32,
        images: Vec<UploadedImage>,
        is_primary: bool,
    ) -> Result<Vec<CarImage>, AppError> {
        let car = self.authorize_upload(actor, car_id).await?;

        if images.is_empty() {
            return Err(AppError::BadRequest("No images provided.".to_string()));
        }

        for image in &images {
            validate_image(image)?;
        }

        let mut stored_keys = Vec::with_capacity(images.len());
        for image in &images {
            match self.storage.save(image).await {
                Ok(key) => stored_keys.push(key),
                Err(e) => {
                    self.storage.remove_all(&stored_keys).await;
                    return Err(e);
                }
            }
        }

        let rows = stored_keys
            .iter()
            .enumerate()
            .map(|(index, key)| NewCarImage {
                image: key.clone(),
                is_primary: is_primary && index == 0,
            })
            .collect();

        let created = match CarImageRepository::new(self.db)
            .create_many(car.id, rows)
            .await
        {
            Ok(created) => created,
            Err(e) => {
                self.storage.remove_all(&stored_keys).await;
                return Err(e.into());
            }
        };

        tracing::info!(
            "User {} uploaded {} image(s) for car {}",
            actor.id,
            created.len(),
            car.id
        );

        Ok(created)
    }

    /// Adds a comment by the acting user to a car
    ///
    /// # Returns
    /// - `Ok(Comment)` - The created comment with the author's username
    /// - `Err(AppError::BadRequest)` - Content is empty or whitespace only
    /// - `Err(AppError::NotFound)` - No car with that ID
    pub async fn add_comment(
        &self,
        actor: &User,
        car_id: i32,
        content: String,
    ) -> Result<Comment, AppError> {
        if content.trim().is_empty() {
            return Err(AppError::BadRequest(
                "Comment content may not be blank.".to_string(),
            ));
        }

        let car = self.find_authorized(actor, car_id, CarAction::Comment).await?;

        let comment = CommentRepository::new(self.db)
            .create(CreateCommentParams {
                car_id: car.id,
                user_id: actor.id,
                content,
            })
            .await?;

        Ok(comment)
    }

    /// Records the acting user's rating of a car, replacing any earlier rating
    ///
    /// The lookup and write run in one transaction so a user never ends up with two
    /// ratings for the same car. If a concurrent request inserted the rating first the
    /// unique index rejects this insert and `Conflict` is returned; retrying then
    /// updates the existing rating.
    ///
    /// # Returns
    /// - `Ok(RatingResult)` - The written rating and the car's new average
    /// - `Err(AppError::BadRequest)` - Value outside 1..=5
    /// - `Err(AppError::NotFound)` - No car with that ID
    /// - `Err(AppError::Conflict)` - Concurrent first rating by the same user
    pub async fn add_or_update_rating(
        &self,
        actor: &User,
        car_id: i32,
        value: i32,
    ) -> Result<RatingResult, AppError> {
        if !is_valid_rating(value) {
            return Err(AppError::BadRequest(format!(
                "Rating must be between {} and {}.",
                MIN_RATING, MAX_RATING
            )));
        }

        let car = self.find_authorized(actor, car_id, CarAction::Rate).await?;

        let txn = self.db.begin().await?;
        let rating_repo = RatingRepository::new(&txn);

        let entity = match rating_repo.find_by_car_and_user(car.id, actor.id).await? {
            Some(existing) => rating_repo.update_value(existing, value).await?,
            None => rating_repo
                .create(car.id, actor.id, value)
                .await
                .map_err(|e| rating_insert_error(e, actor, &car))?,
        };

        txn.commit().await?;

        let average_rating = RatingRepository::new(self.db)
            .average_for_car(car.id)
            .await?;

        tracing::debug!(
            "User {} rated car {} with {}, average now {:.2}",
            actor.id,
            car.id,
            value,
            average_rating
        );

        Ok(RatingResult {
            rating: Rating::from_entity(entity, actor.username.clone()),
            average_rating,
        })
    }

    /// Finds a car and checks the actor may perform `action` on it
    async fn find_authorized(
        &self,
        actor: &User,
        car_id: i32,
        action: CarAction,
    ) -> Result<Car, AppError> {
        let car = CarRepository::new(self.db)
            .find_by_id(car_id)
            .await?
            .ok_or_else(|| car_not_found(car_id))?;

        if !allowed(Some(actor.id), action, &car) {
            return Err(AuthError::AccessDenied(
                actor.id,
                format!(
                    "User attempted to {} car {} owned by user {}",
                    action.as_str(),
                    car.id,
                    car.owner_id
                ),
            )
            .into());
        }

        Ok(car)
    }
}

/// Maps a failed rating insert, turning a lost race on the (car, user) unique index
/// into a retryable `Conflict`
pub(crate) fn rating_insert_error(err: DbErr, actor: &User, car: &Car) -> AppError {
    if is_unique_violation(&err) {
        AppError::Conflict(format!(
            "User {} already rated car {}, retry to update the rating",
            actor.id, car.id
        ))
    } else {
        err.into()
    }
}

fn car_not_found(id: i32) -> AppError {
    AppError::NotFound(format!("Car {} not found", id))
}

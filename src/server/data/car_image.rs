use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, DatabaseConnection, DbErr, EntityTrait,
    QueryFilter, QueryOrder, TransactionTrait,
};
use std::collections::HashMap;

use crate::server::model::image::{CarImage, NewCarImage};

pub struct CarImageRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> CarImageRepository<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Inserts image rows for a car in list order within a single transaction
    ///
    /// Either every row is inserted or none is.
    ///
    /// # Returns
    /// - `Ok(Vec<CarImage>)` - Created images in creation order
    /// - `Err(DbErr)` - Database error, the transaction was rolled back
    pub async fn create_many(
        &self,
        car_id: i32,
        images: Vec<NewCarImage>,
    ) -> Result<Vec<CarImage>, DbErr> {
        let txn = self.db.begin().await?;
        let now = Utc::now();

        let mut created = Vec::with_capacity(images.len());
        for image in images {
            let entity = entity::car_image::ActiveModel {
                car_id: ActiveValue::Set(car_id),
                image: ActiveValue::Set(image.image),
                is_primary: ActiveValue::Set(image.is_primary),
                uploaded_at: ActiveValue::Set(now),
                ..Default::default()
            }
            .insert(&txn)
            .await?;

            created.push(CarImage::from_entity(entity));
        }

        txn.commit().await?;

        Ok(created)
    }

    /// Gets the images of several cars, grouped by car ID and ordered by ID
    pub async fn get_by_car_ids(
        &self,
        car_ids: &[i32],
    ) -> Result<HashMap<i32, Vec<CarImage>>, DbErr> {
        let entities = entity::prelude::CarImage::find()
            .filter(entity::car_image::Column::CarId.is_in(car_ids.iter().copied()))
            .order_by_asc(entity::car_image::Column::Id)
            .all(self.db)
            .await?;

        let mut grouped: HashMap<i32, Vec<CarImage>> = HashMap::new();
        for entity in entities {
            grouped
                .entry(entity.car_id)
                .or_default()
                .push(CarImage::from_entity(entity));
        }

        Ok(grouped)
    }
}

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, DatabaseConnection, DbErr, EntityTrait,
    QueryFilter, QueryOrder,
};
use std::collections::HashMap;

use crate::server::model::comment::{Comment, CreateCommentParams};

pub struct CommentRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> CommentRepository<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Creates a comment and returns it with the author's username
    pub async fn create(&self, params: CreateCommentParams) -> Result<Comment, DbErr> {
        let now = Utc::now();

        let entity = entity::comment::ActiveModel {
            car_id: ActiveValue::Set(params.car_id),
            user_id: ActiveValue::Set(params.user_id),
            content: ActiveValue::Set(params.content),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
            ..Default::default()
        }
        .insert(self.db)
        .await?;

        let author = entity::prelude::User::find_by_id(entity.user_id)
            .one(self.db)
            .await?
            .ok_or_else(|| {
                DbErr::RecordNotFound(format!("User with id {} not found", entity.user_id))
            })?;

        Ok(Comment::from_entity(entity, author.username))
    }

    /// Gets the comments of several cars, grouped by car ID and ordered by ID
    pub async fn get_by_car_ids(
        &self,
        car_ids: &[i32],
    ) -> Result<HashMap<i32, Vec<Comment>>, DbErr> {
        let rows = entity::prelude::Comment::find()
            .filter(entity::comment::Column::CarId.is_in(car_ids.iter().copied()))
            .find_also_related(entity::prelude::User)
            .order_by_asc(entity::comment::Column::Id)
            .all(self.db)
            .await?;

        let mut grouped: HashMap<i32, Vec<Comment>> = HashMap::new();
        for (comment, author) in rows {
            let username = author.map(|user| user.username).unwrap_or_default();
            grouped
                .entry(comment.car_id)
                .or_default()
                .push(Comment::from_entity(comment, username));
        }

        Ok(grouped)
    }
}

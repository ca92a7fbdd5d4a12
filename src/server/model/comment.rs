//! Domain & parameter models for car comments

use chrono::{DateTime, Utc};

use crate::model::car::CommentDto;

/// A comment on a car together with its author's username
#[derive(Debug, Clone)]
pub struct Comment {
    pub id: i32,
    pub user_username: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Comment {
    /// Converts an entity model to the comment domain model
    ///
    /// # Arguments
    /// - `entity` - The comment entity model from the database
    /// - `user_username` - Username of the comment's author
    pub fn from_entity(entity: entity::comment::Model, user_username: String) -> Self {
        Self {
            id: entity.id,
            user_username,
            content: entity.content,
            created_at: entity.created_at,
            updated_at: entity.updated_at,
        }
    }

    pub fn into_dto(self) -> CommentDto {
        CommentDto {
            id: self.id,
            content: self.content,
            user_username: self.user_username,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

#[derive(Debug, Clone)]
pub struct CreateCommentParams {
    pub car_id: i32,
    pub user_id: i32,
    pub content: String,
}

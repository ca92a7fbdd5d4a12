//! User data repository for database operations.
//!
//! This module provides the `UserRepository` for managing user records in the database.
//! It handles account creation and lookups by ID or username, converting entity models
//! into the user domain model at the infrastructure boundary.

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, DatabaseConnection, DbErr, EntityTrait,
    QueryFilter, QuerySelect,
};
use std::collections::HashMap;

use crate::server::model::user::{CreateUserParams, User, DEFAULT_ROLE};

/// Repository providing database operations for user management.
///
/// This struct holds a reference to the database connection and provides methods
/// for creating and reading user records.
pub struct UserRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> UserRepository<'a> {
    /// Creates a new UserRepository instance.
    ///
    /// # Arguments
    /// - `db` - Reference to the database connection
    ///
    /// # Returns
    /// - `UserRepository` - New repository instance
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Creates a new user with the default role.
    ///
    /// # Arguments
    /// - `params` - Account fields including the already hashed password
    ///
    /// # Returns
    /// - `Ok(User)` - The created user
    /// - `Err(DbErr)` - Database error, including a unique violation if the username is taken
    pub async fn create(&self, params: CreateUserParams) -> Result<User, DbErr> {
        let entity = entity::user::ActiveModel {
            username: ActiveValue::Set(params.username),
            email: ActiveValue::Set(params.email),
            password_hash: ActiveValue::Set(params.password_hash),
            role: ActiveValue::Set(DEFAULT_ROLE.to_string()),
            phone_number: ActiveValue::Set(params.phone_number),
            address: ActiveValue::Set(params.address),
            created_at: ActiveValue::Set(Utc::now()),
            ..Default::default()
        }
        .insert(self.db)
        .await?;

        Ok(User::from_entity(entity))
    }

    /// Finds a user by ID.
    ///
    /// # Returns
    /// - `Ok(Some(User))` - User found
    /// - `Ok(None)` - No user with that ID
    /// - `Err(DbErr)` - Database error during query
    pub async fn find_by_id(&self, user_id: i32) -> Result<Option<User>, DbErr> {
        let entity = entity::prelude::User::find_by_id(user_id)
            .one(self.db)
            .await?;

        Ok(entity.map(User::from_entity))
    }

    /// Finds a user by their exact username.
    pub async fn find_by_username(&self, username: &str) -> Result<Option<User>, DbErr> {
        let entity = entity::prelude::User::find()
            .filter(entity::user::Column::Username.eq(username))
            .one(self.db)
            .await?;

        Ok(entity.map(User::from_entity))
    }

    /// Maps each of the given user IDs to its username.
    ///
    /// IDs without a matching user are absent from the returned map.
    pub async fn get_usernames(&self, user_ids: &[i32]) -> Result<HashMap<i32, String>, DbErr> {
        if user_ids.is_empty() {
            return Ok(HashMap::new());
        }

        let rows: Vec<(i32, String)> = entity::prelude::User::find()
            .select_only()
            .column(entity::user::Column::Id)
            .column(entity::user::Column::Username)
            .filter(entity::user::Column::Id.is_in(user_ids.iter().copied()))
            .into_tuple()
            .all(self.db)
            .await?;

        Ok(rows.into_iter().collect())
    }
}

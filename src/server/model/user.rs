//! Domain & parameter models for user accounts

use chrono::{DateTime, Utc};

use crate::model::user::{RegisterDto, UserDto};

/// The user domain model
///
/// Holds the stored password hash so the login flow can verify credentials; the hash
/// never leaves the server since `into_dto` drops it.
#[derive(Debug, Clone)]
pub struct User {
    pub id: i32,
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub role: String,
    pub phone_number: String,
    pub address: String,
    pub created_at: DateTime<Utc>,
}

impl User {
    pub fn from_entity(entity: entity::user::Model) -> Self {
        Self {
            id: entity.id,
            username: entity.username,
            email: entity.email,
            password_hash: entity.password_hash,
            role: entity.role,
            phone_number: entity.phone_number,
            address: entity.address,
            created_at: entity.created_at,
        }
    }

    pub fn into_dto(self) -> UserDto {
        UserDto {
            id: self.id,
            username: self.username,
            email: self.email,
            role: self.role,
            phone_number: self.phone_number,
            address: self.address,
            created_at: self.created_at,
        }
    }
}

/// Role assigned to self-registered accounts. Stored only, no permission is derived from it.
pub const DEFAULT_ROLE: &str = "CUSTOMER";

/// Parameters for creating a new user account with an already hashed password
#[derive(Debug, Clone)]
pub struct CreateUserParams {
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub phone_number: String,
    pub address: String,
}

impl CreateUserParams {
    /// Builds creation parameters from a registration payload and the hash of its password
    pub fn from_dto(dto: RegisterDto, password_hash: String) -> Self {
        Self {
            username: dto.username,
            email: dto.email.unwrap_or_default(),
            password_hash,
            phone_number: dto.phone_number.unwrap_or_default(),
            address: dto.address.unwrap_or_default(),
        }
    }
}

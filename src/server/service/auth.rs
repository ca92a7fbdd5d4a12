//! Account registration and password login.

use bcrypt::{hash, verify, DEFAULT_COST};
use sea_orm::DatabaseConnection;

use crate::{
    model::user::{LoginDto, RegisterDto},
    server::{
        data::user::UserRepository,
        error::{auth::AuthError, AppError},
        model::user::{CreateUserParams, User},
        util::db::is_unique_violation,
    },
};

pub struct AuthService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> AuthService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Creates a new account with a bcrypt hash of the supplied password.
    ///
    /// # Returns
    /// - `Ok(User)` - The created user
    /// - `Err(AppError::Conflict)` - Username already taken
    /// - `Err(AppError::BcryptErr)` - Failed to hash the password
    /// - `Err(AppError::DbErr)` - Database error during insert
    pub async fn register(&self, dto: RegisterDto) -> Result<User, AppError> {
        let user_repo = UserRepository::new(self.db);

        if user_repo.find_by_username(&dto.username).await?.is_some() {
            return Err(username_taken(&dto.username));
        }

        let password_hash = hash(&dto.password, DEFAULT_COST)?;
        let username = dto.username.clone();

        let user = user_repo
            .create(CreateUserParams::from_dto(dto, password_hash))
            .await
            .map_err(|e| {
                if is_unique_violation(&e) {
                    username_taken(&username)
                } else {
                    e.into()
                }
            })?;

        tracing::info!("Registered user {} ({})", user.username, user.id);

        Ok(user)
    }

    /// Verifies a username and password pair.
    ///
    /// # Returns
    /// - `Ok(User)` - Credentials match a stored user
    /// - `Err(AuthError::InvalidCredentials)` - Unknown username or wrong password
    pub async fn login(&self, dto: LoginDto) -> Result<User, AppError> {
        let Some(user) = UserRepository::new(self.db)
            .find_by_username(&dto.username)
            .await?
        else {
            return Err(AuthError::InvalidCredentials.into());
        };

        if !verify(&dto.password, &user.password_hash)? {
            return Err(AuthError::InvalidCredentials.into());
        }

        Ok(user)
    }
}

fn username_taken(username: &str) -> AppError {
    AppError::Conflict(format!("Username '{}' is already taken", username))
}

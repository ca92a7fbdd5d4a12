use sea_orm::DatabaseConnection;
use tower_sessions::Session;

use crate::server::{
    data::user::UserRepository,
    error::{auth::AuthError, AppError},
    middleware::session::AuthSession,
    model::user::User,
};

/// Resolves the user behind a request's session.
pub struct AuthGuard<'a> {
    db: &'a DatabaseConnection,
    session: &'a Session,
}

impl<'a> AuthGuard<'a> {
    pub fn new(db: &'a DatabaseConnection, session: &'a Session) -> Self {
        Self { db, session }
    }

    /// Returns the logged-in user or fails with 401.
    ///
    /// # Returns
    /// - `Ok(User)` - The session's user exists in the database
    /// - `Err(AuthError::UserNotInSession)` - No user ID stored in the session
    /// - `Err(AuthError::UserNotInDatabase)` - Session references a deleted user
    pub async fn require(&self) -> Result<User, AppError> {
        let Some(user_id) = AuthSession::new(self.session).get_user_id().await? else {
            return Err(AuthError::UserNotInSession.into());
        };

        let Some(user) = UserRepository::new(self.db).find_by_id(user_id).await? else {
            return Err(AuthError::UserNotInDatabase(user_id).into());
        };

        Ok(user)
    }

    /// Returns the logged-in user, or `None` for anonymous callers.
    ///
    /// A session that references a user who no longer exists counts as anonymous.
    pub async fn optional(&self) -> Result<Option<User>, AppError> {
        let Some(user_id) = AuthSession::new(self.session).get_user_id().await? else {
            return Ok(None);
        };

        Ok(UserRepository::new(self.db).find_by_id(user_id).await?)
    }
}

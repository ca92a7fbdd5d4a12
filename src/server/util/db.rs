use sea_orm::{DbErr, SqlErr};

/// Returns true if the error was raised by a unique constraint or unique index.
pub fn is_unique_violation(err: &DbErr) -> bool {
    matches!(err.sql_err(), Some(SqlErr::UniqueConstraintViolation(_)))
}

use crate::{
    model::user::{LoginDto, RegisterDto},
    server::{
        error::{auth::AuthError, AppError},
        service::auth::AuthService,
    },
};
use test_utils::builder::TestBuilder;

mod login;
mod register;

fn register_dto(username: &str, password: &str) -> RegisterDto {
    RegisterDto {
        username: username.to_string(),
        password: password.to_string(),
        email: Some(format!("{}@example.com", username)),
        phone_number: None,
        address: None,
    }
}

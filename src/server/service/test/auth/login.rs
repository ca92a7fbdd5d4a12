use super::*;

/// Tests logging in with correct credentials.
///
/// Expected: Ok with the registered user
#[tokio::test]
async fn logs_in_with_valid_credentials() -> Result<(), AppError> {
    let test = TestBuilder::new().with_car_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let service = AuthService::new(db);
    let registered = service.register(register_dto("frank", "s3cret-pass")).await?;

    let user = service
        .login(LoginDto {
            username: "frank".to_string(),
            password: "s3cret-pass".to_string(),
        })
        .await?;

    assert_eq!(user.id, registered.id);

    Ok(())
}

/// Tests logging in with a wrong password or unknown username.
///
/// Expected: Err(AuthError::InvalidCredentials) in both cases
#[tokio::test]
async fn rejects_invalid_credentials() -> Result<(), AppError> {
    let test = TestBuilder::new().with_car_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let service = AuthService::new(db);
    service.register(register_dto("frank", "s3cret-pass")).await?;

    let wrong_password = service
        .login(LoginDto {
            username: "frank".to_string(),
            password: "guess".to_string(),
        })
        .await;
    assert!(matches!(
        wrong_password,
        Err(AppError::AuthErr(AuthError::InvalidCredentials))
    ));

    let unknown_user = service
        .login(LoginDto {
            username: "nobody".to_string(),
            password: "s3cret-pass".to_string(),
        })
        .await;
    assert!(matches!(
        unknown_user,
        Err(AppError::AuthErr(AuthError::InvalidCredentials))
    ));

    Ok(())
}

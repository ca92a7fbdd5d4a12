use super::*;

/// Tests registering a new account.
///
/// Verifies the password is stored as a bcrypt hash rather than in plain text.
///
/// Expected: Ok with the created user
#[tokio::test]
async fn registers_user_with_hashed_password() -> Result<(), AppError> {
    let test = TestBuilder::new().with_car_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let user = AuthService::new(db)
        .register(register_dto("erin", "correct horse"))
        .await?;

    assert_eq!(user.username, "erin");
    assert_eq!(user.email, "erin@example.com");
    assert_ne!(user.password_hash, "correct horse");
    assert!(bcrypt::verify("correct horse", &user.password_hash)?);

    Ok(())
}

/// Tests registering a username that is already taken.
///
/// Expected: Err(AppError::Conflict)
#[tokio::test]
async fn rejects_taken_username() -> Result<(), AppError> {
    let test = TestBuilder::new().with_car_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let service = AuthService::new(db);
    service.register(register_dto("erin", "password1")).await?;

    let result = service.register(register_dto("erin", "password2")).await;

    assert!(matches!(result, Err(AppError::Conflict(_))));

    Ok(())
}

/// Tests that the optional contact details are stored and returned in the DTO.
///
/// Expected: Ok with phone number and address on the DTO, no password hash
#[tokio::test]
async fn returns_contact_details_in_dto() -> Result<(), AppError> {
    let test = TestBuilder::new().with_car_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let dto = RegisterDto {
        phone_number: Some("+351 900 000".to_string()),
        address: Some("Rua Augusta 1, Lisboa".to_string()),
        ..register_dto("frank", "correct horse")
    };

    let user = AuthService::new(db).register(dto).await?.into_dto();

    assert_eq!(user.phone_number, "+351 900 000");
    assert_eq!(user.address, "Rua Augusta 1, Lisboa");

    let json = serde_json::to_value(&user).unwrap();
    assert!(json.get("password_hash").is_none());

    Ok(())
}

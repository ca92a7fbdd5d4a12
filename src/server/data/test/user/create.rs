use super::*;

fn params(username: &str) -> CreateUserParams {
    CreateUserParams {
        username: username.to_string(),
        email: format!("{}@example.com", username),
        password_hash: "hash".to_string(),
        phone_number: String::new(),
        address: String::new(),
    }
}

/// Tests creating a user with the default role.
///
/// Expected: Ok with the user stored under role CUSTOMER
#[tokio::test]
async fn creates_user_with_default_role() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_car_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = UserRepository::new(db);
    let user = repo.create(params("alice")).await?;

    assert_eq!(user.username, "alice");
    assert_eq!(user.role, "CUSTOMER");

    let found = repo.find_by_id(user.id).await?;
    assert!(found.is_some());

    Ok(())
}

/// Tests that usernames are unique.
///
/// Expected: Err with a unique constraint violation on the second insert
#[tokio::test]
async fn rejects_duplicate_username() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_car_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = UserRepository::new(db);
    repo.create(params("alice")).await?;

    let result = repo.create(params("alice")).await;

    assert!(result.is_err());
    assert!(crate::server::util::db::is_unique_violation(
        &result.unwrap_err()
    ));

    Ok(())
}

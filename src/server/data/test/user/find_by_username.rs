use super::*;

/// Tests looking up a user by exact username.
///
/// Expected: Some for the stored username, None for an unknown one
#[tokio::test]
async fn finds_user_by_username() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_car_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let user = factory::user::UserFactory::new(db)
        .username("bob")
        .build()
        .await?;

    let repo = UserRepository::new(db);

    let found = repo.find_by_username("bob").await?;
    assert_eq!(found.map(|u| u.id), Some(user.id));

    let missing = repo.find_by_username("nobody").await?;
    assert!(missing.is_none());

    Ok(())
}

use super::*;

/// Tests creating a rating.
///
/// Expected: Ok with the stored rating
#[tokio::test]
async fn creates_rating() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_car_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let (owner, car) = factory::helpers::create_car_with_owner(db).await?;

    let rating = RatingRepository::new(db).create(car.id, owner.id, 4).await?;

    assert_eq!(rating.car_id, car.id);
    assert_eq!(rating.user_id, owner.id);
    assert_eq!(rating.rating, 4);

    Ok(())
}

/// Tests the (car, user) uniqueness of ratings.
///
/// Verifies that a second insert for the same pair is rejected with an error that is
/// recognised as a unique violation, distinct from other write failures.
///
/// Expected: Err with a unique constraint violation
#[tokio::test]
async fn rejects_second_rating_for_same_car_and_user() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_car_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let (owner, car) = factory::helpers::create_car_with_owner(db).await?;
    let repo = RatingRepository::new(db);

    repo.create(car.id, owner.id, 3).await?;
    let err = repo.create(car.id, owner.id, 5).await.unwrap_err();

    assert!(is_unique_violation(&err));

    // A different user may still rate the same car
    let other = factory::create_user(db).await?;
    repo.create(car.id, other.id, 5).await?;

    Ok(())
}

/// Tests that a foreign key failure is not reported as a unique violation.
///
/// Expected: Err that is not a unique violation
#[tokio::test]
async fn distinguishes_other_write_failures() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_car_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let owner = factory::create_user(db).await?;

    let err = RatingRepository::new(db)
        .create(9999, owner.id, 3)
        .await
        .unwrap_err();

    assert!(!is_unique_violation(&err));

    Ok(())
}

/// Tests creating a rating inside a transaction.
///
/// Expected: Ok with the rating visible after commit
#[tokio::test]
async fn creates_rating_within_transaction() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_car_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let (owner, car) = factory::helpers::create_car_with_owner(db).await?;

    let txn = db.begin().await?;
    RatingRepository::new(&txn).create(car.id, owner.id, 2).await?;
    txn.commit().await?;

    let stored = RatingRepository::new(db)
        .find_by_car_and_user(car.id, owner.id)
        .await?;
    assert_eq!(stored.map(|r| r.rating), Some(2));

    Ok(())
}

use super::*;

/// Tests that rating twice updates the existing rating.
///
/// Expected: Ok with a single stored rating carrying the second value
#[tokio::test]
async fn second_rating_updates_first() -> Result<(), AppError> {
    let test = TestBuilder::new().with_car_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let storage = temp_storage().await;

    let (_owner, car) = factory::helpers::create_car_with_owner(db).await?;
    let rater = user(factory::create_user(db).await?);

    let service = CarService::new(db, &storage);
    let first = service.add_or_update_rating(&rater, car.id, 2).await?;
    let second = service.add_or_update_rating(&rater, car.id, 4).await?;

    assert_eq!(first.rating.id, second.rating.id);
    assert_eq!(second.rating.rating, 4);
    assert_eq!(second.average_rating, 4.0);

    let rows = entity::prelude::Rating::find()
        .filter(entity::rating::Column::CarId.eq(car.id))
        .filter(entity::rating::Column::UserId.eq(rater.id))
        .count(db)
        .await?;
    assert_eq!(rows, 1);

    cleanup(&storage).await;
    Ok(())
}

/// Tests the average across users and after an update.
///
/// A rates 3 and B rates 5 giving 4.0; A then changes to 1 giving 3.0.
///
/// Expected: Ok with the recomputed average after each write
#[tokio::test]
async fn recomputes_average_after_each_write() -> Result<(), AppError> {
    let test = TestBuilder::new().with_car_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let storage = temp_storage().await;

    let (_owner, car) = factory::helpers::create_car_with_owner(db).await?;
    let a = user(factory::create_user(db).await?);
    let b = user(factory::create_user(db).await?);

    let service = CarService::new(db, &storage);

    let result = service.add_or_update_rating(&a, car.id, 3).await?;
    assert_eq!(result.average_rating, 3.0);

    let result = service.add_or_update_rating(&b, car.id, 5).await?;
    assert_eq!(result.average_rating, 4.0);
    assert_eq!(result.rating.user_username, b.username);

    let result = service.add_or_update_rating(&a, car.id, 1).await?;
    assert_eq!(result.average_rating, 3.0);

    let detail = service.get_by_id(car.id).await?;
    assert_eq!(detail.ratings.len(), 2);
    assert_eq!(detail.average_rating(), 3.0);

    cleanup(&storage).await;
    Ok(())
}

/// Tests values outside the accepted range.
///
/// Expected: Err(AppError::BadRequest) and nothing stored
#[tokio::test]
async fn rejects_out_of_range_values() -> Result<(), AppError> {
    let test = TestBuilder::new().with_car_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let storage = temp_storage().await;

    let (owner, car) = factory::helpers::create_car_with_owner(db).await?;
    let owner = user(owner);

    let service = CarService::new(db, &storage);
    for value in [0, 6, -1] {
        let result = service.add_or_update_rating(&owner, car.id, value).await;
        assert!(matches!(result, Err(AppError::BadRequest(_))));
    }

    assert!(service.get_by_id(car.id).await?.ratings.is_empty());

    cleanup(&storage).await;
    Ok(())
}

/// Tests that the range check happens before the car lookup.
///
/// Expected: Err(AppError::BadRequest) even though the car doesn't exist
#[tokio::test]
async fn validates_range_before_lookup() -> Result<(), AppError> {
    let test = TestBuilder::new().with_car_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let storage = temp_storage().await;

    let actor = user(factory::create_user(db).await?);
    let service = CarService::new(db, &storage);

    let result = service.add_or_update_rating(&actor, 404, 9).await;
    assert!(matches!(result, Err(AppError::BadRequest(_))));

    let result = service.add_or_update_rating(&actor, 404, 3).await;
    assert!(matches!(result, Err(AppError::NotFound(_))));

    cleanup(&storage).await;
    Ok(())
}

/// Tests mapping the error of an insert that lost the race for a first rating.
///
/// The duplicate insert stands in for a concurrent request that stored its rating
/// between this request's lookup and insert.
///
/// Expected: AppError::Conflict
#[tokio::test]
async fn duplicate_insert_maps_to_conflict() -> Result<(), AppError> {
    let test = TestBuilder::new().with_car_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let (_owner, car) = factory::helpers::create_car_with_owner(db).await?;
    let rater = user(factory::create_user(db).await?);
    factory::create_rating(db, car.id, rater.id, 3).await?;

    let err = RatingRepository::new(db)
        .create(car.id, rater.id, 5)
        .await
        .expect_err("second insert for the same (car, user) must fail");

    let mapped = rating_insert_error(err, &rater, &Car::from_entity(car));
    assert!(matches!(mapped, AppError::Conflict(_)));

    Ok(())
}

/// Tests mapping an insert failure unrelated to the unique index.
///
/// Expected: AppError::DbErr, not Conflict
#[tokio::test]
async fn other_insert_failure_stays_db_error() -> Result<(), AppError> {
    let test = TestBuilder::new().with_car_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let (_owner, car) = factory::helpers::create_car_with_owner(db).await?;
    let rater = user(factory::create_user(db).await?);

    let mapped = rating_insert_error(
        DbErr::Custom("disk I/O error".to_string()),
        &rater,
        &Car::from_entity(car),
    );
    assert!(matches!(mapped, AppError::DbErr(_)));

    Ok(())
}

use super::*;

/// Tests a full replacement by the owner.
///
/// Expected: Ok with every editable field replaced
#[tokio::test]
async fn owner_replaces_car() -> Result<(), AppError> {
    let test = TestBuilder::new().with_car_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let storage = temp_storage().await;

    let (owner, car) = factory::helpers::create_car_with_owner(db).await?;

    let detail = CarService::new(db, &storage)
        .update(
            &user(owner.clone()),
            UpdateCarParams {
                id: car.id,
                make: Some("Honda".to_string()),
                model: Some("Civic".to_string()),
                year: Some(2019),
                price_per_day: Some(Decimal::new(3500, 2)),
                description: Some("Compact".to_string()),
                location: Some("Porto".to_string()),
                available: Some(false),
            },
        )
        .await?;

    assert_eq!(detail.car.make, "Honda");
    assert_eq!(detail.car.model, "Civic");
    assert_eq!(detail.car.year, 2019);
    assert_eq!(detail.car.price_per_day, Decimal::new(3500, 2));
    assert_eq!(detail.car.location, "Porto");
    assert!(!detail.car.available);
    assert_eq!(detail.car.owner_id, owner.id);

    cleanup(&storage).await;
    Ok(())
}

/// Tests that a non-owner cannot update a car.
///
/// Expected: Err(AuthError::AccessDenied) and the car unchanged
#[tokio::test]
async fn non_owner_cannot_update() -> Result<(), AppError> {
    let test = TestBuilder::new().with_car_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let storage = temp_storage().await;

    let (_owner, car) = factory::helpers::create_car_with_owner(db).await?;
    let intruder = factory::create_user(db).await?;

    let service = CarService::new(db, &storage);
    let result = service
        .update(
            &user(intruder),
            UpdateCarParams {
                id: car.id,
                make: Some("Hijacked".to_string()),
                ..Default::default()
            },
        )
        .await;

    assert!(matches!(
        result,
        Err(AppError::AuthErr(AuthError::AccessDenied(_, _)))
    ));

    let stored = service.get_by_id(car.id).await?;
    assert_eq!(stored.car.make, car.make);
    assert_eq!(stored.car.updated_at, car.updated_at);

    cleanup(&storage).await;
    Ok(())
}

/// Tests updating a car that doesn't exist.
///
/// Expected: Err(AppError::NotFound)
#[tokio::test]
async fn fails_for_missing_car() -> Result<(), AppError> {
    let test = TestBuilder::new().with_car_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let storage = temp_storage().await;

    let actor = factory::create_user(db).await?;

    let result = CarService::new(db, &storage)
        .update(
            &user(actor),
            UpdateCarParams {
                id: 404,
                ..Default::default()
            },
        )
        .await;

    assert!(matches!(result, Err(AppError::NotFound(_))));

    cleanup(&storage).await;
    Ok(())
}

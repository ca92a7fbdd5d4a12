use super::*;

/// Tests a partial update.
///
/// Verifies that only supplied fields change and `updated_at` moves forward.
///
/// Expected: Ok with the updated car
#[tokio::test]
async fn updates_only_supplied_fields() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_car_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let (_owner, car) = factory::helpers::create_car_with_owner(db).await?;

    let updated = CarRepository::new(db)
        .update(UpdateCarParams {
            id: car.id,
            price_per_day: Some(Decimal::new(7550, 2)),
            available: Some(false),
            ..Default::default()
        })
        .await?;

    assert_eq!(updated.price_per_day, Decimal::new(7550, 2));
    assert!(!updated.available);
    assert_eq!(updated.make, car.make);
    assert_eq!(updated.model, car.model);
    assert_eq!(updated.year, car.year);
    assert_eq!(updated.owner_id, car.owner_id);
    assert!(updated.updated_at >= car.updated_at);

    Ok(())
}

/// Tests updating a car that doesn't exist.
///
/// Expected: Err(DbErr::RecordNotFound)
#[tokio::test]
async fn fails_for_missing_car() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_car_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let result = CarRepository::new(db)
        .update(UpdateCarParams {
            id: 42,
            make: Some("Honda".to_string()),
            ..Default::default()
        })
        .await;

    assert!(matches!(result, Err(DbErr::RecordNotFound(_))));

    Ok(())
}

use super::*;

/// Tests creating a car through the service.
///
/// Expected: Ok with the car owned by the creator and an empty aggregate
#[tokio::test]
async fn creates_car_owned_by_actor() -> Result<(), AppError> {
    let test = TestBuilder::new().with_car_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let storage = temp_storage().await;

    let owner = factory::user::UserFactory::new(db)
        .username("owner")
        .build()
        .await?;

    let detail = CarService::new(db, &storage)
        .create(CreateCarParams {
            owner_id: owner.id,
            make: "Toyota".to_string(),
            model: "Corolla".to_string(),
            year: 2021,
            price_per_day: Decimal::new(4999, 2),
            description: "Reliable sedan".to_string(),
            location: "Lisbon".to_string(),
            available: true,
        })
        .await?;

    assert_eq!(detail.car.owner_id, owner.id);
    assert_eq!(detail.owner_username, "owner");
    assert!(detail.images.is_empty());
    assert!(detail.comments.is_empty());
    assert!(detail.ratings.is_empty());
    assert_eq!(detail.average_rating(), 0.0);

    cleanup(&storage).await;
    Ok(())
}

use super::*;

/// Tests creating a car bound to its owner.
///
/// Verifies every supplied field is stored, the price keeps its value, and both
/// timestamps are set.
///
/// Expected: Ok with the created car
#[tokio::test]
async fn creates_car_for_owner() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_car_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let owner = factory::create_user(db).await?;

    let repo = CarRepository::new(db);
    let car = repo
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

    assert_eq!(car.owner_id, owner.id);
    assert_eq!(car.make, "Toyota");
    assert_eq!(car.year, 2021);
    assert_eq!(car.price_per_day, Decimal::new(4999, 2));
    assert!(car.available);
    assert_eq!(car.created_at, car.updated_at);

    let stored = entity::prelude::Car::find_by_id(car.id).one(db).await?;
    assert!(stored.is_some());

    Ok(())
}

use super::*;

/// Tests fetching a car that doesn't exist.
///
/// Expected: Err(AppError::NotFound)
#[tokio::test]
async fn fails_for_missing_car() -> Result<(), AppError> {
    let test = TestBuilder::new().with_car_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let storage = temp_storage().await;

    let result = CarService::new(db, &storage).get_by_id(404).await;

    assert!(matches!(result, Err(AppError::NotFound(_))));

    cleanup(&storage).await;
    Ok(())
}

/// Tests that the DTO of a car resolves image keys into public URLs.
///
/// Expected: Ok with image URLs under the media prefix
#[tokio::test]
async fn converts_image_keys_to_urls() -> Result<(), AppError> {
    let test = TestBuilder::new().with_car_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let storage = temp_storage().await;

    let (_owner, car) = factory::helpers::create_car_with_owner(db).await?;
    factory::car_image::CarImageFactory::new(db, car.id)
        .image("car_images/front.jpg")
        .is_primary(true)
        .build()
        .await?;

    let dto = CarService::new(db, &storage)
        .get_by_id(car.id)
        .await?
        .into_dto(&storage);

    assert_eq!(dto.images.len(), 1);
    assert_eq!(dto.images[0].image, "/media/car_images/front.jpg");
    assert!(dto.images[0].is_primary);

    cleanup(&storage).await;
    Ok(())
}

/// Tests that a car can be viewed anonymously and by users other than the owner.
///
/// Expected: Ok with the same car for both actors
#[tokio::test]
async fn anyone_can_view_car() -> Result<(), AppError> {
    let test = TestBuilder::new().with_car_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let storage = temp_storage().await;

    let (_owner, car) = factory::helpers::create_car_with_owner(db).await?;
    let visitor = user(
        factory::user::UserFactory::new(db)
            .username("visitor")
            .build()
            .await?,
    );
    let service = CarService::new(db, &storage);

    let anonymous = service.view(None, car.id).await?;
    assert_eq!(anonymous.car.id, car.id);

    let other = service.view(Some(&visitor), car.id).await?;
    assert_eq!(other.car.id, car.id);

    let missing = service.view(Some(&visitor), 404).await;
    assert!(matches!(missing, Err(AppError::NotFound(_))));

    cleanup(&storage).await;
    Ok(())
}

use super::*;

/// Tests uploading several images with the primary flag set.
///
/// Verifies images are created in upload order, exactly the first one is primary,
/// and every file was written to storage.
///
/// Expected: Ok with N images and one primary
#[tokio::test]
async fn marks_only_first_image_primary() -> Result<(), AppError> {
    let test = TestBuilder::new().with_car_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let storage = temp_storage().await;

    let (owner, car) = factory::helpers::create_car_with_owner(db).await?;

    let images = CarService::new(db, &storage)
        .upload_images(
            &user(owner),
            car.id,
            vec![png("front.png"), jpeg("side.jpg"), png("back.png")],
            true,
        )
        .await?;

    assert_eq!(images.len(), 3);
    assert!(images[0].is_primary);
    assert_eq!(images.iter().filter(|i| i.is_primary).count(), 1);
    assert!(images.windows(2).all(|w| w[0].id < w[1].id));
    assert!(images[1].image.ends_with(".jpg"));
    for image in &images {
        assert!(storage.exists(&image.image));
    }

    cleanup(&storage).await;
    Ok(())
}

/// Tests uploading without the primary flag.
///
/// Expected: Ok with no primary image
#[tokio::test]
async fn uploads_without_primary() -> Result<(), AppError> {
    let test = TestBuilder::new().with_car_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let storage = temp_storage().await;

    let (owner, car) = factory::helpers::create_car_with_owner(db).await?;

    let images = CarService::new(db, &storage)
        .upload_images(&user(owner), car.id, vec![png("a.png"), png("b.png")], false)
        .await?;

    assert_eq!(images.len(), 2);
    assert!(images.iter().all(|i| !i.is_primary));

    cleanup(&storage).await;
    Ok(())
}

/// Tests uploading an empty list.
///
/// Expected: Err(AppError::BadRequest) and no image rows
#[tokio::test]
async fn rejects_empty_upload() -> Result<(), AppError> {
    let test = TestBuilder::new().with_car_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let storage = temp_storage().await;

    let (owner, car) = factory::helpers::create_car_with_owner(db).await?;

    let result = CarService::new(db, &storage)
        .upload_images(&user(owner), car.id, vec![], true)
        .await;

    assert!(matches!(result, Err(AppError::BadRequest(_))));

    let rows = entity::prelude::CarImage::find()
        .filter(entity::car_image::Column::CarId.eq(car.id))
        .count(db)
        .await?;
    assert_eq!(rows, 0);

    cleanup(&storage).await;
    Ok(())
}

/// Tests that a file which isn't an image rejects the whole upload.
///
/// Expected: Err(AppError::BadRequest) and nothing stored, not even the valid image
#[tokio::test]
async fn rejects_upload_containing_non_image() -> Result<(), AppError> {
    let test = TestBuilder::new().with_car_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let storage = temp_storage().await;

    let (owner, car) = factory::helpers::create_car_with_owner(db).await?;

    let not_an_image = crate::server::model::image::UploadedImage {
        file_name: Some("notes.txt".to_string()),
        bytes: axum::body::Bytes::from_static(b"just text"),
    };

    let result = CarService::new(db, &storage)
        .upload_images(&user(owner), car.id, vec![png("a.png"), not_an_image], true)
        .await;

    assert!(matches!(result, Err(AppError::BadRequest(_))));

    let rows = entity::prelude::CarImage::find()
        .filter(entity::car_image::Column::CarId.eq(car.id))
        .count(db)
        .await?;
    assert_eq!(rows, 0);

    let mut entries = tokio::fs::read_dir(storage.root().join("car_images")).await?;
    assert!(entries.next_entry().await?.is_none());

    cleanup(&storage).await;
    Ok(())
}

/// Tests that only the owner can upload images.
///
/// Expected: Err(AuthError::AccessDenied)
#[tokio::test]
async fn non_owner_cannot_upload() -> Result<(), AppError> {
    let test = TestBuilder::new().with_car_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let storage = temp_storage().await;

    let (_owner, car) = factory::helpers::create_car_with_owner(db).await?;
    let intruder = factory::create_user(db).await?;

    let result = CarService::new(db, &storage)
        .upload_images(&user(intruder), car.id, vec![png("a.png")], false)
        .await;

    assert!(matches!(
        result,
        Err(AppError::AuthErr(AuthError::AccessDenied(_, _)))
    ));

    cleanup(&storage).await;
    Ok(())
}

/// Tests a primary upload for a car that already has a primary image.
///
/// A batch only sets the flag on its own first image; images stored earlier are
/// left as they are.
///
/// Expected: Ok with both the earlier image and the batch's first image primary
#[tokio::test]
async fn keeps_existing_primary_image() -> Result<(), AppError> {
    let test = TestBuilder::new().with_car_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let storage = temp_storage().await;

    let (owner, car) = factory::helpers::create_car_with_owner(db).await?;
    let existing = factory::car_image::CarImageFactory::new(db, car.id)
        .image("car_images/earlier.png")
        .is_primary(true)
        .build()
        .await?;

    let uploaded = CarService::new(db, &storage)
        .upload_images(
            &user(owner),
            car.id,
            vec![png("front.png"), jpeg("side.jpg")],
            true,
        )
        .await?;

    let stored = entity::prelude::CarImage::find()
        .filter(entity::car_image::Column::CarId.eq(car.id))
        .order_by_asc(entity::car_image::Column::Id)
        .all(db)
        .await?;

    assert_eq!(stored.len(), 3);
    assert_eq!(stored[0].id, existing.id);
    assert!(stored[0].is_primary);
    assert_eq!(stored[1].id, uploaded[0].id);
    assert!(stored[1].is_primary);
    assert_eq!(stored[2].id, uploaded[1].id);
    assert!(!stored[2].is_primary);

    cleanup(&storage).await;
    Ok(())
}

/// Tests the upload authorization check on its own.
///
/// Expected: NotFound for a missing car, AccessDenied for a non-owner, Ok for the owner
#[tokio::test]
async fn authorize_upload_checks_car_and_owner() -> Result<(), AppError> {
    let test = TestBuilder::new().with_car_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let storage = temp_storage().await;

    let (owner, car) = factory::helpers::create_car_with_owner(db).await?;
    let intruder = user(factory::create_user(db).await?);
    let owner = user(owner);
    let service = CarService::new(db, &storage);

    assert!(matches!(
        service.authorize_upload(&owner, car.id + 1).await,
        Err(AppError::NotFound(_))
    ));
    assert!(matches!(
        service.authorize_upload(&intruder, car.id).await,
        Err(AppError::AuthErr(AuthError::AccessDenied(_, _)))
    ));
    assert_eq!(service.authorize_upload(&owner, car.id).await?.id, car.id);

    cleanup(&storage).await;
    Ok(())
}

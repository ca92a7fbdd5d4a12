use super::*;

/// Tests inserting several images at once.
///
/// Verifies that rows are created in list order and keep their primary flags.
///
/// Expected: Ok with images in creation order
#[tokio::test]
async fn creates_images_in_order() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_car_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let (_owner, car) = factory::helpers::create_car_with_owner(db).await?;

    let images = CarImageRepository::new(db)
        .create_many(
            car.id,
            vec![
                NewCarImage {
                    image: "car_images/1.jpg".to_string(),
                    is_primary: true,
                },
                NewCarImage {
                    image: "car_images/2.jpg".to_string(),
                    is_primary: false,
                },
                NewCarImage {
                    image: "car_images/3.jpg".to_string(),
                    is_primary: false,
                },
            ],
        )
        .await?;

    assert_eq!(images.len(), 3);
    assert!(images.windows(2).all(|w| w[0].id < w[1].id));
    assert_eq!(images[0].image, "car_images/1.jpg");
    assert_eq!(images[2].image, "car_images/3.jpg");
    assert_eq!(images.iter().filter(|i| i.is_primary).count(), 1);

    let stored = entity::prelude::CarImage::find()
        .filter(entity::car_image::Column::CarId.eq(car.id))
        .count(db)
        .await?;
    assert_eq!(stored, 3);

    Ok(())
}

/// Tests that a failing insert leaves no rows behind.
///
/// Uses a car ID that doesn't exist so the foreign key rejects the insert.
///
/// Expected: Err and no image rows stored
#[tokio::test]
async fn inserts_nothing_when_a_row_fails() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_car_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let result = CarImageRepository::new(db)
        .create_many(
            9999,
            vec![NewCarImage {
                image: "car_images/1.jpg".to_string(),
                is_primary: false,
            }],
        )
        .await;

    assert!(result.is_err());

    let images = CarImageRepository::new(db).get_by_car_ids(&[9999]).await?;
    assert!(images.is_empty());

    Ok(())
}

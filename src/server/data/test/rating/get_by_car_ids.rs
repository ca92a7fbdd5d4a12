use super::*;

/// Tests retrieving the ratings of several cars at once.
///
/// Expected: Ok with ratings grouped by car in creation order, each with the rater's
/// username
#[tokio::test]
async fn groups_ratings_with_usernames() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_car_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let (owner, car) = factory::helpers::create_car_with_owner(db).await?;
    let other_car = factory::create_car(db, owner.id).await?;
    let rater = factory::user::UserFactory::new(db)
        .username("dave")
        .build()
        .await?;
    factory::create_rating(db, car.id, rater.id, 4).await?;
    factory::create_rating(db, other_car.id, rater.id, 2).await?;
    factory::create_rating(db, car.id, owner.id, 1).await?;

    let grouped = RatingRepository::new(db)
        .get_by_car_ids(&[car.id, other_car.id])
        .await?;

    let ratings = &grouped[&car.id];
    assert_eq!(ratings.len(), 2);
    assert_eq!(ratings[0].user_username, "dave");
    assert_eq!(ratings[0].rating, 4);
    assert_eq!(ratings[1].user_username, owner.username);
    assert_eq!(ratings[1].rating, 1);
    assert_eq!(grouped[&other_car.id][0].rating, 2);

    Ok(())
}

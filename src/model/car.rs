use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::{Validate, ValidationError};

/// Largest accepted daily price, exclusive (8 integer digits, 2 decimal places).
const MAX_PRICE_PER_DAY: i64 = 100_000_000;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, ToSchema)]
pub struct CarImageDto {
    pub id: i32,
    /// Public URL of the stored image
    pub image: String,
    pub is_primary: bool,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, ToSchema)]
pub struct CommentDto {
    pub id: i32,
    pub content: String,
    pub user_username: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, ToSchema)]
pub struct RatingDto {
    pub id: i32,
    pub rating: i32,
    pub user_username: String,
    pub created_at: DateTime<Utc>,
}

/// Response of the rating upsert: the written rating and the car's new average.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, ToSchema)]
pub struct RatingResultDto {
    pub rating: RatingDto,
    pub average_rating: f64,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, ToSchema)]
pub struct CarDto {
    pub id: i32,
    /// ID of the owning user
    pub owner: i32,
    pub owner_username: String,
    pub make: String,
    pub model: String,
    pub year: i32,
    #[schema(value_type = String, example = "49.99")]
    pub price_per_day: Decimal,
    pub description: String,
    pub location: String,
    pub available: bool,
    pub images: Vec<CarImageDto>,
    pub comments: Vec<CommentDto>,
    pub ratings: Vec<RatingDto>,
    pub average_rating: f64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Payload for creating a car or replacing all of its editable fields.
///
/// Server-assigned fields (`owner`, `owner_username`, `average_rating`) are not
/// accepted and cause the request to be rejected.
#[derive(Deserialize, Debug, Clone, Validate, ToSchema)]
#[serde(deny_unknown_fields)]
pub struct CreateCarDto {
    #[validate(length(min = 1, max = 100))]
    pub make: String,
    #[validate(length(min = 1, max = 100))]
    pub model: String,
    pub year: i32,
    #[schema(value_type = String, example = "49.99")]
    #[validate(custom(function = "validate_price_per_day"))]
    pub price_per_day: Decimal,
    #[validate(length(min = 1))]
    pub description: String,
    #[validate(length(min = 1, max = 200))]
    pub location: String,
    #[serde(default = "default_available")]
    pub available: bool,
}

/// Payload for a partial car update; omitted fields keep their current value.
#[derive(Deserialize, Debug, Clone, Default, Validate, ToSchema)]
#[serde(deny_unknown_fields)]
pub struct PatchCarDto {
    #[validate(length(min = 1, max = 100))]
    pub make: Option<String>,
    #[validate(length(min = 1, max = 100))]
    pub model: Option<String>,
    pub year: Option<i32>,
    #[schema(value_type = Option<String>, example = "49.99")]
    #[validate(custom(function = "validate_price_per_day"))]
    pub price_per_day: Option<Decimal>,
    #[validate(length(min = 1))]
    pub description: Option<String>,
    #[validate(length(min = 1, max = 200))]
    pub location: Option<String>,
    pub available: Option<bool>,
}

#[derive(Deserialize, Debug, Clone, Validate, ToSchema)]
#[serde(deny_unknown_fields)]
pub struct CreateCommentDto {
    #[validate(length(min = 1))]
    pub content: String,
}

#[derive(Deserialize, Debug, Clone, Validate, ToSchema)]
#[serde(deny_unknown_fields)]
pub struct CreateRatingDto {
    #[validate(range(min = 1, max = 5))]
    pub rating: i32,
}

/// Optional filters for the car listing.
#[derive(Deserialize, Debug, Clone, Default, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct CarListQuery {
    /// Only return cars with this availability
    pub available: Option<bool>,
    /// Only return cars owned by this user ID
    pub owner: Option<i32>,
}

/// Multipart form accepted by the image upload endpoint. Documentation only,
/// the handler reads the fields directly from the multipart stream.
#[derive(ToSchema)]
#[allow(dead_code)]
pub struct UploadImagesForm {
    /// One or more image files, stored in the order sent
    #[schema(value_type = Vec<String>, format = Binary)]
    pub images: Vec<Vec<u8>>,
    /// Marks the first uploaded image as primary
    pub is_primary: Option<bool>,
}

fn default_available() -> bool {
    true
}

fn validate_price_per_day(price: &Decimal) -> Result<(), ValidationError> {
    if price.is_sign_negative() {
        return Err(ValidationError::new("price_negative"));
    }

    if price.normalize().scale() > 2 {
        return Err(ValidationError::new("price_decimal_places"));
    }

    if *price >= Decimal::from(MAX_PRICE_PER_DAY) {
        return Err(ValidationError::new("price_max_digits"));
    }

    Ok(())
}

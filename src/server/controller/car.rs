use axum::{
    extract::{Multipart, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use tower_sessions::Session;

use crate::{
    model::{
        api::ErrorDto,
        car::{
            CarDto, CarImageDto, CarListQuery, CommentDto, CreateCarDto, CreateCommentDto,
            CreateRatingDto, PatchCarDto, RatingResultDto, UploadImagesForm,
        },
    },
    server::{
        error::AppError,
        middleware::auth::AuthGuard,
        model::{
            car::{CarDetail, CarFilter, CreateCarParams, UpdateCarParams},
            image::UploadedImage,
        },
        service::car::CarService,
        state::AppState,
        util::extract::{ApiMultipart, ApiPath, ApiQuery, ValidatedJson},
    },
};

pub static CAR_TAG: &str = "car";

/// Multipart field carrying the image files
const IMAGES_FIELD: &str = "images";
/// Multipart field marking the first uploaded image as primary
const IS_PRIMARY_FIELD: &str = "is_primary";

#[utoipa::path(
    get,
    path = "/api/cars",
    tag = CAR_TAG,
    params(CarListQuery),
    responses(
        (status = 200, description = "Cars matching the filters, ordered by ID", body = Vec<CarDto>),
        (status = 400, description = "Invalid filter value", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn list_cars(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<CarListQuery>,
) -> Result<impl IntoResponse, AppError> {
    let cars = CarService::new(&state.db, &state.storage)
        .list(CarFilter::from(query))
        .await?;

    Ok((StatusCode::OK, Json(into_dtos(cars, &state))))
}

#[utoipa::path(
    post,
    path = "/api/cars",
    tag = CAR_TAG,
    request_body = CreateCarDto,
    responses(
        (status = 201, description = "Car created and owned by the caller", body = CarDto),
        (status = 400, description = "Invalid car data", body = ErrorDto),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn create_car(
    State(state): State<AppState>,
    session: Session,
    ValidatedJson(payload): ValidatedJson<CreateCarDto>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &session).require().await?;

    let car = CarService::new(&state.db, &state.storage)
        .create(CreateCarParams::from_dto(user.id, payload))
        .await?;

    Ok((StatusCode::CREATED, Json(car.into_dto(&state.storage))))
}

#[utoipa::path(
    get,
    path = "/api/cars/available",
    tag = CAR_TAG,
    responses(
        (status = 200, description = "Cars available for rent", body = Vec<CarDto>),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn list_available_cars(
    State(state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let cars = CarService::new(&state.db, &state.storage)
        .list_available()
        .await?;

    Ok((StatusCode::OK, Json(into_dtos(cars, &state))))
}

#[utoipa::path(
    get,
    path = "/api/cars/mine",
    tag = CAR_TAG,
    responses(
        (status = 200, description = "Cars owned by the caller", body = Vec<CarDto>),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn list_my_cars(
    State(state): State<AppState>,
    session: Session,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &session).require().await?;

    let cars = CarService::new(&state.db, &state.storage)
        .list_owned_by(&user)
        .await?;

    Ok((StatusCode::OK, Json(into_dtos(cars, &state))))
}

#[utoipa::path(
    get,
    path = "/api/cars/{id}",
    tag = CAR_TAG,
    params(
        ("id" = i32, Path, description = "Car ID")
    ),
    responses(
        (status = 200, description = "The car with images, comments and ratings", body = CarDto),
        (status = 404, description = "Car not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_car(
    State(state): State<AppState>,
    session: Session,
    ApiPath(id): ApiPath<i32>,
) -> Result<impl IntoResponse, AppError> {
    let actor = AuthGuard::new(&state.db, &session).optional().await?;

    let car = CarService::new(&state.db, &state.storage)
        .view(actor.as_ref(), id)
        .await?;

    Ok((StatusCode::OK, Json(car.into_dto(&state.storage))))
}

/// Replaces every editable field of a car.
#[utoipa::path(
    put,
    path = "/api/cars/{id}",
    tag = CAR_TAG,
    params(
        ("id" = i32, Path, description = "Car ID")
    ),
    request_body = CreateCarDto,
    responses(
        (status = 200, description = "Car updated", body = CarDto),
        (status = 400, description = "Invalid car data", body = ErrorDto),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 403, description = "Caller does not own the car", body = ErrorDto),
        (status = 404, description = "Car not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn update_car(
    State(state): State<AppState>,
    session: Session,
    ApiPath(id): ApiPath<i32>,
    ValidatedJson(payload): ValidatedJson<CreateCarDto>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &session).require().await?;

    let car = CarService::new(&state.db, &state.storage)
        .update(&user, UpdateCarParams::from_replace_dto(id, payload))
        .await?;

    Ok((StatusCode::OK, Json(car.into_dto(&state.storage))))
}

/// Updates only the fields present in the body.
#[utoipa::path(
    patch,
    path = "/api/cars/{id}",
    tag = CAR_TAG,
    params(
        ("id" = i32, Path, description = "Car ID")
    ),
    request_body = PatchCarDto,
    responses(
        (status = 200, description = "Car updated", body = CarDto),
        (status = 400, description = "Invalid car data", body = ErrorDto),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 403, description = "Caller does not own the car", body = ErrorDto),
        (status = 404, description = "Car not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn patch_car(
    State(state): State<AppState>,
    session: Session,
    ApiPath(id): ApiPath<i32>,
    ValidatedJson(payload): ValidatedJson<PatchCarDto>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &session).require().await?;

    let car = CarService::new(&state.db, &state.storage)
        .update(&user, UpdateCarParams::from_patch_dto(id, payload))
        .await?;

    Ok((StatusCode::OK, Json(car.into_dto(&state.storage))))
}

#[utoipa::path(
    delete,
    path = "/api/cars/{id}",
    tag = CAR_TAG,
    params(
        ("id" = i32, Path, description = "Car ID")
    ),
    responses(
        (status = 204, description = "Car and its images, comments and ratings deleted"),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 403, description = "Caller does not own the car", body = ErrorDto),
        (status = 404, description = "Car not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn delete_car(
    State(state): State<AppState>,
    session: Session,
    ApiPath(id): ApiPath<i32>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &session).require().await?;

    CarService::new(&state.db, &state.storage)
        .delete(&user, id)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}

/// Uploads one or more images for a car.
///
/// Send every file under the `images` field. When `is_primary` is true the first
/// file becomes the car's primary image.
#[utoipa::path(
    post,
    path = "/api/cars/{id}/images",
    tag = CAR_TAG,
    params(
        ("id" = i32, Path, description = "Car ID")
    ),
    request_body(content = UploadImagesForm, content_type = "multipart/form-data"),
    responses(
        (status = 201, description = "Images stored, in upload order", body = Vec<CarImageDto>),
        (status = 400, description = "No images, or a file is not a supported image", body = ErrorDto),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 403, description = "Caller does not own the car", body = ErrorDto),
        (status = 404, description = "Car not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn upload_images(
    State(state): State<AppState>,
    session: Session,
    ApiPath(id): ApiPath<i32>,
    ApiMultipart(multipart): ApiMultipart,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &session).require().await?;
    let service = CarService::new(&state.db, &state.storage);

    // Ownership is checked before the form body is read
    service.authorize_upload(&user, id).await?;

    let (images, is_primary) = parse_upload_form(multipart).await?;

    let created = service.upload_images(&user, id, images, is_primary).await?;

    let dtos: Vec<CarImageDto> = created
        .into_iter()
        .map(|image| image.into_dto(&state.storage))
        .collect();

    Ok((StatusCode::CREATED, Json(dtos)))
}

#[utoipa::path(
    post,
    path = "/api/cars/{id}/comments",
    tag = CAR_TAG,
    params(
        ("id" = i32, Path, description = "Car ID")
    ),
    request_body = CreateCommentDto,
    responses(
        (status = 201, description = "Comment created", body = CommentDto),
        (status = 400, description = "Blank comment", body = ErrorDto),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 404, description = "Car not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn add_comment(
    State(state): State<AppState>,
    session: Session,
    ApiPath(id): ApiPath<i32>,
    ValidatedJson(payload): ValidatedJson<CreateCommentDto>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &session).require().await?;

    let comment = CarService::new(&state.db, &state.storage)
        .add_comment(&user, id, payload.content)
        .await?;

    Ok((StatusCode::CREATED, Json(comment.into_dto())))
}

/// Rates a car, replacing the caller's earlier rating if there is one.
#[utoipa::path(
    post,
    path = "/api/cars/{id}/ratings",
    tag = CAR_TAG,
    params(
        ("id" = i32, Path, description = "Car ID")
    ),
    request_body = CreateRatingDto,
    responses(
        (status = 201, description = "Rating stored, with the car's new average", body = RatingResultDto),
        (status = 400, description = "Rating outside 1 to 5", body = ErrorDto),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 404, description = "Car not found", body = ErrorDto),
        (status = 409, description = "Concurrent rating by the same user, retry", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn add_rating(
    State(state): State<AppState>,
    session: Session,
    ApiPath(id): ApiPath<i32>,
    ValidatedJson(payload): ValidatedJson<CreateRatingDto>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &session).require().await?;

    let result = CarService::new(&state.db, &state.storage)
        .add_or_update_rating(&user, id, payload.rating)
        .await?;

    Ok((StatusCode::CREATED, Json(result.into_dto())))
}

fn into_dtos(cars: Vec<CarDetail>, state: &AppState) -> Vec<CarDto> {
    cars.into_iter()
        .map(|car| car.into_dto(&state.storage))
        .collect()
}

/// Reads the image files and the primary flag from the upload form.
///
/// Fields other than `images` and `is_primary` are ignored.
async fn parse_upload_form(
    mut multipart: Multipart,
) -> Result<(Vec<UploadedImage>, bool), AppError> {
    let mut images = Vec::new();
    let mut is_primary = false;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(format!("Invalid multipart payload: {}", e.body_text())))?
    {
        match field.name() {
            Some(IMAGES_FIELD) => {
                let file_name = field.file_name().map(str::to_owned);
                let bytes = field.bytes().await.map_err(|e| {
                    AppError::BadRequest(format!("Failed to read upload: {}", e.body_text()))
                })?;

                images.push(UploadedImage { file_name, bytes });
            }
            Some(IS_PRIMARY_FIELD) => {
                let value = field.text().await.map_err(|e| {
                    AppError::BadRequest(format!("Failed to read is_primary: {}", e.body_text()))
                })?;

                is_primary = parse_form_bool(&value)?;
            }
            _ => continue,
        }
    }

    Ok((images, is_primary))
}

/// Parses an HTML form boolean such as `true`, `1` or `on`
fn parse_form_bool(value: &str) -> Result<bool, AppError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Ok(true),
        "false" | "0" | "no" | "off" | "" => Ok(false),
        other => Err(AppError::BadRequest(format!(
            "Invalid boolean value for is_primary: '{}'",
            other
        ))),
    }
}

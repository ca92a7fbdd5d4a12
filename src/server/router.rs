use utoipa::OpenApi;
use utoipa_axum::{router::OpenApiRouter, routes};
use utoipa_swagger_ui::SwaggerUi;

use crate::server::{
    controller::{auth, car},
    state::AppState,
};

#[derive(OpenApi)]
#[openapi(
    info(title = "Car Rental API", description = "Car rental listings with images, comments and ratings"),
    tags(
        (name = "auth", description = "Registration, login and the session's user"),
        (name = "car", description = "Car listings and their images, comments and ratings"),
    )
)]
struct ApiDoc;

/// Builds the API router and serves its OpenAPI document through Swagger UI at `/api/docs`.
pub fn router() -> axum::Router<AppState> {
    let (router, api) = OpenApiRouter::with_openapi(ApiDoc::openapi())
        .routes(routes!(auth::register))
        .routes(routes!(auth::login))
        .routes(routes!(auth::logout))
        .routes(routes!(auth::get_user))
        .routes(routes!(car::list_cars, car::create_car))
        .routes(routes!(car::list_available_cars))
        .routes(routes!(car::list_my_cars))
        .routes(routes!(
            car::get_car,
            car::update_car,
            car::patch_car,
            car::delete_car
        ))
        .routes(routes!(car::upload_images))
        .routes(routes!(car::add_comment))
        .routes(routes!(car::add_rating))
        .split_for_parts();

    router.merge(SwaggerUi::new("/api/docs").url("/api/docs/openapi.json", api))
}

pub mod config;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod state;
pub mod storage;

use axum::routing::get;
use utoipa::OpenApi;
use utoipa_axum::router::OpenApiRouter;
use utoipa_scalar::{Scalar, Servable as ScalarServable};
use utoipa_swagger_ui::SwaggerUi;

use crate::state::AppState;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Notes API",
        version = "1.0.0",
        description = "Simple notes service backed by a key-value metadata store and S3 image storage"
    ),
    paths(
        handlers::health::health_check,
        handlers::health::root,
        handlers::note::create_note,
        handlers::note::list_notes,
        handlers::note::get_note,
        handlers::note::update_note,
        handlers::note::delete_note,
        handlers::image::upload_image,
        handlers::image::delete_image,
    ),
    tags(
        (name = "Health", description = "Service health and liveness"),
        (name = "Notes", description = "Note CRUD operations"),
        (name = "Images", description = "Image attachments for notes"),
    ),
)]
struct ApiDoc;

/// Build the application router.
pub fn build_router(state: AppState) -> axum::Router {
    let (router, api) = OpenApiRouter::with_openapi(ApiDoc::openapi())
        .nest("/notes", routes::note_routes(&state.config).into())
        .split_for_parts();

    router
        .route("/health", get(handlers::health::health_check))
        .route("/", get(handlers::health::root))
        .layer(routes::cors_layer(&state.config.server.cors))
        .with_state(state)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", api.clone()))
        .merge(Scalar::with_url("/scalar", api))
}

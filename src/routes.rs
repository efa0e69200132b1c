use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::http::HeaderValue;
use axum::routing::{delete, get, post};
use tower_http::cors::{Any, CorsLayer};

use crate::config::{AppConfig, CorsConfig};
use crate::handlers;
use crate::state::AppState;

pub fn note_routes(config: &AppConfig) -> Router<AppState> {
    let crud = Router::new()
        .route(
            "/",
            get(handlers::note::list_notes).post(handlers::note::create_note),
        )
        .route(
            "/{id}",
            get(handlers::note::get_note)
                .put(handlers::note::update_note)
                .delete(handlers::note::delete_note),
        );

    // The image key contains `/`, hence the wildcard capture.
    let images = Router::new()
        .route("/{id}/images", post(handlers::image::upload_image))
        .route(
            "/{id}/images/{*image_key}",
            delete(handlers::image::delete_image),
        )
        .layer(DefaultBodyLimit::max(config.storage.max_upload_size));

    crud.merge(images)
}

pub fn cors_layer(config: &CorsConfig) -> CorsLayer {
    let layer = CorsLayer::new()
        .allow_methods(Any)
        .allow_headers(Any)
        .max_age(std::time::Duration::from_secs(config.max_age));

    if config.allow_origins.iter().any(|origin| origin == "*") {
        layer.allow_origin(Any)
    } else {
        let origins: Vec<HeaderValue> = config
            .allow_origins
            .iter()
            .filter_map(|origin| origin.parse().ok())
            .collect();
        layer.allow_origin(origins)
    }
}

pub mod config;
pub mod db;
pub mod entities;
pub mod error;
pub mod models;
pub mod repository;
pub mod routes;
pub mod serializer;

use std::sync::Arc;

use axum::{Router, routing::get};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::repository::MovieRepository;

#[derive(Clone)]
pub struct AppState {
    pub movies: MovieRepository,
}

pub fn app(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/movies", get(routes::list_movies))
        .route("/movies/", get(routes::list_movies))
        .route("/movies/{pk}", get(routes::get_movie))
        .route("/swagger.json", get(routes::openapi))
        .with_state(state)
        .layer(CorsLayer::new().allow_origin(Any).allow_headers(Any))
        .layer(TraceLayer::new_for_http())
}

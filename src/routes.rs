use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, State},
};
use utoipa::OpenApi;

use crate::{
    AppState,
    error::{AppError, AppResult, ErrorBody},
    models::{ListQuery, MovieFilter},
    serializer::{MovieDocument, RelatedDocument, serialize_movie, serialize_movie_list},
};

#[derive(OpenApi)]
#[openapi(
    paths(list_movies, get_movie),
    components(schemas(MovieDocument, RelatedDocument, ErrorBody)),
    tags((name = "movies", description = "Movie catalogue"))
)]
pub struct ApiDoc;

/// Movies that have both a genre and a director, five per page.
#[utoipa::path(
    get,
    path = "/movies/",
    tag = "movies",
    params(
        ("page" = Option<u64>, Query, description = "Page number"),
        ("director_id" = Option<i64>, Query, description = "Director id"),
        ("genre_id" = Option<i64>, Query, description = "Genre id")
    ),
    responses(
        (status = 200, description = "One page of movies", body = Vec<MovieDocument>),
        (status = 400, description = "A parameter is not an integer", body = ErrorBody)
    )
)]
pub async fn list_movies(
    State(state): State<Arc<AppState>>,
    q: ListQuery,
) -> AppResult<Json<Vec<MovieDocument>>> {
    let filter = MovieFilter::try_from(q)?;
    let records = state.movies.list_movies(&filter).await?;
    Ok(Json(serialize_movie_list(&records)))
}

#[utoipa::path(
    get,
    path = "/movies/{pk}",
    tag = "movies",
    params(("pk" = u32, Path, description = "Movie id")),
    responses(
        (status = 200, description = "The movie", body = MovieDocument),
        (status = 404, description = "No such movie", body = ErrorBody)
    )
)]
pub async fn get_movie(
    State(state): State<Arc<AppState>>,
    Path(pk): Path<String>,
) -> AppResult<Json<MovieDocument>> {
    // The route only admits plain non-negative integers; anything else is an unknown movie.
    let Some(id) = parse_pk(&pk) else {
        return Err(not_found(&pk));
    };

    match state.movies.get_movie(id).await? {
        Some(record) => Ok(Json(serialize_movie(&record))),
        None => Err(not_found(&pk)),
    }
}

pub async fn openapi() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

fn parse_pk(pk: &str) -> Option<i32> {
    if pk.is_empty() || !pk.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    pk.parse().ok()
}

fn not_found(pk: &str) -> AppError {
    AppError::NotFound(format!("no such movie: {pk}"))
}

use std::sync::Arc;

use axum::{
    Router,
    body::Body,
    http::{Request, Response},
};
use http_body_util::BodyExt;
use movies::{
    AppState,
    db,
    entities::{director, genre, movie},
    repository::MovieRepository,
};
use sea_orm::{DatabaseConnection, EntityTrait, Set};
use tower::ServiceExt;

pub const DRAMA: i32 = 1;
pub const COMEDY: i32 = 2;
pub const NOLAN: i32 = 1;
pub const GERWIG: i32 = 2;

/// Fresh in-memory store with the schema applied and no rows.
pub async fn empty_db() -> DatabaseConnection {
    db::connect_and_migrate("sqlite::memory:").await.expect("in-memory database")
}

/// Two genres, two directors, movies 1..=7 fully linked (odd ids by Nolan and
/// dramas, even ids by Gerwig and comedies), movie 8 without a genre and
/// movie 9 without a director.
pub async fn seeded_db() -> DatabaseConnection {
    let db = empty_db().await;

    for (id, name) in [(DRAMA, "Drama"), (COMEDY, "Comedy")] {
        genre::Entity::insert(genre::ActiveModel { id: Set(id), name: Set(Some(name.into())) })
            .exec(&db)
            .await
            .unwrap();
    }
    for (id, name) in [(NOLAN, "Christopher Nolan"), (GERWIG, "Greta Gerwig")] {
        director::Entity::insert(director::ActiveModel {
            id: Set(id),
            name: Set(Some(name.into())),
        })
        .exec(&db)
        .await
        .unwrap();
    }

    for id in 1..=7 {
        let (genre_id, director_id) = if id % 2 == 1 { (DRAMA, NOLAN) } else { (COMEDY, GERWIG) };
        insert_movie(&db, id, Some(genre_id), Some(director_id)).await;
    }
    insert_movie(&db, 8, None, Some(NOLAN)).await;
    insert_movie(&db, 9, Some(DRAMA), None).await;

    db
}

pub async fn insert_movie(
    db: &DatabaseConnection,
    id: i32,
    genre_id: Option<i32>,
    director_id: Option<i32>,
) {
    movie::Entity::insert(movie::ActiveModel {
        id: Set(id),
        title: Set(Some(format!("Movie {id}"))),
        description: Set(Some(format!("Description of movie {id}"))),
        trailer: Set(Some(format!("https://trailers.example.org/{id}"))),
        year: Set(Some(2000 + id)),
        rating: Set(Some(6.5)),
        genre_id: Set(genre_id),
        director_id: Set(director_id),
    })
    .exec(db)
    .await
    .unwrap();
}

pub fn build_test_app(db: DatabaseConnection) -> Router {
    let state = Arc::new(AppState { movies: MovieRepository::new(db) });
    movies::app(state)
}

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

pub fn ids(json: &serde_json::Value) -> Vec<i64> {
    json.as_array().unwrap().iter().map(|m| m["id"].as_i64().unwrap()).collect()
}

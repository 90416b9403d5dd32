use sea_orm::{
    ColumnTrait, DatabaseConnection, EntityTrait, JoinType, LoaderTrait, QueryFilter, QueryOrder,
    QuerySelect, RelationTrait,
};
use tracing::debug;

use crate::{
    entities::{director, genre, movie},
    error::AppResult,
    models::{MovieFilter, MovieRecord},
};

pub const PAGE_SIZE: u64 = 5;

#[derive(Clone)]
pub struct MovieRepository {
    db: DatabaseConnection,
}

impl MovieRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// One page of movies that resolve to both a genre and a director,
    /// ordered by id. Pages past the end come back empty.
    pub async fn list_movies(&self, filter: &MovieFilter) -> AppResult<Vec<MovieRecord>> {
        let mut query = movie::Entity::find()
            .join(JoinType::InnerJoin, movie::Relation::Genre.def())
            .join(JoinType::InnerJoin, movie::Relation::Director.def());

        if let Some(director_id) = filter.director_id {
            query = query.filter(movie::Column::DirectorId.eq(director_id));
        }
        if let Some(genre_id) = filter.genre_id {
            query = query.filter(movie::Column::GenreId.eq(genre_id));
        }

        // SQLite binds OFFSET as a signed 64-bit integer.
        let offset =
            filter.page.saturating_sub(1).saturating_mul(PAGE_SIZE).min(i64::MAX as u64);

        debug!(
            director_id = ?filter.director_id,
            genre_id = ?filter.genre_id,
            page = filter.page,
            offset = offset,
            "listing movies"
        );

        let movies = query
            .order_by_asc(movie::Column::Id)
            .offset(offset)
            .limit(PAGE_SIZE)
            .all(&self.db)
            .await?;

        let genres = movies.load_one(genre::Entity, &self.db).await?;
        let directors = movies.load_one(director::Entity, &self.db).await?;

        let records: Vec<MovieRecord> = movies
            .into_iter()
            .zip(genres)
            .zip(directors)
            .map(|((movie, genre), director)| MovieRecord { movie, genre, director })
            .collect();

        debug!(result_count = records.len(), "listed movies");

        Ok(records)
    }

    /// Looks a movie up by id. Null or dangling references do not hide it.
    pub async fn get_movie(&self, id: i32) -> AppResult<Option<MovieRecord>> {
        let found = movie::Entity::find_by_id(id)
            .find_also_related(genre::Entity)
            .one(&self.db)
            .await?;

        let Some((movie, genre)) = found else {
            debug!(movie_id = id, "movie not found");
            return Ok(None);
        };

        let director = match movie.director_id {
            Some(director_id) => director::Entity::find_by_id(director_id).one(&self.db).await?,
            None => None,
        };

        Ok(Some(MovieRecord { movie, genre, director }))
    }
}

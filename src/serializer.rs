use serde::Serialize;

use crate::{
    entities::{director, genre},
    models::MovieRecord,
};

#[derive(Clone, Debug, PartialEq, Serialize, utoipa::ToSchema)]
pub struct MovieDocument {
    pub id: i32,
    pub title: Option<String>,
    pub description: Option<String>,
    pub trailer: Option<String>,
    pub year: Option<i32>,
    pub rating: Option<f64>,
    pub genre: RelatedDocument,
    pub director: RelatedDocument,
}

/// Nested `{id, name}` document, or `{}` when the reference is null.
#[derive(Clone, Debug, PartialEq, Serialize, utoipa::ToSchema)]
#[serde(untagged)]
pub enum RelatedDocument {
    Present {
        id: i32,
        name: Option<String>,
    },
    Absent {},
}

impl From<&genre::Model> for RelatedDocument {
    fn from(g: &genre::Model) -> Self {
        Self::Present { id: g.id, name: g.name.clone() }
    }
}

impl From<&director::Model> for RelatedDocument {
    fn from(d: &director::Model) -> Self {
        Self::Present { id: d.id, name: d.name.clone() }
    }
}

pub fn serialize_movie(record: &MovieRecord) -> MovieDocument {
    let m = &record.movie;
    MovieDocument {
        id: m.id,
        title: m.title.clone(),
        description: m.description.clone(),
        trailer: m.trailer.clone(),
        year: m.year,
        rating: m.rating,
        genre: record.genre.as_ref().map_or(RelatedDocument::Absent {}, RelatedDocument::from),
        director: record.director.as_ref().map_or(RelatedDocument::Absent {}, RelatedDocument::from),
    }
}

pub fn serialize_movie_list(records: &[MovieRecord]) -> Vec<MovieDocument> {
    records.iter().map(serialize_movie).collect()
}

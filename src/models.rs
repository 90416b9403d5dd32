use axum::{
    extract::{FromRequestParts, Query},
    http::request::Parts,
};

use crate::{
    entities::{director, genre, movie},
    error::{AppError, AppResult},
};

/// Raw query string of `GET /movies/`. Values stay textual so that a
/// malformed number is reported by us rather than by the extractor.
/// A repeated key keeps its first value.
#[derive(Debug, Default)]
pub struct ListQuery {
    pub director_id: Option<String>,
    pub genre_id: Option<String>,
    pub page: Option<String>,
}

impl ListQuery {
    pub fn from_pairs(pairs: impl IntoIterator<Item = (String, String)>) -> Self {
        let mut q = Self::default();
        for (key, value) in pairs {
            let slot = match key.as_str() {
                "director_id" => &mut q.director_id,
                "genre_id" => &mut q.genre_id,
                "page" => &mut q.page,
                _ => continue,
            };
            slot.get_or_insert(value);
        }
        q
    }
}

impl<S: Send + Sync> FromRequestParts<S> for ListQuery {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(pairs) = Query::<Vec<(String, String)>>::from_request_parts(parts, state).await?;
        Ok(Self::from_pairs(pairs))
    }
}

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct MovieFilter {
    pub director_id: Option<i64>,
    pub genre_id: Option<i64>,
    /// 1-based page number.
    pub page: u64,
}

impl TryFrom<ListQuery> for MovieFilter {
    type Error = AppError;

    fn try_from(q: ListQuery) -> AppResult<Self> {
        let director_id = parse_param("director_id", q.director_id.as_deref())?;
        let genre_id = parse_param("genre_id", q.genre_id.as_deref())?;
        let page = match q.page.as_deref().filter(|s| !s.is_empty()) {
            Some(raw) => parse_page(raw)?,
            None => 1,
        };

        Ok(Self { director_id, genre_id, page })
    }
}

fn parse_param(name: &str, raw: Option<&str>) -> AppResult<Option<i64>> {
    let Some(raw) = raw.filter(|s| !s.is_empty()) else {
        return Ok(None);
    };
    raw.trim().parse().map(Some).map_err(|_| invalid(name, raw))
}

/// Any integer is accepted. Anything below the first page is clamped to it
/// and anything too large to represent lands past the last page.
fn parse_page(raw: &str) -> AppResult<u64> {
    let trimmed = raw.trim();
    let (negative, digits) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(invalid("page", raw));
    }
    if negative {
        return Ok(1);
    }

    Ok(digits.parse::<u64>().unwrap_or(u64::MAX).max(1))
}

fn invalid(name: &str, raw: &str) -> AppError {
    AppError::BadRequest(format!("{name} must be an integer, got {raw:?}"))
}

/// A movie row together with whatever genre and director it resolves to.
#[derive(Clone, Debug, PartialEq)]
pub struct MovieRecord {
    pub movie: movie::Model,
    pub genre: Option<genre::Model>,
    pub director: Option<director::Model>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn query(director: Option<&str>, genre: Option<&str>, page: Option<&str>) -> ListQuery {
        ListQuery {
            director_id: director.map(String::from),
            genre_id: genre.map(String::from),
            page: page.map(String::from),
        }
    }

    fn pairs(items: &[(&str, &str)]) -> Vec<(String, String)> {
        items.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect()
    }

    #[test]
    fn absent_params_default_to_first_page() {
        let filter = MovieFilter::try_from(ListQuery::default()).unwrap();
        assert_eq!(filter, MovieFilter { director_id: None, genre_id: None, page: 1 });
    }

    #[test]
    fn empty_params_count_as_absent() {
        let filter = MovieFilter::try_from(query(Some(""), Some(""), Some(""))).unwrap();
        assert_eq!(filter, MovieFilter { director_id: None, genre_id: None, page: 1 });
    }

    #[test]
    fn whitespace_only_params_are_rejected() {
        for q in [query(Some(" "), None, None), query(None, None, Some(" "))] {
            let err = MovieFilter::try_from(q).unwrap_err();
            assert!(matches!(err, AppError::BadRequest(_)), "unexpected error: {err:?}");
        }
    }

    #[test]
    fn surrounding_whitespace_is_ignored() {
        let filter = MovieFilter::try_from(query(Some(" 3 "), None, Some(" 2"))).unwrap();
        assert_eq!(filter.director_id, Some(3));
        assert_eq!(filter.page, 2);
    }

    #[test]
    fn parses_all_params() {
        let filter = MovieFilter::try_from(query(Some("3"), Some("4"), Some("2"))).unwrap();
        assert_eq!(filter, MovieFilter { director_id: Some(3), genre_id: Some(4), page: 2 });
    }

    #[test]
    fn ids_wider_than_the_column_still_parse() {
        let filter = MovieFilter::try_from(query(Some("3000000000"), None, None)).unwrap();
        assert_eq!(filter.director_id, Some(3_000_000_000));
    }

    #[test]
    fn non_positive_page_is_clamped() {
        assert_eq!(MovieFilter::try_from(query(None, None, Some("0"))).unwrap().page, 1);
        assert_eq!(MovieFilter::try_from(query(None, None, Some("-7"))).unwrap().page, 1);
        let huge_negative = "-99999999999999999999999";
        assert_eq!(MovieFilter::try_from(query(None, None, Some(huge_negative))).unwrap().page, 1);
    }

    #[test]
    fn oversized_page_saturates() {
        let filter = MovieFilter::try_from(query(None, None, Some("99999999999999999999"))).unwrap();
        assert_eq!(filter.page, u64::MAX);
    }

    #[test]
    fn rejects_non_integer_values() {
        for q in [
            query(Some("abc"), None, None),
            query(None, Some("1.5"), None),
            query(None, None, Some("two")),
            query(None, None, Some("-")),
        ] {
            let err = MovieFilter::try_from(q).unwrap_err();
            assert!(matches!(err, AppError::BadRequest(_)), "unexpected error: {err:?}");
        }
    }

    #[test]
    fn error_names_offending_param() {
        let err = MovieFilter::try_from(query(Some("abc"), None, None)).unwrap_err();
        assert!(err.to_string().contains("director_id"));
    }

    #[test]
    fn repeated_keys_keep_first_value() {
        let q = ListQuery::from_pairs(pairs(&[("page", "1"), ("page", "2"), ("genre_id", "4")]));
        assert_eq!(q.page.as_deref(), Some("1"));
        assert_eq!(q.genre_id.as_deref(), Some("4"));
        assert_eq!(q.director_id, None);
    }

    #[test]
    fn unknown_keys_are_ignored() {
        let q = ListQuery::from_pairs(pairs(&[("sort", "title"), ("director_id", "2")]));
        assert_eq!(q.director_id.as_deref(), Some("2"));
        assert_eq!(q.page, None);
    }
}

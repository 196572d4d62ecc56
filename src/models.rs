use std::num::IntErrorKind;

use serde::{Deserialize, Serialize};

use crate::{entities::movie, error::AppError};

/// A movie as it travels over the wire.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Movie {
    pub id: i32,
    #[serde(rename = "imdbID")]
    pub imdb_id: String,
    pub title: String,
    pub year: i32,
    pub rating: f64,
    #[serde(rename = "isSuperhero")]
    pub is_superhero: bool,
}

impl From<movie::Model> for Movie {
    fn from(m: movie::Model) -> Self {
        Self {
            id: m.id,
            imdb_id: m.imdb_id,
            title: m.title,
            year: m.year,
            rating: m.rating,
            is_superhero: m.is_superhero,
        }
    }
}

/// Body accepted by create and update. A client-sent `id` is dropped during deserialization.
#[derive(Clone, Debug, Deserialize)]
pub struct MovieInput {
    #[serde(rename = "imdbID")]
    pub imdb_id: String,
    pub title: String,
    pub year: i32,
    pub rating: f64,
    #[serde(rename = "isSuperhero")]
    pub is_superhero: bool,
}

impl MovieInput {
    pub fn validate(&self) -> Result<(), AppError> {
        if self.imdb_id.trim().is_empty() {
            return Err(AppError::bad_request("imdbID is required"));
        }
        if self.title.trim().is_empty() {
            return Err(AppError::bad_request("title is required"));
        }
        Ok(())
    }
}

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    pub year: Option<String>,
}

impl ListQuery {
    /// An empty `year` is treated the same as a missing one. Surrounding whitespace is not
    /// stripped.
    pub fn year(&self) -> Result<Option<i32>, AppError> {
        let raw = match self.year.as_deref() {
            None | Some("") => return Ok(None),
            Some(raw) => raw,
        };

        raw.parse::<i32>().map(Some).map_err(|err| match err.kind() {
            IntErrorKind::PosOverflow | IntErrorKind::NegOverflow => {
                AppError::bad_request(format!("year {raw} is out of range"))
            },
            _ => AppError::bad_request(format!("invalid year {raw:?}: {err}")),
        })
    }
}

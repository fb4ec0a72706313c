use std::{fmt::Display, str::FromStr};

use serde::{Deserialize, Deserializer, Serialize, de};

use crate::entities::movie;

/// A movie record as it travels over the wire.
///
/// Every field is optional: `id` is unset until the store assigns it, and the
/// descriptive fields double as a sparse patch on update.
#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct Movie {
    pub id: Option<i32>,
    pub title: Option<String>,
    pub original_title: Option<String>,
    pub director: Option<String>,
    pub writer: Option<String>,
    pub cast: Option<String>,
    pub synopsis: Option<String>,
    pub poster_url: Option<String>,
    pub stars: Option<i32>,
    pub year: Option<i32>,
}

impl From<movie::Model> for Movie {
    fn from(m: movie::Model) -> Self {
        Self {
            id: Some(m.id),
            title: m.title,
            original_title: m.original_title,
            director: m.director,
            writer: m.writer,
            cast: m.cast,
            synopsis: m.synopsis,
            poster_url: m.poster_url,
            stars: m.stars,
            year: m.year,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct FilterParams {
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default, deserialize_with = "empty_as_none")]
    pub stars: Option<i32>,
    #[serde(default, deserialize_with = "empty_as_none")]
    pub year: Option<i32>,
}

// `?stars=` arrives as an empty string and means "not given".
fn empty_as_none<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: FromStr,
    T::Err: Display,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    match raw.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(s) => s.parse().map(Some).map_err(de::Error::custom),
    }
}

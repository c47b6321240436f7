//! Query parameter DTOs for the gateway API
//!
//! Defines the raw query strings of each endpoint and their validation.

use serde::Deserialize;

use crate::error::ApiError;
use crate::models::Language;

/// Minimum search query length, in characters, after trimming.
pub const MIN_QUERY_LENGTH: usize = 2;

fn parse_language(lang: Option<&str>) -> Result<Language, ApiError> {
    match lang {
        None => Ok(Language::default()),
        Some(tag) => tag.parse(),
    }
}

/// Query parameters of `GET /api/trending`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TrendingParams {
    /// Language tag, `en-US` when absent
    #[serde(default)]
    pub lang: Option<String>,
}

impl TrendingParams {
    /// Returns the requested language or the reason it was rejected.
    pub fn validate(&self) -> Result<Language, ApiError> {
        parse_language(self.lang.as_deref())
    }
}

/// Query parameters of `GET /api/search`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchParams {
    /// Search text, required
    #[serde(default)]
    pub q: Option<String>,
    /// Language tag, `en-US` when absent
    #[serde(default)]
    pub lang: Option<String>,
}

/// A search request that passed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidSearch {
    /// Trimmed query text
    pub query: String,
    pub language: Language,
}

impl SearchParams {
    /// Validates the query first, then the language.
    pub fn validate(&self) -> Result<ValidSearch, ApiError> {
        let query = self.q.as_deref().unwrap_or_default().trim();

        if query.is_empty() {
            return Err(ApiError::MissingQuery);
        }

        let length = query.chars().count();
        if length < MIN_QUERY_LENGTH {
            return Err(ApiError::QueryTooShort { length });
        }

        let language = parse_language(self.lang.as_deref())?;

        Ok(ValidSearch {
            query: query.to_string(),
            language,
        })
    }
}

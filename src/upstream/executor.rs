//! Upstream Request Executor
//!
//! Runs one provider call, checks the body shape, then filters and
//! truncates the result list. Provider order is preserved.

use serde_json::Value;
use tracing::{error, info};

use super::MetadataProvider;
use crate::error::UpstreamError;
use crate::models::item::{has_image, is_displayable_search_hit};
use crate::models::Language;

/// Cache operation name of the trending fetch
pub const TRENDING_OPERATION: &str = "trending";
/// Cache operation name of the search fetch
pub const SEARCH_OPERATION: &str = "search";

/// Maximum number of trending items returned
pub const TRENDING_LIMIT: usize = 20;
/// Maximum number of search hits returned
pub const SEARCH_LIMIT: usize = 15;

/// Takes the `results` array out of a provider body.
pub fn extract_results(body: Value) -> Result<Vec<Value>, UpstreamError> {
    let missing = UpstreamError::Schema {
        missing_field: "results",
    };

    let Value::Object(mut body) = body else {
        return Err(missing);
    };

    match body.remove("results") {
        Some(Value::Array(items)) => Ok(items),
        Some(other) => Err(UpstreamError::Unexpected(format!(
            "'results' is not an array: {}",
            json_kind(&other)
        ))),
        None => Err(missing),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

fn filter_and_truncate(
    items: Vec<Value>,
    keep: impl Fn(&Value) -> bool,
    limit: usize,
) -> (Vec<Value>, usize) {
    let total = items.len();
    let kept: Vec<Value> = items.into_iter().filter(|item| keep(item)).collect();
    let dropped = total - kept.len();
    (kept.into_iter().take(limit).collect(), dropped)
}

// == Trending ==
/// Fetches trending items that have artwork, at most `TRENDING_LIMIT`.
pub async fn fetch_trending(
    provider: &dyn MetadataProvider,
    language: Language,
) -> Result<Value, UpstreamError> {
    info!("Fetching trending content in {}", language);

    let body = provider.trending(language).await?;
    let items = extract_results(body).inspect_err(|e| {
        error!("Invalid trending response from TMDB: {}", e);
    })?;
    info!("Found {} trending items", items.len());

    let (items, dropped) = filter_and_truncate(items, has_image, TRENDING_LIMIT);
    if dropped > 0 {
        info!("Filtered out {} items without images", dropped);
    }

    Ok(Value::Array(items))
}

// == Search ==
/// Searches movies and TV shows that have artwork, at most `SEARCH_LIMIT`.
///
/// `query` is expected to be validated and trimmed already.
pub async fn fetch_search(
    provider: &dyn MetadataProvider,
    query: &str,
    language: Language,
) -> Result<Value, UpstreamError> {
    info!("Searching for '{}' in {}", query, language);

    let body = provider.search_multi(query, language).await?;
    let items = extract_results(body).inspect_err(|e| {
        error!("Invalid search response from TMDB: {}", e);
    })?;
    info!("Found {} results for '{}'", items.len(), query);

    let (items, dropped) = filter_and_truncate(items, is_displayable_search_hit, SEARCH_LIMIT);
    if dropped > 0 {
        info!("Filtered out {} irrelevant items", dropped);
    }

    Ok(Value::Array(items))
}

//! Content item filters.
//!
//! Items are opaque JSON objects passed through unchanged; only the image
//! paths and the media type are inspected.

use serde_json::Value;

/// Media types kept in search results.
pub const SEARCHABLE_MEDIA_TYPES: [&str; 2] = ["movie", "tv"];

fn non_empty_str(item: &Value, field: &str) -> bool {
    item.get(field)
        .and_then(Value::as_str)
        .is_some_and(|s| !s.is_empty())
}

/// True when the item carries a poster or a backdrop path.
pub fn has_image(item: &Value) -> bool {
    non_empty_str(item, "poster_path") || non_empty_str(item, "backdrop_path")
}

/// The item's `media_type` tag, if any.
pub fn media_type(item: &Value) -> Option<&str> {
    item.get("media_type").and_then(Value::as_str)
}

/// True for movies and TV shows that have an image.
pub fn is_displayable_search_hit(item: &Value) -> bool {
    media_type(item).is_some_and(|t| SEARCHABLE_MEDIA_TYPES.contains(&t)) && has_image(item)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_has_image() {
        assert!(has_image(&json!({"poster_path": "/p.jpg"})));
        assert!(has_image(&json!({"poster_path": null, "backdrop_path": "/b.jpg"})));
        assert!(!has_image(&json!({"poster_path": "", "backdrop_path": null})));
        assert!(!has_image(&json!({"title": "No art"})));
        assert!(!has_image(&json!("not an object")));
    }

    #[test]
    fn test_search_hit_requires_media_type_and_image() {
        assert!(is_displayable_search_hit(&json!({"media_type": "movie", "poster_path": "/p.jpg"})));
        assert!(is_displayable_search_hit(&json!({"media_type": "tv", "backdrop_path": "/b.jpg"})));
        assert!(!is_displayable_search_hit(&json!({"media_type": "person", "poster_path": "/p.jpg"})));
        assert!(!is_displayable_search_hit(&json!({"media_type": "movie"})));
        assert!(!is_displayable_search_hit(&json!({"poster_path": "/p.jpg"})));
    }
}

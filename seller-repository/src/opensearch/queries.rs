//! OpenSearch query builders.

use serde_json::{json, Value};

/// How long a scroll context stays open between page fetches.
pub const SCROLL_KEEP_ALIVE: &str = "1m";

/// Number of hits fetched per scroll page.
pub const SCROLL_PAGE_SIZE: i64 = 500;

/// Build a free-text query from user input.
///
/// The text is handed to `query_string` verbatim, so the caller may use the
/// full query-string syntax (field prefixes, wildcards, boolean operators).
pub fn build_search_query(query_text: &str) -> Value {
    json!({
        "query": {
            "query_string": {
                "query": query_text
            }
        }
    })
}

/// Build the body used to fetch the next page of a scroll.
pub fn build_scroll_request(scroll_id: &str) -> Value {
    json!({
        "scroll": SCROLL_KEEP_ALIVE,
        "scroll_id": scroll_id
    })
}

/// Build the body used to release a scroll context.
pub fn build_clear_scroll_request(scroll_id: &str) -> Value {
    json!({
        "scroll_id": [scroll_id]
    })
}

pub mod archive;
pub mod dashboard;
pub mod letters;

/// Maximum number of hits returned by the search endpoints.
pub const SEARCH_LIMIT: i64 = 20;

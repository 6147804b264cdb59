// Catalog-wide constants. Anything a user may want to change lives in config.rs instead.

// === API ===
pub const DEFAULT_API_BASE_URL: &str = "http://localhost:5000/api";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

// === Logging ===
pub const DEFAULT_LOG_FILTER: &str = "kinoteka=info";

// === Listing ===
pub const DEFAULT_PAGE_SIZE: u32 = 20;
/// The list is always ordered by IMDb rating, best first.
pub const SORT_BY: &str = "imdb_rating";
pub const SORT_ORDER: &str = "DESC";

// === Search ===
pub const MIN_SUGGESTION_QUERY_CHARS: usize = 2;

// === Presentation ===
pub const CARD_DESCRIPTION_CHARS: usize = 100;
pub const PLACEHOLDER_POSTER_URL: &str =
    "https://via.placeholder.com/300x450/667eea/ffffff?text=Poster+not+found";
pub const NO_DESCRIPTION: &str = "No description available";
pub const UNKNOWN_YEAR: &str = "Unknown year";

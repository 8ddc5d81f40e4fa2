// Single source of truth for all default values.

// --- Server ---
pub const DEFAULT_BIND_ADDR: &str = "127.0.0.1:5000";
pub const DEFAULT_SESSION_TTL_SECS: u64 = 7 * 24 * 3600; // one week
pub const DEFAULT_SECURE_COOKIES: bool = false;

// --- Storage ---
pub const DEFAULT_DB_FILENAME: &str = "database.db";
pub const DEFAULT_READ_POOL_SIZE: usize = 4;
pub const DEFAULT_BUSY_TIMEOUT_MS: u32 = 5_000;

// --- Search ---
pub const DEFAULT_CANDIDATE_LIMIT: usize = 100;
pub const DEFAULT_MAX_SUGGESTIONS: usize = 5;
pub const DEFAULT_SIMILARITY_CUTOFF: f64 = 0.3;

// --- Pagination ---
pub const DEFAULT_BOOKS_PER_PAGE: u32 = 10;
pub const DEFAULT_REVIEWS_PER_PAGE: u32 = 10;

// --- Observability ---
pub const DEFAULT_LOG_FILTER: &str = "libris=info,tower_http=info";

// --- Config file ---
pub const DEFAULT_CONFIG_FILENAME: &str = "libris.toml";

/// Libris version string.
pub const LIBRIS_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Genres a book can be tagged with.
pub const GENRES: &[&str] = &[
    "Fantasy",
    "Science fiction",
    "Mystery",
    "Thriller",
    "Romance",
    "Horror",
    "Historical fiction",
    "Literary fiction",
    "Biography",
    "History",
    "Poetry",
    "Non-fiction",
    "Children's",
    "Young adult",
    "Classic",
];

/// Attribute key for a book's publication date.
pub const ATTR_PUBLICATION_DATE: &str = "publication_date";

/// Attribute key for a book's genres (one row per genre).
pub const ATTR_GENRE: &str = "genre";

// --- Field limits (in characters) ---
pub const USERNAME_MIN_LEN: usize = 6;
pub const USERNAME_MAX_LEN: usize = 50;
pub const PASSWORD_MIN_LEN: usize = 7;
pub const PASSWORD_MAX_LEN: usize = 100;
pub const TITLE_MAX_LEN: usize = 100;
pub const AUTHOR_MAX_LEN: usize = 100;
pub const REVIEW_COMMENT_MAX_LEN: usize = 1000;

// --- Ratings ---
pub const RATING_MIN: u8 = 1;
pub const RATING_MAX: u8 = 5;

/// Name of the session cookie.
pub const SESSION_COOKIE: &str = "libris_session";

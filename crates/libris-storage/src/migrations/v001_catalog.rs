//! v001: users, books, book_attributes, reviews.

pub const MIGRATION_SQL: &str = "
CREATE TABLE IF NOT EXISTS users (
    user_id        INTEGER PRIMARY KEY,
    username       TEXT NOT NULL UNIQUE,
    password_hash  TEXT NOT NULL,
    join_date      TEXT NOT NULL DEFAULT (date('now'))
);

CREATE TABLE IF NOT EXISTS books (
    book_id     INTEGER PRIMARY KEY,
    user_id     INTEGER NOT NULL REFERENCES users(user_id) ON DELETE CASCADE,
    title       TEXT NOT NULL,
    author      TEXT NOT NULL,
    created_at  TEXT NOT NULL DEFAULT (strftime('%Y-%m-%dT%H:%M:%fZ', 'now'))
);

CREATE INDEX IF NOT EXISTS idx_books_title ON books(title);
CREATE INDEX IF NOT EXISTS idx_books_user ON books(user_id);

CREATE TABLE IF NOT EXISTS book_attributes (
    book_id          INTEGER NOT NULL REFERENCES books(book_id) ON DELETE CASCADE,
    attribute_key    TEXT NOT NULL,
    attribute_value  TEXT NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_book_attributes_book ON book_attributes(book_id, attribute_key);

CREATE TABLE IF NOT EXISTS reviews (
    review_id   INTEGER PRIMARY KEY,
    book_id     INTEGER NOT NULL REFERENCES books(book_id) ON DELETE CASCADE,
    user_id     INTEGER NOT NULL REFERENCES users(user_id) ON DELETE CASCADE,
    rating      INTEGER NOT NULL CHECK (rating BETWEEN 1 AND 5),
    comment     TEXT,
    created_at  TEXT NOT NULL DEFAULT (strftime('%Y-%m-%dT%H:%M:%fZ', 'now')),
    updated_at  TEXT NOT NULL DEFAULT (strftime('%Y-%m-%dT%H:%M:%fZ', 'now')),
    UNIQUE (book_id, user_id)
);

CREATE INDEX IF NOT EXISTS idx_reviews_user ON reviews(user_id);
";

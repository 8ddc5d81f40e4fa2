//! # libris-search
//!
//! Approximate title search. A query's tokens drive a SQL `LIKE` prefilter,
//! and the surviving titles are ranked with a `difflib`-compatible
//! sequence matcher.

pub mod close_matches;
pub mod sequence_matcher;
pub mod title_search;
pub mod tokenizer;

pub use close_matches::{get_close_matches, CloseMatch};
pub use sequence_matcher::SequenceMatcher;
pub use title_search::{search_titles, SearchOutcome, Suggestion};
pub use tokenizer::candidate_tokens;

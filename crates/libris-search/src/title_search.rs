//! Title lookup: exact match first, then prefiltered fuzzy suggestions.

use libris_core::config::SearchConfig;
use libris_core::errors::LibrisResult;
use libris_core::models::Book;
use libris_core::tracing::events;
use libris_core::traits::ICatalogStorage;

use crate::close_matches::get_close_matches;
use crate::tokenizer::candidate_tokens;

/// How a title search resolved.
#[derive(Debug, Clone, PartialEq)]
pub enum SearchOutcome {
    /// A book has exactly this title; the caller should go straight to it.
    Exact(i64),
    /// Ranked alternatives, best first. May be empty.
    Suggestions(Vec<Suggestion>),
}

/// A suggested book and how closely its title matched the query.
#[derive(Debug, Clone, PartialEq)]
pub struct Suggestion {
    pub book: Book,
    pub score: f64,
}

/// Search the catalog for `query`.
///
/// Surrounding whitespace is ignored. Titles are compared case-insensitively
/// for ranking; the exact-match check is case-sensitive.
pub fn search_titles<S>(storage: &S, query: &str, config: &SearchConfig) -> LibrisResult<SearchOutcome>
where
    S: ICatalogStorage + ?Sized,
{
    let query = query.trim();
    if query.is_empty() {
        return Ok(SearchOutcome::Suggestions(Vec::new()));
    }
    let query_len = query.chars().count();

    if let Some(book) = storage.books_by_title(query)?.into_iter().next() {
        events::search_performed(query_len, 0, 0, true);
        return Ok(SearchOutcome::Exact(book.book_id));
    }

    let tokens = candidate_tokens(query);
    if tokens.is_empty() {
        events::search_performed(query_len, 0, 0, false);
        return Ok(SearchOutcome::Suggestions(Vec::new()));
    }
    let titles = storage.similar_titles(&tokens, config.effective_candidate_limit())?;

    let folded: Vec<String> = titles.iter().map(|t| t.to_lowercase()).collect();
    let ranked = get_close_matches(
        &query.to_lowercase(),
        folded.iter().map(String::as_str),
        config.effective_max_suggestions(),
        config.effective_cutoff(),
    );

    let mut suggestions: Vec<Suggestion> = Vec::with_capacity(ranked.len());
    for close in &ranked {
        // same allocation, so case-colliding titles stay distinct
        let Some(idx) = folded
            .iter()
            .position(|f| std::ptr::eq(f.as_str(), close.text))
        else {
            continue;
        };
        let title = &titles[idx];
        if suggestions.iter().any(|s| &s.book.title == title) {
            continue;
        }
        if let Some(book) = storage.books_by_title(title)?.into_iter().next() {
            suggestions.push(Suggestion {
                book,
                score: close.score,
            });
        }
    }

    events::search_performed(query_len, titles.len(), suggestions.len(), false);
    Ok(SearchOutcome::Suggestions(suggestions))
}

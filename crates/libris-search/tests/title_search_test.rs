//! Title search against an in-memory catalog.

use libris_core::config::SearchConfig;
use libris_core::models::NewBook;
use libris_core::traits::ICatalogStorage;
use libris_search::{search_titles, SearchOutcome};
use libris_storage::StorageEngine;

fn catalog(titles: &[&str]) -> (StorageEngine, Vec<i64>) {
    let engine = StorageEngine::open_in_memory().unwrap();
    let user_id = engine.create_user("librarian", "$argon2id$fake").unwrap();
    let ids = titles
        .iter()
        .map(|title| {
            engine
                .add_book(&NewBook {
                    user_id,
                    title: title.to_string(),
                    author: "Anonymous".to_string(),
                    publication_date: None,
                    genres: Vec::new(),
                })
                .unwrap()
        })
        .collect();
    (engine, ids)
}

fn suggested_titles(outcome: SearchOutcome) -> Vec<String> {
    match outcome {
        SearchOutcome::Suggestions(list) => list.into_iter().map(|s| s.book.title).collect(),
        SearchOutcome::Exact(id) => panic!("expected suggestions, got exact match {id}"),
    }
}

#[test]
fn exact_title_returns_first_book() {
    let (engine, ids) = catalog(&["Dune", "Dune", "Emma"]);
    let outcome = search_titles(&engine, "Dune", &SearchConfig::default()).unwrap();
    assert_eq!(outcome, SearchOutcome::Exact(ids[0]));
}

#[test]
fn surrounding_whitespace_is_ignored() {
    let (engine, ids) = catalog(&["Emma"]);
    let outcome = search_titles(&engine, "  Emma ", &SearchConfig::default()).unwrap();
    assert_eq!(outcome, SearchOutcome::Exact(ids[0]));
}

#[test]
fn blank_query_has_no_suggestions() {
    let (engine, _) = catalog(&["Dune"]);
    let outcome = search_titles(&engine, "   ", &SearchConfig::default()).unwrap();
    assert_eq!(outcome, SearchOutcome::Suggestions(Vec::new()));
}

#[test]
fn misspelling_suggests_the_intended_title() {
    let (engine, _) = catalog(&["The Hobbit", "Middlemarch", "Persuasion"]);
    let outcome = search_titles(&engine, "the hobit", &SearchConfig::default()).unwrap();
    assert_eq!(suggested_titles(outcome), vec!["The Hobbit"]);
}

#[test]
fn suggestions_are_ranked_and_bounded() {
    let (engine, _) = catalog(&["Dune", "Dune Messiah", "Children of Dune", "Dunes", "Emma"]);
    let config = SearchConfig {
        max_suggestions: Some(2),
        ..SearchConfig::default()
    };
    let outcome = search_titles(&engine, "dune", &config).unwrap();
    // "dune" vs "dune" is exact only case-sensitively; ranking is case-folded
    assert_eq!(suggested_titles(outcome), vec!["Dune", "Dunes"]);
}

#[test]
fn duplicate_titles_suggest_the_oldest_book() {
    let (engine, ids) = catalog(&["Solaris", "Solaris"]);
    match search_titles(&engine, "solaris!", &SearchConfig::default()).unwrap() {
        SearchOutcome::Suggestions(list) => {
            assert_eq!(list.len(), 1);
            assert_eq!(list[0].book.book_id, ids[0]);
            assert!(list[0].score > 0.9);
        }
        other => panic!("unexpected outcome {other:?}"),
    }
}

#[test]
fn nothing_in_common_means_no_suggestions() {
    let (engine, _) = catalog(&["Dune"]);
    let outcome = search_titles(&engine, "zzzz", &SearchConfig::default()).unwrap();
    assert!(suggested_titles(outcome).is_empty());
}

#[test]
fn non_ascii_titles_match_regardless_of_case() {
    let (engine, ids) = catalog(&["ÉTÉ", "DUNE"]);
    match search_titles(&engine, "été", &SearchConfig::default()).unwrap() {
        SearchOutcome::Suggestions(list) => {
            assert_eq!(list.len(), 1);
            assert_eq!(list[0].book.book_id, ids[0]);
            assert_eq!(list[0].score, 1.0);
        }
        other => panic!("unexpected outcome {other:?}"),
    }
}

#[test]
fn ranking_ignores_case() {
    let (engine, _) = catalog(&["the hobbyist", "The Hobbit"]);
    let outcome = search_titles(&engine, "the hobbit", &SearchConfig::default()).unwrap();
    assert_eq!(suggested_titles(outcome), vec!["The Hobbit", "the hobbyist"]);
}

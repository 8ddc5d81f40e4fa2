//! Best "good enough" matches for a word among a list of possibilities.

use std::cmp::Ordering;

use crate::sequence_matcher::SequenceMatcher;

/// A possibility that scored at or above the cutoff.
#[derive(Debug, Clone, PartialEq)]
pub struct CloseMatch<'a> {
    pub text: &'a str,
    pub score: f64,
}

/// Up to `n` possibilities whose similarity to `word` is at least `cutoff`,
/// best first. Equal scores are ordered by text, larger first.
///
/// Each candidate has to clear `real_quick_ratio`, then `quick_ratio`, before
/// the full `ratio` is computed. `n == 0` or a cutoff outside `[0, 1]`
/// yields no matches.
pub fn get_close_matches<'a, I>(word: &str, possibilities: I, n: usize, cutoff: f64) -> Vec<CloseMatch<'a>>
where
    I: IntoIterator<Item = &'a str>,
{
    if n == 0 || !(0.0..=1.0).contains(&cutoff) {
        return Vec::new();
    }

    let mut matcher = SequenceMatcher::new("", word);
    let mut scored: Vec<CloseMatch<'a>> = Vec::new();
    for text in possibilities {
        matcher.set_seq1(text);
        if matcher.real_quick_ratio() >= cutoff
            && matcher.quick_ratio() >= cutoff
            && matcher.ratio() >= cutoff
        {
            let score = matcher.ratio();
            scored.push(CloseMatch { text, score });
        }
    }

    scored.sort_by(|x, y| {
        y.score
            .partial_cmp(&x.score)
            .unwrap_or(Ordering::Equal)
            .then_with(|| y.text.cmp(x.text))
    });
    scored.truncate(n);
    scored
}

#[cfg(test)]
mod tests {
    use super::*;

    fn texts<'a>(matches: &[CloseMatch<'a>]) -> Vec<&'a str> {
        matches.iter().map(|m| m.text).collect()
    }

    #[test]
    fn difflib_docs_example() {
        // difflib.get_close_matches("appel", ["ape", "apple", "peach", "puppy"])
        let found = get_close_matches("appel", ["ape", "apple", "peach", "puppy"], 3, 0.6);
        assert_eq!(texts(&found), vec!["apple", "ape"]);
    }

    #[test]
    fn ties_prefer_larger_text() {
        let found = get_close_matches("ab", ["ax", "ay"], 2, 0.0);
        assert_eq!(texts(&found), vec!["ay", "ax"]);
    }

    #[test]
    fn truncates_to_n() {
        let found = get_close_matches("dune", ["dune", "dunes", "dune ii", "june"], 2, 0.5);
        assert_eq!(texts(&found), vec!["dune", "dunes"]);
    }

    #[test]
    fn invalid_arguments_yield_nothing() {
        assert!(get_close_matches("x", ["x"], 0, 0.5).is_empty());
        assert!(get_close_matches("x", ["x"], 3, 1.5).is_empty());
        assert!(get_close_matches("x", ["x"], 3, -0.1).is_empty());
    }
}

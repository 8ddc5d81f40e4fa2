//! Query tokens for the SQL `LIKE` prefilter.
//!
//! A query is lowercased and split into alphanumeric words. Short words are
//! used whole; longer words contribute their trigrams as well, so a misspelt
//! word still shares a substring with the title it was meant to match.

/// Words at or below this length are not split into trigrams.
const WHOLE_WORD_MAX: usize = 3;

/// Upper bound on tokens per query, bounding the size of the prefilter.
pub const MAX_TOKENS: usize = 32;

/// Deduplicated prefilter tokens for `query`, in first-seen order.
pub fn candidate_tokens(query: &str) -> Vec<String> {
    let lowered = query.to_lowercase();
    let mut tokens: Vec<String> = Vec::new();

    for word in lowered
        .split(|c: char| !c.is_alphanumeric())
        .filter(|w| !w.is_empty())
    {
        let chars: Vec<char> = word.chars().collect();
        push(&mut tokens, word.to_string());
        if chars.len() > WHOLE_WORD_MAX {
            for window in chars.windows(WHOLE_WORD_MAX) {
                push(&mut tokens, window.iter().collect());
            }
        }
    }
    tokens
}

fn push(tokens: &mut Vec<String>, token: String) {
    if tokens.len() < MAX_TOKENS && !tokens.contains(&token) {
        tokens.push(token);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_words_are_kept_whole() {
        assert_eq!(candidate_tokens("The Cat"), vec!["the", "cat"]);
    }

    #[test]
    fn long_words_add_trigrams() {
        assert_eq!(
            candidate_tokens("Hobit"),
            vec!["hobit", "hob", "obi", "bit"]
        );
    }

    #[test]
    fn punctuation_splits_and_duplicates_collapse() {
        assert_eq!(candidate_tokens("war, war & war!"), vec!["war"]);
        assert!(candidate_tokens("  -- ").is_empty());
    }

    #[test]
    fn token_count_is_bounded() {
        let query = "abcdefghijklmnopqrstuvwxyz0123456789abcdefghij";
        assert_eq!(candidate_tokens(query).len(), MAX_TOKENS);
    }
}

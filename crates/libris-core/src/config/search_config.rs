use serde::{Deserialize, Serialize};

use super::defaults;

/// Title search configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct SearchConfig {
    /// Maximum candidate titles fetched by the LIKE prefilter.
    pub candidate_limit: Option<usize>,
    /// Maximum number of suggestions returned.
    pub max_suggestions: Option<usize>,
    /// Minimum similarity ratio (0.0–1.0) for a suggestion.
    pub cutoff: Option<f64>,
}

impl SearchConfig {
    pub fn effective_candidate_limit(&self) -> usize {
        self.candidate_limit
            .unwrap_or(defaults::DEFAULT_CANDIDATE_LIMIT)
    }

    pub fn effective_max_suggestions(&self) -> usize {
        self.max_suggestions
            .unwrap_or(defaults::DEFAULT_MAX_SUGGESTIONS)
    }

    pub fn effective_cutoff(&self) -> f64 {
        self.cutoff.unwrap_or(defaults::DEFAULT_SIMILARITY_CUTOFF)
    }
}

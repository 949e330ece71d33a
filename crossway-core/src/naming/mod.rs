//! Fuzzy resolution of free-text street names
//!
//! Road names in source data are inconsistently abbreviated ("St" vs
//! "Street", "S" vs "South"), so a query goes through two stages: a strict
//! prefix-token gate that keeps unrelated streets sharing a tail (such as
//! "Estate St" for "State Street") out of the running, then an indel-ratio
//! comparison of the full strings that separates honest abbreviations from
//! near-miss names like "7800 S" for "800 South". Survivors are ranked by
//! the mean of both scores.

pub mod scoring;

use serde::Serialize;

use crate::Error;
use crate::model::RoadGraph;
use scoring::{prefix_ratio, ratio};

/// Minimum aligned-prefix similarity between the first token of the query
/// and the first token of a candidate street name
const PREFIX_THRESHOLD: f64 = 95.0;
/// Minimum full-string similarity for a candidate that passed the gate
const FULL_THRESHOLD: f64 = 70.0;

const MAX_SUGGESTIONS: usize = 3;
const SUGGESTION_CUTOFF: f64 = 0.7;

/// A canonical street name matched from a free-text query
#[derive(Debug, Clone, Serialize)]
pub struct ResolvedStreet {
    /// Canonical name as stored in the network
    pub name: String,
    /// The query that produced the match
    pub query: String,
    /// Prefix-token gate score, 0-100
    pub prefix_score: f64,
    /// Full-string score, 0-100
    pub full_score: f64,
}

impl ResolvedStreet {
    /// Ranking score: mean of the two stage scores
    pub fn combined_score(&self) -> f64 {
        (self.prefix_score + self.full_score) / 2.0
    }
}

/// Resolves a free-text query to the closest canonical street name.
///
/// Candidates are enumerated from the name index in lexical order, so
/// repeated calls over the same graph return the same result, ties
/// included. Streets without a name are never candidates.
///
/// # Errors
///
/// Returns [`Error::StreetNotFound`] when no name survives both
/// thresholds; the error carries up to three "did you mean" suggestions.
/// A below-threshold best effort is never returned.
pub fn resolve(graph: &RoadGraph, query: &str) -> Result<ResolvedStreet, Error> {
    let query = query.trim();
    let Some(main_part) = query.split_whitespace().next() else {
        return Err(Error::StreetNotFound {
            query: query.to_string(),
            suggestions: Vec::new(),
        });
    };
    let main_lower = main_part.to_lowercase();
    let query_lower = query.to_lowercase();

    let mut candidates: Vec<ResolvedStreet> = Vec::new();
    for name in graph.street_names() {
        let Some(street_main) = name.split_whitespace().next() else {
            continue;
        };
        let prefix_score = prefix_ratio(&main_lower, &street_main.to_lowercase());
        if prefix_score < PREFIX_THRESHOLD {
            continue;
        }
        let full_score = ratio(&query_lower, &name.to_lowercase());
        if full_score < FULL_THRESHOLD {
            continue;
        }
        candidates.push(ResolvedStreet {
            name: name.to_string(),
            query: query.to_string(),
            prefix_score,
            full_score,
        });
    }

    // Stable sort: equal combined scores keep their lexical enumeration order
    candidates.sort_by(|a, b| b.combined_score().total_cmp(&a.combined_score()));

    candidates.into_iter().next().ok_or_else(|| Error::StreetNotFound {
        query: query.to_string(),
        suggestions: suggestions(graph, &query_lower),
    })
}

/// Closest names by Jaro-Winkler similarity, for not-found diagnostics
fn suggestions(graph: &RoadGraph, query_lower: &str) -> Vec<String> {
    let mut scored: Vec<(f64, &str)> = graph
        .street_names()
        .map(|name| (strsim::jaro_winkler(query_lower, &name.to_lowercase()), name))
        .filter(|(score, _)| *score >= SUGGESTION_CUTOFF)
        .collect();
    scored.sort_by(|a, b| b.0.total_cmp(&a.0));
    scored
        .into_iter()
        .take(MAX_SUGGESTIONS)
        .map(|(_, name)| name.to_string())
        .collect()
}

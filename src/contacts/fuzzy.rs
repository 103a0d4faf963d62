//! Fuzzy name matching using strsim.
//!
//! Used only for "did you mean" suggestions when a plain substring search
//! comes back empty.
//!
//! CHANGELOG:
//! - 10/19/2026 - Suggestion threshold for the contact search loop
//! - 01/10/2026 - Initial stub (Claude)

use strsim::{jaro_winkler, levenshtein, sorensen_dice};

/// Minimum score for a name to be offered as a suggestion (0.0 - 1.0).
pub const SUGGEST_THRESHOLD: f64 = 0.80;

/// Fuzzy match result.
#[derive(Debug, Clone)]
pub struct FuzzyMatch {
    pub score: f64,
    pub strategy: &'static str,
}

/// Match two strings using multiple strategies, keeping the best score.
///
/// - jaro_winkler: prefix-weighted typos ("Jonh" vs "John")
/// - sorensen_dice: bigram overlap
/// - levenshtein: edit distance ratio
/// - token_sort: word order ("Lovelace Ada" vs "Ada Lovelace")
pub fn multi_match(query: &str, target: &str) -> FuzzyMatch {
    let query_lower = query.to_lowercase();
    let target_lower = target.to_lowercase();

    let strategies: [(&'static str, f64); 4] = [
        ("jaro_winkler", jaro_winkler(&query_lower, &target_lower)),
        ("sorensen_dice", sorensen_dice(&query_lower, &target_lower)),
        ("levenshtein", levenshtein_ratio(&query_lower, &target_lower)),
        ("token_sort", token_sort_ratio(&query_lower, &target_lower)),
    ];

    strategies
        .into_iter()
        .max_by(|a, b| a.1.partial_cmp(&b.1).unwrap_or(std::cmp::Ordering::Equal))
        .map(|(strategy, score)| FuzzyMatch { score, strategy })
        .unwrap_or(FuzzyMatch {
            score: 0.0,
            strategy: "none",
        })
}

/// Best match of `query` against the full name or any single word of it.
///
/// People usually type one name ("jonh"), so whole-name scores alone would
/// undersell a close first-name typo.
pub fn name_score(query: &str, name: &str) -> FuzzyMatch {
    name.split_whitespace()
        .map(|word| multi_match(query, word))
        .fold(multi_match(query, name), |best, m| if m.score > best.score { m } else { best })
}

/// Levenshtein ratio (0.0 - 1.0).
fn levenshtein_ratio(a: &str, b: &str) -> f64 {
    let max_len = a.chars().count().max(b.chars().count());
    if max_len == 0 {
        return 1.0;
    }
    let distance = levenshtein(a, b);
    1.0 - (distance as f64 / max_len as f64)
}

/// Token sort ratio - sort words before comparing.
fn token_sort_ratio(a: &str, b: &str) -> f64 {
    let mut a_tokens: Vec<&str> = a.split_whitespace().collect();
    let mut b_tokens: Vec<&str> = b.split_whitespace().collect();
    a_tokens.sort();
    b_tokens.sort();

    jaro_winkler(&a_tokens.join(" "), &b_tokens.join(" "))
}

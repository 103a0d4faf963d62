//! Contact search and numbered-selection parsing for the search loop.
//!
//! CHANGELOG:
//! - 10/19/2026 - Initial implementation

use super::fuzzy;
use super::model::Contact;
use thiserror::Error;

/// Case-insensitive substring match on the contact name, in source order.
pub fn search<'a>(contacts: &'a [Contact], query: &str) -> Vec<&'a Contact> {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return Vec::new();
    }
    contacts
        .iter()
        .filter(|c| c.name.to_lowercase().contains(&needle))
        .collect()
}

/// Close-but-not-substring names, best first, at most `limit`.
pub fn suggest<'a>(contacts: &'a [Contact], query: &str, limit: usize) -> Vec<&'a Contact> {
    let query = query.trim();
    if query.is_empty() || limit == 0 {
        return Vec::new();
    }

    let mut scored: Vec<(&Contact, f64)> = contacts
        .iter()
        .filter_map(|c| {
            let best = fuzzy::name_score(query, &c.name);
            if best.score < fuzzy::SUGGEST_THRESHOLD {
                return None;
            }
            tracing::debug!(name = %c.name, score = best.score, strategy = best.strategy, "suggestion");
            Some((c, best.score))
        })
        .collect();
    scored.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));
    scored.into_iter().take(limit).map(|(c, _)| c).collect()
}

/// Input that is only digits, commas, and spaces ("1, 3").
///
/// Typed at the search prompt this means the user tried to pick a result
/// without searching first.
pub fn looks_like_selection(input: &str) -> bool {
    let compact: String = input.chars().filter(|c| *c != ',' && *c != ' ').collect();
    !compact.is_empty() && compact.chars().all(|c| c.is_ascii_digit())
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum SelectionError {
    #[error("Invalid selection.")]
    Invalid,
}

/// Parse "1,3,5" or "a" into zero-based indices into a result list of `count`.
///
/// Any non-integer token rejects the whole selection. Out-of-range numbers
/// (zero, negative, past the end) are dropped; repeats collapse.
pub fn parse_selection(input: &str, count: usize) -> Result<Vec<usize>, SelectionError> {
    let input = input.trim();
    if input.eq_ignore_ascii_case("a") {
        return Ok((0..count).collect());
    }

    let mut picked = Vec::new();
    for token in input.split(',') {
        let Some(n) = parse_index(token.trim())? else {
            continue;
        };
        if !picked.contains(&n) && n < count {
            picked.push(n);
        }
    }
    Ok(picked)
}

/// One 1-based token as a zero-based index; `None` when it can't be one.
fn parse_index(token: &str) -> Result<Option<usize>, SelectionError> {
    let digits = token.strip_prefix(['+', '-']).unwrap_or(token);
    if digits.is_empty() || !digits.chars().all(|c| c.is_ascii_digit()) {
        return Err(SelectionError::Invalid);
    }
    if token.starts_with('-') {
        return Ok(None);
    }
    // Too large for usize is simply out of range
    Ok(digits.parse::<usize>().ok().and_then(|n| n.checked_sub(1)))
}

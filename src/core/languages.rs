use std::collections::BTreeSet;

use crate::models::MatchProfile;

#[inline]
fn normalize(code: &str) -> Option<String> {
    let code = code.trim().to_lowercase();
    (!code.is_empty()).then_some(code)
}

/// Every language a profile speaks, trimmed and lower-cased
pub fn language_set(profile: &MatchProfile) -> BTreeSet<String> {
    profile
        .languages
        .iter()
        .map(String::as_str)
        .chain(profile.lang_primary.as_deref())
        .chain(profile.lang_secondary.as_deref())
        .filter_map(normalize)
        .collect()
}

/// Sorted languages both sets contain
pub fn shared_languages(a: &BTreeSet<String>, b: &BTreeSet<String>) -> Vec<String> {
    a.intersection(b).cloned().collect()
}

/// True when both sets are non-empty and have nothing in common
pub fn languages_disjoint(a: &BTreeSet<String>, b: &BTreeSet<String>) -> bool {
    !a.is_empty() && !b.is_empty() && a.is_disjoint(b)
}

fn same_code(a: Option<&str>, b: Option<&str>) -> bool {
    match (a.and_then(normalize), b.and_then(normalize)) {
        (Some(a), Some(b)) => a == b,
        _ => false,
    }
}

/// Case-insensitive equality of primary languages
pub fn primary_equal(a: &MatchProfile, b: &MatchProfile) -> bool {
    same_code(a.lang_primary.as_deref(), b.lang_primary.as_deref())
}

/// Case-insensitive equality of secondary languages
pub fn secondary_equal(a: &MatchProfile, b: &MatchProfile) -> bool {
    same_code(a.lang_secondary.as_deref(), b.lang_secondary.as_deref())
}

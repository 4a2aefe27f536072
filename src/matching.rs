use regex::Regex;

const VARIATION_SUFFIXES: [&str; 6] = ["s", "es", "ed", "ing", "er", "ers"];

/// Whole-word containment check. Callers pass lowercased text and keyword.
///
/// Multi-word phrases and very short tokens (<= 2 chars, e.g. "mg") fall
/// back to plain substring containment; boundary checks on those are
/// unreliable. Keywords are regex-escaped, so metacharacters never panic.
pub fn matches_whole_word(text: &str, keyword: &str) -> bool {
    if keyword.is_empty() {
        return false;
    }
    if keyword.contains(' ') || keyword.chars().count() <= 2 {
        return text.contains(keyword);
    }
    let pattern = format!(r"(?i)\b{}\b", regex::escape(keyword));
    match Regex::new(&pattern) {
        Ok(re) => re.is_match(text),
        // Escaped patterns always compile; substring containment is the
        // conservative answer if that ever stops holding.
        Err(_) => text.contains(keyword),
    }
}

/// Whole-word match allowing common morphological variants.
///
/// Tries the literal keyword first, then plural/past/gerund suffixes for
/// single words longer than 3 chars, plus the e-stripped gerund ("smoke" ->
/// "smoking") for words ending in "e" longer than 4 chars. Short keywords are
/// excluded from expansion to avoid false positives.
pub fn matches_word_variation(text: &str, keyword: &str) -> bool {
    if matches_whole_word(text, keyword) {
        return true;
    }
    if keyword.contains(' ') || keyword.chars().count() <= 3 {
        return false;
    }
    for suffix in VARIATION_SUFFIXES {
        let candidate = format!("{keyword}{suffix}");
        if matches_whole_word(text, &candidate) {
            return true;
        }
    }
    if keyword.ends_with('e') && keyword.chars().count() > 4 {
        let stem = &keyword[..keyword.len() - 1];
        if matches_whole_word(text, &format!("{stem}ing")) {
            return true;
        }
    }
    false
}

/// Count of non-overlapping whole-word occurrences of a keyword.
///
/// Used by the fixed-weight policy, which rewards every occurrence rather
/// than only the first. Short and multi-word keywords count substring hits.
pub fn count_occurrences(text: &str, keyword: &str) -> usize {
    if keyword.is_empty() {
        return 0;
    }
    if keyword.contains(' ') || keyword.chars().count() <= 2 {
        return text.matches(keyword).count();
    }
    let pattern = format!(r"(?i)\b{}\b", regex::escape(keyword));
    match Regex::new(&pattern) {
        Ok(re) => re.find_iter(text).count(),
        Err(_) => text.matches(keyword).count(),
    }
}

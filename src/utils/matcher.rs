use fancy_regex::{Regex, RegexBuilder};
use log::warn;

/// Compile a case-insensitive pattern used to select proxies by name
///
/// Uses a backtracking engine so subconverter filters with look-around, such
/// as `^(?!.*US).*$`, work as written.
pub fn build_name_matcher(pattern: &str) -> Result<Regex, fancy_regex::Error> {
    RegexBuilder::new(pattern).case_insensitive(true).build()
}

/// Collect every name the matcher finds a match in, keeping the input order
///
/// Matching is a search, not an anchored match: `HK` selects `HK-1` as well
/// as `Premium HK 02`. A name the engine gives up on counts as no match.
pub fn filter_names(matcher: &Regex, names: &[String]) -> Vec<String> {
    names
        .iter()
        .filter(|name| match matcher.is_match(name) {
            Ok(matched) => matched,
            Err(e) => {
                warn!("Matching '{}' against '{}' failed: {}", name, matcher.as_str(), e);
                false
            }
        })
        .cloned()
        .collect()
}

/// Check if a string starts with a prefix, ignoring ASCII case
pub fn starts_with_ignore_case(s: &str, prefix: &str) -> bool {
    s.len() >= prefix.len()
        && s.is_char_boundary(prefix.len())
        && s[..prefix.len()].eq_ignore_ascii_case(prefix)
}

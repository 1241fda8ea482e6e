//! Variable naming convention: every word capitalized, rest lowercase.

use std::sync::LazyLock;

use regex::Regex;

use crate::config::AnalyzerConfig;

static NAMING_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([A-Z][a-z]*)(\s[A-Z][a-z]*)*$").expect("naming pattern is valid")
});

pub fn follows_convention(name: &str) -> bool {
    NAMING_PATTERN.is_match(name)
}

/// `name` without its leading ASCII digits. Exported variable names carry a
/// numeric ordering prefix the editor never shows.
pub fn strip_leading_digits(name: &str) -> &str {
    name.trim_start_matches(|c: char| c.is_ascii_digit())
}

/// Suggested conventional spelling of `name`.
///
/// Words in `config.naming_exceptions` are emitted in the configured casing;
/// every other word is capitalized with the rest lowercased.
pub fn suggest_name(name: &str, config: &AnalyzerConfig) -> String {
    strip_leading_digits(name)
        .split_whitespace()
        .map(|word| match config.naming_exception(word) {
            Some(exception) => exception.to_string(),
            None => capitalize(word),
        })
        .collect::<Vec<_>>()
        .join(" ")
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}

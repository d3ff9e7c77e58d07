//! Text Normalizer — turns raw extracted document text into the canonical form
//! the skill extractor scans.

use std::sync::LazyLock;

use regex::Regex;

/// Anything outside ASCII letters, digits, whitespace and `. + #`.
/// Keeps tokens such as `c++`, `c#` and `node.js` intact.
static NOISE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^a-zA-Z0-9\s\.\+#]").expect("static regex"));

static WHITESPACE_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("static regex"));

/// Lowercases `text`, replaces noise characters with a space, collapses
/// whitespace runs and trims.
///
/// Empty or all-noise input yields an empty string; callers treat that as an
/// extraction failure.
pub fn normalize_text(text: &str) -> String {
    let lowered = text.to_lowercase();
    let cleaned = NOISE.replace_all(&lowered, " ");
    WHITESPACE_RUN
        .replace_all(&cleaned, " ")
        .trim()
        .to_string()
}

// Tokenization and token filtering
//
// A token is a trimmed, non-empty keyword fragment extracted from a
// delimited cell value. Nothing here normalizes case or strips punctuation;
// the only extra rule is the optional pure-numeric gate below.

use std::collections::HashSet;
use std::sync::OnceLock;

use regex::Regex;

use crate::grid::CellValue;

/// Default delimiter inside composite cells (`"a | b | c"`).
pub const DEFAULT_DELIMITER: char = '|';

/// Split a raw text value on the delimiter, trim each fragment and drop the
/// ones that are empty after trimming.
pub fn tokenize(raw: &str, delimiter: char) -> Vec<String> {
    raw.split(delimiter)
        .map(str::trim)
        .filter(|fragment| !fragment.is_empty())
        .map(str::to_string)
        .collect()
}

/// Tokenize a cell value. An empty cell produces zero tokens — it is never
/// stringified into one.
pub fn tokenize_cell(cell: &CellValue, delimiter: char) -> Vec<String> {
    if cell.is_empty() {
        return Vec::new();
    }
    tokenize(&cell.raw_display(), delimiter)
}

// Integer or decimal (comma or dot separator), optional trailing percent
// sign, nothing else.
fn numeric_pattern() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^[0-9]+(?:[.,][0-9]+)?%?$").unwrap())
}

/// Keep/reject gate for the keywords-only mode: rejects purely numeric or
/// percentage tokens. Empty tokens are rejected too, even though the
/// tokenizer never emits them.
pub fn is_keyword(token: &str) -> bool {
    !token.is_empty() && !numeric_pattern().is_match(token)
}

/// Deduplicate preserving first-seen order: a token appearing twice keeps
/// only its first position.
pub fn dedup_first_seen(tokens: Vec<String>) -> Vec<String> {
    let mut seen: HashSet<String> = HashSet::with_capacity(tokens.len());
    tokens
        .into_iter()
        .filter(|token| seen.insert(token.clone()))
        .collect()
}

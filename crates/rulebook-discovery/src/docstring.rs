//! Docstring directive extraction
//!
//! A rule docstring holds free text plus `:directive` lines. Exactly one
//! directive matters here: `:key <id>`. Other directives are ignored and kept
//! out of the description.

use rulebook_domain::constants::{DIRECTIVE_PREFIX, KEY_DIRECTIVE};

/// Key and description extracted from a rule docstring
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleDoc {
    /// Text following `:key`, trimmed
    pub key: String,
    /// Non-blank, non-directive lines joined with `\n`
    pub description: String,
}

/// Extract the key directive and the description from a docstring
///
/// Returns `None` when no `:key` line carries a non-empty identifier. Lines are
/// trimmed first, so indentation inside the docstring does not matter.
pub fn parse_docstring(docstring: &str) -> Option<RuleDoc> {
    let lines: Vec<&str> = docstring.lines().map(str::trim).collect();

    let key = lines.iter().find_map(|line| key_of(line))?;
    if key.is_empty() {
        return None;
    }

    let description = lines
        .iter()
        .filter(|line| !line.is_empty() && !line.starts_with(DIRECTIVE_PREFIX))
        .copied()
        .collect::<Vec<_>>()
        .join("\n");

    Some(RuleDoc {
        key: key.to_string(),
        description,
    })
}

/// The identifier on a `:key` line; `:keyword` style directives are not keys
fn key_of(line: &str) -> Option<&str> {
    let rest = line.strip_prefix(KEY_DIRECTIVE)?;
    if rest.is_empty() || rest.starts_with(char::is_whitespace) {
        Some(rest.trim())
    } else {
        None
    }
}

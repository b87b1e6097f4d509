//! Identifier and string-literal escaping for generated Cypher.
//!
//! Every label, relationship type, property key and caller-supplied name goes
//! through [`escape_identifier`] before it reaches the query text, so names that
//! are not plain identifiers can never break the surrounding syntax.
//!
//! ## Quoting rules
//! - Plain identifiers (`[A-Za-z_][A-Za-z0-9_]*`) are emitted unchanged
//! - Everything else is wrapped in backticks, with embedded backticks doubled
//! - Variable and parameter names go through [`escape_variable`], which also
//!   quotes reserved words (`match`, `end`, ...). Labels, types and property
//!   keys may be reserved words unquoted.
//!
//! Examples:
//! - `"Movie"` → `Movie`
//! - `"Sci-Fi"` → `` `Sci-Fi` ``
//! - ``"odd`name"`` → ``` `odd``name` ```

use regex::Regex;
use std::collections::HashSet;
use std::sync::LazyLock;

/// Plain identifier: letter or underscore, then letters, digits, underscores
static PLAIN_IDENTIFIER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*$").expect("identifier pattern is a valid regex")
});

/// Dotted identifier used for (namespaced) function names, e.g. `apoc.text.join`
static DOTTED_IDENTIFIER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*(\.[A-Za-z_][A-Za-z0-9_]*)*$")
        .expect("dotted identifier pattern is a valid regex")
});

/// openCypher reserved words, lowercase
static RESERVED_WORDS: LazyLock<HashSet<&'static str>> = LazyLock::new(|| {
    [
        // clauses and sub-clauses
        "all", "asc", "ascending", "by", "call", "create", "delete", "desc", "descending",
        "detach", "exists", "limit", "mandatory", "match", "merge", "on", "optional", "order",
        "remove", "return", "scalar", "set", "skip", "union", "unwind", "where", "with", "yield",
        // operators and expressions
        "and", "as", "case", "contains", "distinct", "else", "end", "ends", "in", "is", "not",
        "of", "or", "starts", "then", "when", "xor",
        // literals
        "false", "null", "true",
        // schema commands
        "add", "constraint", "do", "drop", "for", "require", "unique",
    ]
    .into_iter()
    .collect()
});

/// Returns true when `name` can be written without backticks.
///
/// # Examples
/// ```
/// use cypher_builder::utils::identifier_escaping::is_plain_identifier;
///
/// assert!(is_plain_identifier("title"));
/// assert!(is_plain_identifier("_internal2"));
/// assert!(!is_plain_identifier("2fast"));
/// assert!(!is_plain_identifier("release date"));
/// assert!(!is_plain_identifier(""));
/// ```
pub fn is_plain_identifier(name: &str) -> bool {
    PLAIN_IDENTIFIER.is_match(name)
}

/// Returns true when `name` is a plain identifier or a dot-separated chain of them.
pub fn is_dotted_identifier(name: &str) -> bool {
    DOTTED_IDENTIFIER.is_match(name)
}

/// Escape a label, relationship type, property key or variable name.
///
/// # Examples
/// ```
/// use cypher_builder::utils::identifier_escaping::escape_identifier;
///
/// assert_eq!(escape_identifier("Movie"), "Movie");
/// assert_eq!(escape_identifier("Sci-Fi"), "`Sci-Fi`");
/// assert_eq!(escape_identifier("odd`name"), "`odd``name`");
/// ```
pub fn escape_identifier(name: &str) -> String {
    if is_plain_identifier(name) {
        name.to_string()
    } else {
        format!("`{}`", name.replace('`', "``"))
    }
}

/// Case-insensitive check against the openCypher reserved words.
pub fn is_reserved_word(name: &str) -> bool {
    RESERVED_WORDS.contains(name.to_lowercase().as_str())
}

/// Escape a variable or parameter name. Reserved words are backticked as well,
/// since a bare `match` cannot stand for a variable.
///
/// # Examples
/// ```
/// use cypher_builder::utils::identifier_escaping::escape_variable;
///
/// assert_eq!(escape_variable("movie"), "movie");
/// assert_eq!(escape_variable("match"), "`match`");
/// assert_eq!(escape_variable("End"), "`End`");
/// ```
pub fn escape_variable(name: &str) -> String {
    if is_reserved_word(name) {
        format!("`{}`", name)
    } else {
        escape_identifier(name)
    }
}

/// Render a string literal in single quotes.
///
/// Backslashes and single quotes are escaped; control characters that would
/// otherwise end up raw in the query text use their Cypher escape sequences.
///
/// # Examples
/// ```
/// use cypher_builder::utils::identifier_escaping::quote_string;
///
/// assert_eq!(quote_string("The Matrix"), "'The Matrix'");
/// assert_eq!(quote_string("it's"), r"'it\'s'");
/// ```
pub fn quote_string(value: &str) -> String {
    let mut quoted = String::with_capacity(value.len() + 2);
    quoted.push('\'');
    for c in value.chars() {
        match c {
            '\\' => quoted.push_str("\\\\"),
            '\'' => quoted.push_str("\\'"),
            '\n' => quoted.push_str("\\n"),
            '\r' => quoted.push_str("\\r"),
            '\t' => quoted.push_str("\\t"),
            _ => quoted.push(c),
        }
    }
    quoted.push('\'');
    quoted
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_identifiers_pass_through() {
        for name in ["n", "Movie", "ACTED_IN", "_x", "a1"] {
            assert_eq!(escape_identifier(name), name);
        }
    }

    #[test]
    fn test_non_identifiers_are_backticked() {
        assert_eq!(escape_identifier("first name"), "`first name`");
        assert_eq!(escape_identifier("1st"), "`1st`");
        assert_eq!(escape_identifier(""), "``");
        assert_eq!(escape_identifier("a`b"), "`a``b`");
    }

    #[test]
    fn test_reserved_words_quoted_only_as_variables() {
        assert!(is_reserved_word("MATCH"));
        assert!(is_reserved_word("null"));
        assert!(!is_reserved_word("count"));
        assert_eq!(escape_variable("match"), "`match`");
        assert_eq!(escape_variable("Return"), "`Return`");
        assert_eq!(escape_variable("first name"), "`first name`");
        assert_eq!(escape_variable("matches"), "matches");
        assert_eq!(escape_identifier("match"), "match");
    }

    #[test]
    fn test_dotted_identifiers() {
        assert!(is_dotted_identifier("count"));
        assert!(is_dotted_identifier("apoc.text.join"));
        assert!(!is_dotted_identifier("apoc..join"));
        assert!(!is_dotted_identifier(".count"));
        assert!(!is_dotted_identifier("count("));
    }

    #[test]
    fn test_quote_string_escapes() {
        assert_eq!(quote_string(""), "''");
        assert_eq!(quote_string(r"C:\path"), r"'C:\\path'");
        assert_eq!(quote_string("line\nbreak"), r"'line\nbreak'");
    }
}

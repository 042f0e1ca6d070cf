//! Crontab expression validator.
//!
//! A pure string-pattern check: the expression must have exactly five
//! whitespace-separated fields and each field must match the grammar for
//! its position (wildcard, single value in range, `*/N` step, `A-B`
//! range, or comma-separated list). Range and list members are not
//! semantically bounded beyond the whole-field grammar.

use std::sync::LazyLock;

use regex::Regex;

/// Builds the pattern for one field given its single-value alternation.
fn field_pattern(single: &str) -> Regex {
    Regex::new(&format!(
        r"^(\*|({single})|\*/[0-9]+|[0-9]+-[0-9]+|[0-9]+(,[0-9]+)*)$"
    ))
    .expect("invalid field regex")
}

static FIELD_PATTERNS: LazyLock<[Regex; 5]> = LazyLock::new(|| {
    [
        field_pattern("[0-9]|[1-5][0-9]"),          // minute 0-59
        field_pattern("[0-9]|1[0-9]|2[0-3]"),       // hour 0-23
        field_pattern("[1-9]|[12][0-9]|3[01]"),     // day of month 1-31
        field_pattern("[1-9]|1[0-2]"),              // month 1-12
        field_pattern("[0-7]"),                     // day of week 0-7
    ]
});

/// Checks whether an expression matches the five-field crontab grammar.
///
/// Never fails; any non-conforming input simply returns `false`.
pub fn is_valid_expression(expression: &str) -> bool {
    let fields: Vec<&str> = expression.split_whitespace().collect();
    if fields.len() != 5 {
        return false;
    }
    FIELD_PATTERNS
        .iter()
        .zip(&fields)
        .all(|(pattern, field)| pattern.is_match(field))
}

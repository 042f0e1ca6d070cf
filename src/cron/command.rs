//! Callback command builder and URL slug derivation.
//!
//! The generated command is what the cron daemon ultimately executes:
//! a timestamped "starting" log line, a `curl` call against the target
//! URL with stdout/stderr appended to the job's log file, and a
//! timestamped "completed" line carrying curl's exit status. The steps
//! are chained with `;` so the completion line is appended even when the
//! call itself fails.

use std::sync::LazyLock;

use regex::Regex;

static PROTOCOL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^https?://").expect("invalid protocol regex"));

static NON_ALNUM_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^a-z0-9]+").expect("invalid slug regex"));

/// Derives the filesystem-safe log slug for a target URL.
///
/// Strips the protocol prefix, lowercases, collapses every run of
/// non-alphanumeric characters into a single `-`, and trims leading and
/// trailing separators. An empty result is legal.
pub fn slugify_url(url: &str) -> String {
    let stripped = PROTOCOL_RE.replace(url.trim(), "");
    let lowered = stripped.to_lowercase();
    NON_ALNUM_RE
        .replace_all(&lowered, "-")
        .trim_matches('-')
        .to_string()
}

/// Builds the shell command invoking the job's HTTP callback.
///
/// Without a payload the call is a silent GET; with one it is a POST
/// with `Content-Type: application/json` and the payload as the raw
/// body. `-k` tolerates invalid certificates, matching what the callback
/// targets in practice expose.
pub fn build_command(target_url: &str, payload: Option<&str>, slug: &str, log_dir: &str) -> String {
    let log_file = format!("{}/{slug}.log", log_dir.trim_end_matches('/'));
    let timestamp = r#"$(date '+%Y-%m-%d %H:%M:%S')"#;

    // The URL is single-quoted so query strings with `&` or `?` stay a
    // single shell word instead of backgrounding a truncated curl.
    let url = quote_single(target_url);
    let call = match payload {
        Some(body) => format!(
            r#"curl -k -s -X POST -H "Content-Type: application/json" -d '{}' '{url}' >> {log_file} 2>&1"#,
            quote_single(body),
        ),
        None => format!("curl -k -s '{url}' >> {log_file} 2>&1"),
    };

    format!(
        r#"echo "[{timestamp}] starting {target_url}" >> {log_file}; {call}; echo "[{timestamp}] completed (exit $?)" >> {log_file}"#
    )
}

/// Escapes embedded single quotes so the payload survives the shell's
/// single-quoted context byte for byte.
fn quote_single(raw: &str) -> String {
    raw.replace('\'', r"'\''")
}

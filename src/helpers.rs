use chrono::{DateTime, Utc};

/// Boilerplate prefix stripped from test names (`TestFoo`, `test_foo`).
pub const TEST_NAME_PREFIX: &str = "test";

// ── Naming helpers ────────────────────────────────────────────────────────────

/// Longest normalised name kept, so that the full identifier (name,
/// timestamp and counter) stays inside a 63-character DNS-1123 label.
pub const MAX_NAME_LEN: usize = 40;

/// Normalise a test name into a token usable as a namespace name.
///
/// Lower-cases the name, turns every path separator (`::`, `/`, `\`) and
/// any other character outside `[a-z0-9-]` into a hyphen, strips a leading
/// [`TEST_NAME_PREFIX`] and trims hyphens left at either end.  The result
/// is at most [`MAX_NAME_LEN`] characters and never empty.
pub fn normalize_test_name(raw: &str) -> String {
    let replaced: String = raw
        .to_lowercase()
        .replace("::", "-")
        .chars()
        .map(|c| {
            if c.is_ascii_lowercase() || c.is_ascii_digit() {
                c
            } else {
                '-'
            }
        })
        .collect();

    let stripped = replaced
        .strip_prefix(TEST_NAME_PREFIX)
        .unwrap_or(replaced.as_str())
        .trim_matches('-');
    // Only ASCII remains, so byte slicing is on char boundaries.
    let truncated = stripped[..stripped.len().min(MAX_NAME_LEN)].trim_end_matches('-');

    if truncated.is_empty() {
        TEST_NAME_PREFIX.to_string()
    } else {
        truncated.to_string()
    }
}

/// Base-36 rendering of an integer using `0-9a-z`, with a leading `-` for
/// negative values.
pub fn base36(value: i64) -> String {
    const DIGITS: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";

    let mut n = value.unsigned_abs();
    if n == 0 {
        return "0".to_string();
    }
    let mut out = Vec::new();
    while n > 0 {
        out.push(DIGITS[(n % 36) as usize]);
        n /= 36;
    }
    if value < 0 {
        out.push(b'-');
    }
    out.reverse();
    String::from_utf8(out).unwrap_or_default()
}

/// Derive the scoped identifier of a test context: the normalised test name
/// followed by the creation time (seconds) in base 36.
pub fn scoped_id(raw_name: &str, now: DateTime<Utc>) -> String {
    format!("{}-{}", normalize_test_name(raw_name), base36(now.timestamp()))
}

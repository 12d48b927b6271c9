//! Log sanitization utilities
//!
//! Keeps API tokens and large response bodies (registrar XML, zone listings) out of logs.

/// Maximum number of characters to include in truncated log output.
const TRUNCATE_LIMIT: usize = 256;

/// Characters of a secret left visible by [`mask_secret`].
const VISIBLE_SECRET_CHARS: usize = 4;

/// MSRV-compatible replacement for `str::floor_char_boundary` (stable since 1.91.0).
fn floor_char_boundary(s: &str, index: usize) -> usize {
    if index >= s.len() {
        s.len()
    } else {
        let mut i = index;
        while i > 0 && !s.is_char_boundary(i) {
            i -= 1;
        }
        i
    }
}

/// Truncate a string for safe logging.
///
/// Bodies up to `TRUNCATE_LIMIT` bytes are returned unchanged; longer ones are cut on a char
/// boundary and suffixed with the total length.
pub fn truncate_for_log(s: &str) -> String {
    if s.len() <= TRUNCATE_LIMIT {
        s.to_string()
    } else {
        format!(
            "{}... [truncated, total {} bytes]",
            &s[..floor_char_boundary(s, TRUNCATE_LIMIT)],
            s.len()
        )
    }
}

/// Mask a credential for display, keeping only its last few characters.
///
/// Empty secrets render as `"<unset>"` so a missing credential is visible in a config dump.
pub fn mask_secret(secret: &str) -> String {
    let count = secret.chars().count();
    if count == 0 {
        return "<unset>".to_string();
    }
    if count <= VISIBLE_SECRET_CHARS * 2 {
        return "*".repeat(count);
    }
    let tail: String = secret.chars().skip(count - VISIBLE_SECRET_CHARS).collect();
    format!("****{tail}")
}

//! Bookmark URL rules: normalization and validation.
//!
//! A bookmark URL is always stored scheme-qualified. Input without an
//! explicit scheme gets `https://` prepended; anything that then fails to
//! parse as an absolute http(s) URL with a dotted hostname is rejected.

use url::Url;

use crate::types::errors::SyncError;

fn invalid() -> SyncError {
    SyncError::Validation("invalid url".to_string())
}

/// Returns the scheme part of `raw` if it carries an explicit `scheme://`
/// prefix, i.e. the part before `://` is a plausible scheme token.
fn explicit_scheme(raw: &str) -> Option<&str> {
    let (scheme, _) = raw.split_once("://")?;
    if !scheme.is_empty()
        && scheme
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'))
    {
        Some(scheme)
    } else {
        None
    }
}

/// Normalizes a user-supplied URL for storage.
///
/// The returned string is the trimmed input, scheme-qualified — not the
/// parser's re-serialization, so `example.com` becomes exactly
/// `https://example.com` with no trailing slash.
pub fn normalize(raw: &str) -> Result<String, SyncError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(SyncError::Validation("missing fields".to_string()));
    }

    let candidate = match explicit_scheme(trimmed) {
        Some(scheme) if scheme.eq_ignore_ascii_case("http") || scheme.eq_ignore_ascii_case("https") => {
            trimmed.to_string()
        }
        // Explicit non-http scheme (ftp://, file://, ...).
        Some(_) => return Err(invalid()),
        None => format!("https://{}", trimmed),
    };

    let parsed = Url::parse(&candidate).map_err(|_| invalid())?;
    if parsed.scheme() != "http" && parsed.scheme() != "https" {
        return Err(invalid());
    }

    // Reject bare hostnames without a public-looking domain (localhost).
    let host = parsed.host_str().ok_or_else(invalid)?;
    if !host.contains('.') {
        return Err(invalid());
    }

    Ok(candidate)
}

/// Hostname of an already-stored bookmark URL, if it parses.
pub fn hostname(url: &str) -> Option<String> {
    Url::parse(url)
        .ok()
        .and_then(|u| u.host_str().map(str::to_string))
}

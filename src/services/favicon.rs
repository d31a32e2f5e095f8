//! Favicon source chain for bookmark rows.
//!
//! The UI tries each candidate in order and falls through on load
//! failure: third-party favicon service first, then the site's own
//! `/favicon.ico`, then a static placeholder. This module only produces
//! the ordered candidates; it performs no fetching.

use super::urls;

const FAVICON_SERVICE: &str = "https://www.google.com/s2/favicons";
const PLACEHOLDER: &str = "https://cdn-icons-png.flaticon.com/512/5920/5920153.png";

/// Ordered favicon candidates for a bookmark URL.
///
/// When the URL yields no hostname only the placeholder is returned.
pub fn candidates(bookmark_url: &str) -> Vec<String> {
    match urls::hostname(bookmark_url) {
        Some(host) => vec![
            format!("{}?domain={}&sz=64", FAVICON_SERVICE, host),
            format!("https://{}/favicon.ico", host),
            PLACEHOLDER.to_string(),
        ],
        None => vec![PLACEHOLDER.to_string()],
    }
}

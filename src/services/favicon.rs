//! Favicon/initials helpers for Smartmarks.
//!
//! Purely presentational: derives the display domain for a bookmark card and
//! the two-letter initials shown when the remote icon is unavailable.

/// Fallback label shown when a URL cannot be parsed.
pub const FALLBACK_LABEL: &str = "link";

/// Derives the display domain for a URL.
///
/// The scheme and a leading `www.` are stripped. Inputs without a scheme are
/// treated as `https://` first. Invalid/unparsable URLs fall back to the
/// literal label `"link"`.
pub fn display_domain(url: &str) -> String {
    let candidate = if url.starts_with("http://") || url.starts_with("https://") {
        url.to_string()
    } else {
        format!("https://{}", url)
    };

    match host_of(&candidate) {
        Some(host) => host.strip_prefix("www.").unwrap_or(&host).to_string(),
        None => FALLBACK_LABEL.to_string(),
    }
}

/// Extracts the hostname from a schemed URL, or `None` when it is not a
/// plausible host.
fn host_of(url: &str) -> Option<String> {
    let rest = url
        .strip_prefix("https://")
        .or_else(|| url.strip_prefix("http://"))?;

    // Host ends at the path, query, fragment, or port
    let authority = rest.split(['/', '?', '#']).next().unwrap_or("");
    let host = authority.split(':').next().unwrap_or("");

    let valid = !host.is_empty()
        && host
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '.');
    if valid {
        Some(host.to_ascii_lowercase())
    } else {
        None
    }
}

/// Two-letter fallback initials for a display domain.
///
/// Uses the first label of the domain when it is at least two characters,
/// otherwise the start of the whole domain.
pub fn initials(domain: &str) -> String {
    let first_label = domain.split('.').next().unwrap_or(domain);
    let source = if first_label.chars().count() >= 2 {
        first_label
    } else {
        domain
    };
    source.chars().take(2).collect::<String>().to_uppercase()
}

/// Remote favicon URL for a display domain.
pub fn favicon_url(domain: &str) -> String {
    format!("https://www.google.com/s2/favicons?domain={}&sz=64", domain)
}

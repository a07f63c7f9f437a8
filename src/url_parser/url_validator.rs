use tracing::trace;
use url::Url;

use super::normalizer::normalize_url;
use super::options::NormalizeOptions;
use super::patterns::{PROTOCOL_PREFIX_REGEX, SCHEME_REGEX, WINDOWS_PATH_REGEX};

/// Schemes a crawler is allowed to fetch
const CRAWLABLE_SCHEMES: [&str; 2] = ["http", "https"];

/// Returns true for references without a scheme or `//` authority
///
/// `/path`, `./path`, `../path` and bare `example.com` are relative;
/// `https://example.com`, `ftp://example.com` and `//example.com` are not.
/// Empty input is never relative.
pub fn is_relative_url(url: &str) -> bool {
    if url.is_empty() {
        return false;
    }

    let has_scheme = SCHEME_REGEX.is_match(url) && !WINDOWS_PATH_REGEX.is_match(url);
    !has_scheme && !url.starts_with("//")
}

/// Returns true if the URL is absolute, uses http(s) and survives normalization
pub fn is_valid_crawlable_url(url: &str) -> bool {
    if url.is_empty() || is_relative_url(url) {
        return false;
    }

    let parsed = match Url::parse(url) {
        Ok(parsed) => parsed,
        Err(e) => {
            trace!("Not crawlable, failed to parse '{}': {}", url, e);
            return false;
        }
    };

    if !CRAWLABLE_SCHEMES.contains(&parsed.scheme()) {
        return false;
    }

    normalize_url(url, &NormalizeOptions::default()).is_some()
}

/// Coerces a sloppy URI like `example.com/path` into an absolute URL
///
/// Inputs that already parse are returned unchanged. Inputs without a `.`
/// cannot be a bare domain and yield `None`.
pub fn uri_to_url(uri: &str) -> Option<String> {
    if uri.is_empty() || !uri.contains('.') {
        return None;
    }

    if Url::parse(uri).is_ok() {
        return Some(uri.to_string());
    }

    match Url::parse(&format!("https://{}", uri)) {
        Ok(url) => Some(url.to_string()),
        Err(e) => {
            trace!("Failed to coerce '{}' into a URL: {}", uri, e);
            None
        }
    }
}

/// Converts a URL (or sloppy URI) into `host/path` without scheme, `www.` or trailing slashes
pub fn url_to_uri(url: &str) -> Option<String> {
    if url.is_empty() {
        return None;
    }

    let parsed = Url::parse(url)
        .ok()
        .or_else(|| uri_to_url(url).and_then(|coerced| Url::parse(&coerced).ok()))?;

    let host = parsed.host_str().unwrap_or("");
    let host = host.strip_prefix("www.").unwrap_or(host);
    let path = parsed.path().trim_end_matches('/');

    Some(format!("{}{}", host, path))
}

/// Removes a leading `http://`, `https://` or `//`
pub fn strip_protocol(url: &str) -> String {
    PROTOCOL_PREFIX_REGEX.replace(url, "").into_owned()
}

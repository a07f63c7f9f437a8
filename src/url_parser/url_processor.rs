use tracing::trace;
use url::Url;

use super::options::NormalizeOptions;
use super::patterns::{DUPLICATE_SLASH_REGEX, WWW_STRIPPABLE_HOST_REGEX};
use super::url_reconstructor::reconstruct_query;

/// Fragment directive used by browsers for scroll-to-text links
const TEXT_FRAGMENT_MARKER: &str = ":~:text";

/// Drops deny-listed query parameters and optionally sorts the rest by key
///
/// The query is rewritten only when it is present. An empty result removes
/// the `?` entirely.
pub fn process_query_parameters(url: &mut Url, options: &NormalizeOptions) {
    if url.query().is_none() {
        return;
    }

    let mut query_pairs: Vec<(String, String)> = url
        .query_pairs()
        .map(|(k, v)| (k.into_owned(), v.into_owned()))
        .collect();

    query_pairs.retain(|(key, _)| {
        let remove = options.should_remove_query_parameter(key);
        if remove {
            trace!("Removing query parameter '{}'", key);
        }
        !remove
    });

    if options.sort_query_parameters {
        // Stable, so repeated keys keep their relative order
        query_pairs.sort_by(|a, b| a.0.cmp(&b.0));
    }

    reconstruct_query(url, &query_pairs);
}

/// Collapses `//` runs in the path, leaving embedded `scheme://` untouched
pub fn process_path_segments(url: &mut Url) {
    let path = url.path();
    if !path.contains("//") {
        return;
    }

    let collapsed = DUPLICATE_SLASH_REGEX
        .replace_all(path, |caps: &regex::Captures| match caps.get(1) {
            Some(_) => caps[0].to_string(),
            None => "/".to_string(),
        })
        .into_owned();

    trace!("Collapsed path '{}' to '{}'", path, collapsed);
    url.set_path(&collapsed);
}

/// Applies `strip_hash` / `strip_text_fragment`
pub fn process_fragment(url: &mut Url, options: &NormalizeOptions) {
    if options.strip_hash {
        url.set_fragment(None);
        return;
    }

    if !options.strip_text_fragment {
        return;
    }

    let Some(fragment) = url.fragment() else {
        return;
    };

    let lowered = fragment.to_ascii_lowercase();
    if let Some(index) = lowered.find(TEXT_FRAGMENT_MARKER) {
        let kept = fragment[..index].to_string();
        if kept.is_empty() {
            url.set_fragment(None);
        } else {
            url.set_fragment(Some(&kept));
        }
    }
}

/// Drops a trailing dot and, when requested, a leading `www.`
pub fn process_host(url: &mut Url, options: &NormalizeOptions) {
    let Some(host) = url.host_str().map(str::to_string) else {
        return;
    };

    let mut normalized = host.trim_end_matches('.').to_string();

    if options.strip_www {
        if let Some(rest) = normalized.strip_prefix("www.") {
            if !rest.starts_with("www.") && WWW_STRIPPABLE_HOST_REGEX.is_match(rest) {
                normalized = rest.to_string();
            }
        }
    }

    if normalized != host && !normalized.is_empty() {
        trace!("Rewriting host '{}' to '{}'", host, normalized);
        if url.set_host(Some(&normalized)).is_err() {
            trace!("Host '{}' rejected, keeping '{}'", normalized, host);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(url: &str) -> Url {
        Url::parse(url).expect("test URL should parse")
    }

    #[test]
    fn test_query_parameters_are_filtered_and_sorted() {
        let mut url = parse("https://example.com/?b=2&utm_medium=x&a=1&ref=foo");
        process_query_parameters(&mut url, &NormalizeOptions::default());
        assert_eq!(url.query(), Some("a=1&b=2"));
    }

    #[test]
    fn test_empty_query_is_removed() {
        let mut url = parse("https://example.com/?utm_source=test");
        process_query_parameters(&mut url, &NormalizeOptions::default());
        assert_eq!(url.query(), None);
        assert_eq!(url.as_str(), "https://example.com/");
    }

    #[test]
    fn test_duplicate_slashes_collapse() {
        let mut url = parse("https://example.com//a///b");
        process_path_segments(&mut url);
        assert_eq!(url.path(), "/a/b");

        let mut url = parse("https://web.archive.org/web/2020/https://example.com//x");
        process_path_segments(&mut url);
        assert_eq!(url.path(), "/web/2020/https://example.com/x");
    }

    #[test]
    fn test_text_fragment_is_dropped() {
        let options = NormalizeOptions::default();

        let mut url = parse("https://example.com/page#:~:text=hello");
        process_fragment(&mut url, &options);
        assert_eq!(url.fragment(), None);

        let mut url = parse("https://example.com/page#section:~:text=hello");
        process_fragment(&mut url, &options);
        assert_eq!(url.fragment(), Some("section"));

        let mut url = parse("https://example.com/page#section");
        process_fragment(&mut url, &options);
        assert_eq!(url.fragment(), Some("section"));
    }

    #[test]
    fn test_www_is_only_stripped_on_request() {
        let mut url = parse("https://www.example.com/");
        process_host(&mut url, &NormalizeOptions::default());
        assert_eq!(url.host_str(), Some("www.example.com"));

        let options = NormalizeOptions { strip_www: true, ..Default::default() };
        let mut url = parse("https://www.example.com/");
        process_host(&mut url, &options);
        assert_eq!(url.host_str(), Some("example.com"));

        let mut url = parse("https://www.www.example.com/");
        process_host(&mut url, &options);
        assert_eq!(url.host_str(), Some("www.www.example.com"));
    }
}

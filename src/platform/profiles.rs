use tracing::trace;
use url::Url;

use super::domains::{
    CRUNCHBASE_DOMAINS, GITHUB_DOMAINS, GRAVATAR_DOMAINS, LINKEDIN_DOMAINS, TWITTER_DOMAINS,
    WIKIDATA_DOMAINS, WIKIPEDIA_DOMAINS,
};
use super::{host_with_port, parse_absolute, Platform, ProfileType};
use crate::url_parser::uri_to_url;

/// Longest username GitHub allows
const GITHUB_USERNAME_MAX_LEN: usize = 39;

/// Sloppy URIs become absolute URLs; anything else is passed through untouched
fn coerce(url: &str) -> String {
    uri_to_url(url).unwrap_or_else(|| url.to_string())
}

/// Parses an absolute URL and returns it with its `host[:port]`
fn parse_with_host(url: &str) -> Option<(Url, String)> {
    let parsed = parse_absolute(url)?;
    let host = host_with_port(&parsed)?;
    Some((parsed, host))
}

/// `/a/b` splits into `["", "a", "b"]`, so index 1 is the first segment
fn path_parts(url: &Url) -> Vec<&str> {
    url.path().split('/').collect()
}

/// `/{kind}/{slug}` with a non-empty slug
fn kind_and_slug<'a>(parts: &[&'a str]) -> Option<(&'a str, &'a str)> {
    if parts.len() < 3 || parts[2].is_empty() {
        return None;
    }
    Some((parts[1], parts[2]))
}

fn type_allows(kind: &str, profile_type: Option<ProfileType>) -> bool {
    profile_type.map_or(true, |expected| expected.as_str() == kind)
}

fn twitter_username(url: &str) -> Option<String> {
    let (parsed, host) = parse_with_host(url)?;
    if !TWITTER_DOMAINS.contains(host.as_str()) {
        return None;
    }

    let parts = path_parts(&parsed);
    match parts.get(1) {
        Some(username) if !username.is_empty() => Some(username.to_string()),
        _ => None,
    }
}

fn linkedin_profile(url: &str, profile_type: Option<ProfileType>) -> Option<String> {
    let (parsed, host) = parse_with_host(url)?;
    if !LINKEDIN_DOMAINS.contains(host.as_str()) {
        return None;
    }

    let parts = path_parts(&parsed);
    let (segment, slug) = kind_and_slug(&parts)?;
    let kind = match segment {
        "in" => "person",
        "company" => "company",
        "school" => "school",
        _ => return None,
    };

    if !type_allows(kind, profile_type) {
        trace!("LinkedIn profile kind '{}' filtered out", kind);
        return None;
    }

    Some(format!("{}/{}", segment, slug))
}

fn crunchbase_profile(url: &str, profile_type: Option<ProfileType>) -> Option<String> {
    let (parsed, host) = parse_with_host(url)?;
    if !CRUNCHBASE_DOMAINS.contains(host.as_str()) {
        return None;
    }

    let parts = path_parts(&parsed);
    let (segment, slug) = kind_and_slug(&parts)?;
    let kind = match segment {
        "person" => "person",
        "organization" => "company",
        _ => return None,
    };

    if !type_allows(kind, profile_type) {
        return None;
    }

    Some(format!("{}/{}", segment, slug))
}

fn wikidata_id(url: &str) -> Option<String> {
    let (parsed, host) = parse_with_host(url)?;
    if !WIKIDATA_DOMAINS.contains(host.as_str()) {
        return None;
    }

    let parts = path_parts(&parsed);
    if parts.len() < 3 || parts[1] != "wiki" || !parts[2].starts_with('Q') {
        return None;
    }

    Some(parts[2].to_string())
}

/// First path segment on a GitHub host, before username validation
fn github_segment(url: &str) -> Option<String> {
    let (parsed, host) = parse_with_host(url)?;
    if !GITHUB_DOMAINS.contains(host.as_str()) {
        return None;
    }

    let parts = path_parts(&parsed);
    match parts.get(1) {
        Some(segment) if !segment.is_empty() => Some(segment.to_string()),
        _ => None,
    }
}

fn wikipedia_title(url: &str) -> Option<String> {
    let (parsed, host) = parse_with_host(url)?;

    let title = if parsed.path() == "/w/index.php" {
        let title = parsed
            .query_pairs()
            .find(|(key, _)| key == "title")
            .map(|(_, value)| value.into_owned())
            .filter(|title| !title.is_empty())?;
        title_as_path_segment(&title)?
    } else {
        let parts = path_parts(&parsed);
        if parts.len() < 3 || parts[1] != "wiki" || parts[2].is_empty() {
            return None;
        }
        parts[2].to_string()
    };

    if is_wikipedia_host(&host) {
        Some(title)
    } else {
        None
    }
}

/// Encodes a decoded `?title=` value the way it appears in `/wiki/{title}`
///
/// Spaces become underscores and anything unsafe in a path segment (`/`,
/// `%`, `?`, `#`, ...) is percent-encoded.
fn title_as_path_segment(title: &str) -> Option<String> {
    let mut url = Url::parse("https://en.wikipedia.org/wiki/").ok()?;
    {
        let mut segments = url.path_segments_mut().ok()?;
        segments.pop_if_empty().push(&title.replace(' ', "_"));
    }
    url.path_segments()?.last().map(str::to_string)
}

/// Exact match, or any host with 3+ labels whose last two labels match
fn is_wikipedia_host(host: &str) -> bool {
    if WIKIPEDIA_DOMAINS.contains(host) {
        return true;
    }

    let labels: Vec<&str> = host.split('.').collect();
    if labels.len() > 2 {
        let root = labels[labels.len() - 2..].join(".");
        return WIKIPEDIA_DOMAINS.contains(root.as_str());
    }

    false
}

fn gravatar_username(url: &str) -> Option<String> {
    let (parsed, host) = parse_with_host(url)?;
    if !GRAVATAR_DOMAINS.contains(host.as_str()) {
        return None;
    }

    let parts = path_parts(&parsed);
    match parts.get(1) {
        Some(username) if !username.is_empty() && *username != "avatar" => {
            Some(username.to_string())
        }
        _ => None,
    }
}

/// GitHub usernames: 1-39 ASCII alphanumerics or single inner hyphens
pub fn is_valid_github_username(username: &str) -> bool {
    let bytes = username.as_bytes();
    if bytes.is_empty() || bytes.len() > GITHUB_USERNAME_MAX_LEN {
        return false;
    }

    let first_ok = bytes[0].is_ascii_alphanumeric();
    let last_ok = bytes[bytes.len() - 1].is_ascii_alphanumeric();
    let chars_ok = bytes.iter().all(|b| b.is_ascii_alphanumeric() || *b == b'-');
    let no_double_hyphen = !username.contains("--");

    first_ok && last_ok && chars_ok && no_double_hyphen
}

// Predicates: the input must already be an absolute URL

pub fn is_twitter_url(url: &str) -> bool {
    twitter_username(url).is_some()
}

/// True for any URL on a LinkedIn host, profile or not
pub fn is_linkedin_url(url: &str) -> bool {
    parse_with_host(url).is_some_and(|(_, host)| LINKEDIN_DOMAINS.contains(host.as_str()))
}

/// `/in/{slug}`, `/company/{slug}` or `/school/{slug}` on a LinkedIn host
pub fn is_linkedin_profile_url(url: &str, profile_type: Option<ProfileType>) -> bool {
    linkedin_profile(url, profile_type).is_some()
}

/// `/person/{slug}` or `/organization/{slug}` on a Crunchbase host
pub fn is_crunchbase_profile_url(url: &str, profile_type: Option<ProfileType>) -> bool {
    crunchbase_profile(url, profile_type).is_some()
}

pub fn is_wikidata_url(url: &str) -> bool {
    wikidata_id(url).is_some()
}

/// True even when the first segment is not a valid username
pub fn is_github_url(url: &str) -> bool {
    github_segment(url).is_some()
}

pub fn is_wikipedia_url(url: &str) -> bool {
    wikipedia_title(url).is_some()
}

pub fn is_gravatar_url(url: &str) -> bool {
    gravatar_username(url).is_some()
}

// Extractors: sloppy URIs are coerced first

pub fn get_twitter_username(url: &str) -> Option<String> {
    twitter_username(&coerce(url))
}

/// Returns `{segment}/{slug}`, e.g. `in/username` or `company/acme`
pub fn get_linkedin_username(url: &str, profile_type: Option<ProfileType>) -> Option<String> {
    linkedin_profile(&coerce(url), profile_type)
}

/// Returns `{segment}/{slug}`, e.g. `person/jane-doe` or `organization/acme`
pub fn get_crunchbase_username(url: &str, profile_type: Option<ProfileType>) -> Option<String> {
    crunchbase_profile(&coerce(url), profile_type)
}

/// Lowercased username, or `None` if it breaks GitHub's username rules
pub fn get_github_username(url: &str) -> Option<String> {
    let username = github_segment(&coerce(url))?.to_lowercase();
    if !is_valid_github_username(&username) {
        trace!("Rejecting invalid GitHub username '{}'", username);
        return None;
    }
    Some(username)
}

pub fn get_gravatar_username(url: &str) -> Option<String> {
    gravatar_username(&coerce(url))
}

pub fn get_wikidata_id(url: &str) -> Option<String> {
    wikidata_id(&coerce(url))
}

pub fn get_wikipedia_title(url: &str) -> Option<String> {
    wikipedia_title(&coerce(url))
}

// Canonical URIs

pub fn get_twitter_uri(url: &str) -> Option<String> {
    get_twitter_username(url).map(|id| Platform::Twitter.canonical_uri(&id))
}

/// Like [`get_twitter_uri`], retrying with the coerced form of the input
pub fn normalize_twitter_profile_uri(uri: &str) -> Option<String> {
    twitter_username(uri)
        .or_else(|| uri_to_url(uri).and_then(|url| twitter_username(&url)))
        .map(|id| Platform::Twitter.canonical_uri(&id))
}

pub fn get_linkedin_uri(url: &str, profile_type: Option<ProfileType>) -> Option<String> {
    get_linkedin_username(url, profile_type).map(|id| Platform::LinkedIn.canonical_uri(&id))
}

pub fn get_crunchbase_uri(url: &str, profile_type: Option<ProfileType>) -> Option<String> {
    get_crunchbase_username(url, profile_type).map(|id| Platform::Crunchbase.canonical_uri(&id))
}

pub fn get_github_uri(url: &str) -> Option<String> {
    get_github_username(url).map(|id| Platform::GitHub.canonical_uri(&id))
}

pub fn get_gravatar_uri(url: &str) -> Option<String> {
    get_gravatar_username(url).map(|id| Platform::Gravatar.canonical_uri(&id))
}

pub fn get_wikidata_uri(url: &str) -> Option<String> {
    get_wikidata_id(url).map(|id| Platform::Wikidata.canonical_uri(&id))
}

/// Always re-emitted under `en.wikipedia.org`, whatever the source language
pub fn get_wikipedia_uri(url: &str) -> Option<String> {
    get_wikipedia_title(url).map(|title| Platform::Wikipedia.canonical_uri(&title))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_github_username_rules() {
        assert!(is_valid_github_username("a"));
        assert!(is_valid_github_username("a-b-c"));
        assert!(is_valid_github_username(&"a".repeat(39)));

        assert!(!is_valid_github_username(""));
        assert!(!is_valid_github_username(&"a".repeat(40)));
        assert!(!is_valid_github_username("-abc"));
        assert!(!is_valid_github_username("abc-"));
        assert!(!is_valid_github_username("a--b"));
        assert!(!is_valid_github_username("a_b"));
        assert!(!is_valid_github_username("a.b"));
    }

    #[test]
    fn test_host_with_port_must_match_exactly() {
        assert!(!is_twitter_url("https://twitter.com:8080/username"));
        assert!(is_twitter_url("https://twitter.com:443/username"));
        assert!(is_twitter_url("https://TWITTER.com/username"));
    }

    #[test]
    fn test_index_php_titles_match_wiki_path_titles() {
        let cases = [
            ("title=Albert+Einstein", "Albert_Einstein"),
            ("title=Albert%20Einstein", "Albert_Einstein"),
            ("title=AC%2FDC", "AC%2FDC"),
            ("title=100%25", "100%25"),
        ];

        for (query, expected) in cases {
            let url = format!("https://en.wikipedia.org/w/index.php?{}", query);
            let title = get_wikipedia_title(&url);
            assert_eq!(title.as_deref(), Some(expected), "{}", url);

            let uri = get_wikipedia_uri(&url).unwrap();
            assert!(!uri.contains(' '), "{}", uri);
            assert_eq!(get_wikipedia_title(&uri), title, "{}", uri);
        }

        assert_eq!(
            get_wikipedia_title("https://en.wikipedia.org/w/index.php?title=Zo%C3%AB"),
            get_wikipedia_title("https://en.wikipedia.org/wiki/Zoë")
        );
    }

    #[test]
    fn test_wikipedia_host_matching() {
        assert!(is_wikipedia_host("wikipedia.org"));
        assert!(is_wikipedia_host("de.wikipedia.org"));
        assert!(is_wikipedia_host("foo.bar.wikipedia.org"));
        assert!(!is_wikipedia_host("wikipedia.com"));
        assert!(!is_wikipedia_host("notwikipedia.org"));
    }
}

use profile_urls::url_parser::{
    is_valid_crawlable_url, normalize_url, normalize_url_with_cache, normalize_urls, strip_protocol,
    url_to_uri, NormalizationCache, NormalizeOptions, QueryParamMatcher,
};

#[test]
fn test_tracking_parameters_are_removed_and_sorted() {
    let normalized = normalize_url(
        "https://www.example.com/path/?utm_source=x&b=2&ref=home&a=1#section",
        &NormalizeOptions::default(),
    );
    assert_eq!(normalized.as_deref(), Some("https://www.example.com/path?a=1&b=2#section"));
}

#[test]
fn test_custom_query_parameter_matchers() {
    let options = NormalizeOptions {
        remove_query_parameters: vec![
            QueryParamMatcher::Exact("session".to_string()),
            QueryParamMatcher::PrefixIgnoreCase("fb".to_string()),
        ],
        ..Default::default()
    };

    let normalized = normalize_url("https://example.com/?session=1&fbclid=2&utm_source=3&fb=4", &options);
    assert_eq!(normalized.as_deref(), Some("https://example.com/?fb=4&utm_source=3"));
}

#[test]
fn test_strip_www_and_protocol() {
    let options = NormalizeOptions {
        strip_www: true,
        strip_protocol: true,
        ..Default::default()
    };
    assert_eq!(
        normalize_url("HTTPS://WWW.Example.COM:8080/Path/", &options).as_deref(),
        Some("example.com/Path")
    );
}

#[test]
fn test_normalize_urls_dedupes_in_order() {
    let urls = normalize_urls([
        "example.com",
        "https://example.com/",
        "/relative",
        "https://other.org/a?utm_medium=email",
        "other.org/a",
    ]);
    assert_eq!(urls, vec!["https://example.com", "https://other.org/a"]);
}

#[test]
fn test_caller_owned_cache_tracks_hits() {
    let cache = NormalizationCache::new(8);
    let options = NormalizeOptions::default();

    let first = normalize_url_with_cache("example.com/a/", &options, &cache);
    let second = normalize_url_with_cache("example.com/a/", &options, &cache);
    assert_eq!(first, second);
    assert_eq!(first.as_deref(), Some("https://example.com/a"));

    let stats = cache.stats();
    assert_eq!(stats.hits, 1);
    assert_eq!(stats.misses, 1);
    assert_eq!(stats.len, 1);
}

#[test]
fn test_helpers() {
    assert!(is_valid_crawlable_url("https://example.com/page"));
    assert!(!is_valid_crawlable_url("mailto:someone@example.com"));
    assert_eq!(strip_protocol("https://example.com/a"), "example.com/a");
    assert_eq!(url_to_uri("https://www.example.com/a/").as_deref(), Some("example.com/a"));
}

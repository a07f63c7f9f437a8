use once_cell::sync::Lazy;
use std::collections::HashSet;
use thiserror::Error;
use tracing::{debug, trace};
use url::Url;

use super::cache::{CachedUrl, NormalizationCache, DEFAULT_CACHE_SIZE};
use super::options::NormalizeOptions;
use super::patterns::{HAS_AUTHORITY_REGEX, PATH_REFERENCE_REGEX, PROTOCOL_PREFIX_REGEX};
use super::url_processor::{
    process_fragment, process_host, process_path_segments, process_query_parameters,
};
use super::url_reconstructor::reconstruct_url;
use super::url_validator::is_relative_url;

/// Process-wide memo of normalized URLs
static NORMALIZED_URL_CACHE: Lazy<NormalizationCache> =
    Lazy::new(|| NormalizationCache::new(DEFAULT_CACHE_SIZE));

/// Reasons a URL cannot be normalized
#[derive(Debug, Error, PartialEq, Eq)]
pub enum NormalizeError {
    #[error("URL cannot be empty")]
    Empty,
    #[error("relative URL '{0}' cannot be normalized")]
    Relative(String),
    #[error("unsupported scheme in '{0}'")]
    UnsupportedScheme(String),
    #[error("force_http and force_https cannot both be set")]
    ConflictingOptions,
    #[error("failed to parse '{input}': {source}")]
    Parse {
        input: String,
        #[source]
        source: url::ParseError,
    },
}

/// Returns the shared cache used by [`normalize_url`]
pub fn global_cache() -> &'static NormalizationCache {
    &NORMALIZED_URL_CACHE
}

/// Normalizes a URL with the process-wide cache
///
/// Returns `None` for empty, relative (unless sloppy URIs are allowed) or
/// unparseable input. Results, including failures, are memoized per
/// (input, options) pair.
pub fn normalize_url(url: &str, options: &NormalizeOptions) -> Option<String> {
    normalize_url_with_cache(url, options, global_cache())
}

/// Same as [`normalize_url`] but against a caller-owned cache
pub fn normalize_url_with_cache(
    url: &str,
    options: &NormalizeOptions,
    cache: &NormalizationCache,
) -> Option<String> {
    let url = prepare_input(url, options)?;
    let key = NormalizationCache::key_for(&url, options);

    cache
        .get_or_insert_with(&key, || match normalize_uncached(&url, options) {
            Ok(normalized) => CachedUrl::Valid(normalized),
            Err(e) => {
                debug!("Caching invalid URL '{}': {}", url, e);
                CachedUrl::Invalid
            }
        })
        .into_option()
}

/// Normalizes every input, dropping failures and duplicates while keeping first-seen order
pub fn normalize_urls<'a, I>(urls: I) -> Vec<String>
where
    I: IntoIterator<Item = &'a str>,
{
    let options = NormalizeOptions::default();
    let mut seen = HashSet::new();

    urls.into_iter()
        .filter_map(|url| normalize_url(url, &options))
        .filter(|url| seen.insert(url.clone()))
        .collect()
}

/// Rejects empty input and coerces sloppy relative input into an absolute URL
fn prepare_input(url: &str, options: &NormalizeOptions) -> Option<String> {
    if url.is_empty() {
        return None;
    }

    if !is_relative_url(url) {
        return Some(url.to_string());
    }

    let looks_like_domain = url.find('.').is_some_and(|index| index > 0);
    let is_fragment_or_path = url.starts_with(|c: char| matches!(c, '#' | '.' | '/'));

    if options.allow_sloppy_uris && !is_fragment_or_path && looks_like_domain {
        trace!("Treating '{}' as a sloppy URI", url);
        Some(format!("https://{}", url))
    } else {
        trace!("Rejecting relative URL '{}'", url);
        None
    }
}

/// Runs the full normalization pipeline without touching any cache
pub fn normalize_uncached(url: &str, options: &NormalizeOptions) -> Result<String, NormalizeError> {
    let url = url.trim();
    if url.is_empty() {
        return Err(NormalizeError::Empty);
    }

    let lowered = url.to_ascii_lowercase();
    if lowered.starts_with("data:") || lowered.starts_with("view-source:") {
        return Err(NormalizeError::UnsupportedScheme(url.to_string()));
    }
    if options.force_http && options.force_https {
        return Err(NormalizeError::ConflictingOptions);
    }

    let has_relative_protocol = url.starts_with("//");
    if !has_relative_protocol && PATH_REFERENCE_REGEX.is_match(url) {
        return Err(NormalizeError::Relative(url.to_string()));
    }

    let with_protocol = if has_relative_protocol {
        format!("{}:{}", options.default_protocol, url)
    } else if !HAS_AUTHORITY_REGEX.is_match(url) {
        format!("{}://{}", options.default_protocol, url)
    } else {
        url.to_string()
    };

    let mut parsed = Url::parse(&with_protocol).map_err(|source| NormalizeError::Parse {
        input: with_protocol.clone(),
        source,
    })?;

    if options.force_http && parsed.scheme() == "https" {
        // http and https are both special schemes, so the switch cannot fail
        let _ = parsed.set_scheme("http");
    }
    if options.force_https && parsed.scheme() == "http" {
        let _ = parsed.set_scheme("https");
    }

    if options.strip_authentication {
        let _ = parsed.set_username("");
        let _ = parsed.set_password(None);
    }

    process_fragment(&mut parsed, options);
    process_path_segments(&mut parsed);
    process_host(&mut parsed, options);
    process_query_parameters(&mut parsed, options);

    if options.remove_trailing_slash && parsed.path().len() > 1 && parsed.path().ends_with('/') {
        let trimmed = parsed.path().trim_end_matches('/').to_string();
        let trimmed = if trimmed.is_empty() { "/".to_string() } else { trimmed };
        parsed.set_path(&trimmed);
    }

    if options.remove_explicit_port && parsed.port().is_some() {
        let _ = parsed.set_port(None);
    }

    let mut normalized = reconstruct_url(
        &parsed,
        with_protocol.ends_with('/'),
        options.remove_trailing_slash,
        options.remove_single_slash,
    );

    if has_relative_protocol && !options.normalize_protocol {
        let prefix = format!("{}://", options.default_protocol);
        if let Some(rest) = normalized.strip_prefix(&prefix) {
            normalized = format!("//{}", rest);
        }
    }

    if options.strip_protocol {
        normalized = PROTOCOL_PREFIX_REGEX.replace(&normalized, "").into_owned();
    }

    trace!("Normalized '{}' to '{}'", url, normalized);
    Ok(normalized)
}

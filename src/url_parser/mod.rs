//! URL normalization: sloppy-URI coercion, canonicalization and memoization.

pub mod cache;
pub mod normalizer;
pub mod options;
mod patterns;
pub mod url_processor;
pub mod url_reconstructor;
pub mod url_validator;


pub use cache::{CacheStats, CachedUrl, NormalizationCache, DEFAULT_CACHE_SIZE};
pub use normalizer::{
    global_cache, normalize_uncached, normalize_url, normalize_url_with_cache, normalize_urls,
    NormalizeError,
};
pub use options::{NormalizeOptions, QueryParamMatcher};
pub use url_validator::{
    is_relative_url, is_valid_crawlable_url, strip_protocol, uri_to_url, url_to_uri,
};

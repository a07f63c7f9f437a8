use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

/// Matches query parameter keys that should be dropped during normalization
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum QueryParamMatcher {
    /// Key must equal the value exactly
    Exact(String),
    /// Key must start with the value (ASCII case-insensitive) and have at least one more character
    PrefixIgnoreCase(String),
}

impl QueryParamMatcher {
    pub fn matches(&self, key: &str) -> bool {
        match self {
            QueryParamMatcher::Exact(expected) => key == expected,
            QueryParamMatcher::PrefixIgnoreCase(prefix) => {
                key.len() > prefix.len()
                    && key.is_char_boundary(prefix.len())
                    && key[..prefix.len()].eq_ignore_ascii_case(prefix)
            }
        }
    }
}

/// Fully-resolved normalization settings
///
/// Override individual fields with struct update syntax:
///
/// ```
/// use profile_urls::url_parser::NormalizeOptions;
///
/// let opts = NormalizeOptions { strip_www: true, ..Default::default() };
/// assert!(opts.remove_trailing_slash);
/// ```
///
/// The whole struct takes part in the cache key, so two option sets that
/// resolve to the same values always share cache entries.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NormalizeOptions {
    /// Scheme prepended to inputs without one (`https`)
    pub default_protocol: String,
    /// Resolve protocol-relative `//host` inputs to the default protocol (`true`)
    pub normalize_protocol: bool,
    pub force_http: bool,
    pub force_https: bool,
    /// Drop `user:password@` credentials (`true`)
    pub strip_authentication: bool,
    /// Drop the whole fragment (`false`)
    pub strip_hash: bool,
    /// Drop `#:~:text=` text fragments while keeping other fragments (`true`)
    pub strip_text_fragment: bool,
    /// Strip a leading `www.` from the host (`false`)
    pub strip_www: bool,
    /// Query parameters to drop (`utm_*`, `ref`, `ref_src`)
    pub remove_query_parameters: Vec<QueryParamMatcher>,
    /// Drop a trailing `/` from the path (`true`)
    pub remove_trailing_slash: bool,
    /// Drop the bare root `/` (`true`)
    pub remove_single_slash: bool,
    /// Drop any explicit port (`true`)
    pub remove_explicit_port: bool,
    /// Sort query parameters by key (`true`)
    pub sort_query_parameters: bool,
    /// Remove `http://`, `https://` or `//` from the output (`false`)
    pub strip_protocol: bool,
    /// Accept bare domains like `example.com/path` (`true`)
    pub allow_sloppy_uris: bool,
}

impl Default for NormalizeOptions {
    fn default() -> Self {
        Self {
            default_protocol: "https".to_string(),
            normalize_protocol: true,
            force_http: false,
            force_https: false,
            strip_authentication: true,
            strip_hash: false,
            strip_text_fragment: true,
            strip_www: false,
            remove_query_parameters: vec![
                QueryParamMatcher::PrefixIgnoreCase("utm_".to_string()),
                QueryParamMatcher::Exact("ref".to_string()),
                QueryParamMatcher::Exact("ref_src".to_string()),
            ],
            remove_trailing_slash: true,
            remove_single_slash: true,
            remove_explicit_port: true,
            sort_query_parameters: true,
            strip_protocol: false,
            allow_sloppy_uris: true,
        }
    }
}

impl NormalizeOptions {
    /// Stable SHA-256 hex digest of the resolved options
    ///
    /// Field order is fixed by the struct definition, so the JSON encoding
    /// is deterministic.
    pub fn fingerprint(&self) -> String {
        let encoded = serde_json::to_vec(self).unwrap_or_default();
        let digest = Sha256::digest(&encoded);
        digest.iter().map(|b| format!("{:02x}", b)).collect()
    }

    pub fn should_remove_query_parameter(&self, key: &str) -> bool {
        self.remove_query_parameters.iter().any(|m| m.matches(key))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prefix_matcher_is_case_insensitive() {
        let matcher = QueryParamMatcher::PrefixIgnoreCase("utm_".to_string());
        assert!(matcher.matches("utm_source"));
        assert!(matcher.matches("UTM_Campaign"));
        assert!(!matcher.matches("utm_"));
        assert!(!matcher.matches("xutm_source"));
    }

    #[test]
    fn test_fingerprint_tracks_every_field() {
        let defaults = NormalizeOptions::default();
        let same = NormalizeOptions { strip_www: false, ..Default::default() };
        let different = NormalizeOptions { strip_www: true, ..Default::default() };

        assert_eq!(defaults.fingerprint(), same.fingerprint());
        assert_ne!(defaults.fingerprint(), different.fingerprint());
        assert_eq!(defaults.fingerprint().len(), 64);
    }
}

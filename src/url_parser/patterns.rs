use once_cell::sync::Lazy;
use regex::Regex;

/// Leading URL scheme such as `https:` or `mailto:`
pub static SCHEME_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[a-zA-Z][a-zA-Z\d+\-.]*?:").unwrap()
});

/// Windows drive paths look like a scheme but are relative
pub static WINDOWS_PATH_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[a-zA-Z]:\\").unwrap()
});

/// Input already carrying `scheme://` or a protocol-relative `//`
pub static HAS_AUTHORITY_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?:\w+:)?//").unwrap()
});

/// Path-only references like `/foo`, `./foo` or `../foo`
pub static PATH_REFERENCE_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\.*/").unwrap()
});

/// Runs of slashes, capturing an embedded scheme so `https://` inside a path survives
pub static DUPLICATE_SLASH_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"([a-zA-Z][a-zA-Z\d+\-.]{1,50}:)?/{2,}").unwrap()
});

/// `http://`, `https://` or `//` at the start of a URL
pub static PROTOCOL_PREFIX_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?:https?:)?//").unwrap()
});

/// Host shape eligible for `www.` stripping once the prefix is removed
pub static WWW_STRIPPABLE_HOST_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[a-z\-\d]{1,63}\.[a-z.\-\d]{2,63}$").unwrap()
});

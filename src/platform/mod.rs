//! Recognizes profile URLs on known platforms and extracts canonical identifiers.

pub mod domains;
pub mod email;
pub mod profiles;
pub mod well_known;


use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use url::Url;

pub use email::get_custom_domain_from_email;
pub use profiles::*;
pub use well_known::is_well_known_platform_domain;

/// A platform with a dedicated profile extractor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    Twitter,
    LinkedIn,
    GitHub,
    Crunchbase,
    Wikidata,
    Wikipedia,
    Gravatar,
}

impl Platform {
    /// Classification order used by [`classify_profile_url`]
    pub const ALL: [Platform; 7] = [
        Platform::Twitter,
        Platform::LinkedIn,
        Platform::GitHub,
        Platform::Crunchbase,
        Platform::Wikidata,
        Platform::Wikipedia,
        Platform::Gravatar,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Platform::Twitter => "twitter",
            Platform::LinkedIn => "linkedin",
            Platform::GitHub => "github",
            Platform::Crunchbase => "crunchbase",
            Platform::Wikidata => "wikidata",
            Platform::Wikipedia => "wikipedia",
            Platform::Gravatar => "gravatar",
        }
    }

    /// Extracts this platform's identifier from a URL or sloppy URI
    pub fn identifier(&self, url: &str) -> Option<String> {
        match self {
            Platform::Twitter => get_twitter_username(url),
            Platform::LinkedIn => get_linkedin_username(url, None),
            Platform::GitHub => get_github_username(url),
            Platform::Crunchbase => get_crunchbase_username(url, None),
            Platform::Wikidata => get_wikidata_id(url),
            Platform::Wikipedia => get_wikipedia_title(url),
            Platform::Gravatar => get_gravatar_username(url),
        }
    }

    /// Builds the scheme-less canonical URI for an extracted identifier
    pub fn canonical_uri(&self, identifier: &str) -> String {
        match self {
            Platform::Twitter => format!("twitter.com/{}", identifier),
            Platform::LinkedIn => format!("linkedin.com/{}", identifier),
            Platform::GitHub => format!("github.com/{}", identifier),
            Platform::Crunchbase => format!("crunchbase.com/{}", identifier),
            Platform::Wikidata => format!("wikidata.org/wiki/{}", identifier),
            Platform::Wikipedia => format!("en.wikipedia.org/wiki/{}", identifier),
            Platform::Gravatar => format!("gravatar.com/{}", identifier),
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Platform {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        let lowered = s.trim().to_ascii_lowercase();
        match Platform::ALL.iter().find(|p| p.as_str() == lowered) {
            Some(platform) => Ok(*platform),
            None if lowered == "x" => Ok(Platform::Twitter),
            None => bail!("Unknown platform: {}", s),
        }
    }
}

/// Restricts LinkedIn and Crunchbase matches to people or companies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProfileType {
    Person,
    Company,
}

impl ProfileType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProfileType::Person => "person",
            ProfileType::Company => "company",
        }
    }
}

/// A recognized profile
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProfileMatch {
    pub platform: Platform,
    pub identifier: String,
    pub canonical_uri: String,
}

/// Returns the first platform that recognizes the input as a profile
pub fn classify_profile_url(url: &str) -> Option<ProfileMatch> {
    if url.is_empty() {
        return None;
    }

    Platform::ALL.iter().find_map(|platform| {
        platform.identifier(url).map(|identifier| ProfileMatch {
            platform: *platform,
            canonical_uri: platform.canonical_uri(&identifier),
            identifier,
        })
    })
}

/// Parses an absolute URL; empty or relative input yields `None`
pub(crate) fn parse_absolute(url: &str) -> Option<Url> {
    if url.is_empty() {
        return None;
    }
    Url::parse(url).ok()
}

/// The URL's host, with `:port` appended when a non-default port is present
pub(crate) fn host_with_port(url: &Url) -> Option<String> {
    let host = url.host_str()?;
    Some(match url.port() {
        Some(port) => format!("{}:{}", host, port),
        None => host.to_string(),
    })
}

use tracing::trace;

use super::domains::WELL_KNOWN_PLATFORM_DOMAINS;
use super::{host_with_port, parse_absolute};
use crate::url_parser::{normalize_url, NormalizeOptions};

/// Returns true if the input's host belongs to a well-known platform
///
/// Tries the host as-is, then with `www.` toggled, then (for hosts with more
/// than two labels) just the last two labels. That last step also accepts
/// unrelated subdomains of a listed domain, which is intended.
pub fn is_well_known_platform_domain(url: &str) -> bool {
    let Some(normalized) = normalize_url(url, &NormalizeOptions::default()) else {
        return false;
    };

    let parsed = parse_absolute(&normalized.to_lowercase());
    let Some(host) = parsed.and_then(|u| host_with_port(&u)) else {
        return false;
    };

    if WELL_KNOWN_PLATFORM_DOMAINS.contains(host.as_str()) {
        return true;
    }

    let toggled = match host.strip_prefix("www.") {
        Some(bare) => bare.to_string(),
        None => format!("www.{}", host),
    };
    if WELL_KNOWN_PLATFORM_DOMAINS.contains(toggled.as_str()) {
        return true;
    }

    let labels: Vec<&str> = host.split('.').collect();
    if labels.len() > 2 {
        let root = labels[labels.len() - 2..].join(".");
        if WELL_KNOWN_PLATFORM_DOMAINS.contains(root.as_str()) {
            trace!("Host '{}' matched well-known root '{}'", host, root);
            return true;
        }
    }

    false
}

use tracing::trace;
use url::Url;

use super::domains::{EMAIL_PROVIDER_DOMAINS, EMAIL_PROVIDER_PREFIXES};

/// Extracts a custom (likely business or brand) domain from an email address
///
/// Addresses at consumer mailbox providers (gmail, outlook, regional ISPs,
/// any `yahoo.*`/`gmail.*`/`hotmail.*`/`live.*`) yield `None`, as do
/// malformed domains. The domain is the segment between the first and second
/// `@`, so `a@acme.io@x` yields `acme.io`.
pub fn get_custom_domain_from_email(email: &str) -> Option<String> {
    let domain = email.split('@').nth(1)?;
    let domain = domain.trim().to_lowercase();

    if domain.is_empty() {
        return None;
    }

    // No dot, or a leading dot
    if domain.find('.').map_or(true, |index| index == 0) {
        return None;
    }

    if domain.ends_with('.') {
        return None;
    }

    if let Err(e) = Url::parse(&format!("https://{}", domain)) {
        trace!("Email domain '{}' is not a valid host: {}", domain, e);
        return None;
    }

    if EMAIL_PROVIDER_DOMAINS.contains(domain.as_str()) {
        return None;
    }

    if EMAIL_PROVIDER_PREFIXES.iter().any(|prefix| domain.starts_with(prefix)) {
        return None;
    }

    Some(domain)
}

use std::fmt;
use url::{Host, Url};
use crate::error::{Result, SummarizeError};

/// Secret token for the inference endpoint. Never printed.
#[derive(Clone, PartialEq, Eq)]
pub struct Credential(String);

impl Credential {
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Credential(***)")
    }
}

/// A credential and URL that passed validation.
#[derive(Debug, Clone)]
pub struct ValidRequest {
    pub credential: Credential,
    pub url: Url,
}

pub fn validate(credential: &str, url: &str) -> Result<ValidRequest> {
    let credential = credential.trim();
    let url = url.trim();

    if credential.is_empty() || url.is_empty() {
        return Err(SummarizeError::MissingInput);
    }

    let parsed = parse_url(url).ok_or_else(|| SummarizeError::MalformedUrl(url.to_string()))?;

    Ok(ValidRequest {
        credential: Credential(credential.to_string()),
        url: parsed,
    })
}

fn parse_url(raw: &str) -> Option<Url> {
    if raw.chars().any(char::is_whitespace) {
        return None;
    }

    let url = Url::parse(raw).ok()?;
    if !matches!(url.scheme(), "http" | "https") {
        return None;
    }

    match url.host()? {
        Host::Ipv4(_) | Host::Ipv6(_) => Some(url),
        Host::Domain(domain) => is_plausible_domain(domain).then_some(url),
    }
}

fn is_plausible_domain(domain: &str) -> bool {
    if domain == "localhost" {
        return true;
    }

    let domain = domain.strip_suffix('.').unwrap_or(domain);
    let labels: Vec<&str> = domain.split('.').collect();

    labels.len() >= 2
        && labels.iter().all(|label| {
            !label.is_empty()
                && !label.starts_with('-')
                && !label.ends_with('-')
                && label.chars().all(|c| c.is_ascii_alphanumeric() || c == '-')
        })
}

//! Email address syntax checks.
//!
//! Only the shape of the address is checked; no DNS lookups are made.
//! Internationalized local parts and domains are accepted. The domain is
//! lowercased on success and the local part is kept as given.

use once_cell::sync::Lazy;
use regex::Regex;

const MAX_ADDRESS_CHARS: usize = 254;
const MAX_LOCAL_CHARS: usize = 64;

// Unicode letters, marks and digits are allowed alongside the ASCII atext set
static LOCAL_PART: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^[\p{L}\p{M}\p{N}!#$%&'*+/=?^_`{|}~-]+(\.[\p{L}\p{M}\p{N}!#$%&'*+/=?^_`{|}~-]+)*$",
    )
    .expect("local part pattern is valid")
});

// Labels may be Unicode (IDN) or punycode; the TLD is alphabetic or `xn--`
static DOMAIN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^([\p{L}\p{N}]([\p{L}\p{M}\p{N}-]{0,61}[\p{L}\p{M}\p{N}])?\.)+(\p{L}[\p{L}\p{M}]{1,62}|xn--[A-Za-z0-9-]{1,59})$",
    )
    .expect("domain pattern is valid")
});

/// Why an address was rejected
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmailError {
    /// No `@` at all
    MissingAt,
    /// Nothing before the `@`
    EmptyLocal,
    /// Nothing after the `@`
    EmptyDomain,
    /// Address or local part exceeds the length limits
    TooLong,
    /// Local part has characters or dots in the wrong places
    InvalidLocal,
    /// Domain is not a dotted hostname with an alphabetic TLD
    InvalidDomain,
}

impl std::fmt::Display for EmailError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let msg = match self {
            EmailError::MissingAt => "An email address must have an @-sign.",
            EmailError::EmptyLocal => "There must be something before the @-sign.",
            EmailError::EmptyDomain => "There must be something after the @-sign.",
            EmailError::TooLong => "The email address is too long.",
            EmailError::InvalidLocal => "The part before the @-sign is not valid.",
            EmailError::InvalidDomain => "The part after the @-sign is not a valid domain name.",
        };
        f.write_str(msg)
    }
}

/// Validate `address` and return its normalized form
pub fn normalize(address: &str) -> Result<String, EmailError> {
    let (local, domain) = address.rsplit_once('@').ok_or(EmailError::MissingAt)?;
    if local.is_empty() {
        return Err(EmailError::EmptyLocal);
    }
    if domain.is_empty() {
        return Err(EmailError::EmptyDomain);
    }
    if address.chars().count() > MAX_ADDRESS_CHARS || local.chars().count() > MAX_LOCAL_CHARS {
        return Err(EmailError::TooLong);
    }
    if !LOCAL_PART.is_match(local) {
        return Err(EmailError::InvalidLocal);
    }
    if !DOMAIN.is_match(domain) {
        return Err(EmailError::InvalidDomain);
    }
    Ok(format!("{}@{}", local, domain.to_lowercase()))
}

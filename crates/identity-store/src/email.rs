//! Normalised email addresses used as directory keys.
//!
//! An [`Email`] can only be built by trimming, lowercasing and then checking
//! a permissive `local-part@domain.tld` shape, so holding one proves the
//! value is safe to use as a directory key.

use std::fmt;
use std::sync::OnceLock;

use regex::Regex;
use serde::Serialize;
use thiserror::Error;

static EMAIL_SHAPE_RE: OnceLock<Regex> = OnceLock::new();

fn email_shape_regex() -> &'static Regex {
    EMAIL_SHAPE_RE.get_or_init(|| {
        // Deliberately loose: one `@`, no whitespace, a dot-separated TLD of
        // at least two characters.
        let pattern = r"^[^\s@]+@[^\s@]+\.[^\s@]{2,}$";
        Regex::new(pattern)
            .unwrap_or_else(|error| panic!("email shape regex failed to compile: {error}"))
    })
}

/// Trim surrounding whitespace and lowercase an email-like string.
///
/// No shape validation happens here; see [`Email::parse`].
///
/// # Examples
/// ```
/// use identity_store::normalize_email;
///
/// assert_eq!(normalize_email("  Ada@Example.COM "), "ada@example.com");
/// ```
#[must_use]
pub fn normalize_email(raw: &str) -> String {
    raw.trim().to_lowercase()
}

/// Report whether an already normalised string looks like an email.
#[must_use]
pub fn is_valid_email(normalized: &str) -> bool {
    email_shape_regex().is_match(normalized)
}

/// Error returned when a string does not normalise into a valid email.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("email address is not well formed")]
pub struct InvalidEmail;

/// Normalised, shape-checked email address.
///
/// ## Invariants
/// - The inner string has no surrounding whitespace and is lowercase.
/// - The inner string matches the email shape predicate.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct Email(String);

impl Email {
    /// Normalise and validate raw input.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidEmail`] when the normalised value fails the shape
    /// predicate.
    ///
    /// # Examples
    /// ```
    /// use identity_store::Email;
    ///
    /// let email = Email::parse(" X@Y.com ").expect("valid email");
    /// assert_eq!(email.as_str(), "x@y.com");
    /// assert!(Email::parse("not-an-email").is_err());
    /// ```
    pub fn parse(raw: &str) -> Result<Self, InvalidEmail> {
        let normalized = normalize_email(raw);
        if is_valid_email(&normalized) {
            Ok(Self(normalized))
        } else {
            Err(InvalidEmail)
        }
    }

    /// Borrow the normalised address.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl AsRef<str> for Email {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for Email {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<Email> for String {
    fn from(value: Email) -> Self {
        value.0
    }
}

impl TryFrom<&str> for Email {
    type Error = InvalidEmail;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::parse(value)
    }
}

#[cfg(test)]
mod tests {
    //! Covers normalisation and the email shape predicate.

    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case("a@b.co")]
    #[case("wanda.worker+demo@mail.example.org")]
    #[case("x@y.com")]
    #[case("user@sub.domain.io")]
    fn accepts_well_formed_addresses(#[case] raw: &str) {
        assert!(is_valid_email(raw));
        assert!(Email::parse(raw).is_ok());
    }

    #[rstest]
    #[case("")]
    #[case("plainaddress")]
    #[case("@no-local.com")]
    #[case("no-domain@")]
    #[case("short@tld.c")]
    #[case("two@@signs.com")]
    #[case("spaces in@local.com")]
    #[case("missing@dot")]
    #[case("__proto__")]
    fn rejects_malformed_addresses(#[case] raw: &str) {
        assert_eq!(Email::parse(raw), Err(InvalidEmail));
    }

    #[rstest]
    #[case("  X@Y.com  ", "x@y.com")]
    #[case("\tMixed.Case@Example.ORG\n", "mixed.case@example.org")]
    fn parse_normalises_before_validating(#[case] raw: &str, #[case] expected: &str) {
        let email = Email::parse(raw).expect("normalised input is valid");
        assert_eq!(email.as_str(), expected);
        assert_eq!(email.to_string(), expected);
    }

    #[test]
    fn normalisation_does_not_validate() {
        assert_eq!(normalize_email("  NOT AN EMAIL "), "not an email");
    }

    #[test]
    fn serialises_as_plain_string() {
        let email = Email::parse("ada@example.com").expect("valid email");
        let json = serde_json::to_string(&email).expect("serialise email");
        assert_eq!(json, r#""ada@example.com""#);
    }
}

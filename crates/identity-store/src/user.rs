//! User records and the directory that keys them by email.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize, Serializer};
use serde_json::Value;
use thiserror::Error;

use crate::email::Email;
use crate::sanitize::sanitize;

/// Marketplace role attached to every user record.
///
/// Matching on a role from outside this crate needs a wildcard arm, which is
/// where callers put their unrecognised-role fallback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
#[non_exhaustive]
pub enum Role {
    /// Posts jobs and hires workers.
    Hirer,
    /// Browses jobs and applies for work.
    Worker,
}

impl Role {
    /// Wire representation of the role.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Hirer => "hirer",
            Self::Worker => "worker",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a string does not name a known role.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown role '{value}'; expected 'hirer' or 'worker'")]
pub struct RoleParseError {
    /// Input as supplied by the caller.
    pub value: String,
}

impl FromStr for Role {
    type Err = RoleParseError;

    /// Parse a role after trimming and lowercasing the input.
    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_lowercase().as_str() {
            "hirer" => Ok(Self::Hirer),
            "worker" => Ok(Self::Worker),
            _ => Err(RoleParseError {
                value: value.to_owned(),
            }),
        }
    }
}

/// Profile stored for each directory entry.
///
/// The email is not part of the record; the directory key is the identity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserRecord {
    role: Role,
    name: String,
}

impl UserRecord {
    /// Build a record from a role and a free-form name (empty allowed).
    #[must_use]
    pub fn new(role: Role, name: impl Into<String>) -> Self {
        Self {
            role,
            name: name.into(),
        }
    }

    /// Role the user signed up with.
    #[must_use]
    pub const fn role(&self) -> Role {
        self.role
    }

    /// Name supplied at signup.
    #[must_use]
    pub fn name(&self) -> &str {
        self.name.as_str()
    }
}

/// Mapping of normalised email to [`UserRecord`].
///
/// Deserialising a directory always goes through [`sanitize`], so malformed
/// entries are dropped instead of failing the whole document.
///
/// # Examples
/// ```
/// use identity_store::{Email, Role, UserDirectory};
///
/// let directory: UserDirectory = serde_json::from_str(
///     r#"{"Wanda@W.com ": {"role": "Worker", "name": "Wanda"}, "bad": {}}"#,
/// )
/// .expect("any JSON document deserialises");
///
/// let email = Email::parse("wanda@w.com").expect("valid email");
/// let record = directory.get(&email).expect("entry survives");
/// assert_eq!(record.role(), Role::Worker);
/// assert_eq!(directory.len(), 1);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(from = "Value")]
pub struct UserDirectory(BTreeMap<Email, UserRecord>);

impl UserDirectory {
    /// Look up the record stored under `email`.
    #[must_use]
    pub fn get(&self, email: &Email) -> Option<&UserRecord> {
        self.0.get(email)
    }

    /// Report whether `email` has an entry.
    #[must_use]
    pub fn contains(&self, email: &Email) -> bool {
        self.0.contains_key(email)
    }

    /// Insert or replace an entry, returning the previous record.
    pub fn insert(&mut self, email: Email, record: UserRecord) -> Option<UserRecord> {
        self.0.insert(email, record)
    }

    /// Number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the directory has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate over entries in email order.
    pub fn iter(&self) -> impl Iterator<Item = (&Email, &UserRecord)> {
        self.0.iter()
    }
}

impl From<Value> for UserDirectory {
    fn from(value: Value) -> Self {
        sanitize(&value)
    }
}

impl Serialize for UserDirectory {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.0.serialize(serializer)
    }
}

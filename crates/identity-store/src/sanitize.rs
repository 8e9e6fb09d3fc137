//! Sanitisation of untrusted persisted directory data.
//!
//! Persisted state may have been edited by hand, written by an older
//! release, or tampered with. [`sanitize`] turns any JSON value into a
//! [`UserDirectory`] holding only well-formed records. Each entry passes
//! through [`sanitize_entry`], which yields either a typed entry or an
//! [`EntryRejection`]; rejected entries are logged and dropped.

use serde_json::{Map, Value};
use thiserror::Error;
use tracing::debug;

use crate::email::Email;
use crate::user::{Role, UserDirectory, UserRecord};

/// Reason a persisted directory entry was discarded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum EntryRejection {
    /// The key does not normalise into a well-formed email.
    #[error("entry key is not a valid email")]
    InvalidEmail,
    /// The entry value is not a JSON object.
    #[error("entry value is not an object")]
    NotAnObject,
    /// `role` is missing, not a string, or not a known role.
    #[error("entry role is missing or not recognised")]
    InvalidRole,
}

/// Convert an arbitrary JSON value into a sanitised directory.
///
/// Anything other than a JSON object yields an empty directory. Entries
/// whose keys normalise to the same email collapse to the last one in
/// document order.
///
/// # Examples
/// ```
/// use identity_store::sanitize;
/// use serde_json::json;
///
/// assert!(sanitize(&json!(["not", "an", "object"])).is_empty());
///
/// let directory = sanitize(&json!({
///     "Hal@Hire.com": { "role": "Hirer ", "name": 42 },
///     "root@site.com": { "role": "admin", "name": "Root" },
/// }));
/// assert_eq!(directory.len(), 1);
/// ```
#[must_use]
pub fn sanitize(raw: &Value) -> UserDirectory {
    let Value::Object(entries) = raw else {
        debug!(
            kind = value_kind(raw),
            "persisted directory is not an object; using an empty directory"
        );
        return UserDirectory::default();
    };

    let mut directory = UserDirectory::default();
    let mut rejected = 0_usize;
    for (key, value) in entries {
        match sanitize_entry(key, value) {
            Ok((email, record)) => {
                directory.insert(email, record);
            }
            Err(rejection) => {
                rejected += 1;
                debug!(reason = %rejection, "discarding persisted directory entry");
            }
        }
    }

    if rejected > 0 {
        debug!(
            kept = directory.len(),
            rejected, "sanitised persisted directory"
        );
    }
    directory
}

/// Validate a single `key → value` pair from a persisted directory.
///
/// # Errors
///
/// Returns the first [`EntryRejection`] that applies to the entry.
pub fn sanitize_entry(key: &str, value: &Value) -> Result<(Email, UserRecord), EntryRejection> {
    let email = Email::parse(key).map_err(|_| EntryRejection::InvalidEmail)?;
    let Value::Object(fields) = value else {
        return Err(EntryRejection::NotAnObject);
    };
    let role = role_field(fields)?;
    let name = name_field(fields);
    Ok((email, UserRecord::new(role, name)))
}

fn role_field(fields: &Map<String, Value>) -> Result<Role, EntryRejection> {
    fields
        .get("role")
        .and_then(Value::as_str)
        .and_then(|raw| raw.parse::<Role>().ok())
        .ok_or(EntryRejection::InvalidRole)
}

fn name_field(fields: &Map<String, Value>) -> String {
    fields
        .get("name")
        .and_then(Value::as_str)
        .map_or_else(String::new, str::to_owned)
}

const fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    //! Sanitisation behaviour over hostile and malformed inputs.

    use rstest::rstest;
    use serde_json::json;

    use super::*;

    fn email(raw: &str) -> Email {
        Email::parse(raw).expect("test email is valid")
    }

    fn resanitize(directory: &UserDirectory) -> UserDirectory {
        let value = serde_json::to_value(directory).expect("serialise directory");
        sanitize(&value)
    }

    #[rstest]
    #[case::null(json!(null))]
    #[case::boolean(json!(true))]
    #[case::number(json!(17))]
    #[case::string(json!("users"))]
    #[case::array(json!([{ "role": "hirer", "name": "Hal" }]))]
    #[case::empty_object(json!({}))]
    fn non_directory_inputs_yield_empty(#[case] raw: Value) {
        assert!(sanitize(&raw).is_empty());
    }

    #[rstest]
    #[case::proto_key("__proto__", json!({ "role": "hirer", "name": "x" }))]
    #[case::constructor_key("constructor", json!({ "role": "worker" }))]
    #[case::blank_key("   ", json!({ "role": "worker" }))]
    fn rejects_keys_that_are_not_emails(#[case] key: &str, #[case] value: Value) {
        assert_eq!(
            sanitize_entry(key, &value),
            Err(EntryRejection::InvalidEmail)
        );
    }

    #[rstest]
    #[case::string(json!("hirer"))]
    #[case::array(json!(["hirer"]))]
    #[case::null(json!(null))]
    fn rejects_non_object_values(#[case] value: Value) {
        assert_eq!(
            sanitize_entry("a@b.com", &value),
            Err(EntryRejection::NotAnObject)
        );
    }

    #[rstest]
    #[case::unknown(json!({ "role": "admin", "name": "Root" }))]
    #[case::missing(json!({ "name": "Nobody" }))]
    #[case::not_a_string(json!({ "role": 1 }))]
    #[case::nested(json!({ "role": { "value": "hirer" } }))]
    fn rejects_invalid_roles(#[case] value: Value) {
        assert_eq!(
            sanitize_entry("a@b.com", &value),
            Err(EntryRejection::InvalidRole)
        );
    }

    #[test]
    fn role_gate_normalises_mixed_case_and_whitespace() {
        let directory = sanitize(&json!({
            "h@h.com": { "role": "Hirer ", "name": "Hal" },
            "a@a.com": { "role": "admin", "name": "Root" },
        }));

        assert_eq!(directory.len(), 1);
        assert_eq!(
            directory.get(&email("h@h.com")).map(UserRecord::role),
            Some(Role::Hirer)
        );
        assert!(!directory.contains(&email("a@a.com")));
    }

    #[rstest]
    #[case::missing(json!({ "role": "worker" }), "")]
    #[case::number(json!({ "role": "worker", "name": 7 }), "")]
    #[case::null(json!({ "role": "worker", "name": null }), "")]
    #[case::string(json!({ "role": "worker", "name": "  Wanda " }), "  Wanda ")]
    fn coerces_names_to_strings(#[case] value: Value, #[case] expected: &str) {
        let (_, record) = sanitize_entry("w@w.com", &value).expect("entry is valid");
        assert_eq!(record.name(), expected);
    }

    #[test]
    fn rekeys_entries_by_normalised_email() {
        let directory = sanitize(&json!({
            "  Mixed@Case.COM ": { "role": "worker", "name": "Mia" },
        }));

        assert_eq!(
            directory.get(&email("mixed@case.com")),
            Some(&UserRecord::new(Role::Worker, "Mia"))
        );
    }

    #[test]
    fn duplicate_normalised_keys_keep_last_in_document_order() {
        let raw: Value = serde_json::from_str(
            r#"{
                "dup@site.com": { "role": "hirer", "name": "First" },
                "DUP@site.com ": { "role": "worker", "name": "Second" }
            }"#,
        )
        .expect("valid JSON");

        let directory = sanitize(&raw);

        assert_eq!(directory.len(), 1);
        assert_eq!(
            directory.get(&email("dup@site.com")),
            Some(&UserRecord::new(Role::Worker, "Second"))
        );
    }

    #[test]
    fn ignores_unknown_fields() {
        let directory = sanitize(&json!({
            "x@y.com": { "role": "worker", "name": "Sam", "isAdmin": true },
        }));
        let value = serde_json::to_value(&directory).expect("serialise directory");
        assert_eq!(value, json!({ "x@y.com": { "role": "worker", "name": "Sam" } }));
    }

    #[rstest]
    #[case(json!(null))]
    #[case(json!([]))]
    #[case(json!({
        "A@b.com": { "role": "HIRER", "name": "A" },
        "a@b.com": { "role": "worker" },
        "bad": { "role": "worker" },
        "c@d.org": "worker",
        "e@f.net": { "role": " Worker", "name": ["E"] },
    }))]
    #[case(json!({
        "__proto__": { "role": "hirer" },
        "deep@nest.com": { "role": "hirer", "name": "D", "extra": { "a": [1, { "b": null }] } },
    }))]
    fn sanitisation_is_idempotent(#[case] raw: Value) {
        let once = sanitize(&raw);
        let twice = resanitize(&once);
        assert_eq!(once, twice);
    }
}

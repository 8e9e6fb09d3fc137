//! Submitted login and signup forms.
//!
//! Raw field values are validated here before any page controller talks to
//! the record store or session manager.

use identity_store::Email;
use thiserror::Error;

/// Error returned when a submitted form is rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum FormValidationError {
    /// Name was missing or blank once trimmed.
    #[error("name must not be empty")]
    EmptyName,
    /// Email was missing or blank once trimmed.
    #[error("email must not be empty")]
    EmptyEmail,
    /// Email does not look like `name@domain.tld`.
    #[error("email address is not well formed")]
    InvalidEmail,
}

fn parse_email(raw: &str) -> Result<Email, FormValidationError> {
    if raw.trim().is_empty() {
        return Err(FormValidationError::EmptyEmail);
    }
    Email::parse(raw).map_err(|_| FormValidationError::InvalidEmail)
}

/// Validated login form.
///
/// # Examples
/// ```
/// use frontend::LoginForm;
///
/// let form = LoginForm::try_from_parts(" Sam@Jobs.io ").expect("valid form");
/// assert_eq!(form.email().as_str(), "sam@jobs.io");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginForm {
    email: Email,
}

impl LoginForm {
    /// Validate a raw email field.
    ///
    /// # Errors
    ///
    /// Returns [`FormValidationError::EmptyEmail`] or
    /// [`FormValidationError::InvalidEmail`].
    pub fn try_from_parts(email: &str) -> Result<Self, FormValidationError> {
        Ok(Self {
            email: parse_email(email)?,
        })
    }

    /// Normalised email to log in as.
    #[must_use]
    pub const fn email(&self) -> &Email {
        &self.email
    }
}

/// Validated signup form; the role comes from the page, not the form.
///
/// ## Invariants
/// - `name` is trimmed and non-empty.
/// - `email` is normalised and well formed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignupForm {
    name: String,
    email: Email,
}

impl SignupForm {
    /// Validate raw name and email fields, name first.
    ///
    /// # Errors
    ///
    /// Returns the first [`FormValidationError`] found.
    pub fn try_from_parts(name: &str, email: &str) -> Result<Self, FormValidationError> {
        let trimmed = name.trim();
        if trimmed.is_empty() {
            return Err(FormValidationError::EmptyName);
        }
        Ok(Self {
            name: trimmed.to_owned(),
            email: parse_email(email)?,
        })
    }

    /// Display name to register.
    #[must_use]
    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    /// Normalised email to register.
    #[must_use]
    pub const fn email(&self) -> &Email {
        &self.email
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("", FormValidationError::EmptyEmail)]
    #[case("   ", FormValidationError::EmptyEmail)]
    #[case("sam", FormValidationError::InvalidEmail)]
    #[case("sam@jobs", FormValidationError::InvalidEmail)]
    #[case("s am@jobs.io", FormValidationError::InvalidEmail)]
    fn invalid_login_forms(#[case] email: &str, #[case] expected: FormValidationError) {
        let err = LoginForm::try_from_parts(email).expect_err("invalid inputs must fail");
        assert_eq!(err, expected);
    }

    #[rstest]
    #[case("", "a@b.com", FormValidationError::EmptyName)]
    #[case("  ", "", FormValidationError::EmptyName)]
    #[case("Sam", "", FormValidationError::EmptyEmail)]
    #[case("Sam", "sam@", FormValidationError::InvalidEmail)]
    fn invalid_signup_forms(
        #[case] name: &str,
        #[case] email: &str,
        #[case] expected: FormValidationError,
    ) {
        let err = SignupForm::try_from_parts(name, email).expect_err("invalid inputs must fail");
        assert_eq!(err, expected);
    }

    #[test]
    fn signup_form_trims_and_normalises() {
        let form = SignupForm::try_from_parts("  Wanda ", " W@W.com").expect("valid form");
        assert_eq!(form.name(), "Wanda");
        assert_eq!(form.email().as_str(), "w@w.com");
    }
}

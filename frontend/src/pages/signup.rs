//! Signup page controller, one page per role.

use identity_store::{CreateUserError, Role, Storage};
use tracing::info;

use super::{PageContext, Route};
use crate::forms::{FormValidationError, SignupForm};

/// Result of submitting a signup form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignupOutcome {
    /// The account was created and is now the active session.
    Registered,
    /// The email is already registered; nothing changed.
    AlreadyRegistered,
}

impl SignupOutcome {
    /// Where the user goes next.
    #[must_use]
    pub const fn route(self) -> Route {
        match self {
            Self::Registered => Route::Dashboard,
            Self::AlreadyRegistered => Route::Login,
        }
    }
}

/// Register `form` under `role` and log the new account in.
///
/// # Errors
///
/// Returns [`FormValidationError::InvalidEmail`] if the store rejects the
/// email. A form built through [`SignupForm::try_from_parts`] has already
/// passed the same check.
pub fn submit<S>(
    ctx: &PageContext<S>,
    role: Role,
    form: &SignupForm,
) -> Result<SignupOutcome, FormValidationError>
where
    S: Storage + ?Sized,
{
    match ctx
        .store()
        .create(form.email().as_str(), role, form.name())
    {
        Ok(_) => {
            ctx.session().login(form.email());
            Ok(SignupOutcome::Registered)
        }
        Err(CreateUserError::AlreadyExists { .. }) => {
            info!(%role, "signup refused: account exists");
            Ok(SignupOutcome::AlreadyRegistered)
        }
        Err(CreateUserError::InvalidEmail) => Err(FormValidationError::InvalidEmail),
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use identity_store::{MemoryStorage, UserRecord};
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case(Role::Hirer)]
    #[case(Role::Worker)]
    fn new_account_is_registered_and_logged_in(#[case] role: Role) {
        let ctx = PageContext::init(Arc::new(MemoryStorage::new()));
        let form = SignupForm::try_from_parts("Sam", "Sam@Jobs.io").expect("valid form");

        let outcome = submit(&ctx, role, &form).expect("signup succeeds");

        assert_eq!(outcome.route(), Route::Dashboard);
        assert_eq!(ctx.store().get("sam@jobs.io"), Some(UserRecord::new(role, "Sam")));
        assert_eq!(ctx.session().current().as_deref(), Some("sam@jobs.io"));
    }

    #[test]
    fn existing_account_redirects_to_login_without_changes() {
        let ctx = PageContext::init(Arc::new(MemoryStorage::new()));
        ctx.store()
            .create("x@y.com", Role::Worker, "Sam")
            .expect("seed account");

        let form = SignupForm::try_from_parts("Other", "X@Y.com").expect("valid form");
        let outcome = submit(&ctx, Role::Hirer, &form).expect("collision is not an error");

        assert_eq!(outcome, SignupOutcome::AlreadyRegistered);
        assert_eq!(outcome.route(), Route::Login);
        assert_eq!(
            ctx.store().get("x@y.com"),
            Some(UserRecord::new(Role::Worker, "Sam"))
        );
        assert_eq!(ctx.session().current(), None);
    }
}

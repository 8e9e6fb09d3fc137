//! Login page controller.

use identity_store::Storage;
use tracing::info;

use super::{PageContext, Route};
use crate::forms::LoginForm;

/// Result of submitting the login form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoginOutcome {
    /// The account exists and is now the active session.
    LoggedIn,
    /// No account is registered for the email; nothing changed.
    NoAccount,
}

impl LoginOutcome {
    /// Where the user goes next.
    #[must_use]
    pub const fn route(self) -> Route {
        match self {
            Self::LoggedIn => Route::Dashboard,
            Self::NoAccount => Route::Login,
        }
    }
}

/// Log in as the account named by `form`.
#[must_use]
pub fn submit<S>(ctx: &PageContext<S>, form: &LoginForm) -> LoginOutcome
where
    S: Storage + ?Sized,
{
    if !ctx.store().exists(form.email().as_str()) {
        info!("login refused: no account");
        return LoginOutcome::NoAccount;
    }
    ctx.session().login(form.email());
    LoginOutcome::LoggedIn
}

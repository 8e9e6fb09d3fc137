//! Command-line driver for the page controllers.
//!
//! Each subcommand stands in for one page interaction. The outcome is
//! returned as text so the binary only has to print it.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use identity_store::{Role, SessionState, Storage};

use crate::forms::{LoginForm, SignupForm};
use crate::pages::dashboard::{self, DashboardOutcome};
use crate::pages::login::{self, LoginOutcome};
use crate::pages::signup::{self, SignupOutcome};
use crate::pages::{PageContext, logout};

/// `marketplace` command arguments.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "marketplace",
    about = "Sign up, log in and view the two-role marketplace dashboard",
    version
)]
pub struct CliArgs {
    /// Directory holding persisted state. Overrides `MARKETPLACE_STORAGE_DIR`.
    #[arg(long = "storage-dir", value_name = "dir", global = true)]
    pub storage_dir: Option<PathBuf>,
    /// Page interaction to perform.
    #[command(subcommand)]
    pub command: Command,
}

/// Page interactions.
#[derive(Debug, Clone, PartialEq, Eq, Subcommand)]
pub enum Command {
    /// Create an account and log in as it.
    Signup {
        /// Role to sign up as: `hirer` or `worker`.
        #[arg(long, value_name = "role")]
        role: Role,
        /// Display name.
        #[arg(long, value_name = "name")]
        name: String,
        /// Email address identifying the account.
        #[arg(long, value_name = "email")]
        email: String,
    },
    /// Log in as an existing account.
    Login {
        /// Email address of the account.
        #[arg(long, value_name = "email")]
        email: String,
    },
    /// Show the dashboard for the logged-in account.
    Dashboard,
    /// End the current session.
    Logout,
    /// Print the active session pointer without resolving it.
    Whoami,
}

/// Run `command` against `ctx` and describe what happened.
///
/// Rejected input is reported in the returned text rather than as an error.
#[must_use]
pub fn run<S>(ctx: &PageContext<S>, command: &Command) -> String
where
    S: Storage + ?Sized,
{
    match command {
        Command::Signup { role, name, email } => run_signup(ctx, *role, name, email),
        Command::Login { email } => run_login(ctx, email),
        Command::Dashboard => match dashboard::load(ctx) {
            DashboardOutcome::Render(view) => view.render(),
            DashboardOutcome::Redirect(route) => format!("not logged in; redirecting to {route}"),
        },
        Command::Logout => format!("logged out; redirecting to {}", logout::submit(ctx)),
        Command::Whoami => match ctx.session().state() {
            SessionState::LoggedIn(email) => format!("logged in as {email}"),
            SessionState::LoggedOut => "not logged in".to_owned(),
        },
    }
}

fn run_signup<S>(ctx: &PageContext<S>, role: Role, name: &str, email: &str) -> String
where
    S: Storage + ?Sized,
{
    let outcome = SignupForm::try_from_parts(name, email)
        .and_then(|form| signup::submit(ctx, role, &form));
    match outcome {
        Ok(SignupOutcome::Registered) => format!(
            "registered as {role}; redirecting to {}",
            SignupOutcome::Registered.route()
        ),
        Ok(SignupOutcome::AlreadyRegistered) => format!(
            "an account already exists for this email; redirecting to {}",
            SignupOutcome::AlreadyRegistered.route()
        ),
        Err(err) => format!("signup rejected: {err}"),
    }
}

fn run_login<S>(ctx: &PageContext<S>, email: &str) -> String
where
    S: Storage + ?Sized,
{
    let form = match LoginForm::try_from_parts(email) {
        Ok(form) => form,
        Err(err) => return format!("login rejected: {err}"),
    };
    match login::submit(ctx, &form) {
        LoginOutcome::LoggedIn => {
            format!("logged in; redirecting to {}", LoginOutcome::LoggedIn.route())
        }
        LoginOutcome::NoAccount => "no account found for this email; sign up first".to_owned(),
    }
}

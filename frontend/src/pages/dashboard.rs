//! Dashboard page controller and its role-specific views.

use identity_store::{Role, Storage, UserRecord};
use tracing::debug;

use super::{PageContext, Route};

/// Content shown to a logged-in user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DashboardView {
    /// Tools for posting jobs.
    Hirer {
        /// Name given at signup.
        name: String,
    },
    /// Tools for finding work.
    Worker {
        /// Name given at signup.
        name: String,
    },
    /// Fallback for a role this build does not know how to present.
    Unrecognized,
}

impl DashboardView {
    /// Choose the view for `record`'s role.
    #[must_use]
    pub fn for_record(record: &UserRecord) -> Self {
        let name = record.name().to_owned();
        match record.role() {
            Role::Hirer => Self::Hirer { name },
            Role::Worker => Self::Worker { name },
            _ => Self::Unrecognized,
        }
    }

    /// Render the view as plain text, one line per element.
    #[must_use]
    pub fn render(&self) -> String {
        let lines: Vec<String> = match self {
            Self::Hirer { name } => vec![
                "Hirer dashboard".to_owned(),
                greeting(name),
                "- Post a job".to_owned(),
                "- Review applicants".to_owned(),
            ],
            Self::Worker { name } => vec![
                "Worker dashboard".to_owned(),
                greeting(name),
                "- Browse open jobs".to_owned(),
                "- Track your applications".to_owned(),
            ],
            Self::Unrecognized => vec![
                "Dashboard unavailable".to_owned(),
                "Your account role is not recognised. Log out and sign up again.".to_owned(),
            ],
        };
        lines.join("\n")
    }
}

fn greeting(name: &str) -> String {
    if name.is_empty() {
        "Welcome.".to_owned()
    } else {
        format!("Welcome, {name}.")
    }
}

/// Result of opening the dashboard.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DashboardOutcome {
    /// Show this view.
    Render(DashboardView),
    /// Nobody is logged in; go here instead.
    Redirect(Route),
}

/// Resolve the session and pick a view.
#[must_use]
pub fn load<S>(ctx: &PageContext<S>) -> DashboardOutcome
where
    S: Storage + ?Sized,
{
    match ctx.session().resolve(ctx.store()) {
        Some(record) => DashboardOutcome::Render(DashboardView::for_record(&record)),
        None => {
            debug!("dashboard requested without a session");
            DashboardOutcome::Redirect(Route::Login)
        }
    }
}

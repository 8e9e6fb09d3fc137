//! Page flows for the two-role marketplace demo.
//!
//! The `marketplace` binary drives these controllers from the command line;
//! the controllers themselves only depend on the `identity-store` crate and
//! can be exercised in-process.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//!
//! use frontend::pages::{PageContext, Route, dashboard, signup};
//! use frontend::SignupForm;
//! use identity_store::{MemoryStorage, Role};
//!
//! let ctx = PageContext::init(Arc::new(MemoryStorage::new()));
//! let form = SignupForm::try_from_parts("Wanda", "w@w.com").expect("valid form");
//!
//! let outcome = signup::submit(&ctx, Role::Worker, &form).expect("signup succeeds");
//! assert_eq!(outcome.route(), Route::Dashboard);
//! assert!(matches!(
//!     dashboard::load(&ctx),
//!     dashboard::DashboardOutcome::Render(dashboard::DashboardView::Worker { .. })
//! ));
//! ```

pub mod cli;
pub mod config;
mod forms;
pub mod pages;

pub use config::FrontendSettings;
pub use forms::{FormValidationError, LoginForm, SignupForm};

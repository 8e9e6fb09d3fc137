//! Logout controller.

use identity_store::Storage;

use super::{PageContext, Route};

/// End the session and return to the landing page.
#[must_use]
pub fn submit<S>(ctx: &PageContext<S>) -> Route
where
    S: Storage + ?Sized,
{
    ctx.session().logout();
    Route::Home
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use identity_store::{MemoryStorage, Role};

    use super::*;

    #[test]
    fn logout_clears_session_and_goes_home() {
        let ctx = PageContext::init(Arc::new(MemoryStorage::new()));
        ctx.store()
            .create("h@h.com", Role::Hirer, "Hal")
            .expect("seed account");
        ctx.session().login("h@h.com");

        assert_eq!(submit(&ctx), Route::Home);
        assert_eq!(ctx.session().resolve(ctx.store()), None);
    }

    #[test]
    fn logout_when_logged_out_still_goes_home() {
        let ctx = PageContext::init(Arc::new(MemoryStorage::new()));
        assert_eq!(submit(&ctx), Route::Home);
    }
}

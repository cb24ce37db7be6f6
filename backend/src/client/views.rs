//! Storefront views and deferred navigation between them.

use std::time::Duration;

/// Delay between a successful sign-up/sign-in and the move to the home view,
/// long enough for the success notification to be read.
pub const REDIRECT_DELAY: Duration = Duration::from_secs(3);

/// Pages of the storefront frontend.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    Landing,
    Home,
    Dashboard,
    Cart,
    SignIn,
    SignUp,
}

impl View {
    pub fn path(&self) -> &'static str {
        match self {
            View::Landing => "/",
            View::Home => "/home",
            View::Dashboard => "/dashboard",
            View::Cart => "/cart",
            View::SignIn => "/signin",
            View::SignUp => "/signup",
        }
    }

    /// Resolves a path to a view. Unknown paths fall back to the landing page.
    pub fn from_path(path: &str) -> Self {
        let path = path.split(['?', '#']).next().unwrap_or_default();
        match path.trim_end_matches('/') {
            "/home" => View::Home,
            "/dashboard" => View::Dashboard,
            "/cart" => View::Cart,
            "/signin" => View::SignIn,
            "/signup" => View::SignUp,
            _ => View::Landing,
        }
    }
}

/// Navigation scheduled to happen after a delay.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Redirect {
    pub to: View,
    pub after: Duration,
}

impl Redirect {
    pub fn new(to: View, after: Duration) -> Self {
        Self { to, after }
    }

    /// Waits out the delay and yields the target view.
    ///
    /// Dropping the returned future cancels the navigation.
    pub async fn wait(self) -> View {
        tokio::time::sleep(self.after).await;
        self.to
    }
}

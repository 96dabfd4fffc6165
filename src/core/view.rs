//! Path to view resolution with the sign-in guard

use crate::core::provider::ProviderId;
use std::fmt::Display;
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    Home,
    Providers,
    ProviderDetail(ProviderId),
    Payment(ProviderId),
    Favorites,
    Transactions,
    Profile,
    SignIn,
    SignUp,
    Contact,
    Privacy,
    NotFound,
}

impl View {
    pub fn resolve(path: &str) -> View {
        let segments: Vec<&str> = path
            .trim()
            .trim_matches('/')
            .split('/')
            .filter(|s| !s.is_empty())
            .collect();

        let view = match segments.as_slice() {
            [] => View::Home,
            ["providers"] => View::Providers,
            ["provider", id] => id.parse().map_or(View::NotFound, View::ProviderDetail),
            ["payment", id] => id.parse().map_or(View::NotFound, View::Payment),
            ["favorites"] => View::Favorites,
            ["transactions"] => View::Transactions,
            ["profile"] => View::Profile,
            ["signin"] => View::SignIn,
            ["signup"] => View::SignUp,
            ["contact"] => View::Contact,
            ["privacy"] => View::Privacy,
            _ => View::NotFound,
        };
        debug!(path, ?view, "Resolved path");
        view
    }

    pub fn requires_auth(&self) -> bool {
        matches!(
            self,
            View::Payment(_) | View::Favorites | View::Transactions | View::Profile
        )
    }

    /// Redirects protected views to sign-in for anonymous users.
    pub fn guard(self, is_authenticated: bool) -> View {
        if self.requires_auth() && !is_authenticated {
            debug!(view = ?self, "Redirecting to sign in");
            View::SignIn
        } else {
            self
        }
    }
}

impl Display for View {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            View::Home => write!(f, "/"),
            View::Providers => write!(f, "/providers"),
            View::ProviderDetail(id) => write!(f, "/provider/{id}"),
            View::Payment(id) => write!(f, "/payment/{id}"),
            View::Favorites => write!(f, "/favorites"),
            View::Transactions => write!(f, "/transactions"),
            View::Profile => write!(f, "/profile"),
            View::SignIn => write!(f, "/signin"),
            View::SignUp => write!(f, "/signup"),
            View::Contact => write!(f, "/contact"),
            View::Privacy => write!(f, "/privacy"),
            View::NotFound => write!(f, "/404"),
        }
    }
}

//! Authentication collaborator gate.
//!
//! Authentication itself lives in an external login flow; the core only
//! reads status as a boolean gate plus a display name, and builds the login
//! redirect that brings the user back to the originating path after
//! authenticating.

use serde::{Deserialize, Serialize};
use url::Url;

/// Current authentication status as reported by the collaborator.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AuthStatus {
    /// Whether the session is authenticated.
    pub authenticated: bool,
    /// Display name of the signed-in user, if any.
    pub display_name: Option<String>,
}

/// Read side of the authentication collaborator.
pub trait AuthProvider {
    /// Current authentication status.
    fn status(&self) -> AuthStatus;

    /// Drop the authenticated session.
    fn logout(&mut self);
}

/// Session-fed provider.
///
/// The presentation layer updates it when the external login flow round-trips
/// (sign-in sets the display name; `logout` clears it).
#[derive(Debug, Clone, Default)]
pub struct SessionAuth {
    user: Option<String>,
}

impl SessionAuth {
    /// Create an unauthenticated session.
    #[must_use]
    pub const fn new() -> Self {
        Self { user: None }
    }

    /// Create a session already signed in as `display_name`.
    #[must_use]
    pub fn signed_in(display_name: impl Into<String>) -> Self {
        Self {
            user: Some(display_name.into()),
        }
    }

    /// Mark the session authenticated as `display_name`.
    pub fn sign_in(&mut self, display_name: impl Into<String>) {
        self.user = Some(display_name.into());
    }
}

impl AuthProvider for SessionAuth {
    fn status(&self) -> AuthStatus {
        AuthStatus {
            authenticated: self.user.is_some(),
            display_name: self.user.clone(),
        }
    }

    fn logout(&mut self) {
        self.user = None;
    }
}

/// Builds login URLs that carry the originating path.
///
/// The external login flow redirects back to `return_to` after the user
/// authenticates, so checkout resumes where it was interrupted instead of
/// landing on the home page.
#[derive(Debug, Clone)]
pub struct LoginRedirect {
    base: Url,
}

impl LoginRedirect {
    /// Create a redirect builder for the external login URL.
    ///
    /// # Errors
    ///
    /// Returns an error if `base_url` is not a valid absolute URL.
    pub fn new(base_url: &str) -> Result<Self, url::ParseError> {
        Ok(Self {
            base: Url::parse(base_url)?,
        })
    }

    /// The login URL with `return_to` appended as a query parameter.
    #[must_use]
    pub fn login_url(&self, return_to: &str) -> String {
        let mut url = self.base.clone();
        url.query_pairs_mut().append_pair("return_to", return_to);
        url.to_string()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_session_auth_lifecycle() {
        let mut auth = SessionAuth::new();
        assert!(!auth.status().authenticated);
        assert_eq!(auth.status().display_name, None);

        auth.sign_in("Alex");
        let status = auth.status();
        assert!(status.authenticated);
        assert_eq!(status.display_name.as_deref(), Some("Alex"));

        auth.logout();
        assert!(!auth.status().authenticated);
    }

    #[test]
    fn test_login_url_carries_encoded_return_path() {
        let redirect = LoginRedirect::new("https://login.example.com/signin").unwrap();
        let url = redirect.login_url("/checkout");
        assert_eq!(
            url,
            "https://login.example.com/signin?return_to=%2Fcheckout"
        );
    }

    #[test]
    fn test_login_url_preserves_existing_query() {
        let redirect = LoginRedirect::new("https://login.example.com/signin?tenant=encore").unwrap();
        let url = redirect.login_url("/checkout");
        assert!(url.contains("tenant=encore"));
        assert!(url.contains("return_to=%2Fcheckout"));
    }

    #[test]
    fn test_invalid_base_url_rejected() {
        assert!(LoginRedirect::new("not a url").is_err());
    }
}

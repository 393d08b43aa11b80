//! Identity allow-list.
//!
//! Authentication itself happens upstream (an identity-aware proxy). The proxy
//! forwards the signed-in user's email in a header, and qualcode only checks
//! that email against `allowed_emails`.

use serde::{Deserialize, Serialize};

fn default_identity_header() -> String {
    "x-forwarded-email".to_string()
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AuthConfig {
    /// Emails allowed to use the API. Empty disables the check.
    #[serde(default)]
    pub allowed_emails: Vec<String>,

    /// Header carrying the authenticated email.
    #[serde(default = "default_identity_header")]
    pub identity_header: String,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            allowed_emails: Vec::new(),
            identity_header: default_identity_header(),
        }
    }
}

impl AuthConfig {
    /// Returns `true` when requests must carry an allowed identity.
    #[must_use]
    pub fn is_enforced(&self) -> bool {
        !self.allowed_emails.is_empty()
    }

    /// Case-insensitive membership check.
    #[must_use]
    pub fn is_allowed(&self, email: &str) -> bool {
        let email = email.trim();
        self.allowed_emails
            .iter()
            .any(|allowed| allowed.trim().eq_ignore_ascii_case(email))
    }
}

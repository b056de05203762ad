//! Access credential lookup

/// Read-only source of the bearer access token.
pub trait CredentialStore: Send + Sync {
    /// Current access token, if the user has one
    fn access_token(&self) -> Option<String>;
}

/// Credential store backed by a fixed token (from config or environment).
#[derive(Debug, Clone, Default)]
pub struct StaticCredentials {
    token: Option<String>,
}

impl StaticCredentials {
    pub fn new(token: Option<String>) -> Self {
        // Blank tokens behave like no token at all
        let token = token.filter(|t| !t.trim().is_empty());
        Self { token }
    }
}

impl CredentialStore for StaticCredentials {
    fn access_token(&self) -> Option<String> {
        self.token.clone()
    }
}

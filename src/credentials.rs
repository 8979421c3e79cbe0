// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0.
// If a copy of the MPL was not distributed with this file,
// You can obtain one at <https://mozilla.org/MPL/2.0/>.

//! Access to the bearer token for API calls.
//!
//! The token is handed to the API client through a [`CredentialProvider`] so that nothing reads
//! it from global state.  The binary wires in the token from settings; tests pass a closure.

/// Supplies the current bearer token, if any.
pub trait CredentialProvider: Send + Sync {
    fn bearer_token(&self) -> Option<String>;
}

impl<F> CredentialProvider for F
where
    F: Fn() -> Option<String> + Send + Sync,
{
    fn bearer_token(&self) -> Option<String> {
        self()
    }
}

/// A fixed token, or none at all.
#[derive(Debug, Clone, Default)]
pub struct StaticToken(Option<String>);

impl StaticToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(Some(token.into()))
    }

    pub fn anonymous() -> Self {
        Self(None)
    }
}

impl From<Option<String>> for StaticToken {
    fn from(token: Option<String>) -> Self {
        Self(token.filter(|token| !token.is_empty()))
    }
}

impl CredentialProvider for StaticToken {
    fn bearer_token(&self) -> Option<String> {
        self.0.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn closures_are_providers() {
        let provider = || Some("abc".to_string());
        assert_eq!(provider.bearer_token().as_deref(), Some("abc"));
    }

    #[test]
    fn empty_token_counts_as_missing() {
        assert_eq!(StaticToken::from(Some(String::new())).bearer_token(), None);
        assert_eq!(StaticToken::anonymous().bearer_token(), None);
        assert_eq!(StaticToken::new("t").bearer_token().as_deref(), Some("t"));
    }
}

// End of File

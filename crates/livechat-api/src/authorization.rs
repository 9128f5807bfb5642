//! Credentials attached to every request

use async_trait::async_trait;
use secrecy::{ExposeSecret, Secret};
use std::fmt;

/// Authorization scheme of a token
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenType {
    Bearer,
    Basic,
}

impl TokenType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Bearer => "Bearer",
            Self::Basic => "Basic",
        }
    }
}

impl fmt::Display for TokenType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Access token plus the routing information the APIs need with it
#[derive(Clone)]
pub struct Token {
    /// Tenant identifier; required by the customer API
    pub license_id: Option<i64>,
    pub access_token: Secret<String>,
    /// Data center serving the license, sent as `X-Region`
    pub region: String,
    pub token_type: TokenType,
}

impl fmt::Debug for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Token")
            .field("license_id", &self.license_id)
            .field("access_token", &"[REDACTED]")
            .field("region", &self.region)
            .field("token_type", &self.token_type)
            .finish()
    }
}

impl Token {
    pub fn bearer(access_token: impl Into<String>, region: impl Into<String>) -> Self {
        Self {
            license_id: None,
            access_token: Secret::new(access_token.into()),
            region: region.into(),
            token_type: TokenType::Bearer,
        }
    }

    /// Personal access token, already base64 encoded as `account_id:pat`
    pub fn basic(credentials: impl Into<String>, region: impl Into<String>) -> Self {
        Self {
            token_type: TokenType::Basic,
            ..Self::bearer(credentials, region)
        }
    }

    pub fn with_license_id(mut self, license_id: i64) -> Self {
        self.license_id = Some(license_id);
        self
    }

    /// Value of the `Authorization` header
    pub(crate) fn authorization(&self) -> String {
        format!("{} {}", self.token_type, self.access_token.expose_secret())
    }
}

/// Supplies a token for each request. Returning `None` aborts the call
/// before anything is sent.
#[async_trait]
pub trait TokenSource: Send + Sync {
    async fn token(&self) -> Option<Token>;
}

#[async_trait]
impl<F> TokenSource for F
where
    F: Fn() -> Option<Token> + Send + Sync,
{
    async fn token(&self) -> Option<Token> {
        self()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_authorization_header() {
        let bearer = Token::bearer("dal:abc", "dal");
        assert_eq!(bearer.authorization(), "Bearer dal:abc");

        let basic = Token::basic("dXNlcjpwYXQ=", "fra").with_license_id(123);
        assert_eq!(basic.authorization(), "Basic dXNlcjpwYXQ=");
        assert_eq!(basic.license_id, Some(123));
    }

    #[test]
    fn test_debug_redacts_token() {
        let token = Token::bearer("super-secret", "dal");
        let debug = format!("{:?}", token);
        assert!(!debug.contains("super-secret"));
        assert!(debug.contains("[REDACTED]"));
    }

    #[tokio::test]
    async fn test_closure_token_source() {
        let source = || Some(Token::bearer("t", "dal"));
        assert!(source.token().await.is_some());

        let empty = || -> Option<Token> { None };
        assert!(empty.token().await.is_none());
    }
}

//! Request dispatch shared by every API family
//!
//! Each action is a `POST {base_url}/v{version}/{api}/action/{action}` with a
//! JSON body. Failed calls come back as a structured `{"error": {...}}` body.

use reqwest::header::{self, HeaderMap, HeaderName, HeaderValue};
use reqwest::{multipart, Client, RequestBuilder, Response};
use serde::de::{DeserializeOwned, IgnoredAny};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, instrument, warn};
use url::Url;

use crate::agent::AgentApi;
use crate::authorization::{Token, TokenSource, TokenType};
use crate::configuration::ConfigurationApi;
use crate::customer::CustomerApi;
use crate::error::{ApiError, Result};

pub const DEFAULT_BASE_URL: &str = "https://api.livechatinc.com";
pub const DEFAULT_API_VERSION: &str = "3.2";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(20);

/// The API a client talks to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ApiFamily {
    Agent,
    Customer,
    Configuration,
}

impl ApiFamily {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Agent => "agent",
            Self::Customer => "customer",
            Self::Configuration => "configuration",
        }
    }

    pub fn supports_file_upload(&self) -> bool {
        matches!(self, Self::Agent | Self::Customer)
    }

    fn accepts(&self, token_type: TokenType) -> bool {
        match self {
            Self::Customer => token_type == TokenType::Bearer,
            Self::Agent | Self::Configuration => true,
        }
    }
}

impl fmt::Display for ApiFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Low-level client for one API family
#[derive(Clone)]
pub struct Api {
    http: Client,
    base_url: String,
    version: String,
    family: ApiFamily,
    client_id: String,
    headers: HeaderMap,
    token_source: Arc<dyn TokenSource>,
}

impl fmt::Debug for Api {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Api")
            .field("base_url", &self.base_url)
            .field("version", &self.version)
            .field("family", &self.family)
            .field("client_id", &self.client_id)
            .finish()
    }
}

/// Builder for the API clients
#[derive(Default)]
pub struct ApiBuilder {
    base_url: Option<String>,
    version: Option<String>,
    client_id: Option<String>,
    timeout: Option<Duration>,
    http: Option<Client>,
    headers: Vec<(String, String)>,
    token_source: Option<Arc<dyn TokenSource>>,
}

impl ApiBuilder {
    /// Create a new builder
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the API host, without the version path
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    /// Set the API version, e.g. `3.2`
    pub fn version(mut self, version: impl Into<String>) -> Self {
        self.version = Some(version.into());
        self
    }

    /// Client ID of the calling application, reported in the user agent
    pub fn client_id(mut self, client_id: impl Into<String>) -> Self {
        self.client_id = Some(client_id.into());
        self
    }

    /// Request timeout of the internally built HTTP client
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Use a preconfigured HTTP client; `timeout` is then ignored
    pub fn http_client(mut self, client: Client) -> Self {
        self.http = Some(client);
        self
    }

    /// Extra header sent with every request
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    /// Set the credentials provider (required)
    pub fn token_source(mut self, source: impl TokenSource + 'static) -> Self {
        self.token_source = Some(Arc::new(source));
        self
    }

    pub fn build_agent(self) -> Result<AgentApi> {
        self.build(ApiFamily::Agent).map(AgentApi::from)
    }

    pub fn build_customer(self) -> Result<CustomerApi> {
        self.build(ApiFamily::Customer).map(CustomerApi::from)
    }

    pub fn build_configuration(self) -> Result<ConfigurationApi> {
        self.build(ApiFamily::Configuration).map(ConfigurationApi::from)
    }

    /// Build the low-level client for `family`
    pub fn build(self, family: ApiFamily) -> Result<Api> {
        let token_source = self.token_source.ok_or_else(|| {
            ApiError::Config("cannot initialize API without a token source".to_string())
        })?;

        let base_url = self
            .base_url
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        Url::parse(&base_url)?;

        let mut headers = HeaderMap::new();
        for (name, value) in self.headers {
            let name = HeaderName::from_bytes(name.as_bytes()).map_err(|e| {
                ApiError::Config(format!("invalid header name '{}': {}", name, e))
            })?;
            let value = HeaderValue::from_str(&value).map_err(|e| {
                ApiError::Config(format!("invalid value for header '{}': {}", name, e))
            })?;
            headers.insert(name, value);
        }

        let http = match self.http {
            Some(http) => http,
            None => Client::builder()
                .timeout(self.timeout.unwrap_or(DEFAULT_TIMEOUT))
                .build()
                .map_err(ApiError::Http)?,
        };

        Ok(Api {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            version: self
                .version
                .unwrap_or_else(|| DEFAULT_API_VERSION.to_string()),
            family,
            client_id: self.client_id.unwrap_or_default(),
            headers,
            token_source,
        })
    }
}

#[derive(Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Deserialize)]
struct ErrorBody {
    #[serde(rename = "type")]
    kind: String,
    message: String,
}

#[derive(Deserialize)]
struct UploadFileResponse {
    url: String,
}

impl Api {
    /// Create a new client builder
    pub fn builder() -> ApiBuilder {
        ApiBuilder::new()
    }

    pub fn family(&self) -> ApiFamily {
        self.family
    }

    /// Invoke `action` with `request` as the body and decode the reply
    #[instrument(skip(self, request), fields(api = %self.family))]
    pub async fn call<Req, Resp>(&self, action: &str, request: &Req) -> Result<Resp>
    where
        Req: Serialize + ?Sized,
        Resp: DeserializeOwned,
    {
        let token = self.token().await?;
        let body = serde_json::to_vec(request)?;
        let url = self.action_url(action, &token)?;

        debug!(%url, "Calling API action");

        let response = self
            .request(url, &token)
            .header(header::CONTENT_TYPE, "application/json")
            .body(body)
            .send()
            .await?;

        self.handle_response(response).await
    }

    /// Invoke an action whose reply carries nothing of interest
    pub async fn call_empty<Req>(&self, action: &str, request: &Req) -> Result<()>
    where
        Req: Serialize + ?Sized,
    {
        let _: IgnoredAny = self.call(action, request).await?;
        Ok(())
    }

    /// Upload a file as `multipart/form-data` and return its URL
    #[instrument(skip(self, file), fields(api = %self.family, size = file.len()))]
    pub async fn upload_file(&self, filename: &str, file: Vec<u8>) -> Result<String> {
        if !self.family.supports_file_upload() {
            return Err(ApiError::UnsupportedFileUpload(self.family));
        }

        let token = self.token().await?;
        let url = self.action_url("upload_file", &token)?;
        let form = multipart::Form::new().part(
            "file",
            multipart::Part::bytes(file).file_name(filename.to_string()),
        );

        let response = self.request(url, &token).multipart(form).send().await?;
        let uploaded: UploadFileResponse = self.handle_response(response).await?;
        Ok(uploaded.url)
    }

    async fn token(&self) -> Result<Token> {
        let token = self.token_source.token().await.ok_or(ApiError::NoToken)?;
        if !self.family.accepts(token.token_type) {
            return Err(ApiError::InvalidToken(format!(
                "{} tokens are not accepted by the {} API",
                token.token_type, self.family
            )));
        }
        Ok(token)
    }

    fn action_url(&self, action: &str, token: &Token) -> Result<Url> {
        let mut url = Url::parse(&format!(
            "{}/v{}/{}/action/{}",
            self.base_url, self.version, self.family, action
        ))?;

        if self.family == ApiFamily::Customer {
            let license_id = token.license_id.ok_or_else(|| {
                ApiError::InvalidToken("customer API token has no license ID".to_string())
            })?;
            url.query_pairs_mut()
                .append_pair("license_id", &license_id.to_string());
        }

        Ok(url)
    }

    fn request(&self, url: Url, token: &Token) -> RequestBuilder {
        self.http
            .post(url)
            .headers(self.headers.clone())
            .header(header::AUTHORIZATION, token.authorization())
            .header(
                header::USER_AGENT,
                format!("Rust SDK Application {}", self.client_id),
            )
            .header("X-Region", &token.region)
    }

    /// Handle API response
    async fn handle_response<T: DeserializeOwned>(&self, response: Response) -> Result<T> {
        let status = response.status();
        let body = response.bytes().await?;

        if status.is_success() {
            return serde_json::from_slice(&body).map_err(ApiError::Json);
        }

        match serde_json::from_slice::<ErrorEnvelope>(&body) {
            Ok(ErrorEnvelope { error }) if !error.kind.is_empty() => {
                warn!(status = status.as_u16(), error_type = %error.kind, "API returned an error");
                Err(ApiError::Api {
                    kind: error.kind,
                    message: error.message,
                })
            }
            _ => {
                let body = String::from_utf8_lossy(&body).into_owned();
                warn!(status = status.as_u16(), %body, "API returned an undecodable error");
                Err(ApiError::UnparsableError {
                    status: status.as_u16(),
                    body,
                })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn builder() -> ApiBuilder {
        ApiBuilder::new()
            .token_source(|| Some(Token::bearer("t", "dal").with_license_id(42)))
            .client_id("client-1")
    }

    #[test]
    fn test_missing_token_source() {
        let err = ApiBuilder::new().build(ApiFamily::Agent).unwrap_err();
        assert!(matches!(err, ApiError::Config(_)));
    }

    #[test]
    fn test_invalid_header() {
        let err = builder()
            .header("bad header", "x")
            .build(ApiFamily::Agent)
            .unwrap_err();
        assert!(matches!(err, ApiError::Config(_)));
    }

    #[test]
    fn test_action_url() {
        let api = builder()
            .base_url("https://api.example.com/")
            .build(ApiFamily::Agent)
            .unwrap();
        let token = Token::bearer("t", "dal");
        let url = api.action_url("list_chats", &token).unwrap();
        assert_eq!(
            url.as_str(),
            "https://api.example.com/v3.2/agent/action/list_chats"
        );
    }

    #[test]
    fn test_customer_url_carries_license() {
        let api = builder()
            .version("3.3")
            .build(ApiFamily::Customer)
            .unwrap();

        let token = Token::bearer("t", "dal").with_license_id(42);
        let url = api.action_url("start_chat", &token).unwrap();
        assert_eq!(
            url.as_str(),
            "https://api.livechatinc.com/v3.3/customer/action/start_chat?license_id=42"
        );

        let err = api
            .action_url("start_chat", &Token::bearer("t", "dal"))
            .unwrap_err();
        assert!(matches!(err, ApiError::InvalidToken(_)));
    }

    #[test]
    fn test_family_capabilities() {
        assert!(ApiFamily::Agent.supports_file_upload());
        assert!(ApiFamily::Customer.supports_file_upload());
        assert!(!ApiFamily::Configuration.supports_file_upload());
        assert!(!ApiFamily::Customer.accepts(TokenType::Basic));
        assert!(ApiFamily::Configuration.accepts(TokenType::Basic));
    }
}

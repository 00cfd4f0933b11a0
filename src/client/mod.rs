//! Client layer: the concrete collaborators behind the delivery strategies.
//!
//! [`CarrierClient`] sends SMS through a carrier API ([`TwilioClient`] over HTTP) and
//! [`MailTransport`] hands plain-text email to a mail server ([`SmtpMailer`]). Both
//! are traits so applications and tests can plug their own implementations.

mod mail;

use std::sync::Arc;
use std::time::Duration;

use crate::domain::{AccountSid, AuthToken, BoxError, CreateMessage, MessageSid, ValidationError};
use crate::transport::CarrierMessage;

pub use mail::{MailError, MailMessage, MailTransport, SmtpMailer};

const DEFAULT_BASE_URL: &str = "https://api.twilio.com";
const API_VERSION: &str = "2010-04-01";

#[derive(Debug, Clone)]
struct HttpResponse {
    status: u16,
    body: String,
}

trait HttpTransport: Send + Sync {
    fn post_form(
        &self,
        url: &str,
        credentials: &TwilioCredentials,
        params: Vec<(String, String)>,
    ) -> Result<HttpResponse, BoxError>;

    fn get(&self, url: &str, credentials: &TwilioCredentials) -> Result<HttpResponse, BoxError>;
}

#[derive(Debug, Clone)]
struct ReqwestTransport {
    client: reqwest::blocking::Client,
}

impl HttpTransport for ReqwestTransport {
    fn post_form(
        &self,
        url: &str,
        credentials: &TwilioCredentials,
        params: Vec<(String, String)>,
    ) -> Result<HttpResponse, BoxError> {
        let response = self
            .client
            .post(url)
            .basic_auth(
                credentials.account_sid.as_str(),
                Some(credentials.auth_token.as_str()),
            )
            .form(&params)
            .send()?;
        let status = response.status().as_u16();
        let body = response.text()?;
        Ok(HttpResponse { status, body })
    }

    fn get(&self, url: &str, credentials: &TwilioCredentials) -> Result<HttpResponse, BoxError> {
        let response = self
            .client
            .get(url)
            .basic_auth(
                credentials.account_sid.as_str(),
                Some(credentials.auth_token.as_str()),
            )
            .send()?;
        let status = response.status().as_u16();
        let body = response.text()?;
        Ok(HttpResponse { status, body })
    }
}

/// Sends SMS messages through a carrier API.
///
/// Implementations are shared between threads and must not keep per-call state.
pub trait CarrierClient: Send + Sync {
    /// Carrier name used in failure messages (e.g. `"Twilio"`).
    fn name(&self) -> &str;

    /// Create (send) a message.
    fn create(&self, request: &CreateMessage) -> Result<CarrierMessage, CarrierError>;

    /// Fetch the current state of a previously created message.
    fn fetch(&self, sid: &MessageSid) -> Result<CarrierMessage, CarrierError>;
}

#[derive(Debug, thiserror::Error)]
/// Errors returned by [`CarrierClient`] implementations.
pub enum CarrierError {
    /// HTTP client / transport failure (DNS, TLS, timeouts, etc).
    #[error("transport error: {0}")]
    Transport(#[source] BoxError),

    /// Non-successful HTTP status code without a carrier error payload.
    #[error("unexpected HTTP status: {status}")]
    HttpStatus { status: u16, body: Option<String> },

    /// The carrier rejected the request.
    #[error("API error {code:?}: {message}")]
    Api {
        status: u16,
        code: Option<i64>,
        message: String,
        more_info: Option<String>,
    },

    /// Response body could not be parsed as the expected format.
    #[error("parse error: {0}")]
    Parse(#[source] BoxError),
}

impl CarrierError {
    /// Name of the error variant, used when reporting unexpected failures.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Transport(_) => "CarrierError::Transport",
            Self::HttpStatus { .. } => "CarrierError::HttpStatus",
            Self::Api { .. } => "CarrierError::Api",
            Self::Parse(_) => "CarrierError::Parse",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Carrier account credentials.
pub struct TwilioCredentials {
    account_sid: AccountSid,
    auth_token: AuthToken,
}

impl TwilioCredentials {
    /// Validate both parts are non-empty.
    pub fn new(
        account_sid: impl Into<String>,
        auth_token: impl Into<String>,
    ) -> Result<Self, ValidationError> {
        Ok(Self {
            account_sid: AccountSid::new(account_sid)?,
            auth_token: AuthToken::new(auth_token)?,
        })
    }

    pub fn account_sid(&self) -> &AccountSid {
        &self.account_sid
    }
}

#[derive(Debug, Clone)]
/// Builder for [`TwilioClient`].
///
/// Use this when you need to customize the base URL, timeout, or user-agent.
pub struct TwilioClientBuilder {
    credentials: TwilioCredentials,
    base_url: String,
    timeout: Option<Duration>,
    user_agent: Option<String>,
}

impl TwilioClientBuilder {
    /// Create a builder with the default base URL and no timeout/user-agent override.
    pub fn new(credentials: TwilioCredentials) -> Self {
        Self {
            credentials,
            base_url: DEFAULT_BASE_URL.to_owned(),
            timeout: None,
            user_agent: None,
        }
    }

    /// Override the API base URL (scheme and host, without the API version).
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_owned();
        self
    }

    /// Set an HTTP client timeout applied to the entire request.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Override the HTTP `User-Agent` header.
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    /// Build a [`TwilioClient`].
    pub fn build(self) -> Result<TwilioClient, CarrierError> {
        let mut builder = reqwest::blocking::Client::builder();
        if let Some(timeout) = self.timeout {
            builder = builder.timeout(timeout);
        }
        if let Some(user_agent) = self.user_agent {
            builder = builder.user_agent(user_agent);
        }

        let client = builder
            .build()
            .map_err(|err| CarrierError::Transport(Box::new(err)))?;

        Ok(TwilioClient {
            credentials: self.credentials,
            base_url: self.base_url,
            http: Arc::new(ReqwestTransport { client }),
        })
    }
}

#[derive(Clone)]
/// Blocking client for the Twilio Messages API.
///
/// Calls block the current thread for the network round trip; timeouts are
/// configured on the builder.
pub struct TwilioClient {
    credentials: TwilioCredentials,
    base_url: String,
    http: Arc<dyn HttpTransport>,
}

impl TwilioClient {
    /// Create a client using the default base URL.
    ///
    /// For more customization, use [`TwilioClient::builder`].
    pub fn new(credentials: TwilioCredentials) -> Result<Self, CarrierError> {
        TwilioClientBuilder::new(credentials).build()
    }

    /// Start building a client with custom settings.
    pub fn builder(credentials: TwilioCredentials) -> TwilioClientBuilder {
        TwilioClientBuilder::new(credentials)
    }

    fn messages_url(&self) -> String {
        format!(
            "{}/{API_VERSION}/Accounts/{}/Messages.json",
            self.base_url,
            self.credentials.account_sid.as_str()
        )
    }

    fn message_url(&self, sid: &MessageSid) -> String {
        format!(
            "{}/{API_VERSION}/Accounts/{}/Messages/{}.json",
            self.base_url,
            self.credentials.account_sid.as_str(),
            sid.as_str()
        )
    }
}

impl CarrierClient for TwilioClient {
    fn name(&self) -> &str {
        "Twilio"
    }

    fn create(&self, request: &CreateMessage) -> Result<CarrierMessage, CarrierError> {
        let params = crate::transport::encode_create_message_form(request);
        let response = self
            .http
            .post_form(&self.messages_url(), &self.credentials, params)
            .map_err(CarrierError::Transport)?;
        decode_response(response)
    }

    fn fetch(&self, sid: &MessageSid) -> Result<CarrierMessage, CarrierError> {
        let response = self
            .http
            .get(&self.message_url(sid), &self.credentials)
            .map_err(CarrierError::Transport)?;
        decode_response(response)
    }
}

fn decode_response(response: HttpResponse) -> Result<CarrierMessage, CarrierError> {
    if !(200..=299).contains(&response.status) {
        if let Some(payload) = crate::transport::decode_error_json_response(&response.body) {
            return Err(CarrierError::Api {
                status: payload.status.unwrap_or(response.status),
                code: payload.code,
                message: payload.message.unwrap_or_default(),
                more_info: payload.more_info,
            });
        }

        let body = if response.body.trim().is_empty() {
            None
        } else {
            Some(response.body)
        };
        return Err(CarrierError::HttpStatus {
            status: response.status,
            body,
        });
    }

    CarrierMessage::from_json(&response.body)
        .map_err(|err| CarrierError::Parse(Box::new(err)))
}

//! Outbound request execution with bounded linear retry.

pub mod linear_backoff;

use crate::config::ClientConfig;
use crate::error::composer_api::ComposerApiError;
use crate::transport::linear_backoff::LinearBackoff;

use common::SessionToken;

use std::fmt;
use std::time::{Duration, Instant};

use backoff::backoff::Backoff;
use log::{debug, error, trace, warn};
use reqwest::Client;
use reqwest::header::{
    ACCEPT, ACCEPT_LANGUAGE, CONTENT_TYPE, COOKIE, HeaderMap, HeaderValue, USER_AGENT,
};
use serde_json::Value;
use tokio::time::sleep as TokioSleep;
use url::Url;

const JSON_CONTENT_TYPE: &str = "application/json";
const ACCEPT_LANGUAGE_VALUE: &str = "en-US,en;q=0.9";
const SESSION_COOKIE_NAME: &str = "WorkosCursorSessionToken";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Delete,
}

impl From<HttpMethod> for reqwest::Method {
    fn from(method: HttpMethod) -> Self {
        match method {
            HttpMethod::Get => reqwest::Method::GET,
            HttpMethod::Post => reqwest::Method::POST,
            HttpMethod::Put => reqwest::Method::PUT,
            HttpMethod::Delete => reqwest::Method::DELETE,
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Delete => "DELETE",
        };
        write!(f, "{name}")
    }
}

/// One logical request: a path relative to the base address, a method and
/// an optional JSON body. Built per call and dropped once it completes.
#[derive(Debug, Clone, PartialEq)]
pub struct RequestDescriptor {
    pub path: String,
    pub method: HttpMethod,
    pub body: Option<Value>,
}

impl RequestDescriptor {
    pub fn new(path: impl Into<String>, method: HttpMethod) -> Self {
        Self {
            path: path.into(),
            method,
            body: None,
        }
    }

    pub fn get(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            method: HttpMethod::Get,
            body: None,
        }
    }

    pub fn post(path: impl Into<String>, body: Value) -> Self {
        Self {
            path: path.into(),
            method: HttpMethod::Post,
            body: Some(body),
        }
    }

    pub fn with_body(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }
}

/// Base address with a trailing `/` so relative joins append instead of replacing
/// the last path segment.
fn base_directory(mut url: Url) -> Url {
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    url
}

/// Owns the HTTP channel: base address, static headers and per-attempt timeout.
///
/// Shared by every service adapter of a client instance.
#[derive(Debug)]
pub struct TransportExecutor {
    base_url: Url,
    client: Client,
    max_attempts: u32,
    retry_delay: Duration,
}

impl TransportExecutor {
    /// Build the channel, attaching the session credential to every request.
    ///
    /// # Errors
    ///
    /// Returns [`ComposerApiError::Setup`] if the configuration is invalid or
    /// the HTTP client cannot be built.
    pub fn new(config: &ClientConfig, token: &SessionToken) -> Result<Self, ComposerApiError> {
        config.validate()?;
        let base_url = base_directory(Url::parse(&config.base_url)?);

        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static(JSON_CONTENT_TYPE));
        headers.insert(ACCEPT, HeaderValue::from_static(JSON_CONTENT_TYPE));
        headers.insert(ACCEPT_LANGUAGE, HeaderValue::from_static(ACCEPT_LANGUAGE_VALUE));
        headers.insert(USER_AGENT, header_value(&config.user_agent)?);

        let mut cookie = header_value(&format!(
            "NEXT_LOCALE=en; {SESSION_COOKIE_NAME}={}",
            token.as_str()
        ))?;
        cookie.set_sensitive(true);
        headers.insert(COOKIE, cookie);

        let client = Client::builder()
            .default_headers(headers)
            .timeout(config.timeout)
            .build()
            .map_err(|e| ComposerApiError::setup(format!("Failed to build HTTP client: {e}")))?;

        debug!(
            "Transport ready for {base_url} (token {}, timeout {:?}, attempts {})",
            token.preview(),
            config.timeout,
            config.max_attempts
        );

        Ok(Self {
            base_url,
            client,
            max_attempts: config.max_attempts,
            retry_delay: config.retry_delay,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    /// Resolve an endpoint path beneath the base address, keeping any base path prefix.
    pub fn endpoint_url(&self, path: &str) -> Result<Url, ComposerApiError> {
        Ok(self.base_url.join(path.trim_start_matches('/'))?)
    }

    /// Execute a request, retrying network failures and 5xx responses.
    ///
    /// 4xx responses are returned after the first attempt. Once attempts are
    /// exhausted the error from the last attempt is returned.
    pub async fn execute(&self, descriptor: &RequestDescriptor) -> Result<Value, ComposerApiError> {
        let url = self.endpoint_url(&descriptor.path)?;
        let mut backoff = LinearBackoff::new(self.retry_delay, self.max_attempts);
        let mut attempt: u32 = 1;

        loop {
            let started = Instant::now();
            let outcome = self.attempt(&url, descriptor).await;
            let elapsed = started.elapsed();

            let error = match outcome {
                Ok(value) => {
                    debug!(
                        "{} {} succeeded on attempt {attempt} in {elapsed:?}",
                        descriptor.method, descriptor.path
                    );
                    return Ok(value);
                }
                Err(error) => error,
            };

            if !error.is_retryable() {
                warn!(
                    "{} {} failed on attempt {attempt} in {elapsed:?} (status {}, not retried): {}",
                    descriptor.method,
                    descriptor.path,
                    error.status_code(),
                    error.message()
                );
                return Err(error);
            }

            match backoff.next_backoff() {
                Some(delay) => {
                    warn!(
                        "{} {} failed on attempt {attempt} in {elapsed:?} (status {}), retrying after {delay:?}",
                        descriptor.method,
                        descriptor.path,
                        error.status_code()
                    );
                    TokioSleep(delay).await;
                    attempt += 1;
                }
                None => {
                    error!(
                        "{} {} failed after {attempt} attempt(s): {}",
                        descriptor.method,
                        descriptor.path,
                        error.message()
                    );
                    return Err(error);
                }
            }
        }
    }

    async fn attempt(
        &self,
        url: &Url,
        descriptor: &RequestDescriptor,
    ) -> Result<Value, ComposerApiError> {
        let mut request = self
            .client
            .request(descriptor.method.into(), url.clone());
        if let Some(body) = &descriptor.body {
            request = request.json(body);
        }

        trace!("-> {} {url}", descriptor.method);
        let response = request
            .send()
            .await
            .map_err(|e| ComposerApiError::from_reqwest(&e))?;

        let status = response.status();
        let bytes = response
            .bytes()
            .await
            .map_err(|e| ComposerApiError::from_reqwest(&e))?;
        trace!("<- {} {url} {status} ({} bytes)", descriptor.method, bytes.len());

        if !status.is_success() {
            return Err(ComposerApiError::remote(
                status.as_u16(),
                parse_error_body(&bytes),
            ));
        }

        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(Value::Null);
        }

        Ok(serde_json::from_slice(&bytes)?)
    }
}

fn header_value(value: &str) -> Result<HeaderValue, ComposerApiError> {
    HeaderValue::from_str(value)
        .map_err(|e| ComposerApiError::setup(format!("Invalid header value: {e}")))
}

/// JSON when the remote sent JSON, otherwise the raw text; `None` when empty.
fn parse_error_body(bytes: &[u8]) -> Option<Value> {
    if bytes.iter().all(u8::is_ascii_whitespace) {
        return None;
    }

    serde_json::from_slice(bytes).ok().or_else(|| {
        Some(Value::String(String::from_utf8_lossy(bytes).trim().to_string()))
    })
}

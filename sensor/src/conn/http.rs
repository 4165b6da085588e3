use async_trait::async_trait;
use std::time::Duration;
use thiserror::Error;

/// What the client hands back after a GET: a status line code and the raw body.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Response {
    pub status: i32,
    pub body: String,
}

impl Response {
    pub fn new(status: i32, body: &str) -> Self {
        Self {
            status,
            body: body.to_string(),
        }
    }
}

/// Failures below HTTP. Each one has the negative status code an
/// Arduino-style client would report in place of a real status.
#[derive(Debug, Error)]
pub enum HttpError {
    #[error("connection failed: {0}")]
    ConnectionFailed(String),
    #[error("client error: {0}")]
    Api(String),
    #[error("timed out waiting for response")]
    TimedOut,
    #[error("invalid response: {0}")]
    InvalidResponse(String),
}

impl HttpError {
    pub fn status_code(&self) -> i32 {
        match self {
            HttpError::ConnectionFailed(_) => -1,
            HttpError::Api(_) => -2,
            HttpError::TimedOut => -3,
            HttpError::InvalidResponse(_) => -4,
        }
    }
}

impl From<reqwest::Error> for HttpError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            HttpError::TimedOut
        } else if e.is_connect() {
            HttpError::ConnectionFailed(e.to_string())
        } else if e.is_decode() || e.is_body() {
            HttpError::InvalidResponse(e.to_string())
        } else {
            HttpError::Api(e.to_string())
        }
    }
}

#[async_trait]
pub trait HttpGet {
    /// Issue one GET for `path` against the client's fixed host.
    /// Non-2xx statuses are a successful `Response`.
    async fn get(&mut self, path: &str) -> Result<Response, HttpError>;
}

/// Plain-HTTP client bound to one host and port.
pub struct DweetClient {
    base: String,
    client: reqwest::Client,
}

impl DweetClient {
    pub fn new(host: &str, port: u16, timeout: Duration) -> Result<Self, HttpError> {
        // a redirect is reported as its own status, never followed
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .redirect(reqwest::redirect::Policy::none())
            .build()
            .map_err(|e| HttpError::Api(e.to_string()))?;
        Ok(Self {
            base: base_url(host, port),
            client,
        })
    }

    pub fn base(&self) -> &str {
        &self.base
    }
}

#[async_trait]
impl HttpGet for DweetClient {
    async fn get(&mut self, path: &str) -> Result<Response, HttpError> {
        let url = format!("{}{}", self.base, path);
        log::debug!("GET {}", url);
        let res = self.client.get(&url).send().await?;
        let status = res.status().as_u16() as i32;
        let body = res.text().await?;
        Ok(Response { status, body })
    }
}

fn base_url(host: &str, port: u16) -> String {
    if port == 80 {
        format!("http://{}", host)
    } else {
        format!("http://{}:{}", host, port)
    }
}

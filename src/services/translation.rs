use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;

use crate::services::response::{self, TranslationResponse};

pub const DEFAULT_ENDPOINT: &str = "https://translate.google.com/translate_a/single";
pub const DEFAULT_USER_AGENT: &str =
    "Mozilla/5.0 (X11; Linux x86_64; rv:128.0) Gecko/20100101 Firefox/128.0";

const CLIENT_ID: &str = "t";
/// Response detail flags: dictionary (bd), translation (t), alternatives (at).
const DETAIL_FLAGS: [&str; 3] = ["bd", "t", "at"];
const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded;charset=utf-8";

#[derive(Debug, Error)]
pub enum TranslateError {
    #[error("Request failed: {0}")]
    Transport(String),
    #[error("Malformed response: {0}")]
    MalformedResponse(String),
    #[error("Out of resources: {0}")]
    ResourceExhaustion(String),
    /// The background worker ended without delivering a result.
    #[error("Translation worker failed: {0}")]
    Worker(String),
}

impl From<reqwest::Error> for TranslateError {
    fn from(err: reqwest::Error) -> Self {
        TranslateError::Transport(err.to_string())
    }
}

impl From<serde_json::Error> for TranslateError {
    fn from(err: serde_json::Error) -> Self {
        TranslateError::MalformedResponse(err.to_string())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RequestMethod {
    /// Text travels in the query string. Long inputs may hit URL length limits.
    Get,
    /// Text travels as a form-encoded `q` body parameter.
    #[default]
    Post,
}

/// Where and how translation requests are sent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoint {
    pub base_url: String,
    pub user_agent: String,
    pub method: RequestMethod,
}

impl Default for Endpoint {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_ENDPOINT.to_string(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            method: RequestMethod::Post,
        }
    }
}

/// One translation job's input. Never holds empty text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranslationRequest {
    source_text: String,
    source_lang: Option<String>,
    target_lang: Option<String>,
}

impl TranslationRequest {
    /// Returns `None` for empty text: there is nothing to translate.
    pub fn new(
        source_text: impl Into<String>,
        source_lang: Option<String>,
        target_lang: Option<String>,
    ) -> Option<Self> {
        let source_text = source_text.into();
        if source_text.is_empty() {
            return None;
        }

        Some(Self {
            source_text,
            source_lang: source_lang.filter(|l| !l.is_empty()),
            target_lang: target_lang.filter(|l| !l.is_empty()),
        })
    }

    pub fn source_text(&self) -> &str {
        &self.source_text
    }

    pub fn source_lang(&self) -> Option<&str> {
        self.source_lang.as_deref()
    }

    pub fn target_lang(&self) -> Option<&str> {
        self.target_lang.as_deref()
    }
}

/// A fully built HTTP request, independent of any client library.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRequest {
    pub url: String,
    pub method: RequestMethod,
    pub headers: Vec<(String, String)>,
    pub body: Option<String>,
}

impl HttpRequest {
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }
}

pub fn build_request(request: &TranslationRequest, endpoint: &Endpoint) -> HttpRequest {
    let mut query: Vec<(&str, &str)> = vec![("client", CLIENT_ID)];
    if let Some(lang) = request.source_lang() {
        query.push(("sl", lang));
    }
    if let Some(lang) = request.target_lang() {
        query.push(("tl", lang));
    }
    query.extend(DETAIL_FLAGS.iter().map(|flag| ("dt", *flag)));

    let mut headers = vec![("User-Agent".to_string(), endpoint.user_agent.clone())];
    let body = match endpoint.method {
        RequestMethod::Get => {
            query.push(("q", request.source_text()));
            None
        }
        RequestMethod::Post => {
            headers.push(("Content-Type".to_string(), FORM_CONTENT_TYPE.to_string()));
            Some(encode_pairs(&[("q", request.source_text())]))
        }
    };

    let separator = if endpoint.base_url.contains('?') { '&' } else { '?' };
    let url = format!("{}{}{}", endpoint.base_url, separator, encode_pairs(&query));

    HttpRequest {
        url,
        method: endpoint.method,
        headers,
        body,
    }
}

fn encode_pairs(pairs: &[(&str, &str)]) -> String {
    pairs
        .iter()
        .map(|(key, value)| format!("{}={}", key, urlencoding::encode(value)))
        .collect::<Vec<_>>()
        .join("&")
}

/// Performs the blocking network call for a built request.
pub trait Transport: Send + Sync {
    fn send(&self, request: &HttpRequest) -> Result<Vec<u8>, TranslateError>;
}

pub struct HttpTransport {
    client: reqwest::blocking::Client,
}

impl HttpTransport {
    /// `timeout` of `None` keeps the client's default.
    pub fn new(timeout: Option<Duration>) -> Result<Self, TranslateError> {
        let mut builder = reqwest::blocking::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            client: builder.build()?,
        })
    }
}

impl Transport for HttpTransport {
    fn send(&self, request: &HttpRequest) -> Result<Vec<u8>, TranslateError> {
        let mut builder = match request.method {
            RequestMethod::Get => self.client.get(&request.url),
            RequestMethod::Post => self.client.post(&request.url),
        };
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }
        if let Some(body) = &request.body {
            builder = builder.body(body.clone());
        }

        let response = builder.send()?;
        if !response.status().is_success() {
            return Err(TranslateError::Transport(format!(
                "Status: {}",
                response.status()
            )));
        }

        Ok(response.bytes()?.to_vec())
    }
}

/// Builds, sends, and extracts one translation. Blocks on the network.
pub fn translate(
    transport: &dyn Transport,
    request: &TranslationRequest,
    endpoint: &Endpoint,
) -> Result<TranslationResponse, TranslateError> {
    let http_request = build_request(request, endpoint);
    tracing::debug!(
        url = %http_request.url,
        chars = request.source_text().chars().count(),
        "sending translation request"
    );

    let body = transport.send(&http_request)?;
    tracing::debug!(bytes = body.len(), "received translation response");

    response::extract(&body)
}

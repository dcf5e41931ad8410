use std::collections::BTreeMap;
use std::time::Duration;

use bulkcancel_core::template::{parse_template, BodyEscape, BodyTemplate, TemplateError};
use bulkcancel_core::InputRecord;
use serde::Deserialize;

use crate::executor::http::HttpRequestParts;

/// Request settings as they appear in a config file.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RequestConfig {
    #[serde(default)]
    pub endpoint: Option<String>,
    #[serde(default)]
    pub method: Option<String>,
    #[serde(default)]
    pub headers: BTreeMap<String, String>,
    #[serde(default)]
    pub body: String,
    /// Escaping for record values. Unset means JSON when Content-Type names JSON.
    #[serde(default)]
    pub escape: Option<BodyEscape>,
    #[serde(default)]
    pub timeout_ms: Option<u64>,
}

impl RequestConfig {
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_ms.map(Duration::from_millis)
    }

    pub fn body_escape(&self) -> BodyEscape {
        if let Some(escape) = self.escape {
            return escape;
        }
        let json = self.headers.iter().any(|(k, v)| {
            k.eq_ignore_ascii_case("content-type") && v.to_ascii_lowercase().contains("json")
        });
        if json {
            BodyEscape::Json
        } else {
            BodyEscape::None
        }
    }
}

/// Validated, ready-to-render description of the one request sent per record.
#[derive(Debug, Clone)]
pub struct RequestSpec {
    pub method: String,
    pub endpoint: url::Url,
    pub headers: BTreeMap<String, String>,
    pub body: BodyTemplate,
}

impl RequestSpec {
    pub fn new(endpoint: url::Url, body: BodyTemplate) -> Self {
        Self {
            method: "POST".to_string(),
            endpoint,
            headers: BTreeMap::new(),
            body,
        }
    }

    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    pub fn from_config(cfg: &RequestConfig) -> Result<Self, RequestSpecError> {
        let raw = cfg
            .endpoint
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .ok_or(RequestSpecError::MissingEndpoint)?;
        let endpoint = url::Url::parse(raw)
            .map_err(|e| RequestSpecError::InvalidEndpoint(format!("{raw}: {e}")))?;
        if !matches!(endpoint.scheme(), "http" | "https") {
            return Err(RequestSpecError::UnsupportedScheme(endpoint.scheme().to_string()));
        }

        let method = cfg
            .method
            .as_deref()
            .unwrap_or("POST")
            .trim()
            .to_ascii_uppercase();
        if reqwest::Method::from_bytes(method.as_bytes()).is_err() {
            return Err(RequestSpecError::InvalidMethod(method));
        }

        let body = parse_template(&cfg.body)?.with_escape(cfg.body_escape());

        Ok(Self {
            method,
            endpoint,
            headers: cfg.headers.clone(),
            body,
        })
    }

    pub fn build(&self, record: &InputRecord) -> HttpRequestParts {
        HttpRequestParts {
            method: self.method.clone(),
            url: self.endpoint.clone(),
            headers: self.headers.clone(),
            body: self.body.render(record).into_bytes(),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum RequestSpecError {
    #[error("missing endpoint (set `endpoint` in the request config, --endpoint or BULKCANCEL_ENDPOINT)")]
    MissingEndpoint,
    #[error("invalid endpoint URL: {0}")]
    InvalidEndpoint(String),
    #[error("unsupported endpoint scheme: {0} (expected http or https)")]
    UnsupportedScheme(String),
    #[error("invalid HTTP method: {0}")]
    InvalidMethod(String),
    #[error("invalid body template: {0}")]
    Template(#[from] TemplateError),
}

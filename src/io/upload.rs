//! Upload of finished plans to the outcomes server.
//!
//! A non-success status never gets a synthesized error: the server's body is
//! handed back verbatim in [`Error::Upload`].

use crate::config::UploadConfig;
use crate::core::{CoaepRecord, Error, Result};
use reqwest::blocking::Client;
use reqwest::header::CONTENT_TYPE;
use std::time::Duration;

/// Identifiers the server files an upload under.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadTarget {
    pub course_id: String,
    pub curr_id: String,
    pub period_id: String,
}

impl UploadTarget {
    fn query(&self) -> [(&'static str, &str); 3] {
        [
            ("course_id", self.course_id.as_str()),
            ("curr_id", self.curr_id.as_str()),
            ("period_id", self.period_id.as_str()),
        ]
    }
}

#[derive(Debug, Clone)]
pub enum Payload<'a> {
    /// The assembled record as JSON
    Json(&'a CoaepRecord),
    /// The canonical table re-serialized as delimited text
    Csv(String),
}

pub struct Uploader {
    client: Client,
    base_url: String,
    token: Option<String>,
}

impl Uploader {
    pub fn new(base_url: impl Into<String>, token: Option<String>, timeout: Duration) -> Result<Self> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base_url: base_url.into(),
            token,
        })
    }

    pub fn from_config(config: &UploadConfig) -> Result<Self> {
        let base_url = config.base_url.clone().ok_or_else(|| {
            Error::Configuration("upload.base_url is not set (use --url or the config file)".into())
        })?;
        Self::new(
            base_url,
            config.token.clone(),
            Duration::from_secs(config.timeout_secs),
        )
    }

    pub fn endpoint(&self) -> String {
        format!("{}/coaeps/upload", self.base_url.trim_end_matches('/'))
    }

    /// POST the payload and return the server's (parsed) response body.
    pub fn upload(&self, target: &UploadTarget, payload: &Payload<'_>) -> Result<serde_json::Value> {
        let mut request = self.client.post(self.endpoint()).query(&target.query());
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }
        request = match payload {
            Payload::Json(record) => request.json(record),
            Payload::Csv(text) => request.header(CONTENT_TYPE, "text/csv").body(text.clone()),
        };

        log::info!("uploading to {} for course {}", self.endpoint(), target.course_id);
        let response = request.send()?;
        let status = response.status().as_u16();
        let body = response.text()?;
        interpret_response(status, &body)
    }
}

/// Map a raw response to the upload result. JSON bodies are parsed; anything
/// else is kept as a string.
pub fn interpret_response(status: u16, body: &str) -> Result<serde_json::Value> {
    let value = serde_json::from_str(body)
        .unwrap_or_else(|_| serde_json::Value::String(body.to_string()));

    if (200..300).contains(&status) {
        Ok(value)
    } else {
        log::debug!("upload rejected with status {}", status);
        Err(Error::Upload { status, body: value })
    }
}

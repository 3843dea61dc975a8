//! HTTP client for backend communication.

use std::time::Duration;

use reqwest::header::CONTENT_TYPE;
use tracing::debug;

use super::Backend;
use super::stream::ChunkStream;
use super::types::{AudioStream, SynthesisError, SynthesizeRequest};

/// Default backend address.
pub const DEFAULT_BACKEND_URL: &str = "http://localhost:5050";

/// Default bound on a single synthesis call.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// HTTP-based streaming synthesis client.
pub struct HttpBackend {
    base_url: String,
    client: reqwest::blocking::Client,
}

impl HttpBackend {
    /// Create a new HTTP backend client.
    ///
    /// `address` may be a full URL or a bare `host:port`, in which case
    /// `http://` is assumed. `timeout` bounds each synthesis call from
    /// connect until the last body byte.
    pub fn new(address: &str, timeout: Duration) -> Result<Self, SynthesisError> {
        let address = address.trim().trim_end_matches('/');
        let base_url = if address.contains("://") {
            address.to_string()
        } else {
            format!("http://{address}")
        };

        let client = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .connect_timeout(timeout)
            .build()
            .map_err(|e| SynthesisError::ClientSetup(e.to_string()))?;

        Ok(Self { base_url, client })
    }

    /// Get the base URL for this backend.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

fn map_send_error(e: reqwest::Error) -> SynthesisError {
    if e.is_timeout() {
        SynthesisError::Timeout
    } else if e.is_connect() {
        SynthesisError::ConnectionFailed(e.to_string())
    } else {
        SynthesisError::RequestFailed(e.to_string())
    }
}

fn is_audio_content_type(content_type: &str) -> bool {
    let mime = content_type
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase();

    mime.starts_with("audio/") || mime == "application/octet-stream"
}

impl Backend for HttpBackend {
    fn synthesize(&self, request: &SynthesizeRequest) -> Result<AudioStream, SynthesisError> {
        let url = format!("{}/synthesize", self.base_url);
        debug!(voice = %request.voice, chars = request.text.chars().count(), "sending synthesis request");

        let response = self
            .client
            .post(&url)
            .json(request)
            .send()
            .map_err(map_send_error)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            let body = body.trim();
            return Err(SynthesisError::RequestFailed(if body.is_empty() {
                format!("Status: {status}")
            } else {
                format!("Status: {status}: {body}")
            }));
        }

        if let Some(content_type) = response.headers().get(CONTENT_TYPE) {
            let content_type = content_type.to_str().unwrap_or_default();
            if !is_audio_content_type(content_type) {
                return Err(SynthesisError::InvalidResponse(format!(
                    "Unexpected content type: {content_type}"
                )));
            }
        }

        Ok(Box::new(ChunkStream::new(response)))
    }
}

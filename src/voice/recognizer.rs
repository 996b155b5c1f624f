use std::sync::Arc;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use thiserror::Error;

/// Recognition locale; only US English is supported
pub const RECOGNITION_LOCALE: &str = "en-US";

/// Errors that can end a speech capture session
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SpeechCaptureError {
    /// Microphone access was refused
    #[error("Microphone permission denied")]
    PermissionDenied,

    #[error("No speech detected")]
    NoSpeech,

    #[error("Capture aborted")]
    Aborted,

    /// Another capture session is still running
    #[error("A capture session is already active")]
    Busy,

    #[error("Network error: {0}")]
    Network(String),

    #[error("Speech recognition error: {0}")]
    Other(String),
}

impl SpeechCaptureError {
    /// Map a recognizer error code to an error
    pub fn from_code(code: &str) -> Self {
        match code {
            "not-allowed" => Self::PermissionDenied,
            "no-speech" => Self::NoSpeech,
            "aborted" => Self::Aborted,
            "network" => Self::Network(code.to_string()),
            other => Self::Other(other.to_string()),
        }
    }
}

impl From<reqwest::Error> for SpeechCaptureError {
    fn from(err: reqwest::Error) -> Self {
        Self::Network(err.to_string())
    }
}

/// Input for one capture session
#[derive(Debug, Clone)]
pub struct CaptureRequest {
    pub audio: Vec<u8>,
    pub locale: &'static str,
    /// Always false: only the final transcript is wanted
    pub interim_results: bool,
}

impl CaptureRequest {
    pub fn new(audio: Vec<u8>) -> Self {
        Self {
            audio,
            locale: RECOGNITION_LOCALE,
            interim_results: false,
        }
    }
}

/// Speech-to-text capability.
///
/// One call is one session: it yields at most one final transcript, or an error.
#[async_trait]
pub trait SpeechRecognizer: Send + Sync {
    async fn capture(&self, request: CaptureRequest) -> Result<Option<String>, SpeechCaptureError>;
}

/// Whether the runtime offers speech recognition. Chosen once at startup.
#[derive(Clone)]
pub enum SpeechCapability {
    Available(Arc<dyn SpeechRecognizer>),
    Unavailable,
}

impl SpeechCapability {
    pub fn is_available(&self) -> bool {
        matches!(self, Self::Available(_))
    }
}

impl std::fmt::Debug for SpeechCapability {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Available(_) => f.write_str("Available"),
            Self::Unavailable => f.write_str("Unavailable"),
        }
    }
}

#[derive(Debug, Deserialize)]
struct RecognitionResponse {
    #[serde(default)]
    transcript: Option<String>,
    #[serde(default)]
    error: Option<String>,
}

/// Recognizer backed by an HTTP speech-to-text endpoint
pub struct HttpSpeechRecognizer {
    client: Client,
    endpoint: String,
}

impl HttpSpeechRecognizer {
    pub fn new(client: Client, endpoint: &str) -> Self {
        Self {
            client,
            endpoint: endpoint.to_string(),
        }
    }
}

#[async_trait]
impl SpeechRecognizer for HttpSpeechRecognizer {
    async fn capture(&self, request: CaptureRequest) -> Result<Option<String>, SpeechCaptureError> {
        tracing::debug!(
            endpoint = %self.endpoint,
            bytes = request.audio.len(),
            locale = %request.locale,
            "Starting speech capture"
        );

        let interim = request.interim_results.to_string();
        let response = self
            .client
            .post(&self.endpoint)
            .query(&[("lang", request.locale), ("interim_results", interim.as_str())])
            .header("Content-Type", "application/octet-stream")
            .body(request.audio)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(SpeechCaptureError::Network(format!(
                "recognizer returned {}: {}",
                status, body
            )));
        }

        let result: RecognitionResponse = response
            .json()
            .await
            .map_err(|e| SpeechCaptureError::Other(format!("invalid recognizer response: {e}")))?;

        if let Some(code) = result.error {
            return Err(SpeechCaptureError::from_code(&code));
        }

        Ok(result.transcript.filter(|t| !t.trim().is_empty()))
    }
}

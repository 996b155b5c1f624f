use std::sync::Arc;

use serde::Serialize;
use tokio::sync::Mutex;
use utoipa::ToSchema;

use super::recognizer::{CaptureRequest, SpeechCapability, SpeechCaptureError};
use crate::dashboard::RenderSurface;
use crate::presenter::Presenter;

/// Prompt shown when microphone access is refused
pub const PERMISSION_PROMPT: &str = "Please allow microphone access to use voice search.";

/// What a voice capture led to
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum VoiceOutcome {
    /// No speech capability in this runtime; the voice affordance is hidden
    Unsupported,
    /// A transcript was recognized and a lookup started
    Searched { transcript: String, sequence: u64 },
    /// The session ended without a transcript
    NoTranscript,
    /// The transcript was blank after cleanup
    EmptyTranscript,
    /// Microphone permission was refused; the prompt is on the dashboard
    PermissionPrompt { message: String },
    /// Capture failed; logged only
    Failed { error: String },
}

/// Strip surrounding whitespace and trailing periods from a transcript
pub fn normalize_transcript(transcript: &str) -> String {
    let mut cleaned = transcript.trim();
    loop {
        let next = cleaned.trim_end_matches('.').trim_end();
        if next == cleaned {
            return cleaned.to_string();
        }
        cleaned = next;
    }
}

/// Turns speech into the same search a typed city name triggers
pub struct VoiceInputAdapter {
    capability: SpeechCapability,
    presenter: Arc<Presenter>,
    surface: Arc<dyn RenderSurface>,
    session: Mutex<()>,
}

impl VoiceInputAdapter {
    pub fn new(
        capability: SpeechCapability,
        presenter: Arc<Presenter>,
        surface: Arc<dyn RenderSurface>,
    ) -> Self {
        Self {
            capability,
            presenter,
            surface,
            session: Mutex::new(()),
        }
    }

    pub fn is_available(&self) -> bool {
        self.capability.is_available()
    }

    /// Run one capture session over `audio`. Only one session runs at a time.
    pub async fn listen(&self, audio: Vec<u8>) -> VoiceOutcome {
        let SpeechCapability::Available(recognizer) = &self.capability else {
            tracing::debug!("Speech recognition not supported, ignoring voice input");
            return VoiceOutcome::Unsupported;
        };

        let result = match self.session.try_lock() {
            Ok(_session) => recognizer.capture(CaptureRequest::new(audio)).await,
            Err(_) => Err(SpeechCaptureError::Busy),
        };

        match result {
            Ok(Some(transcript)) => self.submit(&transcript).await,
            Ok(None) => VoiceOutcome::NoTranscript,
            Err(SpeechCaptureError::PermissionDenied) => {
                tracing::warn!("Microphone permission denied");
                self.surface.show_prompt(PERMISSION_PROMPT).await;
                VoiceOutcome::PermissionPrompt {
                    message: PERMISSION_PROMPT.to_string(),
                }
            }
            Err(e) => {
                tracing::error!(error = %e, "Speech recognition error");
                VoiceOutcome::Failed {
                    error: e.to_string(),
                }
            }
        }
    }

    async fn submit(&self, transcript: &str) -> VoiceOutcome {
        let cleaned = normalize_transcript(transcript);
        tracing::info!(transcript = %cleaned, "Voice transcript recognized");

        self.surface.set_input(&cleaned).await;

        match self.presenter.search(&cleaned).await {
            Ok(lookup) => VoiceOutcome::Searched {
                transcript: cleaned,
                sequence: lookup.sequence,
            },
            Err(_) => VoiceOutcome::EmptyTranscript,
        }
    }
}

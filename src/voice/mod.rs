mod adapter;
mod recognizer;

pub use adapter::{VoiceInputAdapter, VoiceOutcome};
pub use recognizer::{HttpSpeechRecognizer, SpeechCapability};

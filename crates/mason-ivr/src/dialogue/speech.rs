//! Collaborator contracts for the speech edges. The engine never calls
//! these itself; the transport transcribes the caller's audio before a
//! turn and synthesizes the assistant text after it.

use super::content::Language;

/// Opaque reference to a rendered audio artifact, served back to the
/// caller over the transport (`/audio/{handle}`).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AudioHandle(pub String);

/// Speech-to-text seam. Implementations must tolerate silent or
/// unrecognizable audio by returning an empty or placeholder string;
/// the confirmation path treats short text as "unintelligible", not as
/// a failure.
pub trait Transcriber: Send + Sync {
    fn transcribe(&self, audio: &[u8], language: Language) -> Result<String, TranscribeError>;
}

#[derive(Debug, thiserror::Error)]
pub enum TranscribeError {
    #[error("transcription backend unavailable: {0}")]
    Unavailable(String),
}

/// Text-to-speech seam, invoked once per engine response.
pub trait Synthesizer: Send + Sync {
    fn synthesize(&self, text: &str, language: Language) -> Result<AudioHandle, SynthesisError>;

    /// Bytes behind a previously issued handle, if still available.
    fn fetch(&self, handle: &AudioHandle) -> Result<Option<Vec<u8>>, SynthesisError>;
}

#[derive(Debug, thiserror::Error)]
pub enum SynthesisError {
    #[error("synthesis backend unavailable: {0}")]
    Unavailable(String),
}

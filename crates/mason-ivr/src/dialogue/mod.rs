//! Turn-based voice intake dialogue: the content table, the session
//! store, the state machine, the speech collaborator seams, and the
//! HTTP transport around them.

pub mod content;
pub mod engine;
pub mod router;
pub mod session;
pub mod speech;


pub use content::{content, Field, Language, LanguageContent, UnknownLanguage};
pub use engine::{DialogueEngine, TurnReply};
pub use router::{ivr_router, IvrState};
pub use session::{FieldSnapshot, Session, SessionId, SessionStore};
pub use speech::{AudioHandle, SynthesisError, Synthesizer, TranscribeError, Transcriber};

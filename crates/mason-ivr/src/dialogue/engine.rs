//! The dialogue state machine. Per turn it decides what to ask, how to
//! validate and normalize the reply, and whether to accept, retry, or
//! finish. Two modes per session: collecting a value for the current
//! field, or confirming the value proposed on the previous turn.
//!
//! Speech transcription and synthesis are the caller's concern; every
//! operation here is synchronous and performs no I/O.

use tracing::debug;

use super::content::{content, Field, Language};
use super::session::{FieldSnapshot, Session, SessionId, SessionStore};
use crate::config::SessionConfig;

/// What the engine hands back after every operation: the text to speak,
/// whether the dialogue just completed, and the field map as collected
/// so far.
#[derive(Debug, Clone)]
pub struct TurnReply {
    pub assistant_text: String,
    pub finished: bool,
    pub fields: FieldSnapshot,
}

/// A confirmation reply shorter than this (after trimming) is treated as
/// an unintelligible transcription rather than an answer.
const MIN_CONFIRMATION_CHARS: usize = 2;

const MIN_PHONE_DIGITS: usize = 10;
const MIN_AGE: u32 = 18;
const MAX_AGE_EXCLUSIVE: u32 = 120;

/// Turn-based intake dialogue over a bounded [`SessionStore`].
#[derive(Debug)]
pub struct DialogueEngine {
    store: SessionStore,
}

impl DialogueEngine {
    pub fn new(config: SessionConfig) -> Self {
        Self {
            store: SessionStore::new(config),
        }
    }

    pub fn store(&self) -> &SessionStore {
        &self.store
    }

    /// Create or overwrite a session and return the first question with
    /// an empty field map. Never fails; restarting discards prior values.
    pub fn start(&self, session_id: &SessionId, language: Language) -> TurnReply {
        self.store.start(session_id, language);
        debug!(session = %session_id.0, %language, "session started");
        TurnReply {
            assistant_text: content(language).question(Field::first()).to_string(),
            finished: false,
            fields: FieldSnapshot::default(),
        }
    }

    /// Opening message for a conversation before any audio is captured.
    /// Equivalent to [`DialogueEngine::start`].
    pub fn initial_question(&self, session_id: &SessionId, language: Language) -> TurnReply {
        self.start(session_id, language)
    }

    /// Remove the session if present; no-op otherwise.
    pub fn reset(&self, session_id: &SessionId) {
        self.store.remove(session_id);
        debug!(session = %session_id.0, "session reset");
    }

    /// Run one turn of the dialogue. A missing session is auto-started
    /// in the default language before the utterance is interpreted.
    pub fn process_turn(&self, session_id: &SessionId, utterance: &str) -> TurnReply {
        let mut session = self.store.checkout(session_id);
        let lang = session.language;
        let text = content(lang);
        let field = session.current_field;

        debug!(
            session = %session_id.0,
            %lang,
            field = field.key(),
            confirming = session.awaiting_confirmation,
            utterance,
            "processing turn"
        );

        let reply = if session.awaiting_confirmation {
            let cleaned = utterance.trim().to_lowercase();

            if cleaned.chars().count() < MIN_CONFIRMATION_CHARS {
                // Unintelligible reply: re-ask the confirmation, state unchanged.
                TurnReply {
                    assistant_text: text.errors.empty.to_string(),
                    finished: false,
                    fields: session.values.clone(),
                }
            } else if text.negative.iter().any(|word| cleaned.contains(word)) {
                // Negative detection runs first and wins ties with affirmatives.
                session.awaiting_confirmation = false;
                debug!(session = %session_id.0, field = field.key(), "value rejected, re-asking");
                TurnReply {
                    assistant_text: text.retry(field),
                    finished: false,
                    fields: session.values.clone(),
                }
            } else {
                // Anything without a clear negative counts as acceptance,
                // including gibberish. Deliberate leniency carried over from
                // the original dialogue; see DESIGN.md before tightening.
                session.awaiting_confirmation = false;
                match field.next() {
                    Some(next_field) => {
                        session.current_field = next_field;
                        debug!(session = %session_id.0, field = next_field.key(), "advancing");
                        TurnReply {
                            assistant_text: text.advance(next_field),
                            finished: false,
                            fields: session.values.clone(),
                        }
                    }
                    None => {
                        let name = session.values.get(Field::Name).unwrap_or("there");
                        let number = session.values.get(Field::Number).unwrap_or("");
                        let assistant_text = text.completion(name, number);
                        debug!(session = %session_id.0, "dialogue finished");
                        // Terminal state: the session is not checked back in.
                        return TurnReply {
                            assistant_text,
                            finished: true,
                            fields: session.values,
                        };
                    }
                }
            }
        } else {
            self.collect_value(&mut session, utterance)
        };

        self.store.checkin(session_id, session);
        reply
    }

    /// Validate and normalize the utterance for the current field. On
    /// success the tentative value is stored and the turn moves into
    /// confirmation mode; on failure the same field is re-asked.
    fn collect_value(&self, session: &mut Session, utterance: &str) -> TurnReply {
        let text = content(session.language);
        let field = session.current_field;

        let display = match field {
            Field::Number => {
                let digits = digits_of(utterance);
                if digits.len() < MIN_PHONE_DIGITS {
                    return TurnReply {
                        assistant_text: text.errors.number.to_string(),
                        finished: false,
                        fields: session.values.clone(),
                    };
                }
                let display = grouped_number(&digits);
                session.values.set(field, digits);
                display
            }
            Field::Age => {
                let digits = digits_of(utterance);
                match digits.parse::<u32>() {
                    Ok(age) if (MIN_AGE..MAX_AGE_EXCLUSIVE).contains(&age) => {
                        session.values.set(field, digits.clone());
                        digits
                    }
                    _ => {
                        return TurnReply {
                            assistant_text: text.errors.age.to_string(),
                            finished: false,
                            fields: session.values.clone(),
                        };
                    }
                }
            }
            Field::Pay => {
                let digits = digits_of(utterance);
                if digits.is_empty() {
                    return TurnReply {
                        assistant_text: text.errors.pay.to_string(),
                        finished: false,
                        fields: session.values.clone(),
                    };
                }
                session.values.set(field, digits.clone());
                digits
            }
            Field::Name | Field::Address => {
                let trimmed = utterance.trim().to_string();
                session.values.set(field, trimmed.clone());
                trimmed
            }
        };

        session.awaiting_confirmation = true;
        TurnReply {
            assistant_text: text.confirmation(field, &display),
            finished: false,
            fields: session.values.clone(),
        }
    }
}

fn digits_of(text: &str) -> String {
    text.chars().filter(|ch| ch.is_ascii_digit()).collect()
}

/// Display form for phone confirmations: the first ten digits in groups
/// of three, three, and four ("123 456 7890"). The stored value keeps
/// every digit.
fn grouped_number(digits: &str) -> String {
    format!("{} {} {}", &digits[..3], &digits[3..6], &digits[6..10])
}

use metrics_exporter_prometheus::PrometheusHandle;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use tracing::{debug, warn};

use mason_ivr::applicants::{
    ApplicantId, ApplicantRecord, ApplicantRepository, ContactStatus, RepositoryError,
    StoredApplicant,
};
use mason_ivr::dialogue::{
    AudioHandle, Language, SynthesisError, Synthesizer, TranscribeError, Transcriber,
};
use mason_ivr::employers::{
    EmployerAccount, EmployerId, EmployerRepository, EmployerRepositoryError,
};

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Stand-in for a real speech-to-text backend. Returns a placeholder
/// transcription so the dialogue keeps its recovery behavior instead of
/// failing the request; the confirmation path treats the placeholder as
/// any other reply.
#[derive(Default, Clone)]
pub(crate) struct UnconfiguredTranscriber;

impl Transcriber for UnconfiguredTranscriber {
    fn transcribe(&self, _audio: &[u8], language: Language) -> Result<String, TranscribeError> {
        warn!(%language, "no speech-to-text backend configured, returning placeholder text");
        Ok("[transcription unavailable - configure a speech-to-text backend]".to_string())
    }
}

/// In-memory synthesizer: issues sequential handles and keeps the
/// rendering (the utf-8 text itself) so `/audio/{handle}` stays
/// servable without a TTS backend.
#[derive(Default)]
pub(crate) struct InMemorySynthesizer {
    sequence: AtomicU64,
    renderings: Mutex<HashMap<String, Vec<u8>>>,
}

impl Synthesizer for InMemorySynthesizer {
    fn synthesize(&self, text: &str, language: Language) -> Result<AudioHandle, SynthesisError> {
        let id = self.sequence.fetch_add(1, Ordering::Relaxed);
        let handle = format!("tts-{id:06}-{}.mp3", language.tts_code());
        debug!(%language, handle, "rendered assistant audio");
        self.renderings
            .lock()
            .expect("synthesizer mutex poisoned")
            .insert(handle.clone(), text.as_bytes().to_vec());
        Ok(AudioHandle(handle))
    }

    fn fetch(&self, handle: &AudioHandle) -> Result<Option<Vec<u8>>, SynthesisError> {
        let renderings = self
            .renderings
            .lock()
            .expect("synthesizer mutex poisoned");
        Ok(renderings.get(&handle.0).cloned())
    }
}

#[derive(Default)]
pub(crate) struct InMemoryApplicantRepository {
    sequence: AtomicU64,
    rows: Mutex<Vec<StoredApplicant>>,
}

impl ApplicantRepository for InMemoryApplicantRepository {
    fn insert(&self, record: ApplicantRecord) -> Result<StoredApplicant, RepositoryError> {
        let id = ApplicantId(self.sequence.fetch_add(1, Ordering::Relaxed) + 1);
        let stored = StoredApplicant { id, record };
        self.rows
            .lock()
            .expect("applicant mutex poisoned")
            .push(stored.clone());
        Ok(stored)
    }

    fn list(&self) -> Result<Vec<StoredApplicant>, RepositoryError> {
        Ok(self.rows.lock().expect("applicant mutex poisoned").clone())
    }

    fn update_contact_status(
        &self,
        id: ApplicantId,
        status: ContactStatus,
    ) -> Result<StoredApplicant, RepositoryError> {
        let mut rows = self.rows.lock().expect("applicant mutex poisoned");
        let row = rows
            .iter_mut()
            .find(|row| row.id == id)
            .ok_or(RepositoryError::NotFound)?;
        row.record.contact_status = status;
        Ok(row.clone())
    }
}

#[derive(Default)]
pub(crate) struct InMemoryEmployerRepository {
    accounts: Mutex<Vec<EmployerAccount>>,
}

impl EmployerRepository for InMemoryEmployerRepository {
    fn insert(&self, account: EmployerAccount) -> Result<(), EmployerRepositoryError> {
        let mut accounts = self.accounts.lock().expect("employer mutex poisoned");
        if accounts
            .iter()
            .any(|existing| existing.email == account.email)
        {
            return Err(EmployerRepositoryError::Conflict);
        }
        accounts.push(account);
        Ok(())
    }

    fn by_email(&self, email: &str) -> Result<Option<EmployerAccount>, EmployerRepositoryError> {
        let accounts = self.accounts.lock().expect("employer mutex poisoned");
        Ok(accounts
            .iter()
            .find(|account| account.email == email)
            .cloned())
    }

    fn by_id(&self, id: &EmployerId) -> Result<Option<EmployerAccount>, EmployerRepositoryError> {
        let accounts = self.accounts.lock().expect("employer mutex poisoned");
        Ok(accounts
            .iter()
            .find(|account| &account.emp_id == id)
            .cloned())
    }
}

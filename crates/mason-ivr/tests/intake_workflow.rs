//! End-to-end coverage for the voice intake flow, driven through
//! the public engine facade and HTTP routers with in-memory
//! collaborators standing in for speech, storage, and employer accounts.

mod common {
    use std::collections::{HashMap, VecDeque};
    use std::sync::atomic::{AtomicU64, Ordering};
    use std::sync::{Arc, Mutex};

    use mason_ivr::applicants::{
        ApplicantId, ApplicantRecord, ApplicantRepository, ContactStatus, RepositoryError,
        StoredApplicant,
    };
    use mason_ivr::config::SessionConfig;
    use mason_ivr::dialogue::{
        ivr_router, AudioHandle, DialogueEngine, IvrState, Language, SynthesisError, Synthesizer,
        TranscribeError, Transcriber,
    };
    use mason_ivr::employers::{
        EmployerAccount, EmployerId, EmployerRepository, EmployerRepositoryError,
    };

    /// Replays a scripted sequence of transcriptions, one per turn.
    #[derive(Default)]
    pub(super) struct ScriptedTranscriber {
        lines: Mutex<VecDeque<String>>,
    }

    impl ScriptedTranscriber {
        pub(super) fn with_script(lines: &[&str]) -> Self {
            Self {
                lines: Mutex::new(lines.iter().map(|line| line.to_string()).collect()),
            }
        }
    }

    impl Transcriber for ScriptedTranscriber {
        fn transcribe(&self, _audio: &[u8], _language: Language) -> Result<String, TranscribeError> {
            let mut lines = self.lines.lock().expect("lock");
            Ok(lines.pop_front().unwrap_or_default())
        }
    }

    /// Stores each rendering under a sequential handle so tests can
    /// fetch it back through the audio route.
    #[derive(Default)]
    pub(super) struct MemorySynthesizer {
        sequence: AtomicU64,
        renderings: Mutex<HashMap<String, Vec<u8>>>,
    }

    impl Synthesizer for MemorySynthesizer {
        fn synthesize(&self, text: &str, language: Language) -> Result<AudioHandle, SynthesisError> {
            let id = self.sequence.fetch_add(1, Ordering::Relaxed);
            let handle = format!("tts-{id:06}-{}.mp3", language.tts_code());
            self.renderings
                .lock()
                .expect("lock")
                .insert(handle.clone(), text.as_bytes().to_vec());
            Ok(AudioHandle(handle))
        }

        fn fetch(&self, handle: &AudioHandle) -> Result<Option<Vec<u8>>, SynthesisError> {
            Ok(self.renderings.lock().expect("lock").get(&handle.0).cloned())
        }
    }

    #[derive(Default)]
    pub(super) struct MemoryApplicants {
        sequence: AtomicU64,
        rows: Mutex<Vec<StoredApplicant>>,
    }

    impl MemoryApplicants {
        pub(super) fn rows(&self) -> Vec<StoredApplicant> {
            self.rows.lock().expect("lock").clone()
        }
    }

    impl ApplicantRepository for MemoryApplicants {
        fn insert(&self, record: ApplicantRecord) -> Result<StoredApplicant, RepositoryError> {
            let id = ApplicantId(self.sequence.fetch_add(1, Ordering::Relaxed) + 1);
            let stored = StoredApplicant { id, record };
            self.rows.lock().expect("lock").push(stored.clone());
            Ok(stored)
        }

        fn list(&self) -> Result<Vec<StoredApplicant>, RepositoryError> {
            Ok(self.rows())
        }

        fn update_contact_status(
            &self,
            id: ApplicantId,
            status: ContactStatus,
        ) -> Result<StoredApplicant, RepositoryError> {
            let mut rows = self.rows.lock().expect("lock");
            let row = rows
                .iter_mut()
                .find(|row| row.id == id)
                .ok_or(RepositoryError::NotFound)?;
            row.record.contact_status = status;
            Ok(row.clone())
        }
    }

    #[derive(Default)]
    pub(super) struct MemoryEmployers {
        accounts: Mutex<Vec<EmployerAccount>>,
    }

    impl EmployerRepository for MemoryEmployers {
        fn insert(&self, account: EmployerAccount) -> Result<(), EmployerRepositoryError> {
            let mut accounts = self.accounts.lock().expect("lock");
            if accounts.iter().any(|existing| existing.email == account.email) {
                return Err(EmployerRepositoryError::Conflict);
            }
            accounts.push(account);
            Ok(())
        }

        fn by_email(
            &self,
            email: &str,
        ) -> Result<Option<EmployerAccount>, EmployerRepositoryError> {
            let accounts = self.accounts.lock().expect("lock");
            Ok(accounts
                .iter()
                .find(|account| account.email == email)
                .cloned())
        }

        fn by_id(
            &self,
            id: &EmployerId,
        ) -> Result<Option<EmployerAccount>, EmployerRepositoryError> {
            let accounts = self.accounts.lock().expect("lock");
            Ok(accounts.iter().find(|account| &account.emp_id == id).cloned())
        }
    }

    pub(super) fn build_ivr_router(
        script: &[&str],
    ) -> (
        axum::Router,
        Arc<MemoryApplicants>,
        Arc<MemorySynthesizer>,
    ) {
        let engine = Arc::new(DialogueEngine::new(SessionConfig::default()));
        let transcriber = Arc::new(ScriptedTranscriber::with_script(script));
        let synthesizer = Arc::new(MemorySynthesizer::default());
        let records = Arc::new(MemoryApplicants::default());
        let router = ivr_router(Arc::new(IvrState {
            engine,
            transcriber,
            synthesizer: synthesizer.clone(),
            records: records.clone(),
        }));
        (router, records, synthesizer)
    }
}

mod intake {
    use super::common::*;
    use axum::body::{to_bytes, Body};
    use axum::http::{Request, StatusCode};
    use base64::engine::general_purpose::STANDARD as BASE64;
    use base64::Engine;
    use mason_ivr::dialogue::Synthesizer;
    use serde_json::{json, Value};
    use tower::ServiceExt;

    fn json_request(uri: &str, payload: Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(payload.to_string()))
            .expect("request")
    }

    fn turn_request(session_id: &str) -> Request<Body> {
        json_request(
            "/api/v1/ivr",
            json!({
                "session_id": session_id,
                "audio_base64": BASE64.encode(b"opus-frame"),
            }),
        )
    }

    async fn read_json(response: axum::response::Response) -> Value {
        let body = to_bytes(response.into_body(), 1024 * 1024)
            .await
            .expect("body");
        serde_json::from_slice(&body).expect("json")
    }

    #[tokio::test]
    async fn start_returns_first_question_with_audio_reference() {
        let (router, _, synthesizer) = build_ivr_router(&[]);
        let response = router
            .oneshot(json_request(
                "/api/v1/ivr/start",
                json!({ "session_id": "call-1", "language": "en" }),
            ))
            .await
            .expect("dispatch");

        assert_eq!(response.status(), StatusCode::OK);
        let payload = read_json(response).await;
        assert_eq!(payload["finished"], json!(false));
        assert!(payload["assistant_text"]
            .as_str()
            .expect("text")
            .contains("full name"));
        assert_eq!(payload["fields"]["name"], Value::Null);

        let audio_url = payload["audio_url"].as_str().expect("audio url");
        let handle = audio_url.strip_prefix("/audio/").expect("handle");
        let rendering = synthesizer
            .fetch(&mason_ivr::dialogue::AudioHandle(handle.to_string()))
            .expect("fetch");
        assert!(rendering.is_some());
    }

    #[tokio::test]
    async fn rejects_unknown_language_codes() {
        let (router, _, _) = build_ivr_router(&[]);
        let response = router
            .oneshot(json_request(
                "/api/v1/ivr/start",
                json!({ "session_id": "call-1", "language": "fr" }),
            ))
            .await
            .expect("dispatch");
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[tokio::test]
    async fn rejects_malformed_audio_payloads() {
        let (router, _, _) = build_ivr_router(&[]);
        let response = router
            .oneshot(json_request(
                "/api/v1/ivr",
                json!({ "session_id": "call-1", "audio_base64": "%%%not-base64%%%" }),
            ))
            .await
            .expect("dispatch");
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn full_conversation_persists_a_pending_applicant_record() {
        let script = [
            "John Smith",
            "correct",
            "25",
            "correct",
            "555-123-4567",
            "correct",
            "1 Main St",
            "correct",
            "50000",
            "correct",
        ];
        let (router, records, _) = build_ivr_router(&script);

        let response = router
            .clone()
            .oneshot(json_request(
                "/api/v1/ivr/start",
                json!({ "session_id": "call-42", "language": "en" }),
            ))
            .await
            .expect("dispatch");
        assert_eq!(response.status(), StatusCode::OK);

        let mut finished = false;
        let mut last = Value::Null;
        for _ in 0..script.len() {
            let response = router
                .clone()
                .oneshot(turn_request("call-42"))
                .await
                .expect("dispatch");
            assert_eq!(response.status(), StatusCode::OK);
            last = read_json(response).await;
            if last["finished"] == json!(true) {
                finished = true;
                break;
            }
        }

        assert!(finished, "conversation should finish: {last}");
        assert_eq!(last["fields"]["name"], json!("John Smith"));
        assert_eq!(last["fields"]["age"], json!("25"));
        assert_eq!(last["fields"]["number"], json!("5551234567"));
        assert_eq!(last["fields"]["address"], json!("1 Main St"));
        assert_eq!(last["fields"]["pay"], json!("50000"));

        let rows = records.rows();
        assert_eq!(rows.len(), 1);
        let record = &rows[0].record;
        assert_eq!(record.contact_status.label(), "Pending");
        assert_eq!(
            record.transcription,
            "John Smith,5551234567,1 Main St,50000,25"
        );
    }

    #[tokio::test]
    async fn reset_clears_the_session_without_error() {
        let (router, _, _) = build_ivr_router(&["John Smith"]);
        router
            .clone()
            .oneshot(json_request(
                "/api/v1/ivr/start",
                json!({ "session_id": "call-9" }),
            ))
            .await
            .expect("dispatch");

        let response = router
            .clone()
            .oneshot(json_request(
                "/api/v1/ivr/reset",
                json!({ "session_id": "call-9" }),
            ))
            .await
            .expect("dispatch");
        assert_eq!(response.status(), StatusCode::OK);

        // Resetting again (now nonexistent) stays a no-op.
        let response = router
            .oneshot(json_request(
                "/api/v1/ivr/reset",
                json!({ "session_id": "call-9" }),
            ))
            .await
            .expect("dispatch");
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn unknown_audio_handles_are_not_found() {
        let (router, _, _) = build_ivr_router(&[]);
        let response = router
            .oneshot(
                Request::builder()
                    .method("GET")
                    .uri("/audio/tts-999999-en.mp3")
                    .body(Body::empty())
                    .expect("request"),
            )
            .await
            .expect("dispatch");
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}

mod applicants {
    use super::common::*;
    use axum::body::{to_bytes, Body};
    use axum::http::{Request, StatusCode};
    use mason_ivr::applicants::{applicant_router, ApplicantRecord, ApplicantRepository};
    use mason_ivr::dialogue::FieldSnapshot;
    use serde_json::{json, Value};
    use std::sync::Arc;
    use tower::ServiceExt;

    fn snapshot() -> FieldSnapshot {
        FieldSnapshot {
            name: Some("John Smith".to_string()),
            age: Some("25".to_string()),
            number: Some("5551234567".to_string()),
            address: Some("1 Main St".to_string()),
            pay: Some("50000".to_string()),
        }
    }

    #[tokio::test]
    async fn listing_and_status_updates_round_trip() {
        let repository = Arc::new(MemoryApplicants::default());
        repository
            .insert(ApplicantRecord::from_snapshot(&snapshot()))
            .expect("insert");
        let router = applicant_router(repository);

        let response = router
            .clone()
            .oneshot(
                Request::builder()
                    .method("GET")
                    .uri("/api/v1/applicants")
                    .body(Body::empty())
                    .expect("request"),
            )
            .await
            .expect("dispatch");
        assert_eq!(response.status(), StatusCode::OK);
        let body = to_bytes(response.into_body(), 1024 * 1024)
            .await
            .expect("body");
        let payload: Value = serde_json::from_slice(&body).expect("json");
        let rows = payload["applicants"].as_array().expect("rows");
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0]["contact_status"], json!("Pending"));

        let response = router
            .clone()
            .oneshot(
                Request::builder()
                    .method("PUT")
                    .uri("/api/v1/applicants/1/status")
                    .header("content-type", "application/json")
                    .body(Body::from(
                        json!({ "contact_status": "Contacted" }).to_string(),
                    ))
                    .expect("request"),
            )
            .await
            .expect("dispatch");
        assert_eq!(response.status(), StatusCode::OK);

        let response = router
            .oneshot(
                Request::builder()
                    .method("PUT")
                    .uri("/api/v1/applicants/404/status")
                    .header("content-type", "application/json")
                    .body(Body::from(
                        json!({ "contact_status": "Contacted" }).to_string(),
                    ))
                    .expect("request"),
            )
            .await
            .expect("dispatch");
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}

mod employers {
    use super::common::*;
    use axum::body::{to_bytes, Body};
    use axum::http::{Request, StatusCode};
    use mason_ivr::employers::{employer_router, EmployerDirectory, EmployerError};
    use serde_json::{json, Value};
    use std::sync::Arc;
    use tower::ServiceExt;

    fn directory() -> EmployerDirectory<MemoryEmployers> {
        EmployerDirectory::new(Arc::new(MemoryEmployers::default()))
    }

    fn signup_payload() -> mason_ivr::employers::SignupRequest {
        serde_json::from_value(json!({
            "email": "owner@example.com",
            "password": "hunter2hunter2",
            "name": "Asha Builders",
            "location": "Chennai",
            "expected_wage": 18000.0,
        }))
        .expect("payload")
    }

    #[test]
    fn login_succeeds_only_with_the_original_password() {
        let directory = directory();
        directory.signup(signup_payload()).expect("signup");

        let view = directory
            .login("owner@example.com", "hunter2hunter2")
            .expect("login");
        assert_eq!(view.name, "Asha Builders");

        assert!(matches!(
            directory.login("owner@example.com", "wrong"),
            Err(EmployerError::InvalidCredentials)
        ));
        assert!(matches!(
            directory.login("nobody@example.com", "hunter2hunter2"),
            Err(EmployerError::InvalidCredentials)
        ));
    }

    #[test]
    fn duplicate_emails_are_rejected() {
        let directory = directory();
        directory.signup(signup_payload()).expect("first signup");
        assert!(directory.signup(signup_payload()).is_err());
    }

    #[tokio::test]
    async fn signup_login_and_profile_over_http() {
        let directory = Arc::new(directory());
        let router = employer_router(directory);

        let response = router
            .clone()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/api/v1/employers/signup")
                    .header("content-type", "application/json")
                    .body(Body::from(
                        json!({
                            "email": "owner@example.com",
                            "password": "hunter2hunter2",
                            "name": "Asha Builders",
                            "location": "Chennai",
                            "expected_wage": 18000.0,
                        })
                        .to_string(),
                    ))
                    .expect("request"),
            )
            .await
            .expect("dispatch");
        assert_eq!(response.status(), StatusCode::CREATED);
        let body = to_bytes(response.into_body(), 1024 * 1024)
            .await
            .expect("body");
        let payload: Value = serde_json::from_slice(&body).expect("json");
        let emp_id = payload["emp_id"].as_str().expect("emp id").to_string();

        let response = router
            .clone()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/api/v1/employers/login")
                    .header("content-type", "application/json")
                    .body(Body::from(
                        json!({ "email": "owner@example.com", "password": "hunter2hunter2" })
                            .to_string(),
                    ))
                    .expect("request"),
            )
            .await
            .expect("dispatch");
        assert_eq!(response.status(), StatusCode::OK);

        let response = router
            .oneshot(
                Request::builder()
                    .method("GET")
                    .uri(format!("/api/v1/employers/{emp_id}"))
                    .body(Body::empty())
                    .expect("request"),
            )
            .await
            .expect("dispatch");
        assert_eq!(response.status(), StatusCode::OK);
        let body = to_bytes(response.into_body(), 1024 * 1024)
            .await
            .expect("body");
        let payload: Value = serde_json::from_slice(&body).expect("json");
        assert_eq!(payload["email"], json!("owner@example.com"));
        assert_eq!(payload["name"], json!("Asha Builders"));
    }
}

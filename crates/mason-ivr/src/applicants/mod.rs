//! Completed-applicant records: what the transport persists once a
//! dialogue finishes, plus the employer-facing listing and contact
//! status updates. Storage itself is a collaborator behind
//! [`ApplicantRepository`].

pub mod record;
pub mod repository;
pub mod router;

pub use record::{ApplicantId, ApplicantRecord, ContactStatus};
pub use repository::{ApplicantRepository, RepositoryError, StoredApplicant};
pub use router::applicant_router;

use serde::{Deserialize, Serialize};

use super::record::{ApplicantId, ApplicantRecord, ContactStatus};

/// Repository row: the record plus its storage-assigned identifier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredApplicant {
    pub id: ApplicantId,
    #[serde(flatten)]
    pub record: ApplicantRecord,
}

/// Storage abstraction so the dialogue transport and the employer
/// listing can be exercised without a real database.
pub trait ApplicantRepository: Send + Sync {
    fn insert(&self, record: ApplicantRecord) -> Result<StoredApplicant, RepositoryError>;
    fn list(&self) -> Result<Vec<StoredApplicant>, RepositoryError>;
    fn update_contact_status(
        &self,
        id: ApplicantId,
        status: ContactStatus,
    ) -> Result<StoredApplicant, RepositoryError>;
}

#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("record not found")]
    NotFound,
    #[error("repository unavailable: {0}")]
    Unavailable(String),
}

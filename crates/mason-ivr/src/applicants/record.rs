use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::dialogue::FieldSnapshot;

/// Identifier assigned by the repository when a record is stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ApplicantId(pub u64);

/// Outreach progress for a collected applicant. New records always start
/// as `Pending`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ContactStatus {
    #[default]
    Pending,
    Contacted,
    Hired,
    Rejected,
}

impl ContactStatus {
    pub fn label(self) -> &'static str {
        match self {
            ContactStatus::Pending => "Pending",
            ContactStatus::Contacted => "Contacted",
            ContactStatus::Hired => "Hired",
            ContactStatus::Rejected => "Rejected",
        }
    }
}

/// One finished intake dialogue, flattened for persistence. The
/// `transcription` column keeps the legacy flat form: trimmed field
/// values joined by commas in the order name, number, address, pay, age.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApplicantRecord {
    pub name: Option<String>,
    pub number: Option<String>,
    pub address: Option<String>,
    pub pay: Option<String>,
    pub age: Option<String>,
    pub contact_status: ContactStatus,
    pub transcription: String,
    pub received_at: DateTime<Utc>,
}

impl ApplicantRecord {
    /// Build a record from the field map of a finished session.
    pub fn from_snapshot(fields: &FieldSnapshot) -> Self {
        let trimmed = |value: &Option<String>| -> String {
            value.as_deref().unwrap_or_default().trim().to_string()
        };
        let transcription = [
            trimmed(&fields.name),
            trimmed(&fields.number),
            trimmed(&fields.address),
            trimmed(&fields.pay),
            trimmed(&fields.age),
        ]
        .join(",");

        Self {
            name: fields.name.clone(),
            number: fields.number.clone(),
            address: fields.address.clone(),
            pay: fields.pay.clone(),
            age: fields.age.clone(),
            contact_status: ContactStatus::Pending,
            transcription,
            received_at: Utc::now(),
        }
    }
}

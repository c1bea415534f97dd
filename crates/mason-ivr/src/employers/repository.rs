use super::domain::{EmployerAccount, EmployerId};

/// Storage abstraction for employer accounts.
pub trait EmployerRepository: Send + Sync {
    /// Insert a new account; email addresses are unique.
    fn insert(&self, account: EmployerAccount) -> Result<(), EmployerRepositoryError>;
    fn by_email(&self, email: &str) -> Result<Option<EmployerAccount>, EmployerRepositoryError>;
    fn by_id(&self, id: &EmployerId) -> Result<Option<EmployerAccount>, EmployerRepositoryError>;
}

#[derive(Debug, thiserror::Error)]
pub enum EmployerRepositoryError {
    #[error("an account with this email already exists")]
    Conflict,
    #[error("repository unavailable: {0}")]
    Unavailable(String),
}

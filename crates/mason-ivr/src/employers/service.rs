use std::sync::Arc;

use serde::Serialize;
use tracing::info;

use super::domain::{EmployerAccount, EmployerId, EmployerProfile, PasswordDigest, SignupRequest};
use super::repository::{EmployerRepository, EmployerRepositoryError};

/// Service over the employer repository: signup, login, and profile
/// lookup for the hiring dashboard.
pub struct EmployerDirectory<R> {
    repository: Arc<R>,
}

/// Sanitized account view returned to the dashboard.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EmployerView {
    pub emp_id: EmployerId,
    pub name: String,
    pub email: String,
}

impl<R> EmployerDirectory<R>
where
    R: EmployerRepository + 'static,
{
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }

    pub fn signup(&self, request: SignupRequest) -> Result<EmployerId, EmployerError> {
        if self.repository.by_email(&request.email)?.is_some() {
            return Err(EmployerRepositoryError::Conflict.into());
        }

        let emp_id = EmployerId::generate();
        let account = EmployerAccount {
            emp_id: emp_id.clone(),
            email: request.email,
            password: PasswordDigest::new(&request.password),
            profile: EmployerProfile {
                name: request.name,
                location: request.location,
                expected_wage: request.expected_wage,
            },
        };

        self.repository.insert(account)?;
        info!(emp_id = %emp_id.0, "employer account created");
        Ok(emp_id)
    }

    /// Verify credentials; the caller cannot distinguish an unknown email
    /// from a wrong password.
    pub fn login(&self, email: &str, password: &str) -> Result<EmployerView, EmployerError> {
        let account = self
            .repository
            .by_email(email)?
            .ok_or(EmployerError::InvalidCredentials)?;

        if !account.password.verify(password) {
            return Err(EmployerError::InvalidCredentials);
        }

        Ok(view_of(&account))
    }

    pub fn profile(&self, emp_id: &EmployerId) -> Result<EmployerView, EmployerError> {
        let account = self
            .repository
            .by_id(emp_id)?
            .ok_or(EmployerError::NotFound)?;
        Ok(view_of(&account))
    }
}

fn view_of(account: &EmployerAccount) -> EmployerView {
    EmployerView {
        emp_id: account.emp_id.clone(),
        name: account.profile.name.clone(),
        email: account.email.clone(),
    }
}

#[derive(Debug, thiserror::Error)]
pub enum EmployerError {
    #[error("invalid credentials")]
    InvalidCredentials,
    #[error("employer not found")]
    NotFound,
    #[error(transparent)]
    Repository(#[from] EmployerRepositoryError),
}

//! Employer accounts for the hiring dashboard: signup, login, and
//! profile lookup. An I/O-edge collaborator of the dialogue core;
//! storage sits behind [`EmployerRepository`].

pub mod domain;
pub mod repository;
pub mod router;
pub mod service;

pub use domain::{EmployerAccount, EmployerId, EmployerProfile, PasswordDigest, SignupRequest};
pub use repository::{EmployerRepository, EmployerRepositoryError};
pub use router::employer_router;
pub use service::{EmployerDirectory, EmployerError, EmployerView};

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use subtle::ConstantTimeEq;
use uuid::Uuid;

/// Identifier for an employer account (uuid v4 on signup).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EmployerId(pub String);

impl EmployerId {
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }
}

/// Public profile attached to an employer account.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmployerProfile {
    pub name: String,
    pub location: String,
    pub expected_wage: f64,
}

/// Signup payload accepted at the transport edge.
#[derive(Debug, Clone, Deserialize)]
pub struct SignupRequest {
    pub email: String,
    pub password: String,
    pub name: String,
    pub location: String,
    pub expected_wage: f64,
}

/// Stored account: credentials plus profile. Passwords are never kept in
/// clear text.
#[derive(Debug, Clone)]
pub struct EmployerAccount {
    pub emp_id: EmployerId,
    pub email: String,
    pub password: PasswordDigest,
    pub profile: EmployerProfile,
}

/// Salted SHA-256 digest of an account password, verified in constant
/// time.
#[derive(Debug, Clone)]
pub struct PasswordDigest {
    salt: String,
    digest: [u8; 32],
}

impl PasswordDigest {
    pub fn new(password: &str) -> Self {
        let salt = Uuid::new_v4().to_string();
        let digest = Self::digest_with(&salt, password);
        Self { salt, digest }
    }

    pub fn verify(&self, password: &str) -> bool {
        let candidate = Self::digest_with(&self.salt, password);
        candidate.ct_eq(&self.digest).into()
    }

    fn digest_with(salt: &str, password: &str) -> [u8; 32] {
        let mut hasher = Sha256::new();
        hasher.update(salt.as_bytes());
        hasher.update(password.as_bytes());
        hasher.finalize().into()
    }
}

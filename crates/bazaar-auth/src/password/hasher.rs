//! Argon2id password hashing and verification.

use argon2::{
    Algorithm, Argon2, Params, Version,
    password_hash::{
        self, PasswordHash, PasswordHasher as ArgonHasher, PasswordVerifier, SaltString,
        rand_core::OsRng,
    },
};

use bazaar_core::config::auth::AuthConfig;
use bazaar_core::error::{AppError, ErrorKind};

/// One-way password hashing with Argon2id.
///
/// Every hash embeds its own random salt and cost parameters in PHC
/// format, so verification works regardless of the parameters this
/// instance was built with.
#[derive(Debug, Clone)]
pub struct PasswordHasher {
    params: Params,
}

impl PasswordHasher {
    /// Creates a hasher with the cost parameters from configuration.
    pub fn new(config: &AuthConfig) -> Result<Self, AppError> {
        let params = Params::new(
            config.argon2_memory_kib,
            config.argon2_iterations,
            config.argon2_parallelism,
            None,
        )
        .map_err(|e| {
            AppError::with_source(
                ErrorKind::Configuration,
                format!("Invalid Argon2 parameters: {e}"),
                e,
            )
        })?;
        Ok(Self { params })
    }

    fn argon2(&self) -> Argon2<'static> {
        Argon2::new(Algorithm::Argon2id, Version::V0x13, self.params.clone())
    }

    /// Hashes a plaintext password with a fresh random salt.
    pub fn hash(&self, password: &str) -> Result<String, AppError> {
        if password.is_empty() {
            return Err(AppError::invalid_input("password must not be empty"));
        }

        let salt = SaltString::generate(&mut OsRng);
        let hash = self
            .argon2()
            .hash_password(password.as_bytes(), &salt)
            .map_err(|e| AppError::internal(format!("Password hashing failed: {e}")))?;

        Ok(hash.to_string())
    }

    /// Verifies a plaintext password against a stored hash.
    ///
    /// Fails with `CredentialMismatch` when the password is wrong and
    /// `CredentialMalformed` when `hash` is not a PHC string.
    pub fn verify(&self, hash: &str, password: &str) -> Result<(), AppError> {
        let parsed = PasswordHash::new(hash).map_err(|e| {
            AppError::new(
                ErrorKind::CredentialMalformed,
                format!("Unrecognized password hash format: {e}"),
            )
        })?;

        match self.argon2().verify_password(password.as_bytes(), &parsed) {
            Ok(()) => Ok(()),
            Err(password_hash::Error::Password) => Err(AppError::new(
                ErrorKind::CredentialMismatch,
                "password does not match",
            )),
            Err(e) => Err(AppError::internal(format!(
                "Password verification failed: {e}"
            ))),
        }
    }
}

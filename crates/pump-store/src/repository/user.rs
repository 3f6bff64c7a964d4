//! # User Repository
//!
//! Cashier credentials, one `username,sha256hex(password)` line per user.
//!
//! The digest is unsalted SHA-256 in lower-case hex, the format existing
//! credential files already use.

use sha2::{Digest, Sha256};
use std::fs::{self, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::PathBuf;
use tracing::{debug, info, warn};

use crate::error::{StoreError, StoreResult};
use pump_core::validation::validate_username;

const SEPARATOR: char = ',';

/// One credential line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credential {
    pub username: String,
    pub password_hash: String,
}

/// Repository for the credential file.
#[derive(Debug, Clone)]
pub struct UserRepository {
    path: PathBuf,
}

impl UserRepository {
    /// Creates a new UserRepository over the given file.
    pub fn new(path: PathBuf) -> Self {
        UserRepository { path }
    }

    /// Returns the file path.
    pub fn path(&self) -> &PathBuf {
        &self.path
    }

    /// Checks if the credential file exists.
    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    /// Loads every readable credential.
    ///
    /// ## Errors
    /// * `CredentialsMissing` - the file does not exist
    pub fn load(&self) -> StoreResult<Vec<Credential>> {
        let contents = match fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                return Err(StoreError::CredentialsMissing {
                    path: self.path.clone(),
                })
            }
            Err(e) => return Err(StoreError::io(&self.path, e)),
        };

        let mut credentials = Vec::new();
        for (index, line) in contents.lines().enumerate() {
            if line.trim().is_empty() {
                continue;
            }
            match line.split_once(SEPARATOR) {
                Some((username, hash)) => credentials.push(Credential {
                    username: username.trim().to_string(),
                    password_hash: hash.trim().to_lowercase(),
                }),
                None => warn!(line = index + 1, "Skipping malformed credential line"),
            }
        }

        debug!(count = credentials.len(), "Credentials loaded");
        Ok(credentials)
    }

    /// Checks a username/password pair.
    pub fn verify(&self, username: &str, password: &str) -> StoreResult<bool> {
        let username = username.trim();
        let digest = hash_password(password);

        let valid = self
            .load()?
            .iter()
            .any(|c| c.username == username && c.password_hash == digest);

        if valid {
            info!(username = %username, "Login succeeded");
        } else {
            warn!(username = %username, "Login failed");
        }
        Ok(valid)
    }

    /// Appends a user.
    pub fn add(&self, username: &str, password: &str) -> StoreResult<()> {
        validate_username(username)?;

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(|e| StoreError::io(&self.path, e))?;
        writeln!(
            file,
            "{}{}{}",
            username.trim(),
            SEPARATOR,
            hash_password(password)
        )
        .map_err(|e| StoreError::io(&self.path, e))?;

        info!(username = %username.trim(), "User added");
        Ok(())
    }
}

/// Unsalted SHA-256 of `password`, lower-case hex.
pub fn hash_password(password: &str) -> String {
    format!("{:x}", Sha256::digest(password.as_bytes()))
}

// =============================================================================
// Unit Tests
// =============================================================================

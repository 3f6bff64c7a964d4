//! # Store Error Types
//!
//! Error types for file operations.
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Propagation                                    │
//! │                                                                         │
//! │  std::io::Error                                                        │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  StoreError (this module) ← Adds the file path and categorization      │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  AppError (terminal app) ← Decides: print and continue, or exit        │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

use pump_core::ValidationError;

/// File store errors.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Reading or writing a file failed.
    ///
    /// ## When This Occurs
    /// - Data directory not writable
    /// - Disk full
    /// - Receipt file already exists (bill number reused)
    #[error("I/O error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// A line the store needs could not be read.
    ///
    /// ## When This Occurs
    /// - The matching card's balance is not a number
    #[error("Corrupt record in {} line {line}: {reason}", .path.display())]
    Corrupt {
        path: PathBuf,
        line: usize,
        reason: String,
    },

    /// Every bill number tried was already in use.
    #[error("No free bill number found after {attempts} attempts")]
    BillNumbersExhausted { attempts: u32 },

    /// A value about to be written is not valid.
    #[error("Invalid record: {0}")]
    Invalid(#[from] ValidationError),

    /// The credential file does not exist.
    #[error("Credential file not found: {}", .path.display())]
    CredentialsMissing { path: PathBuf },
}

impl StoreError {
    /// Wraps an I/O error with the path it happened on.
    pub fn io(path: impl AsRef<Path>, source: io::Error) -> Self {
        StoreError::Io {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }

    /// Creates a Corrupt error.
    pub fn corrupt(path: impl AsRef<Path>, line: usize, reason: impl Into<String>) -> Self {
        StoreError::Corrupt {
            path: path.as_ref().to_path_buf(),
            line,
            reason: reason.into(),
        }
    }
}

/// I/O errors without a known path.
impl From<io::Error> for StoreError {
    fn from(source: io::Error) -> Self {
        StoreError::Io {
            path: PathBuf::new(),
            source,
        }
    }
}

/// Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_io_error_names_path() {
        let err = StoreError::io(
            "/data/card_balances.txt",
            io::Error::new(io::ErrorKind::PermissionDenied, "denied"),
        );
        assert!(err.to_string().contains("/data/card_balances.txt"));
    }

    #[test]
    fn test_corrupt_message() {
        let err = StoreError::corrupt("cards.txt", 3, "balance is not a number");
        assert_eq!(
            err.to_string(),
            "Corrupt record in cards.txt line 3: balance is not a number"
        );
    }
}

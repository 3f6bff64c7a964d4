//! # Terminal Error Type
//!
//! Unified error type for menu actions.
//!
//! ## Error Handling Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow in the Terminal                           │
//! │                                                                         │
//! │  Menu action (purchase, history, ...)                                  │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  ┌──────────────────────────────────────────────────────────────────┐  │
//! │  │  Result<(), AppError>                                            │  │
//! │  │         │                                                        │  │
//! │  │  ValidationError ── "amount must be a number" ──► Input         │  │
//! │  │  CoreError ──────── "Card not found: 4111" ─────► Domain        │  │
//! │  │  StoreError ─────── "I/O error on ..." ─────────► Io            │  │
//! │  │  CredentialsMissing ────────────────────────────► Fatal         │  │
//! │  └──────────────────────────────────────────────────────────────────┘  │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  Session loop: Fatal → exit non-zero                                   │
//! │                anything else → print message, back to menu             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use pump_core::{CoreError, ValidationError};
use pump_store::StoreError;

use crate::config::ConfigError;

/// Error returned from menu actions and startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppError {
    /// Category, decides whether the session continues
    pub code: ErrorCode,

    /// Message shown to the cashier
    pub message: String,
}

/// Error categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    /// Unreadable or out-of-range entry
    Input,

    /// Business rule rejected the sale (funds, rate, minimums)
    Domain,

    /// A data file could not be read or written
    Io,

    /// Bad configuration
    Config,

    /// The program cannot continue
    Fatal,
}

impl ErrorCode {
    /// Process exit status for errors that end the program.
    pub const fn exit_code(&self) -> i32 {
        match self {
            ErrorCode::Config => 78,
            ErrorCode::Io => 74,
            _ => 1,
        }
    }
}

impl AppError {
    /// Creates a new error.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        AppError {
            code,
            message: message.into(),
        }
    }

    /// Creates an input error.
    pub fn input(message: impl Into<String>) -> Self {
        AppError::new(ErrorCode::Input, message)
    }

    /// Creates a domain error.
    pub fn domain(message: impl Into<String>) -> Self {
        AppError::new(ErrorCode::Domain, message)
    }

    /// Creates a fatal error.
    pub fn fatal(message: impl Into<String>) -> Self {
        AppError::new(ErrorCode::Fatal, message)
    }

    /// Checks if the session must end.
    pub fn is_fatal(&self) -> bool {
        self.code == ErrorCode::Fatal
    }
}

/// Converts input validation errors.
impl From<ValidationError> for AppError {
    fn from(err: ValidationError) -> Self {
        AppError::input(err.to_string())
    }
}

/// Converts billing errors.
impl From<CoreError> for AppError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::Validation(e) => e.into(),
            CoreError::RateUnavailable { .. } => {
                AppError::domain("Error: Could not retrieve fuel rate.")
            }
            other => AppError::domain(other.to_string()),
        }
    }
}

/// Converts store errors.
impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::CredentialsMissing { path } => AppError::fatal(format!(
                "Error: user credential file not found at {}",
                path.display()
            )),
            StoreError::Invalid(e) => e.into(),
            exhausted @ StoreError::BillNumbersExhausted { .. } => {
                tracing::error!("{}", exhausted);
                AppError::new(ErrorCode::Io, "Could not allocate a bill number")
            }
            other => {
                tracing::error!("Store operation failed: {}", other);
                AppError::new(ErrorCode::Io, other.to_string())
            }
        }
    }
}

/// Converts configuration errors.
impl From<ConfigError> for AppError {
    fn from(err: ConfigError) -> Self {
        AppError::new(ErrorCode::Config, err.to_string())
    }
}

/// Console read/write failures end the session.
impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::fatal(format!("Console I/O failed: {}", err))
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for AppError {}

/// Result type for terminal operations.
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;
    use pump_core::Money;
    use std::path::PathBuf;

    #[test]
    fn test_core_error_mapping() {
        let err: AppError = CoreError::CardNotFound("4111".to_string()).into();
        assert_eq!(err.code, ErrorCode::Domain);
        assert_eq!(err.message, "Card not found: 4111");

        let err: AppError = CoreError::InsufficientCash {
            tendered: Money::from_cents(100),
            total: Money::from_cents(200),
        }
        .into();
        assert_eq!(err.code, ErrorCode::Domain);

        let err: AppError = CoreError::Validation(ValidationError::Required {
            field: "amount".to_string(),
        })
        .into();
        assert_eq!(err.code, ErrorCode::Input);
    }

    #[test]
    fn test_rate_unavailable_message() {
        let err: AppError = CoreError::RateUnavailable {
            fuel: "Kerosene".to_string(),
        }
        .into();
        assert_eq!(err.message, "Error: Could not retrieve fuel rate.");
    }

    #[test]
    fn test_missing_credentials_is_fatal() {
        let err: AppError = StoreError::CredentialsMissing {
            path: PathBuf::from("users.txt"),
        }
        .into();
        assert!(err.is_fatal());
    }
}

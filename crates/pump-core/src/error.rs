//! # Error Types
//!
//! Domain-specific error types for pump-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  pump-core errors (this file)                                          │
//! │  ├── CoreError        - Business rule violations (DomainError)         │
//! │  └── ValidationError  - Malformed or out-of-range input (InputError)   │
//! │                                                                         │
//! │  pump-store errors (separate crate)                                    │
//! │  └── StoreError       - File operation failures (IOError)              │
//! │                                                                         │
//! │  Terminal errors (in app)                                              │
//! │  └── AppError         - What the cashier sees                          │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → AppError → menu message           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Messages name the fuel, card, or amounts involved; the terminal prints
//! them as-is.

use thiserror::Error;

use crate::money::{Litres, Money};

// =============================================================================
// Core Error
// =============================================================================

/// Core business logic errors.
///
/// Every variant aborts the current purchase and sends the cashier back to
/// the menu. Nothing is written to disk once one of these is raised.
#[derive(Debug, Error)]
pub enum CoreError {
    /// The fuel has no rate (or a zero rate) in the rate table.
    ///
    /// ## When This Occurs
    /// - A menu entry names a fuel missing from `[rates]`
    /// - A rate was configured as zero
    #[error("Could not retrieve fuel rate for {fuel}")]
    RateUnavailable { fuel: String },

    /// Fill-by-amount below the price of one litre.
    ///
    /// ## User Workflow
    /// ```text
    /// Fill by amount: 50.00
    ///      │
    ///      ▼
    /// Rate: 72.50 / litre
    ///      │
    ///      ▼
    /// BelowMinimumAmount { amount: 50.00, minimum: 72.50 }
    ///      │
    ///      ▼
    /// Terminal shows: "Insufficient amount! Minimum purchase is 72.50 (1 litre)"
    /// ```
    #[error("Insufficient amount! Minimum purchase is {minimum} (1 litre), got {amount}")]
    BelowMinimumAmount { amount: Money, minimum: Money },

    /// Fill-by-quantity below one litre.
    #[error("Insufficient quantity! Minimum purchase is 1.000 litre, got {requested}")]
    BelowMinimumQuantity { requested: Litres },

    /// Cash tendered is less than the total due.
    #[error("Payment failed! Cash paid ({tendered}) is less than the total bill ({total})")]
    InsufficientCash { tendered: Money, total: Money },

    /// No balance entry exists for the card.
    #[error("Card not found: {0}")]
    CardNotFound(String),

    /// Card balance is zero or below the total due.
    #[error("Insufficient card balance on {card_number}: balance {balance}, required {required}")]
    InsufficientBalance {
        card_number: String,
        balance: Money,
        required: Money,
    },

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Typed input that doesn't parse or is out of range.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Value must be positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Input is not a number.
    #[error("{field} must be a number, got '{input}'")]
    InvalidNumber { field: String, input: String },

    /// Invalid format (e.g., a card number with letters).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },

    /// Value does not fit the representable range.
    #[error("{field} is too large")]
    TooLarge { field: String },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = CoreError::BelowMinimumAmount {
            amount: Money::from_cents(5000),
            minimum: Money::from_cents(7250),
        };
        assert_eq!(
            err.to_string(),
            "Insufficient amount! Minimum purchase is 72.50 (1 litre), got 50.00"
        );

        let err = CoreError::RateUnavailable {
            fuel: "Kerosene".to_string(),
        };
        assert_eq!(err.to_string(), "Could not retrieve fuel rate for Kerosene");
    }

    #[test]
    fn test_validation_error_messages() {
        let err = ValidationError::InvalidNumber {
            field: "amount".to_string(),
            input: "abc".to_string(),
        };
        assert_eq!(err.to_string(), "amount must be a number, got 'abc'");
    }

    #[test]
    fn test_validation_converts_to_core_error() {
        let validation_err = ValidationError::Required {
            field: "card number".to_string(),
        };
        let core_err: CoreError = validation_err.into();
        assert!(matches!(core_err, CoreError::Validation(_)));
    }
}

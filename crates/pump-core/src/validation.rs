//! # Validation Module
//!
//! Input parsing and validation for everything the cashier types.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Terminal prompt                                              │
//! │  └── Trims the line, upper-cases menu choices                          │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: THIS MODULE                                                  │
//! │  ├── Numbers: optional symbol or unit, thousands commas, nothing else  │
//! │  └── Names: card numbers, usernames, fuel names, menu keys             │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: billing                                                      │
//! │  └── Business minimums (one litre, enough cash, enough balance)        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use pump_core::validation::{parse_money, normalize_card_number};
//!
//! let amount = parse_money("amount", "₱1,000.50").unwrap();
//! assert_eq!(amount.cents(), 100050);
//!
//! assert_eq!(normalize_card_number("4111 1111-1111").unwrap(), "411111111111");
//! ```

use rust_decimal::Decimal;
use std::str::FromStr;

use crate::error::ValidationError;
use crate::money::{Litres, Money};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// Numeric Parsers
// =============================================================================

/// Units accepted after a quantity, matched case-insensitively.
const QUANTITY_UNITS: [&str; 5] = ["liters", "litres", "liter", "litre", "l"];

/// Parses a monetary amount, rounded to the centavo.
///
/// Accepts an optional currency symbol in front of the number (`₱700`,
/// `$1,234.50`, `Rs.500`, `-₱5`). A symbol made of letters may end in a `.`.
pub fn parse_money(field: &str, input: &str) -> ValidationResult<Money> {
    let trimmed = required(field, input)?;
    let (negative, rest) = match trimmed.strip_prefix('-') {
        Some(rest) => (true, rest.trim_start()),
        None => (false, trimmed),
    };
    let body = strip_currency_symbol(rest);
    if negative && body.starts_with('-') {
        return Err(invalid_number(field, trimmed));
    }

    let value = parse_number(field, trimmed, body)?;
    let value = if negative { -value } else { value };
    Money::from_decimal(value).ok_or_else(|| ValidationError::TooLarge {
        field: field.to_string(),
    })
}

/// Parses a litre quantity, kept at full precision.
///
/// Accepts an optional trailing unit (`10 L`, `2.5liters`).
pub fn parse_litres(input: &str) -> ValidationResult<Litres> {
    let trimmed = required("quantity", input)?;
    parse_number("quantity", trimmed, strip_quantity_unit(trimmed)).map(Litres::new)
}

fn required<'a>(field: &str, input: &'a str) -> ValidationResult<&'a str> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::Required {
            field: field.to_string(),
        });
    }
    Ok(trimmed)
}

fn invalid_number(field: &str, input: &str) -> ValidationError {
    ValidationError::InvalidNumber {
        field: field.to_string(),
        input: input.to_string(),
    }
}

/// Drops a leading symbol such as `₱`, `$`, `US$` or `Rs.`.
fn strip_currency_symbol(input: &str) -> &str {
    let end = input
        .find(|c: char| c.is_ascii_digit() || c == '-' || c == '.' || c.is_whitespace())
        .unwrap_or(input.len());
    let (symbol, rest) = input.split_at(end);
    if symbol.is_empty() {
        return input;
    }

    let rest = match rest.strip_prefix('.') {
        Some(after)
            if symbol.ends_with(|c: char| c.is_ascii_alphabetic())
                && after.trim_start().starts_with(|c: char| c.is_ascii_digit()) =>
        {
            after
        }
        _ => rest,
    };
    rest.trim_start()
}

fn strip_quantity_unit(input: &str) -> &str {
    let lower = input.to_ascii_lowercase();
    QUANTITY_UNITS
        .iter()
        .find(|unit| lower.ends_with(**unit))
        .map(|unit| input[..input.len() - unit.len()].trim_end())
        .unwrap_or(input)
}

/// Parses what is left once symbol and unit are gone.
///
/// ## Rules
/// - An optional leading `-`
/// - Thousands separators (`,`) only between digits
/// - Digits with at most one `.`, nothing else
///
/// `original` is only used for the error message.
fn parse_number(field: &str, original: &str, body: &str) -> ValidationResult<Decimal> {
    let (sign, unsigned) = match body.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", body),
    };

    let chars: Vec<char> = unsigned.chars().collect();
    let mut digits = String::with_capacity(chars.len() + 2);
    let mut seen_point = false;
    for (i, &c) in chars.iter().enumerate() {
        match c {
            '0'..='9' => digits.push(c),
            '.' if !seen_point => {
                seen_point = true;
                digits.push(c);
            }
            ',' if !seen_point
                && i > 0
                && chars[i - 1].is_ascii_digit()
                && matches!(chars.get(i + 1), Some(next) if next.is_ascii_digit()) => {}
            _ => return Err(invalid_number(field, original)),
        }
    }

    if !digits.chars().any(|c| c.is_ascii_digit()) {
        return Err(invalid_number(field, original));
    }
    if digits.starts_with('.') {
        digits.insert(0, '0');
    }
    if digits.ends_with('.') {
        digits.push('0');
    }

    Decimal::from_str(&format!("{sign}{digits}")).map_err(|_| invalid_number(field, original))
}

// =============================================================================
// String Validators
// =============================================================================

/// Normalizes a card number.
///
/// ## Rules
/// - Spaces and dashes are removed
/// - Must not be empty
/// - Must contain only digits
pub fn normalize_card_number(input: &str) -> ValidationResult<String> {
    let card: String = input
        .chars()
        .filter(|c| !c.is_whitespace() && *c != '-')
        .collect();

    if card.is_empty() {
        return Err(ValidationError::Required {
            field: "card number".to_string(),
        });
    }

    if !card.chars().all(|c| c.is_ascii_digit()) {
        return Err(ValidationError::InvalidFormat {
            field: "card number".to_string(),
            reason: "must contain only digits".to_string(),
        });
    }

    Ok(card)
}

/// Validates a username for the credential file.
///
/// ## Rules
/// - Must not be empty
/// - Must not contain `,` (the credential file separator)
pub fn validate_username(username: &str) -> ValidationResult<()> {
    let username = username.trim();

    if username.is_empty() {
        return Err(ValidationError::Required {
            field: "username".to_string(),
        });
    }

    if username.contains(',') {
        return Err(ValidationError::InvalidFormat {
            field: "username".to_string(),
            reason: "must not contain commas".to_string(),
        });
    }

    Ok(())
}

/// Validates a fuel name.
///
/// ## Rules
/// - Must not be empty
/// - Must not contain `|` or line breaks (would corrupt the ledger)
pub fn validate_fuel_name(name: &str) -> ValidationResult<()> {
    let name = name.trim();

    if name.is_empty() {
        return Err(ValidationError::Required {
            field: "fuel name".to_string(),
        });
    }

    if name.contains('|') || name.contains('\n') || name.contains('\r') {
        return Err(ValidationError::InvalidFormat {
            field: "fuel name".to_string(),
            reason: "must not contain '|' or line breaks".to_string(),
        });
    }

    Ok(())
}

/// Validates a single-character menu key and returns it upper-cased.
pub fn validate_menu_key(key: &str) -> ValidationResult<char> {
    let mut chars = key.trim().chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) if c.is_ascii_alphanumeric() => Ok(c.to_ascii_uppercase()),
        (None, _) => Err(ValidationError::Required {
            field: "menu key".to_string(),
        }),
        _ => Err(ValidationError::InvalidFormat {
            field: "menu key".to_string(),
            reason: format!("'{}' must be a single letter or digit", key.trim()),
        }),
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

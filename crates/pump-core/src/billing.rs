//! # Billing
//!
//! Converts a fill request into a priced [`Fill`] and settles it against a
//! tender.
//!
//! ## Purchase Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Purchase Computation                             │
//! │                                                                         │
//! │  rate_for(fuel) ──► rate                                               │
//! │                       │                                                 │
//! │        ┌──────────────┴──────────────┐                                  │
//! │        ▼                             ▼                                  │
//! │  ByAmount(amount)              ByQuantity(litres)                       │
//! │  • amount > 0                  • litres > 0                             │
//! │  • amount ≥ rate               • litres ≥ 1.0                           │
//! │  • litres = amount / rate      • total = round(litres × rate, 2)        │
//! │    (unrounded)                                                          │
//! │        └──────────────┬──────────────┘                                  │
//! │                       ▼                                                 │
//! │                Fill { quantity, rate, total }                           │
//! │                       │                                                 │
//! │        ┌──────────────┴──────────────┐                                  │
//! │        ▼                             ▼                                  │
//! │  settle_cash(tendered)         settle_card(balance)                     │
//! │  • tendered ≥ total            • card exists                            │
//! │  • change = tendered - total   • 0 < total ≤ balance                    │
//! │                                • remaining = balance - total            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult, ValidationError};
use crate::money::{Litres, Money};
use crate::types::Settlement;

// =============================================================================
// Fill
// =============================================================================

/// What the customer asked for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FillRequest {
    /// "Fill ₱1,000 worth."
    ByAmount(Money),
    /// "Fill 10 litres."
    ByQuantity(Litres),
}

/// A priced fill, ready for payment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Fill {
    pub quantity: Litres,
    pub rate: Money,
    pub total: Money,
}

/// Prices a fill request at `rate` per litre.
///
/// ## Rules
/// - By amount: amount must be positive and buy at least one litre; the
///   quantity is `amount / rate` with no rounding, and the total is the
///   amount as entered.
/// - By quantity: quantity must be positive and at least one litre; the
///   total is `round(quantity × rate, 2)`.
///
/// ## Example
/// ```rust
/// use pump_core::billing::{price_fill, FillRequest};
/// use pump_core::money::Money;
///
/// // 50.00 at 72.50 per litre buys less than one litre
/// let err = price_fill(Money::from_cents(7250), FillRequest::ByAmount(Money::from_cents(5000)));
/// assert!(err.is_err());
/// ```
pub fn price_fill(rate: Money, request: FillRequest) -> CoreResult<Fill> {
    if !rate.is_positive() {
        return Err(ValidationError::MustBePositive {
            field: "rate".to_string(),
        }
        .into());
    }

    match request {
        FillRequest::ByAmount(amount) => {
            if !amount.is_positive() {
                return Err(ValidationError::MustBePositive {
                    field: "amount".to_string(),
                }
                .into());
            }
            if amount < rate {
                return Err(CoreError::BelowMinimumAmount {
                    amount,
                    minimum: rate,
                });
            }
            let quantity = Litres::purchasable(amount, rate).ok_or_else(|| {
                ValidationError::TooLarge {
                    field: "amount".to_string(),
                }
            })?;
            Ok(Fill {
                quantity,
                rate,
                total: amount,
            })
        }
        FillRequest::ByQuantity(quantity) => {
            if !quantity.is_positive() {
                return Err(ValidationError::MustBePositive {
                    field: "quantity".to_string(),
                }
                .into());
            }
            if quantity < Litres::ONE {
                return Err(CoreError::BelowMinimumQuantity {
                    requested: quantity,
                });
            }
            let total = quantity
                .cost_at(rate)
                .ok_or_else(|| ValidationError::TooLarge {
                    field: "quantity".to_string(),
                })?;
            Ok(Fill {
                quantity,
                rate,
                total,
            })
        }
    }
}

// =============================================================================
// Tender
// =============================================================================

/// Settles `total` against cash handed over.
///
/// Underpayment is rejected; change is never negative.
pub fn settle_cash(total: Money, tendered: Money) -> CoreResult<Settlement> {
    if tendered < total {
        return Err(CoreError::InsufficientCash { tendered, total });
    }
    Ok(Settlement::Cash {
        tendered,
        change: tendered - total,
    })
}

/// Settles `total` against a stored-value card.
///
/// `balance` is the card ledger's current entry; `None` means the card has
/// no entry at all. A zero balance is rejected even for a zero total.
pub fn settle_card(card_number: &str, total: Money, balance: Option<Money>) -> CoreResult<Settlement> {
    let balance = balance.ok_or_else(|| CoreError::CardNotFound(card_number.to_string()))?;

    if !balance.is_positive() || balance < total {
        return Err(CoreError::InsufficientBalance {
            card_number: card_number.to_string(),
            balance,
            required: total,
        });
    }

    Ok(Settlement::Card {
        card_number: card_number.to_string(),
        deducted: total,
        remaining_balance: balance - total,
    })
}

// =============================================================================
// Unit Tests
// =============================================================================

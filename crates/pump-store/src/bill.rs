//! # Bill Number Allocation
//!
//! Bill numbers are random 6-digit values. A candidate is rejected while a
//! receipt or a ledger line already carries it; after `attempts` rejections
//! allocation fails with [`StoreError::BillNumbersExhausted`].

use rand::Rng;
use tracing::debug;

use crate::error::{StoreError, StoreResult};
use pump_core::BillNumber;

/// Candidates tried before giving up.
pub const DEFAULT_BILL_ATTEMPTS: u32 = 1_000;

/// Draws bill numbers from `rng` until one is not taken.
pub fn allocate<R, F>(rng: &mut R, attempts: u32, mut is_taken: F) -> StoreResult<BillNumber>
where
    R: Rng,
    F: FnMut(BillNumber) -> StoreResult<bool>,
{
    for attempt in 1..=attempts {
        let candidate = rng.gen_range(BillNumber::MIN..=BillNumber::MAX);
        let Some(bill) = BillNumber::new(candidate) else {
            continue;
        };
        if !is_taken(bill)? {
            return Ok(bill);
        }
        debug!(bill_number = %bill, attempt, "Bill number in use, retrying");
    }
    Err(StoreError::BillNumbersExhausted { attempts })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_allocates_in_range() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..100 {
            let bill = allocate(&mut rng, 1, |_| Ok(false)).unwrap();
            assert!((BillNumber::MIN..=BillNumber::MAX).contains(&bill.value()));
        }
    }

    #[test]
    fn test_skips_taken_numbers() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut seen = Vec::new();
        let bill = allocate(&mut rng, 10, |candidate| {
            seen.push(candidate);
            Ok(seen.len() < 3)
        })
        .unwrap();
        assert_eq!(seen.len(), 3);
        assert_eq!(bill, seen[2]);
    }

    #[test]
    fn test_exhaustion() {
        let mut rng = StdRng::seed_from_u64(7);
        let err = allocate(&mut rng, 5, |_| Ok(true)).unwrap_err();
        assert!(matches!(err, StoreError::BillNumbersExhausted { attempts: 5 }));
    }

    #[test]
    fn test_lookup_error_propagates() {
        let mut rng = StdRng::seed_from_u64(7);
        let err = allocate(&mut rng, 5, |_| {
            Err(StoreError::from(std::io::Error::new(
                std::io::ErrorKind::Other,
                "disk gone",
            )))
        })
        .unwrap_err();
        assert!(matches!(err, StoreError::Io { .. }));
    }
}

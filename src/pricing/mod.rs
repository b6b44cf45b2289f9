//! Stay price computation: nightly totals, fixed fees, and guest counts.
//!
//! Everything here is pure; the booking view recomputes a quote on every
//! date or rate change and renders the breakdown.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Flat cleaning fee charged on every booking, including zero-night stays.
pub const CLEANING_FEE: f64 = 75.0;

/// Service fee rate applied to the nightly subtotal.
pub const SERVICE_FEE_RATE: f64 = 0.12;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum QuoteError {
    /// Check-out precedes check-in. The date picker is expected to prevent
    /// this; the calculator refuses it rather than clamping.
    #[error("Invalid date range: check-out {check_out} is before check-in {check_in}")]
    InvalidRange {
        check_in: NaiveDate,
        check_out: NaiveDate,
    },
}

/// Price breakdown for a stay.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StayQuote {
    pub nights: u32,
    pub subtotal: f64,
    pub cleaning_fee: f64,
    pub service_fee: f64,
    pub total: f64,
}

/// Number of nights between two dates. Zero when either date is absent.
pub fn nights(
    check_in: Option<NaiveDate>,
    check_out: Option<NaiveDate>,
) -> Result<u32, QuoteError> {
    let (check_in, check_out) = match (check_in, check_out) {
        (Some(check_in), Some(check_out)) => (check_in, check_out),
        _ => return Ok(0),
    };
    if check_out < check_in {
        return Err(QuoteError::InvalidRange {
            check_in,
            check_out,
        });
    }
    Ok((check_out - check_in).num_days() as u32)
}

/// Builds the breakdown for a known night count.
///
/// Only the service fee is rounded (half away from zero, to the nearest
/// whole currency unit); subtotal and total carry the raw products.
pub fn quote(price_per_night: f64, nights: u32) -> StayQuote {
    let subtotal = price_per_night * f64::from(nights);
    let service_fee = (subtotal * SERVICE_FEE_RATE).round();
    StayQuote {
        nights,
        subtotal,
        cleaning_fee: CLEANING_FEE,
        service_fee,
        total: subtotal + CLEANING_FEE + service_fee,
    }
}

/// Convenience wrapper combining [`nights`] and [`quote`] for a date range.
pub fn quote_for_stay(
    price_per_night: f64,
    check_in: Option<NaiveDate>,
    check_out: Option<NaiveDate>,
) -> Result<StayQuote, QuoteError> {
    Ok(quote(price_per_night, nights(check_in, check_out)?))
}

/// Party composition for a booking. Pets never count toward the guest
/// total the property's capacity is checked against.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct GuestCounts {
    pub adults: u32,
    pub children: u32,
    pub pets: u32,
}

impl GuestCounts {
    pub fn total_guests(&self) -> u32 {
        self.adults + self.children
    }

    /// Adjusts one count, clamping at zero on decrement.
    pub fn adjust(&mut self, kind: GuestKind, increment: bool) {
        let slot = match kind {
            GuestKind::Adults => &mut self.adults,
            GuestKind::Children => &mut self.children,
            GuestKind::Pets => &mut self.pets,
        };
        if increment {
            *slot += 1;
        } else {
            *slot = slot.saturating_sub(1);
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuestKind {
    Adults,
    Children,
    Pets,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn five_night_example() {
        let q = quote_for_stay(
            250.0,
            Some(date(2024, 1, 15)),
            Some(date(2024, 1, 20)),
        )
        .unwrap();
        assert_eq!(q.nights, 5);
        assert_eq!(q.subtotal, 1250.0);
        assert_eq!(q.cleaning_fee, 75.0);
        assert_eq!(q.service_fee, 150.0);
        assert_eq!(q.total, 1475.0);
    }

    #[test]
    fn zero_nights_still_charges_cleaning() {
        let same_day = Some(date(2024, 3, 1));
        let q = quote_for_stay(250.0, same_day, same_day).unwrap();
        assert_eq!(q.nights, 0);
        assert_eq!(q.subtotal, 0.0);
        assert_eq!(q.service_fee, 0.0);
        assert_eq!(q.total, CLEANING_FEE);
    }

    #[test]
    fn missing_dates_mean_zero_nights() {
        assert_eq!(nights(None, Some(date(2024, 3, 1))).unwrap(), 0);
        assert_eq!(nights(Some(date(2024, 3, 1)), None).unwrap(), 0);
        assert_eq!(nights(None, None).unwrap(), 0);
    }

    #[test]
    fn inverted_range_is_rejected() {
        let err = nights(Some(date(2024, 3, 5)), Some(date(2024, 3, 1))).unwrap_err();
        assert!(matches!(err, QuoteError::InvalidRange { .. }));
    }

    #[test]
    fn service_fee_rounds_half_up() {
        // 87.5 * 0.12 = 10.5, rounds to 11.
        let q = quote(87.5, 1);
        assert_eq!(q.service_fee, 11.0);
        assert_eq!(q.total, 87.5 + 75.0 + 11.0);
    }

    #[test]
    fn guest_counts_clamp_at_zero() {
        let mut counts = GuestCounts {
            adults: 1,
            children: 0,
            pets: 0,
        };
        counts.adjust(GuestKind::Children, false);
        assert_eq!(counts.children, 0);
        counts.adjust(GuestKind::Adults, true);
        counts.adjust(GuestKind::Pets, true);
        assert_eq!(counts.total_guests(), 2);
    }
}

use chrono::NaiveDate;

use super::dates::AvailabilitySet;

/// Derived length and price of a guest-selected stay.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StayQuote {
    pub nights: u32,
    pub total_price: f64,
}

impl StayQuote {
    /// A quote with zero nights is a "nothing selected yet" state, not a
    /// bookable stay.
    pub fn is_bookable(&self) -> bool {
        self.nights > 0
    }
}

impl std::fmt::Display for StayQuote {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let plural = if self.nights == 1 { "" } else { "s" };
        write!(
            f,
            "{} night{plural} | Total: ${}",
            self.nights, self.total_price
        )
    }
}

/// True iff both endpoints are set and every day of the closed interval
/// `[start, end]` is available. O(stay length).
pub fn is_valid_stay(
    start: Option<NaiveDate>,
    end: Option<NaiveDate>,
    availability: &AvailabilitySet,
) -> bool {
    let (Some(start), Some(end)) = (start, end) else {
        return false;
    };
    if start > end {
        return false;
    }
    start
        .iter_days()
        .take_while(|d| *d <= end)
        .all(|d| availability.contains_date(d))
}

/// Nights and total price for a candidate stay. A non-positive day
/// difference (unset endpoints, same-day selection, inverted selection)
/// quotes as zero nights and zero price rather than erroring.
#[allow(clippy::cast_sign_loss, clippy::cast_possible_truncation)]
pub fn quote_stay(
    start: Option<NaiveDate>,
    end: Option<NaiveDate>,
    price_per_night: f64,
) -> StayQuote {
    let nights = match (start, end) {
        (Some(start), Some(end)) => (end - start).num_days().max(0) as u32,
        _ => 0,
    };
    StayQuote {
        nights,
        total_price: f64::from(nights) * price_per_night,
    }
}

#![allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]

use chrono::{Datelike, NaiveDate};

use super::booking::{Booking, BookingStatus};
use super::listing::Listing;

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// Per-listing statistics for the host dashboard. `this year` figures are
/// relative to the reference date the caller supplies, so tests control the
/// clock.
#[derive(Debug, Clone, PartialEq)]
pub struct ListingStats {
    pub days_online: u32,
    pub days_booked_this_year: u32,
    pub profit_this_year: f64,
    pub total_requests: usize,
    pub pending_requests: usize,
}

impl std::fmt::Display for ListingStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Days online: {}", self.days_online)?;
        writeln!(f, "Days booked (this year): {}", self.days_booked_this_year)?;
        writeln!(f, "Profit (this year): ${}", self.profit_this_year)?;
        writeln!(f, "Total booking requests: {}", self.total_requests)?;
        writeln!(f, "Pending requests: {}", self.pending_requests)?;
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Pure computation functions
// ---------------------------------------------------------------------------

/// Whole days the listing has been up, from `posted_on` to `today`,
/// clamped to zero. A listing with no posted date reads as zero.
pub fn days_online(listing: &Listing, today: NaiveDate) -> u32 {
    listing
        .posted_on
        .map_or(0, |posted| (today - posted).num_days().max(0) as u32)
}

/// Occupied-day count across accepted bookings, restricted to `year`.
///
/// Counts raw `date_range` entries (both boundary days), not nights; the
/// dashboard reports days the property was occupied, and checkout day
/// counts as occupied.
pub fn days_booked_in_year(bookings: &[Booking], year: i32) -> u32 {
    bookings
        .iter()
        .filter(|b| b.status == BookingStatus::Accepted)
        .map(|b| b.days_in_year(year))
        .sum()
}

/// Total price of accepted bookings that touch `year`. A stay spanning the
/// year boundary contributes its full price to every year it touches;
/// nothing is prorated. Pending and declined bookings never contribute.
pub fn profit_in_year(bookings: &[Booking], year: i32) -> f64 {
    bookings
        .iter()
        .filter(|b| b.status == BookingStatus::Accepted && b.touches_year(year))
        .map(|b| b.total_price)
        .sum()
}

/// Every request ever made for the listing, regardless of status.
pub fn total_requests(bookings: &[Booking]) -> usize {
    bookings.len()
}

/// The pending subset, in input order. Only these expose accept/deny
/// actions.
pub fn actionable_bookings(bookings: &[Booking]) -> Vec<&Booking> {
    bookings.iter().filter(|b| b.is_actionable()).collect()
}

/// The bookings that belong to one listing. The backend returns every
/// booking visible to the caller; the relationship is a plain id match.
pub fn bookings_for_listing<'a>(bookings: &'a [Booking], listing_id: &str) -> Vec<&'a Booking> {
    bookings
        .iter()
        .filter(|b| b.listing_id == listing_id)
        .collect()
}

/// Bundle the dashboard statistics for one listing. `bookings` must already
/// be filtered to the listing (see [`bookings_for_listing`]).
pub fn compute_listing_stats(
    listing: &Listing,
    bookings: &[Booking],
    today: NaiveDate,
) -> ListingStats {
    ListingStats {
        days_online: days_online(listing, today),
        days_booked_this_year: days_booked_in_year(bookings, today.year()),
        profit_this_year: profit_in_year(bookings, today.year()),
        total_requests: total_requests(bookings),
        pending_requests: actionable_bookings(bookings).len(),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

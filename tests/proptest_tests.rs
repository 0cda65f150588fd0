#![allow(clippy::cast_possible_truncation)]

use std::time::Duration;

use proptest::prelude::*;

use airbrb::adapters::cache::memory_cache::MemoryCache;
use airbrb::domain::dates::{expand_ranges, AvailabilitySet, DateRange};
use airbrb::domain::stay::{is_valid_stay, quote_stay};
use airbrb::ports::cache::ListingCache;

// ---------------------------------------------------------------------------
// Strategies
// ---------------------------------------------------------------------------

fn base_date() -> chrono::NaiveDate {
    chrono::NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()
}

fn arb_range() -> impl Strategy<Value = DateRange> {
    (0..3650_i64, 0..90_i64).prop_map(|(offset, len)| {
        let start = base_date() + chrono::TimeDelta::days(offset);
        DateRange::new(start, start + chrono::TimeDelta::days(len))
    })
}

fn arb_ranges() -> impl Strategy<Value = Vec<DateRange>> {
    prop::collection::vec(arb_range(), 0..8)
}

// ---------------------------------------------------------------------------
// DateRange::expand() properties
// ---------------------------------------------------------------------------

proptest! {
    #[test]
    fn prop_expand_len_is_inclusive_day_count(
        offset in 0..3650_i64,
        len in 0..90_i64,
    ) {
        let start = base_date() + chrono::TimeDelta::days(offset);
        let range = DateRange::new(start, start + chrono::TimeDelta::days(len));
        prop_assert_eq!(range.expand().len() as i64, len + 1);
    }

    #[test]
    fn prop_expand_endpoints_and_ordering(range in arb_range()) {
        let days = range.expand();
        prop_assert_eq!(days.first().unwrap(), &range.start.format("%Y-%m-%d").to_string());
        prop_assert_eq!(days.last().unwrap(), &range.end.format("%Y-%m-%d").to_string());
        // Canonical YYYY-MM-DD strings sort chronologically.
        for pair in days.windows(2) {
            prop_assert!(pair[0] < pair[1], "{} !< {}", pair[0], pair[1]);
        }
    }

    #[test]
    fn prop_inverted_range_expands_to_nothing(
        offset in 1..3650_i64,
        len in 1..90_i64,
    ) {
        let end = base_date() + chrono::TimeDelta::days(offset);
        let range = DateRange::new(end + chrono::TimeDelta::days(len), end);
        prop_assert!(range.expand().is_empty());
    }

    #[test]
    fn prop_expand_ranges_is_concat(ranges in arb_ranges()) {
        let flat = expand_ranges(&ranges);
        let concat: Vec<String> = ranges.iter().flat_map(DateRange::expand).collect();
        prop_assert_eq!(flat, concat);
    }
}

// ---------------------------------------------------------------------------
// AvailabilitySet / stay validity properties
// ---------------------------------------------------------------------------

proptest! {
    #[test]
    fn prop_membership_matches_expansion(range in arb_range(), probe in 0..120_i64) {
        let set = AvailabilitySet::from_dates(range.expand());
        let day = range.start + chrono::TimeDelta::days(probe);
        let in_range = day <= range.end;
        prop_assert_eq!(set.contains_date(day), in_range);
    }

    #[test]
    fn prop_from_dates_dedups(range in arb_range()) {
        let days = range.expand();
        let mut doubled = days.clone();
        doubled.extend(days.iter().cloned());
        let set = AvailabilitySet::from_dates(doubled);
        prop_assert_eq!(set.len(), days.len());
    }

    #[test]
    fn prop_stay_within_availability_is_valid(
        offset in 0..3650_i64,
        avail_len in 1..60_i64,
        stay_off in 0..60_i64,
        stay_len in 0..60_i64,
    ) {
        let avail_start = base_date() + chrono::TimeDelta::days(offset);
        let avail = DateRange::new(avail_start, avail_start + chrono::TimeDelta::days(avail_len));
        let set = AvailabilitySet::from_dates(avail.expand());

        let start = avail_start + chrono::TimeDelta::days(stay_off);
        let end = start + chrono::TimeDelta::days(stay_len);
        let fits = stay_off + stay_len <= avail_len;
        prop_assert_eq!(is_valid_stay(Some(start), Some(end), &set), fits);
    }

    #[test]
    fn prop_missing_endpoint_is_never_valid(range in arb_range()) {
        let set = AvailabilitySet::from_dates(range.expand());
        prop_assert!(!is_valid_stay(Some(range.start), None, &set));
        prop_assert!(!is_valid_stay(None, Some(range.end), &set));
        prop_assert!(!is_valid_stay(None, None, &set));
    }
}

// ---------------------------------------------------------------------------
// quote_stay() properties
// ---------------------------------------------------------------------------

proptest! {
    #[test]
    fn prop_quote_total_is_nights_times_price(
        offset in 0..3650_i64,
        nights in 0..90_i64,
        price in 0.0..5000.0_f64,
    ) {
        let start = base_date() + chrono::TimeDelta::days(offset);
        let end = start + chrono::TimeDelta::days(nights);
        let quote = quote_stay(Some(start), Some(end), price);
        prop_assert_eq!(i64::from(quote.nights), nights);
        let expected = nights as f64 * price;
        prop_assert!((quote.total_price - expected).abs() < 1e-6);
    }

    #[test]
    fn prop_inverted_quote_is_zero_nights(
        offset in 1..3650_i64,
        len in 1..90_i64,
        price in 0.0..5000.0_f64,
    ) {
        let end = base_date() + chrono::TimeDelta::days(offset);
        let start = end + chrono::TimeDelta::days(len);
        let quote = quote_stay(Some(start), Some(end), price);
        prop_assert_eq!(quote.nights, 0);
        prop_assert!(!quote.is_bookable());
    }
}

// ---------------------------------------------------------------------------
// MemoryCache properties
// ---------------------------------------------------------------------------

proptest! {
    #[test]
    fn prop_cache_get_returns_last_set(
        key in "[a-z]{1,12}",
        first in "[a-z0-9]{0,40}",
        second in "[a-z0-9]{0,40}",
    ) {
        let cache = MemoryCache::new(8);
        cache.set(&key, &first, Duration::from_secs(60));
        cache.set(&key, &second, Duration::from_secs(60));
        prop_assert_eq!(cache.get(&key), Some(second));
    }

    #[test]
    fn prop_cache_invalidate_always_clears(
        key in "[a-z]{1,12}",
        value in "[a-z0-9]{0,40}",
    ) {
        let cache = MemoryCache::new(8);
        cache.set(&key, &value, Duration::from_secs(60));
        cache.invalidate(&key);
        prop_assert_eq!(cache.get(&key), None);
    }
}

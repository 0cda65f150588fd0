//! Mock marketplace client and entity factories shared by unit and
//! integration tests.

use std::sync::Mutex;

use async_trait::async_trait;
use chrono::NaiveDate;

use crate::domain::booking::{Booking, BookingStatus};
use crate::domain::identity::Identity;
use crate::domain::listing::{Listing, Review};
use crate::error::Result;
use crate::ports::marketplace::MarketplaceClient;

type ListingsFn = Box<dyn Fn() -> Result<Vec<String>> + Send + Sync>;
type DetailFn = Box<dyn Fn(&str) -> Result<Listing> + Send + Sync>;
type BookingsFn = Box<dyn Fn() -> Result<Vec<Booking>> + Send + Sync>;
type AcceptFn = Box<dyn Fn(&str) -> Result<()> + Send + Sync>;
type DenyFn = Box<dyn Fn(&str) -> Result<()> + Send + Sync>;

/// Mock [`MarketplaceClient`] with swappable read handlers and recording of
/// every mutation, so tests can assert both payloads and call ordering
/// (mutate, then refetch, then recompute).
pub struct MockMarketplaceClient {
    listings_fn: Mutex<ListingsFn>,
    detail_fn: Mutex<DetailFn>,
    bookings_fn: Mutex<BookingsFn>,
    accept_fn: Mutex<AcceptFn>,
    deny_fn: Mutex<DenyFn>,
    calls: Mutex<Vec<String>>,
    submitted: Mutex<Vec<(String, Vec<String>, f64)>>,
    published: Mutex<Vec<(String, Vec<String>)>>,
    reviews: Mutex<Vec<(String, String, Review)>>,
}

impl Default for MockMarketplaceClient {
    fn default() -> Self {
        Self::new()
    }
}

impl MockMarketplaceClient {
    pub fn new() -> Self {
        Self {
            listings_fn: Mutex::new(Box::new(|| Ok(vec![]))),
            detail_fn: Mutex::new(Box::new(|id| Ok(make_listing(id, "host@example.com", 100.0)))),
            bookings_fn: Mutex::new(Box::new(|| Ok(vec![]))),
            accept_fn: Mutex::new(Box::new(|_| Ok(()))),
            deny_fn: Mutex::new(Box::new(|_| Ok(()))),
            calls: Mutex::new(Vec::new()),
            submitted: Mutex::new(Vec::new()),
            published: Mutex::new(Vec::new()),
            reviews: Mutex::new(Vec::new()),
        }
    }

    #[must_use]
    pub fn with_listings(
        self,
        f: impl Fn() -> Result<Vec<String>> + Send + Sync + 'static,
    ) -> Self {
        *self.listings_fn.lock().unwrap() = Box::new(f);
        self
    }

    #[must_use]
    pub fn with_listing_details(
        self,
        f: impl Fn(&str) -> Result<Listing> + Send + Sync + 'static,
    ) -> Self {
        *self.detail_fn.lock().unwrap() = Box::new(f);
        self
    }

    #[must_use]
    pub fn with_bookings(
        self,
        f: impl Fn() -> Result<Vec<Booking>> + Send + Sync + 'static,
    ) -> Self {
        *self.bookings_fn.lock().unwrap() = Box::new(f);
        self
    }

    #[must_use]
    pub fn with_accept(self, f: impl Fn(&str) -> Result<()> + Send + Sync + 'static) -> Self {
        *self.accept_fn.lock().unwrap() = Box::new(f);
        self
    }

    #[must_use]
    pub fn with_deny(self, f: impl Fn(&str) -> Result<()> + Send + Sync + 'static) -> Self {
        *self.deny_fn.lock().unwrap() = Box::new(f);
        self
    }

    fn record(&self, call: impl Into<String>) {
        self.calls.lock().unwrap().push(call.into());
    }

    /// Every call made, in order, as `"name(arg)"` strings.
    pub fn call_log(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    /// Recorded `make_booking` payloads.
    pub fn submitted_bookings(&self) -> Vec<(String, Vec<String>, f64)> {
        self.submitted.lock().unwrap().clone()
    }

    /// Recorded `publish_listing` payloads.
    pub fn published_listings(&self) -> Vec<(String, Vec<String>)> {
        self.published.lock().unwrap().clone()
    }

    /// Recorded `make_review` payloads.
    pub fn posted_reviews(&self) -> Vec<(String, String, Review)> {
        self.reviews.lock().unwrap().clone()
    }
}

#[async_trait]
impl MarketplaceClient for MockMarketplaceClient {
    async fn fetch_listings(&self) -> Result<Vec<String>> {
        self.record("fetch_listings");
        let f = self.listings_fn.lock().unwrap();
        f()
    }

    async fn fetch_listing_details(&self, id: &str) -> Result<Listing> {
        self.record(format!("fetch_listing_details({id})"));
        let f = self.detail_fn.lock().unwrap();
        f(id)
    }

    async fn fetch_bookings(&self) -> Result<Vec<Booking>> {
        self.record("fetch_bookings");
        let f = self.bookings_fn.lock().unwrap();
        f()
    }

    async fn make_booking(
        &self,
        listing_id: &str,
        date_range: &[String],
        total_price: f64,
    ) -> Result<()> {
        self.record(format!("make_booking({listing_id})"));
        self.submitted.lock().unwrap().push((
            listing_id.to_string(),
            date_range.to_vec(),
            total_price,
        ));
        Ok(())
    }

    async fn accept_booking(&self, booking_id: &str) -> Result<()> {
        self.record(format!("accept_booking({booking_id})"));
        let f = self.accept_fn.lock().unwrap();
        f(booking_id)
    }

    async fn deny_booking(&self, booking_id: &str) -> Result<()> {
        self.record(format!("deny_booking({booking_id})"));
        let f = self.deny_fn.lock().unwrap();
        f(booking_id)
    }

    async fn make_review(
        &self,
        listing_id: &str,
        booking_id: &str,
        review: &Review,
    ) -> Result<()> {
        self.record(format!("make_review({listing_id}, {booking_id})"));
        self.reviews.lock().unwrap().push((
            listing_id.to_string(),
            booking_id.to_string(),
            review.clone(),
        ));
        Ok(())
    }

    async fn publish_listing(&self, listing_id: &str, flat_dates: &[String]) -> Result<()> {
        self.record(format!("publish_listing({listing_id})"));
        self.published
            .lock()
            .unwrap()
            .push((listing_id.to_string(), flat_dates.to_vec()));
        Ok(())
    }

    async fn unpublish_listing(&self, listing_id: &str) -> Result<()> {
        self.record(format!("unpublish_listing({listing_id})"));
        Ok(())
    }
}

// --- Factory functions ---

pub fn host() -> Identity {
    Identity::new("host@example.com")
}

pub fn make_listing(id: &str, owner: &str, price: f64) -> Listing {
    Listing {
        id: id.to_string(),
        owner: owner.to_string(),
        title: "Test Listing".to_string(),
        price,
        posted_on: NaiveDate::from_ymd_opt(2024, 11, 1),
        availability: vec![],
        published: false,
    }
}

pub fn make_listing_with_availability(id: &str, price: f64, days: &[&str]) -> Listing {
    Listing {
        id: id.to_string(),
        owner: "host@example.com".to_string(),
        title: "Test Listing".to_string(),
        price,
        posted_on: NaiveDate::from_ymd_opt(2024, 11, 1),
        availability: days.iter().map(ToString::to_string).collect(),
        published: true,
    }
}

pub fn make_booking(
    id: &str,
    listing_id: &str,
    status: BookingStatus,
    days: &[&str],
    total_price: f64,
) -> Booking {
    Booking {
        id: id.to_string(),
        listing_id: listing_id.to_string(),
        owner: "guest1@example.com".to_string(),
        status,
        date_range: days.iter().map(ToString::to_string).collect(),
        total_price,
    }
}

use async_trait::async_trait;

use crate::domain::booking::Booking;
use crate::domain::listing::{Listing, Review};
use crate::error::Result;

/// The marketplace backend as this crate sees it. One method per REST
/// operation; transport detail stays in the adapter.
///
/// `fetch_bookings` returns every booking visible to the caller — filtering
/// down to one listing is the domain's job.
#[async_trait]
pub trait MarketplaceClient: Send + Sync {
    /// Ids of every listing on the site.
    async fn fetch_listings(&self) -> Result<Vec<String>>;

    async fn fetch_listing_details(&self, id: &str) -> Result<Listing>;

    async fn fetch_bookings(&self) -> Result<Vec<Booking>>;

    /// Submit a booking request: the full inclusive day list plus the price
    /// quoted for it. The new booking starts out pending.
    async fn make_booking(
        &self,
        listing_id: &str,
        date_range: &[String],
        total_price: f64,
    ) -> Result<()>;

    async fn accept_booking(&self, booking_id: &str) -> Result<()>;

    async fn deny_booking(&self, booking_id: &str) -> Result<()>;

    async fn make_review(
        &self,
        listing_id: &str,
        booking_id: &str,
        review: &Review,
    ) -> Result<()>;

    /// Publish with an already-flattened availability day list.
    async fn publish_listing(&self, listing_id: &str, flat_dates: &[String]) -> Result<()>;

    async fn unpublish_listing(&self, listing_id: &str) -> Result<()>;
}

use std::sync::Arc;

use chrono::NaiveDate;
use tracing::{debug, info};

use crate::domain::booking::BookingStatus;
use crate::domain::dates::{AvailabilitySet, DateRange};
use crate::domain::identity::Identity;
use crate::domain::listing::Review;
use crate::domain::stay::{self, StayQuote};
use crate::error::{AirbrbError, Result};
use crate::ports::marketplace::MarketplaceClient;

/// Guest-side booking flow: quote a stay against a listing's live
/// availability, submit it, and review past stays. All validation happens
/// here, before any mutation reaches the backend.
pub struct BookingFlow {
    client: Arc<dyn MarketplaceClient>,
}

impl BookingFlow {
    pub fn new(client: Arc<dyn MarketplaceClient>) -> Self {
        Self { client }
    }

    /// Price and validate a candidate stay. Returns the quote even when the
    /// stay is not bookable (zero nights); callers use
    /// [`StayQuote::is_bookable`] plus the validity flag to gate the submit
    /// action.
    pub async fn quote(
        &self,
        listing_id: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<(StayQuote, bool)> {
        let listing = self.client.fetch_listing_details(listing_id).await?;
        let availability = AvailabilitySet::from_dates(listing.availability.iter().cloned());
        let valid = stay::is_valid_stay(Some(start), Some(end), &availability);
        let quote = stay::quote_stay(Some(start), Some(end), listing.price);
        Ok((quote, valid))
    }

    /// Validate and submit a booking request. The submitted payload is the
    /// full inclusive day list plus the quoted total, matching what the
    /// backend stores.
    pub async fn book(
        &self,
        listing_id: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<StayQuote> {
        let listing = self.client.fetch_listing_details(listing_id).await?;
        let availability = AvailabilitySet::from_dates(listing.availability.iter().cloned());

        if !stay::is_valid_stay(Some(start), Some(end), &availability) {
            return Err(AirbrbError::InvalidStay {
                reason: format!("{start} to {end} is not fully available"),
            });
        }
        let quote = stay::quote_stay(Some(start), Some(end), listing.price);
        if !quote.is_bookable() {
            // A single available day still occupies no night.
            return Err(AirbrbError::InvalidStay {
                reason: "a stay must cover at least one night".into(),
            });
        }

        let date_range = DateRange::new(start, end).expand();
        debug!(
            listing_id,
            days = date_range.len(),
            total = quote.total_price,
            "submitting booking request"
        );
        self.client
            .make_booking(listing_id, &date_range, quote.total_price)
            .await?;
        info!(listing_id, nights = quote.nights, "booking request submitted");
        Ok(quote)
    }

    /// Post a review for a listing the viewer has actually stayed at: they
    /// must own an accepted booking for it, and the score must be in range.
    /// Returns the id of the booking the review was attached to.
    pub async fn leave_review(
        &self,
        viewer: &Identity,
        listing_id: &str,
        review: &Review,
    ) -> Result<String> {
        if !review.score_in_range() {
            return Err(AirbrbError::NotPermitted {
                reason: format!(
                    "score {} is outside {}..={}",
                    review.score,
                    Review::MIN_SCORE,
                    Review::MAX_SCORE
                ),
            });
        }

        let bookings = self.client.fetch_bookings().await?;
        let eligible = bookings.iter().find(|b| {
            b.listing_id == listing_id
                && b.owner == viewer.email
                && b.status == BookingStatus::Accepted
        });
        let Some(booking) = eligible else {
            return Err(AirbrbError::NotPermitted {
                reason: format!("{viewer} has no accepted booking for listing {listing_id}"),
            });
        };

        self.client
            .make_review(listing_id, &booking.id, review)
            .await?;
        info!(listing_id, booking_id = %booking.id, "review posted");
        Ok(booking.id.clone())
    }
}

use std::sync::Arc;

use chrono::NaiveDate;
use tracing::{debug, info};

use crate::domain::booking::{Booking, BookingStatus};
use crate::domain::dates::{self, DateRange};
use crate::domain::identity::Identity;
use crate::domain::listing::Listing;
use crate::domain::stats::{self, ListingStats};
use crate::error::{AirbrbError, Result};
use crate::ports::marketplace::MarketplaceClient;

/// Everything the host dashboard shows for one listing: the listing, its
/// booking requests (request order preserved), and the derived statistics.
#[derive(Debug, Clone)]
pub struct DashboardView {
    pub listing: Listing,
    pub bookings: Vec<Booking>,
    pub stats: ListingStats,
}

impl DashboardView {
    /// Rows the owner can still act on.
    pub fn actionable(&self) -> Vec<&Booking> {
        stats::actionable_bookings(&self.bookings)
    }
}

impl std::fmt::Display for DashboardView {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "# Booking requests - {}", self.listing.title)?;
        writeln!(f, "{}", self.stats)?;
        if self.bookings.is_empty() {
            writeln!(f, "No booking requests yet.")?;
        } else {
            for booking in &self.bookings {
                writeln!(f, "{booking}")?;
            }
        }
        Ok(())
    }
}

/// Host-side operations for one listing's booking requests. Every mutation
/// is followed by an awaited refetch and a recompute, never by patching the
/// previous snapshot.
pub struct BookingDesk {
    client: Arc<dyn MarketplaceClient>,
}

impl BookingDesk {
    pub fn new(client: Arc<dyn MarketplaceClient>) -> Self {
        Self { client }
    }

    /// Fetch the listing and its bookings and derive the dashboard view.
    /// Only the listing's owner may load it.
    pub async fn load(
        &self,
        viewer: &Identity,
        listing_id: &str,
        today: NaiveDate,
    ) -> Result<DashboardView> {
        let listing = self.client.fetch_listing_details(listing_id).await?;
        if !listing.is_owned_by(&viewer.email) {
            return Err(AirbrbError::NotPermitted {
                reason: format!("{viewer} does not own listing {listing_id}"),
            });
        }

        let all = self.client.fetch_bookings().await?;
        let bookings: Vec<Booking> = all
            .into_iter()
            .filter(|b| b.listing_id == listing_id)
            .collect();
        let stats = stats::compute_listing_stats(&listing, &bookings, today);
        debug!(
            listing_id,
            requests = bookings.len(),
            pending = stats.pending_requests,
            "dashboard loaded"
        );
        Ok(DashboardView {
            listing,
            bookings,
            stats,
        })
    }

    /// Accept a pending booking, then reload the dashboard from the
    /// backend so the returned view reflects what is actually stored.
    pub async fn accept(
        &self,
        viewer: &Identity,
        listing_id: &str,
        booking_id: &str,
        today: NaiveDate,
    ) -> Result<DashboardView> {
        self.transition(viewer, listing_id, booking_id, BookingStatus::Accepted, today)
            .await
    }

    /// Decline a pending booking, then reload.
    pub async fn decline(
        &self,
        viewer: &Identity,
        listing_id: &str,
        booking_id: &str,
        today: NaiveDate,
    ) -> Result<DashboardView> {
        self.transition(viewer, listing_id, booking_id, BookingStatus::Declined, today)
            .await
    }

    async fn transition(
        &self,
        viewer: &Identity,
        listing_id: &str,
        booking_id: &str,
        next: BookingStatus,
        today: NaiveDate,
    ) -> Result<DashboardView> {
        let view = self.load(viewer, listing_id, today).await?;
        let Some(booking) = view.bookings.iter().find(|b| b.id == booking_id) else {
            return Err(AirbrbError::BookingNotFound {
                id: booking_id.to_string(),
            });
        };
        if !booking.status.can_transition_to(next) {
            // Accepted and declined are terminal; the backend would accept
            // the call, the desk does not.
            return Err(AirbrbError::NotPermitted {
                reason: format!("booking {booking_id} is already {}", booking.status),
            });
        }

        match next {
            BookingStatus::Accepted => self.client.accept_booking(booking_id).await?,
            BookingStatus::Declined => self.client.deny_booking(booking_id).await?,
            // can_transition_to already refused this
            BookingStatus::Pending => {
                return Err(AirbrbError::NotPermitted {
                    reason: "bookings cannot move back to pending".into(),
                });
            }
        }
        info!(listing_id, booking_id, status = %next, "booking request resolved");

        // Read-after-write by refetch, not by patching the local copy.
        self.load(viewer, listing_id, today).await
    }

    /// Expand host-entered ranges and publish the listing with the flat
    /// day list. At least one day must survive expansion.
    pub async fn publish(&self, listing_id: &str, ranges: &[DateRange]) -> Result<Vec<String>> {
        let flat_dates = dates::expand_ranges(ranges);
        if flat_dates.is_empty() {
            return Err(AirbrbError::InvalidStay {
                reason: "availability must contain at least one day".into(),
            });
        }
        self.client.publish_listing(listing_id, &flat_dates).await?;
        info!(listing_id, days = flat_dates.len(), "listing published");
        Ok(flat_dates)
    }

    pub async fn unpublish(&self, listing_id: &str) -> Result<()> {
        self.client.unpublish_listing(listing_id).await?;
        info!(listing_id, "listing unpublished");
        Ok(())
    }

    /// The viewer's own listings: fetch every id, then each detail, and
    /// keep the ones they own.
    pub async fn hosted_listings(&self, viewer: &Identity) -> Result<Vec<Listing>> {
        let ids = self.client.fetch_listings().await?;
        let mut mine = Vec::new();
        for id in ids {
            let listing = self.client.fetch_listing_details(&id).await?;
            if listing.is_owned_by(&viewer.email) {
                mine.push(listing);
            }
        }
        Ok(mine)
    }
}

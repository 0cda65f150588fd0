use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A listing as this crate consumes it. The backend carries more fields
/// (address, photos, amenity metadata); everything not needed for booking
/// and dashboard computation is left to the view layer. Optional fields are
/// defaulted here, at the parse boundary, so downstream code never
/// re-checks presence.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Listing {
    /// Injected by the REST adapter: `GET /listings/:id` returns the body
    /// without its own id.
    #[serde(default)]
    pub id: String,
    /// Host identifier (their account email).
    pub owner: String,
    pub title: String,
    /// Price per night.
    pub price: f64,
    #[serde(default)]
    pub posted_on: Option<NaiveDate>,
    /// Flattened bookable days, `YYYY-MM-DD`.
    #[serde(default)]
    pub availability: Vec<String>,
    #[serde(default)]
    pub published: bool,
}

impl Listing {
    pub fn is_owned_by(&self, email: &str) -> bool {
        self.owner == email
    }
}

impl std::fmt::Display for Listing {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} - ${}/night", self.title, self.price)?;
        if self.published {
            write!(f, " | published ({} days available)", self.availability.len())?;
        } else {
            write!(f, " | unpublished")?;
        }
        Ok(())
    }
}

/// A guest review submitted against a completed booking.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Review {
    pub score: f64,
    pub reviewer: String,
    pub comment: String,
}

impl Review {
    pub const MIN_SCORE: f64 = 1.0;
    pub const MAX_SCORE: f64 = 5.0;

    pub fn score_in_range(&self) -> bool {
        (Self::MIN_SCORE..=Self::MAX_SCORE).contains(&self.score)
    }
}

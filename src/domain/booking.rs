use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use super::dates::DATE_FORMAT;

/// Lifecycle state of a booking request. `Pending` is the only state the
/// listing owner can act on; `Accepted` and `Declined` are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BookingStatus {
    Pending,
    Accepted,
    Declined,
}

impl BookingStatus {
    pub fn is_actionable(self) -> bool {
        self == Self::Pending
    }

    pub fn is_terminal(self) -> bool {
        !self.is_actionable()
    }

    /// Whether the owner-triggered transition `self -> next` is allowed.
    /// Nothing transitions out of a terminal state, and nothing moves back
    /// to pending.
    pub fn can_transition_to(self, next: Self) -> bool {
        self == Self::Pending && next != Self::Pending
    }
}

impl std::fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Pending => write!(f, "pending"),
            Self::Accepted => write!(f, "accepted"),
            Self::Declined => write!(f, "declined"),
        }
    }
}

/// A guest's booking request as the backend stores it. `date_range` is the
/// full inclusive day list (both boundary days), so a stay of N nights
/// carries N + 1 entries.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Booking {
    pub id: String,
    pub listing_id: String,
    /// Guest identifier (their account email).
    pub owner: String,
    pub status: BookingStatus,
    pub date_range: Vec<String>,
    pub total_price: f64,
}

impl Booking {
    pub fn first_day(&self) -> Option<&str> {
        self.date_range.first().map(String::as_str)
    }

    pub fn last_day(&self) -> Option<&str> {
        self.date_range.last().map(String::as_str)
    }

    /// Nights occupied: one less than the inclusive day count.
    #[allow(clippy::cast_possible_truncation)]
    pub fn nights(&self) -> u32 {
        self.date_range.len().saturating_sub(1) as u32
    }

    pub fn is_actionable(&self) -> bool {
        self.status.is_actionable()
    }

    /// Count of this booking's days that fall in `year`. Days that fail to
    /// parse (the backend should never produce any) count as outside every
    /// year.
    #[allow(clippy::cast_possible_truncation)]
    pub fn days_in_year(&self, year: i32) -> u32 {
        self.date_range
            .iter()
            .filter_map(|d| NaiveDate::parse_from_str(d, DATE_FORMAT).ok())
            .filter(|d| d.year() == year)
            .count() as u32
    }

    /// Whether any day of the stay falls in `year`. A stay spanning the new
    /// year touches both years.
    pub fn touches_year(&self, year: i32) -> bool {
        self.days_in_year(year) > 0
    }
}

/// One row of the host's booking-request table, formatted for display.
impl std::fmt::Display for Booking {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let span = match (self.first_day(), self.last_day()) {
            (Some(first), Some(last)) => {
                format!("{} - {}", display_date(first), display_date(last))
            }
            _ => "no dates".to_string(),
        };
        write!(
            f,
            "{} | {span} | {} nights | ${} | {}",
            self.owner,
            self.nights(),
            self.total_price,
            self.status
        )?;
        if self.is_actionable() {
            write!(f, " [accept/deny]")?;
        }
        Ok(())
    }
}

/// Reformat a canonical `YYYY-MM-DD` day as `DD/MM/YYYY` for table rows.
fn display_date(day: &str) -> String {
    NaiveDate::parse_from_str(day, DATE_FORMAT)
        .map_or_else(|_| day.to_string(), |d| d.format("%d/%m/%Y").to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn booking(status: BookingStatus, days: &[&str]) -> Booking {
        Booking {
            id: "booking-1".into(),
            listing_id: "123".into(),
            owner: "guest1@example.com".into(),
            status,
            date_range: days.iter().map(ToString::to_string).collect(),
            total_price: 400.0,
        }
    }

    #[test]
    fn nights_is_day_count_minus_one() {
        let b = booking(
            BookingStatus::Pending,
            &["2025-12-01", "2025-12-02", "2025-12-03"],
        );
        assert_eq!(b.nights(), 2);
    }

    #[test]
    fn nights_saturates_on_empty_range() {
        let b = booking(BookingStatus::Pending, &[]);
        assert_eq!(b.nights(), 0);
        assert!(b.first_day().is_none());
        assert!(b.last_day().is_none());
    }

    #[test]
    fn days_in_year_counts_both_boundary_days() {
        let b = booking(
            BookingStatus::Accepted,
            &["2025-12-01", "2025-12-03", "2025-12-04"],
        );
        assert_eq!(b.days_in_year(2025), 3);
        assert_eq!(b.days_in_year(2024), 0);
    }

    #[test]
    fn cross_year_stay_touches_both_years() {
        let b = booking(
            BookingStatus::Accepted,
            &["2025-12-31", "2026-01-01", "2026-01-02"],
        );
        assert!(b.touches_year(2025));
        assert!(b.touches_year(2026));
        assert_eq!(b.days_in_year(2025), 1);
        assert_eq!(b.days_in_year(2026), 2);
    }

    #[test]
    fn only_pending_is_actionable() {
        assert!(BookingStatus::Pending.is_actionable());
        assert!(!BookingStatus::Accepted.is_actionable());
        assert!(!BookingStatus::Declined.is_actionable());
    }

    #[test]
    fn transitions_out_of_pending_only() {
        use BookingStatus::{Accepted, Declined, Pending};
        assert!(Pending.can_transition_to(Accepted));
        assert!(Pending.can_transition_to(Declined));
        assert!(!Pending.can_transition_to(Pending));
        assert!(!Accepted.can_transition_to(Declined));
        assert!(!Declined.can_transition_to(Accepted));
        assert!(!Accepted.can_transition_to(Pending));
    }

    #[test]
    fn status_serde_uses_lowercase() {
        let json = serde_json::to_string(&BookingStatus::Accepted).unwrap();
        assert_eq!(json, "\"accepted\"");
        let status: BookingStatus = serde_json::from_str("\"pending\"").unwrap();
        assert_eq!(status, BookingStatus::Pending);
    }

    #[test]
    fn booking_deserializes_camel_case_wire_shape() {
        let json = r#"{
            "id": "booking-2",
            "listingId": "123",
            "owner": "guest2@example.com",
            "status": "accepted",
            "dateRange": ["2025-12-10", "2025-12-11"],
            "totalPrice": 400
        }"#;
        let b: Booking = serde_json::from_str(json).unwrap();
        assert_eq!(b.listing_id, "123");
        assert_eq!(b.status, BookingStatus::Accepted);
        assert_eq!(b.nights(), 1);
        assert!((b.total_price - 400.0).abs() < f64::EPSILON);
    }

    #[test]
    fn display_row_formats_range_and_actions() {
        let b = booking(
            BookingStatus::Pending,
            &["2025-12-01", "2025-12-02", "2025-12-03"],
        );
        let s = b.to_string();
        assert!(s.contains("guest1@example.com"));
        assert!(s.contains("01/12/2025 - 03/12/2025"));
        assert!(s.contains("2 nights"));
        assert!(s.contains("$400"));
        assert!(s.contains("pending"));
        assert!(s.contains("[accept/deny]"));
    }

    #[test]
    fn display_row_hides_actions_for_terminal_states() {
        let b = booking(BookingStatus::Declined, &["2025-12-20", "2025-12-22"]);
        let s = b.to_string();
        assert!(s.contains("declined"));
        assert!(!s.contains("[accept/deny]"));
    }
}

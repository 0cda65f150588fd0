pub mod booking;
pub mod dates;
pub mod identity;
pub mod listing;
pub mod stats;
pub mod stay;

pub mod cache;
pub mod marketplace;

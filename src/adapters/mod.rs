pub mod cache;
pub mod rest;

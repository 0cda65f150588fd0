use std::time::Duration;

pub trait ListingCache: Send + Sync {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str, ttl: Duration);
    /// Drop a cached entry; used after a mutation so the next read refetches.
    fn invalidate(&self, key: &str);
}

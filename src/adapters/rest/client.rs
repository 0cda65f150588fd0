use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Method, RequestBuilder, StatusCode};
use serde::Deserialize;
use tracing::debug;
use url::Url;

use crate::config::types::{ApiConfig, CacheConfig};
use crate::domain::booking::Booking;
use crate::domain::listing::{Listing, Review};
use crate::error::{AirbrbError, Result};
use crate::ports::cache::ListingCache;
use crate::ports::marketplace::MarketplaceClient;

/// The marketplace backend wraps every response in a one-field envelope.
#[derive(Deserialize)]
struct ListingsEnvelope {
    listings: Vec<ListingRef>,
}

#[derive(Deserialize)]
struct ListingRef {
    id: serde_json::Value,
}

#[derive(Deserialize)]
struct ListingEnvelope {
    listing: Listing,
}

#[derive(Deserialize)]
struct BookingsEnvelope {
    bookings: Vec<Booking>,
}

#[derive(Deserialize)]
struct ErrorEnvelope {
    error: Option<String>,
}

/// reqwest implementation of [`MarketplaceClient`] against the Airbrb REST
/// backend. Listing details go through the cache; booking reads never do,
/// because dashboard consistency after accept/deny comes from refetching.
pub struct RestClient {
    http: Client,
    base_url: String,
    token: Option<String>,
    cache: Arc<dyn ListingCache>,
    listing_ttl: Duration,
}

impl RestClient {
    pub fn new(
        api: &ApiConfig,
        cache_config: &CacheConfig,
        cache: Arc<dyn ListingCache>,
    ) -> std::result::Result<Self, reqwest::Error> {
        let http = Client::builder()
            .timeout(Duration::from_secs(api.request_timeout_secs))
            .build()?;
        Ok(Self {
            http,
            base_url: api.base_url.clone(),
            token: api.token.clone(),
            cache,
            listing_ttl: Duration::from_secs(cache_config.listing_ttl_secs),
        })
    }

    fn endpoint(&self, path: &str) -> Result<Url> {
        Url::parse(&format!("{}{path}", self.base_url)).map_err(AirbrbError::Url)
    }

    /// Attach the bearer token when one is configured. The backend rejects
    /// unauthenticated mutations itself; reads work either way.
    fn authorized(&self, builder: RequestBuilder) -> RequestBuilder {
        match &self.token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    async fn send(&self, method: Method, path: &str, body: Option<serde_json::Value>) -> Result<String> {
        let url = self.endpoint(path)?;
        debug!(%url, %method, "marketplace request");

        let mut builder = self.authorized(self.http.request(method, url));
        if let Some(body) = body {
            builder = builder.json(&body);
        }
        let response = builder.send().await.map_err(AirbrbError::Http)?;

        let status = response.status();
        let text = response.text().await.map_err(AirbrbError::Http)?;
        if status.is_success() {
            return Ok(text);
        }

        // The backend reports failures as {"error": "..."}
        let message = serde_json::from_str::<ErrorEnvelope>(&text)
            .ok()
            .and_then(|e| e.error)
            .unwrap_or_else(|| status.to_string());
        if status == StatusCode::NOT_FOUND && path.starts_with("/listings/") {
            let id = path.rsplit('/').next().unwrap_or_default().to_string();
            return Err(AirbrbError::ListingNotFound { id });
        }
        Err(AirbrbError::Api {
            status: status.as_u16(),
            message,
        })
    }

    fn listing_cache_key(id: &str) -> String {
        format!("listing:{id}")
    }
}

#[async_trait]
impl MarketplaceClient for RestClient {
    async fn fetch_listings(&self) -> Result<Vec<String>> {
        let body = self.send(Method::GET, "/listings", None).await?;
        let envelope: ListingsEnvelope = serde_json::from_str(&body)?;
        // Ids arrive as JSON numbers; everything downstream treats them as
        // opaque strings.
        Ok(envelope
            .listings
            .into_iter()
            .map(|l| match l.id {
                serde_json::Value::String(s) => s,
                other => other.to_string(),
            })
            .collect())
    }

    async fn fetch_listing_details(&self, id: &str) -> Result<Listing> {
        let key = Self::listing_cache_key(id);
        if let Some(cached) = self.cache.get(&key) {
            debug!(listing_id = id, "listing cache hit");
            return Ok(serde_json::from_str(&cached)?);
        }

        let body = self.send(Method::GET, &format!("/listings/{id}"), None).await?;
        let envelope: ListingEnvelope = serde_json::from_str(&body)?;
        // The body arrives without its own id; inject it, as the response
        // envelope only keys listings by URL.
        let mut listing = envelope.listing;
        listing.id = id.to_string();

        if let Ok(serialized) = serde_json::to_string(&listing) {
            self.cache.set(&key, &serialized, self.listing_ttl);
        }
        Ok(listing)
    }

    async fn fetch_bookings(&self) -> Result<Vec<Booking>> {
        let body = self.send(Method::GET, "/bookings", None).await?;
        let envelope: BookingsEnvelope = serde_json::from_str(&body)?;
        Ok(envelope.bookings)
    }

    async fn make_booking(
        &self,
        listing_id: &str,
        date_range: &[String],
        total_price: f64,
    ) -> Result<()> {
        let body = serde_json::json!({
            "dateRange": date_range,
            "totalPrice": total_price,
        });
        self.send(Method::POST, &format!("/bookings/new/{listing_id}"), Some(body))
            .await?;
        Ok(())
    }

    async fn accept_booking(&self, booking_id: &str) -> Result<()> {
        self.send(
            Method::PUT,
            &format!("/bookings/accept/{booking_id}"),
            Some(serde_json::json!({})),
        )
        .await?;
        Ok(())
    }

    async fn deny_booking(&self, booking_id: &str) -> Result<()> {
        self.send(
            Method::PUT,
            &format!("/bookings/decline/{booking_id}"),
            Some(serde_json::json!({})),
        )
        .await?;
        Ok(())
    }

    async fn make_review(
        &self,
        listing_id: &str,
        booking_id: &str,
        review: &Review,
    ) -> Result<()> {
        let body = serde_json::json!({ "review": review });
        self.send(
            Method::PUT,
            &format!("/listings/{listing_id}/review/{booking_id}"),
            Some(body),
        )
        .await?;
        self.cache.invalidate(&Self::listing_cache_key(listing_id));
        Ok(())
    }

    async fn publish_listing(&self, listing_id: &str, flat_dates: &[String]) -> Result<()> {
        let body = serde_json::json!({ "availability": flat_dates });
        self.send(
            Method::PUT,
            &format!("/listings/publish/{listing_id}"),
            Some(body),
        )
        .await?;
        self.cache.invalidate(&Self::listing_cache_key(listing_id));
        Ok(())
    }

    async fn unpublish_listing(&self, listing_id: &str) -> Result<()> {
        self.send(
            Method::PUT,
            &format!("/listings/unpublish/{listing_id}"),
            Some(serde_json::json!({})),
        )
        .await?;
        self.cache.invalidate(&Self::listing_cache_key(listing_id));
        Ok(())
    }
}

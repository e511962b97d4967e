use reqwest::header::USER_AGENT;
use reqwest::StatusCode;
use serde_json::Value;
use tracing::{debug, info, warn};

use crate::config::{Config, BUNDLE, PAGE_LIMIT, PAGE_OFFSET, SECTION};
use crate::error::{AppError, Result};
use crate::types::RecommendResponse;
use crate::user_agent::UserAgentPool;

/// Result of one listing request. Only `Listings` carries rows onward.
#[derive(Debug)]
pub enum FetchOutcome {
    /// Non-empty `data.sections[0].data.item`.
    Listings(Vec<Value>),
    /// Sections present, but the first one has no items.
    NoItems,
    /// No `sections` at all.
    NoSections,
    /// Any status other than 200.
    BadStatus(StatusCode),
    /// Transport failure or an undecodable body.
    Failed(AppError),
}

impl FetchOutcome {
    pub fn label(&self) -> &'static str {
        match self {
            FetchOutcome::Listings(_) => "listings",
            FetchOutcome::NoItems => "no_items",
            FetchOutcome::NoSections => "no_sections",
            FetchOutcome::BadStatus(_) => "bad_status",
            FetchOutcome::Failed(_) => "failed",
        }
    }
}

/// Issues one GET per shop against the recommend endpoint, rotating the
/// `User-Agent` on every request. Never retries.
pub struct ListingFetcher {
    client: reqwest::Client,
    api_url: String,
    user_agents: UserAgentPool,
}

impl ListingFetcher {
    pub fn new(cfg: &Config) -> Result<Self> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = cfg.request_timeout {
            builder = builder.timeout(timeout);
        }
        Ok(Self {
            client: builder.build()?,
            api_url: cfg.api_url.clone(),
            user_agents: UserAgentPool::default(),
        })
    }

    pub async fn fetch(&self, shop_id: &str) -> FetchOutcome {
        let outcome = match self.request(shop_id).await {
            Ok(outcome) => outcome,
            Err(e) => FetchOutcome::Failed(e),
        };

        match &outcome {
            FetchOutcome::Listings(items) => {
                debug!(shop_id, items = items.len(), "listings received");
            }
            FetchOutcome::NoItems => info!(shop_id, "No items found for seller {shop_id}. Skipping."),
            FetchOutcome::NoSections => info!(shop_id, "No data found for seller {shop_id}. Skipping."),
            FetchOutcome::BadStatus(status) => warn!(
                shop_id,
                status = status.as_u16(),
                "Request for seller {shop_id} was not successful. Status Code: {status}"
            ),
            FetchOutcome::Failed(e) => warn!(shop_id, "Request error {e}. Skipping."),
        }
        outcome
    }

    async fn request(&self, shop_id: &str) -> Result<FetchOutcome> {
        let limit = PAGE_LIMIT.to_string();
        let offset = PAGE_OFFSET.to_string();
        let query = [
            ("bundle", BUNDLE),
            ("limit", limit.as_str()),
            ("offset", offset.as_str()),
            ("section", SECTION),
            ("shopid", shop_id),
        ];

        let resp = self
            .client
            .get(&self.api_url)
            .header(USER_AGENT, self.user_agents.random())
            .query(&query)
            .send()
            .await?;

        let status = resp.status();
        // Other 2xx codes included: any non-200 is skipped without pacing.
        if status != StatusCode::OK {
            return Ok(FetchOutcome::BadStatus(status));
        }

        let bytes = resp.bytes().await?;
        let body: RecommendResponse = serde_json::from_slice(&bytes)?;
        Ok(classify_response(body))
    }
}

/// Pick the item list out of a 200 response body.
pub fn classify_response(body: RecommendResponse) -> FetchOutcome {
    let Some(sections) = body.data.and_then(|d| d.sections).filter(|s| !s.is_empty()) else {
        return FetchOutcome::NoSections;
    };

    let items = sections
        .into_iter()
        .next()
        .and_then(|s| s.data)
        .and_then(|d| d.item)
        .unwrap_or_default();

    if items.is_empty() {
        FetchOutcome::NoItems
    } else {
        FetchOutcome::Listings(items)
    }
}

use std::time::Duration;

use anyhow::Result;
use serde_json::{json, Value};
use tracing::{info, instrument, warn};

use crate::models::{BrandData, BrandFetch};

/// Client for the external brand-research service. Brand data is
/// supplementary, so every failure mode collapses to an empty `BrandData`
/// with the `degraded` flag set; a single attempt, no retries.
pub struct BrandDataClient {
    client: reqwest::Client,
    research_url: String,
}

impl BrandDataClient {
    pub fn new(research_url: &str, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            research_url: research_url.to_string(),
        })
    }

    #[instrument(skip(self))]
    pub async fn fetch(&self, brand_name: &str) -> BrandFetch {
        match self.try_fetch(brand_name).await {
            Ok(data) => {
                info!("Fetched {} brand metrics for {}", data.metrics.len(), brand_name);
                BrandFetch {
                    data,
                    degraded: false,
                }
            }
            Err(e) => {
                warn!("Brand research unavailable for {}: {}", brand_name, e);
                BrandFetch {
                    data: BrandData::empty(brand_name),
                    degraded: true,
                }
            }
        }
    }

    async fn try_fetch(&self, brand_name: &str) -> Result<BrandData> {
        let response = self
            .client
            .post(&self.research_url)
            .json(&json!({ "brand_name": brand_name }))
            .send()
            .await?
            .error_for_status()?;

        let body: Value = response.json().await?;

        // The research service answered but may have nothing structured to
        // say; sparse data is valid input for the analyzer.
        let metrics = match body {
            Value::Object(map) => map,
            _ => serde_json::Map::new(),
        };

        Ok(BrandData {
            brand_name: brand_name.to_string(),
            metrics,
        })
    }
}

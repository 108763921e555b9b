mod bounties;
mod brand_data;
mod weaknesses;

pub use bounties::{fallback_bounties, parse_bounties, BountyGenerator, BOUNTY_COUNT};
pub use brand_data::BrandDataClient;
pub use weaknesses::{fallback_weaknesses, parse_weaknesses, WeaknessAnalyzer};

use std::sync::Arc;

use chrono::Utc;
use tracing::{info, instrument};

use crate::models::{BountyResponse, Weakness};
use crate::tools::llm::CompletionBackend;

/// Sequences brand-data fetch, weakness analysis, and bounty generation for
/// one request. Each stage self-heals via its fallback, so the only failure
/// a caller can see is an invalid brand name.
pub struct BountyPipeline {
    brand_client: BrandDataClient,
    analyzer: WeaknessAnalyzer,
    generator: BountyGenerator,
    agent_address: String,
}

impl BountyPipeline {
    pub fn new(
        brand_client: BrandDataClient,
        backend: Arc<dyn CompletionBackend>,
        agent_address: &str,
    ) -> Self {
        Self {
            brand_client,
            analyzer: WeaknessAnalyzer::new(backend.clone()),
            generator: BountyGenerator::new(backend),
            agent_address: agent_address.to_string(),
        }
    }

    #[instrument(skip(self))]
    pub async fn run(&self, brand_name: &str) -> BountyResponse {
        let brand_name = brand_name.trim();
        if brand_name.is_empty() {
            return BountyResponse::failure(
                brand_name,
                "brand_name must be a non-empty string",
                &self.agent_address,
            );
        }

        let fetch = self.brand_client.fetch(brand_name).await;
        if fetch.degraded {
            info!("Continuing with empty brand data for {}", brand_name);
        }

        let weaknesses = self.analyzer.analyze(&fetch.data, brand_name).await;
        let bounties = self.generator.generate(&weaknesses, brand_name).await;

        info!("Generated {} bounties for {}", bounties.len(), brand_name);

        BountyResponse {
            success: true,
            brand_name: brand_name.to_string(),
            bounties,
            analysis_summary: summarize(brand_name, &weaknesses),
            timestamp: Utc::now(),
            agent_address: self.agent_address.clone(),
            error: None,
        }
    }
}

fn summarize(brand_name: &str, weaknesses: &[Weakness]) -> String {
    let labels = weaknesses
        .iter()
        .map(|w| w.label.as_str())
        .collect::<Vec<_>>()
        .join(", ");
    format!("Top weaknesses identified for {}: {}.", brand_name, labels)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Weakness;

    #[test]
    fn summary_lists_weaknesses_in_ranked_order() {
        let weaknesses = vec![
            Weakness::new("Customer service", "slow replies"),
            Weakness {
                label: "Brand awareness".to_string(),
                evidence: None,
            },
        ];
        assert_eq!(
            summarize("Acme", &weaknesses),
            "Top weaknesses identified for Acme: Customer service, Brand awareness."
        );
    }
}

use std::sync::Arc;

use serde_json::Value;
use tracing::{info, instrument, warn};

use crate::models::{BrandData, Weakness};
use crate::tools::llm::CompletionBackend;

const MAX_WEAKNESSES: usize = 5;

/// Derives a ranked list of brand weaknesses from brand data via a
/// reasoning call. All failure is absorbed: a failed or unparseable call
/// routes to a deterministic fallback set, so the result is never empty.
pub struct WeaknessAnalyzer {
    backend: Arc<dyn CompletionBackend>,
}

impl WeaknessAnalyzer {
    pub fn new(backend: Arc<dyn CompletionBackend>) -> Self {
        Self { backend }
    }

    #[instrument(skip(self, brand_data))]
    pub async fn analyze(&self, brand_data: &BrandData, brand_name: &str) -> Vec<Weakness> {
        let data_json = serde_json::to_string_pretty(&Value::Object(brand_data.metrics.clone()))
            .unwrap_or_else(|_| "{}".to_string());

        let prompt = format!(
            r#"You are a brand analyst. Identify the 3 to 5 biggest weaknesses of the brand "{}" based on the following performance data:

{}

Requirements:
- Return one weakness per line in the form "label: short supporting evidence"
- Order the list from most to least important
- If the data is sparse, reason from general knowledge of the brand
- No numbering, bullets, or extra commentary"#,
            brand_name, data_json
        );

        match self.backend.complete(&prompt).await {
            Ok(response) => {
                let weaknesses = parse_weaknesses(&response);
                if weaknesses.is_empty() {
                    warn!("No parseable weaknesses for {}, using fallback set", brand_name);
                    fallback_weaknesses()
                } else {
                    info!("Identified {} weaknesses for {}", weaknesses.len(), brand_name);
                    weaknesses
                }
            }
            Err(e) => {
                warn!("Weakness analysis failed for {}: {}", brand_name, e);
                fallback_weaknesses()
            }
        }
    }
}

/// Fixed weakness set used when the reasoning service is unavailable or
/// returns nothing usable. Deterministic so degraded output is reproducible.
pub fn fallback_weaknesses() -> Vec<Weakness> {
    vec![
        Weakness::new(
            "Customer service",
            "Slow or inconsistent responses are the most common complaint across brands",
        ),
        Weakness::new(
            "Brand awareness",
            "Limited organic reach outside the existing customer base",
        ),
        Weakness::new(
            "Online reputation",
            "Few recent reviews and little fresh user-generated content",
        ),
    ]
}

/// Extracts weakness candidates from free-form completion text. Tolerates
/// bullets, numbering, and section headers; keeps at most the top
/// `MAX_WEAKNESSES` lines in their original (ranked) order.
pub fn parse_weaknesses(text: &str) -> Vec<Weakness> {
    text.lines()
        .map(|line| strip_list_markers(line.trim()))
        .filter_map(|line| {
            let (label, evidence) = match line.split_once(':') {
                Some((label, evidence)) => (label.trim(), Some(evidence.trim())),
                None => (line, None),
            };
            if label.len() < 3 || label.eq_ignore_ascii_case("weaknesses") {
                return None;
            }
            Some(Weakness {
                label: label.to_string(),
                evidence: evidence.filter(|e| !e.is_empty()).map(str::to_string),
            })
        })
        .take(MAX_WEAKNESSES)
        .collect()
}

fn strip_list_markers(line: &str) -> &str {
    let line = line.trim_start_matches(['-', '*', '•']).trim();
    // Numbered prefixes like "1." or "2)"
    let stripped = line.trim_start_matches(|c: char| c.is_ascii_digit());
    if stripped.len() < line.len() {
        stripped.trim_start_matches(['.', ')']).trim()
    } else {
        line
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_label_and_evidence_lines() {
        let text = "Customer support: long response times on social channels\nPricing transparency: fees surface late in checkout";
        let weaknesses = parse_weaknesses(text);
        assert_eq!(weaknesses.len(), 2);
        assert_eq!(weaknesses[0].label, "Customer support");
        assert_eq!(
            weaknesses[0].evidence.as_deref(),
            Some("long response times on social channels")
        );
        assert_eq!(weaknesses[1].label, "Pricing transparency");
    }

    #[test]
    fn tolerates_bullets_numbering_and_headers() {
        let text = "Weaknesses:\n1. Slow shipping: frequent delivery complaints\n- Weak social presence\n* Low review volume: under 10 reviews per month";
        let weaknesses = parse_weaknesses(text);
        assert_eq!(weaknesses.len(), 3);
        assert_eq!(weaknesses[0].label, "Slow shipping");
        assert_eq!(weaknesses[1].label, "Weak social presence");
        assert_eq!(weaknesses[1].evidence, None);
        assert_eq!(weaknesses[2].label, "Low review volume");
    }

    #[test]
    fn discards_short_candidates_and_caps_the_list() {
        let text = "ok\nA: x\nFirst weakness: a\nSecond weakness: b\nThird weakness: c\nFourth weakness: d\nFifth weakness: e\nSixth weakness: f";
        let weaknesses = parse_weaknesses(text);
        assert_eq!(weaknesses.len(), 5);
        assert_eq!(weaknesses[0].label, "First weakness");
        assert_eq!(weaknesses[4].label, "Fifth weakness");
    }

    #[test]
    fn empty_text_yields_no_candidates() {
        assert!(parse_weaknesses("").is_empty());
        assert!(parse_weaknesses("\n  \n").is_empty());
    }

    #[test]
    fn fallback_set_is_deterministic_and_non_empty() {
        let first = fallback_weaknesses();
        let second = fallback_weaknesses();
        assert_eq!(first, second);
        assert_eq!(first.len(), 3);
        assert_eq!(first[0].label, "Customer service");
        assert_eq!(first[1].label, "Brand awareness");
        assert_eq!(first[2].label, "Online reputation");
    }
}

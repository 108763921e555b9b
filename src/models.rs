use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BountyRequest {
    pub brand_name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatRequest {
    pub text: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatResponse {
    pub text: String,
}

/// Brand performance data as returned by the brand-research service.
/// The metric shape is upstream-defined, so it stays a loose JSON mapping;
/// downstream stages must tolerate sparse or empty metrics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BrandData {
    pub brand_name: String,
    pub metrics: Map<String, Value>,
}

impl BrandData {
    pub fn empty(brand_name: &str) -> Self {
        Self {
            brand_name: brand_name.to_string(),
            metrics: Map::new(),
        }
    }
}

/// Fetch result with a soft-failure indicator. A degraded fetch carries
/// empty metrics instead of an error so the pipeline keeps going.
#[derive(Debug, Clone)]
pub struct BrandFetch {
    pub data: BrandData,
    pub degraded: bool,
}

/// A single brand weakness, ranked by position (most important first).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Weakness {
    pub label: String,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub evidence: Option<String>,
}

impl Weakness {
    pub fn new(label: &str, evidence: &str) -> Self {
        Self {
            label: label.to_string(),
            evidence: Some(evidence.to_string()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Category {
    #[serde(rename = "Social Media")]
    SocialMedia,
    Reviews,
    #[serde(rename = "Content Creation")]
    ContentCreation,
    Community,
    #[serde(rename = "Product Testing")]
    ProductTesting,
    Referral,
    Other,
}

impl Category {
    /// Maps arbitrary upstream text to the nearest known category.
    /// Unrecognized input lands in `Other` rather than failing.
    pub fn coerce(raw: &str) -> Self {
        let raw = raw.trim().to_ascii_lowercase();
        if raw.contains("social") {
            Self::SocialMedia
        } else if raw.contains("review") {
            Self::Reviews
        } else if raw.contains("content") || raw.contains("creation") {
            Self::ContentCreation
        } else if raw.contains("community") {
            Self::Community
        } else if raw.contains("test") || raw.contains("product") {
            Self::ProductTesting
        } else if raw.contains("refer") {
            Self::Referral
        } else {
            Self::Other
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    /// Case-normalized parse; anything outside the three levels is rejected
    /// so the caller can discard the candidate bounty.
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "easy" => Some(Self::Easy),
            "medium" => Some(Self::Medium),
            "hard" => Some(Self::Hard),
            _ => None,
        }
    }
}

/// A structured, incentivized task suggested to loyalty-program members.
/// All fields are required; candidates failing validation are discarded and
/// replaced by a template, never surfaced partially filled.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bounty {
    pub title: String,
    pub description: String,
    pub category: Category,
    pub difficulty: Difficulty,
    pub estimated_reward: String,
    pub target_audience: String,
    pub success_metrics: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BountyResponse {
    pub success: bool,
    pub brand_name: String,
    pub bounties: Vec<Bounty>,
    pub analysis_summary: String,
    pub timestamp: DateTime<Utc>,
    pub agent_address: String,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub error: Option<String>,
}

impl BountyResponse {
    pub fn failure(brand_name: &str, message: &str, agent_address: &str) -> Self {
        Self {
            success: false,
            brand_name: brand_name.to_string(),
            bounties: Vec::new(),
            analysis_summary: String::new(),
            timestamp: Utc::now(),
            agent_address: agent_address.to_string(),
            error: Some(message.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn category_coercion_maps_known_keywords() {
        assert_eq!(Category::coerce("Social media campaigns"), Category::SocialMedia);
        assert_eq!(Category::coerce("reviews"), Category::Reviews);
        assert_eq!(Category::coerce("CONTENT CREATION"), Category::ContentCreation);
        assert_eq!(Category::coerce(" community "), Category::Community);
        assert_eq!(Category::coerce("product testing"), Category::ProductTesting);
        assert_eq!(Category::coerce("referral program"), Category::Referral);
    }

    #[test]
    fn category_coercion_falls_back_to_other() {
        assert_eq!(Category::coerce("gardening"), Category::Other);
        assert_eq!(Category::coerce(""), Category::Other);
    }

    #[test]
    fn difficulty_parse_is_case_normalized() {
        assert_eq!(Difficulty::parse("easy"), Some(Difficulty::Easy));
        assert_eq!(Difficulty::parse(" MEDIUM "), Some(Difficulty::Medium));
        assert_eq!(Difficulty::parse("Hard"), Some(Difficulty::Hard));
        assert_eq!(Difficulty::parse("extreme"), None);
        assert_eq!(Difficulty::parse(""), None);
    }

    #[test]
    fn bounty_response_round_trips_through_json() {
        let response = BountyResponse {
            success: true,
            brand_name: "Acme".to_string(),
            bounties: vec![
                Bounty {
                    title: "Review your latest Acme purchase".to_string(),
                    description: "Write an honest review".to_string(),
                    category: Category::Reviews,
                    difficulty: Difficulty::Easy,
                    estimated_reward: "50 points".to_string(),
                    target_audience: "Recent buyers".to_string(),
                    success_metrics: vec![
                        "Review published".to_string(),
                        "At least 100 words".to_string(),
                    ],
                },
                Bounty {
                    title: "Share the Acme story".to_string(),
                    description: "Post about Acme on social media".to_string(),
                    category: Category::SocialMedia,
                    difficulty: Difficulty::Medium,
                    estimated_reward: "A free sample".to_string(),
                    target_audience: "Active social media users".to_string(),
                    success_metrics: vec!["Post published".to_string()],
                },
            ],
            analysis_summary: "Top weaknesses identified for Acme: Reviews.".to_string(),
            timestamp: Utc::now(),
            agent_address: "bounty-suggestion-agent".to_string(),
            error: None,
        };

        let wire = serde_json::to_string(&response).unwrap();
        let parsed: BountyResponse = serde_json::from_str(&wire).unwrap();
        assert_eq!(parsed, response);
        assert_eq!(
            parsed.bounties[0].success_metrics,
            response.bounties[0].success_metrics
        );
    }

    #[test]
    fn category_serializes_with_human_readable_names() {
        let wire = serde_json::to_string(&Category::SocialMedia).unwrap();
        assert_eq!(wire, "\"Social Media\"");
        let wire = serde_json::to_string(&Category::ProductTesting).unwrap();
        assert_eq!(wire, "\"Product Testing\"");
    }
}

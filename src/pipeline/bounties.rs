use std::sync::Arc;

use tracing::{info, instrument, warn};

use crate::models::{Bounty, Category, Difficulty, Weakness};
use crate::tools::llm::CompletionBackend;

pub const BOUNTY_COUNT: usize = 6;

/// Turns ranked weaknesses into exactly six structured bounties via a
/// reasoning call. Invalid candidates are dropped, shortfalls are repaired
/// from brand-parameterized templates, and a total reasoning failure routes
/// entirely to the template set. Never fails outward.
pub struct BountyGenerator {
    backend: Arc<dyn CompletionBackend>,
}

impl BountyGenerator {
    pub fn new(backend: Arc<dyn CompletionBackend>) -> Self {
        Self { backend }
    }

    #[instrument(skip(self, weaknesses))]
    pub async fn generate(&self, weaknesses: &[Weakness], brand_name: &str) -> Vec<Bounty> {
        let weakness_list = weaknesses
            .iter()
            .map(|w| match &w.evidence {
                Some(evidence) => format!("- {}: {}", w.label, evidence),
                None => format!("- {}", w.label),
            })
            .collect::<Vec<_>>()
            .join("\n");

        let prompt = format!(
            r#"You are a loyalty-program designer. Create exactly 6 bounty tasks for the brand "{}" that address these weaknesses:

{}

Requirements:
- Cover varied categories from: Social Media, Reviews, Content Creation, Community, Product Testing, Referral
- Mix difficulty levels: Easy, Medium, Hard
- Separate bounties with a line containing only "---"
- Format each bounty exactly as:
Title: <short action-oriented title>
Description: <what the member should do and why it helps the brand>
Category: <one of the categories above>
Difficulty: <Easy, Medium or Hard>
Reward: <human-readable reward estimate>
Audience: <who this bounty is for>
Metrics: <success metrics, separated by ";">"#,
            brand_name, weakness_list
        );

        let mut bounties = match self.backend.complete(&prompt).await {
            Ok(response) => parse_bounties(&response),
            Err(e) => {
                warn!("Bounty generation failed for {}: {}", brand_name, e);
                Vec::new()
            }
        };

        // Highest-confidence candidates come first; truncate the excess.
        bounties.truncate(BOUNTY_COUNT);

        if bounties.len() < BOUNTY_COUNT {
            info!(
                "Filling {} bounty slots for {} from templates",
                BOUNTY_COUNT - bounties.len(),
                brand_name
            );
            for template in fallback_bounties(brand_name) {
                if bounties.len() == BOUNTY_COUNT {
                    break;
                }
                bounties.push(template);
            }
        }

        bounties
    }
}

/// Parses field-labeled bounty blocks out of free-form completion text.
/// A block missing any required field or carrying an unknown difficulty is
/// discarded; unknown categories are coerced rather than rejected.
pub fn parse_bounties(text: &str) -> Vec<Bounty> {
    text.split("---")
        .filter_map(parse_bounty_block)
        .collect()
}

fn parse_bounty_block(block: &str) -> Option<Bounty> {
    let title = field(block, "Title")?;
    let description = field(block, "Description")?;
    let category = Category::coerce(&field(block, "Category")?);
    let difficulty = Difficulty::parse(&field(block, "Difficulty")?)?;
    let estimated_reward = field(block, "Reward")?;
    let target_audience = field(block, "Audience")?;

    let success_metrics: Vec<String> = field(block, "Metrics")?
        .split(';')
        .map(|m| m.trim().to_string())
        .filter(|m| !m.is_empty())
        .collect();
    if success_metrics.is_empty() {
        return None;
    }

    Some(Bounty {
        title,
        description,
        category,
        difficulty,
        estimated_reward,
        target_audience,
        success_metrics,
    })
}

fn field(block: &str, name: &str) -> Option<String> {
    let prefix = format!("{}:", name);
    block
        .lines()
        .map(str::trim)
        .map(|line| line.trim_start_matches(['-', '*']).trim())
        .find(|line| {
            line.len() >= prefix.len()
                && line.as_bytes()[..prefix.len()].eq_ignore_ascii_case(prefix.as_bytes())
        })
        .map(|line| line[prefix.len()..].trim().to_string())
        .filter(|value| !value.is_empty())
}

/// Fixed template set, one bounty per category, parameterized with the
/// brand name. Used to repair shortfalls and as the complete output when
/// the reasoning service is unavailable.
pub fn fallback_bounties(brand_name: &str) -> Vec<Bounty> {
    vec![
        Bounty {
            title: format!("Share your {} story", brand_name),
            description: format!(
                "Post about your experience with {} on your favorite social platform and tag the official account.",
                brand_name
            ),
            category: Category::SocialMedia,
            difficulty: Difficulty::Easy,
            estimated_reward: "50 loyalty points".to_string(),
            target_audience: "Active social media users".to_string(),
            success_metrics: vec![
                "Post published with the brand tag".to_string(),
                "At least 10 engagements".to_string(),
            ],
        },
        Bounty {
            title: format!("Review your latest {} purchase", brand_name),
            description: format!(
                "Write an honest, detailed review of a recent {} product on a major review site.",
                brand_name
            ),
            category: Category::Reviews,
            difficulty: Difficulty::Easy,
            estimated_reward: "75 loyalty points".to_string(),
            target_audience: "Recent customers".to_string(),
            success_metrics: vec![
                "Review published".to_string(),
                "At least 100 words".to_string(),
            ],
        },
        Bounty {
            title: format!("Create a {} how-to video", brand_name),
            description: format!(
                "Record a short video showing how you use a {} product in daily life.",
                brand_name
            ),
            category: Category::ContentCreation,
            difficulty: Difficulty::Medium,
            estimated_reward: "A product voucher".to_string(),
            target_audience: "Content creators".to_string(),
            success_metrics: vec![
                "Video published".to_string(),
                "At least 60 seconds long".to_string(),
            ],
        },
        Bounty {
            title: format!("Help out in the {} community", brand_name),
            description: format!(
                "Answer three open questions from other {} customers in the community forum.",
                brand_name
            ),
            category: Category::Community,
            difficulty: Difficulty::Medium,
            estimated_reward: "100 loyalty points".to_string(),
            target_audience: "Experienced customers".to_string(),
            success_metrics: vec![
                "Three answers posted".to_string(),
                "At least one answer marked helpful".to_string(),
            ],
        },
        Bounty {
            title: format!("Beta test an upcoming {} product", brand_name),
            description: format!(
                "Join the {} beta program, use the product for a week, and file structured feedback.",
                brand_name
            ),
            category: Category::ProductTesting,
            difficulty: Difficulty::Hard,
            estimated_reward: "Early access plus 250 loyalty points".to_string(),
            target_audience: "Power users".to_string(),
            success_metrics: vec![
                "Feedback form completed".to_string(),
                "At least three issues or suggestions filed".to_string(),
            ],
        },
        Bounty {
            title: format!("Refer a friend to {}", brand_name),
            description: format!(
                "Share your personal referral link and bring a first-time customer to {}.",
                brand_name
            ),
            category: Category::Referral,
            difficulty: Difficulty::Medium,
            estimated_reward: "150 loyalty points for each referral".to_string(),
            target_audience: "Loyal customers".to_string(),
            success_metrics: vec![
                "Referral link shared".to_string(),
                "One completed first purchase".to_string(),
            ],
        },
    ]
}

use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use axum::{
    extract::State,
    http::StatusCode,
    response::Json,
    routing::{get, post},
    Router,
};
use bounty_agent::chat::extract_brand_name;
use bounty_agent::models::{BountyRequest, BountyResponse, ChatRequest, ChatResponse};
use bounty_agent::pipeline::{BountyPipeline, BrandDataClient};
use bounty_agent::tools::llm::OpenAiBackend;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::{info, instrument};
use uuid::Uuid;

const BRAND_FETCH_TIMEOUT: Duration = Duration::from_secs(10);
const REASONING_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Clone)]
struct AppState {
    pipeline: Arc<BountyPipeline>,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter("bounty_agent=debug,tower_http=info")
        .init();

    let port: u16 = std::env::var("PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(8007);
    let research_url = std::env::var("BRAND_RESEARCH_URL")
        .unwrap_or_else(|_| "http://localhost:8005/brand/research".to_string());
    let agent_address = std::env::var("AGENT_ADDRESS")
        .unwrap_or_else(|_| "bounty-suggestion-agent".to_string());

    let backend = Arc::new(OpenAiBackend::from_env(REASONING_TIMEOUT)?);
    let brand_client = BrandDataClient::new(&research_url, BRAND_FETCH_TIMEOUT)?;
    let pipeline = Arc::new(BountyPipeline::new(brand_client, backend, &agent_address));

    let app = Router::new()
        .route("/health", get(health))
        .route("/bounty/generate", post(generate_bounties))
        .route("/chat", post(chat))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(AppState { pipeline });

    let listener = tokio::net::TcpListener::bind(("0.0.0.0", port)).await?;
    info!("Bounty suggestion agent running on http://0.0.0.0:{}", port);

    axum::serve(listener, app).await?;
    Ok(())
}

async fn health() -> &'static str {
    "OK"
}

#[instrument(skip(state))]
async fn generate_bounties(
    State(state): State<AppState>,
    Json(req): Json<BountyRequest>,
) -> (StatusCode, Json<BountyResponse>) {
    let request_id = Uuid::new_v4();
    info!("Bounty request {} for brand {:?}", request_id, req.brand_name);

    let response = state.pipeline.run(&req.brand_name).await;
    let status = if response.success {
        StatusCode::OK
    } else {
        StatusCode::BAD_REQUEST
    };
    (status, Json(response))
}

#[instrument(skip(state))]
async fn chat(
    State(state): State<AppState>,
    Json(req): Json<ChatRequest>,
) -> Json<ChatResponse> {
    let Some(brand_name) = extract_brand_name(&req.text) else {
        return Json(ChatResponse {
            text: "Which brand should I suggest bounties for? Try something like \
                   \"generate bounties for Apple\"."
                .to_string(),
        });
    };

    info!("Chat request resolved to brand {:?}", brand_name);
    let response = state.pipeline.run(&brand_name).await;

    Json(ChatResponse {
        text: render_chat_reply(&response),
    })
}

fn render_chat_reply(response: &BountyResponse) -> String {
    if !response.success {
        return format!(
            "I could not generate bounties for that brand: {}",
            response.error.as_deref().unwrap_or("unknown error")
        );
    }

    let mut reply = format!("Bounty suggestions for {}\n", response.brand_name);
    reply.push_str(&format!("Analysis: {}\n", response.analysis_summary));
    for (i, bounty) in response.bounties.iter().enumerate() {
        reply.push_str(&format!(
            "{}. {} ({:?}) - {}\n",
            i + 1,
            bounty.title,
            bounty.difficulty,
            bounty.estimated_reward
        ));
    }
    reply
}

mod aggregation;
mod config;
mod cover_letter;
mod errors;
mod llm_client;
mod matching;
mod models;
mod resume;
mod routes;
mod sources;
mod state;

use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::aggregation::JobAggregator;
use crate::config::Config;
use crate::llm_client::LlmClient;
use crate::matching::{oracle, JobMatcher, JobPipeline, OracleScorer, ScoringOracle};
use crate::routes::build_router;
use crate::sources::{Pacing, USER_AGENT};
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!(
                "{}={}",
                env!("CARGO_PKG_NAME").replace('-', "_"),
                &config.rust_log
            ))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting JobBot API v{}", env!("CARGO_PKG_VERSION"));

    // One HTTP client shared by every source and the LLM client
    let http = reqwest::Client::builder().user_agent(USER_AGENT).build()?;

    let llm = config
        .openrouter_api_key
        .clone()
        .map(|key| LlmClient::new(http.clone(), key, config.llm_model.clone()));
    match &llm {
        Some(client) => info!("LLM client initialized (model: {})", client.model()),
        None => warn!(
            "OPENROUTER_API_KEY not set: heuristic-only ranking, no resume parsing or cover letters"
        ),
    }

    let oracle_pacing = if config.disable_pacing {
        Pacing::none()
    } else {
        Pacing::millis(oracle::DEFAULT_PACING_MS)
    };
    let scorer = llm.clone().map(|client| {
        let oracle: Arc<dyn ScoringOracle> = Arc::new(client);
        OracleScorer::new(oracle, oracle_pacing)
    });

    let aggregator = JobAggregator::from_config(&config, http);
    let pipeline = Arc::new(JobPipeline::new(aggregator, JobMatcher::new(scorer)));
    if config.disable_pacing {
        warn!("DISABLE_PACING is set: rate-limit delays are off");
    }

    let state = AppState {
        config: config.clone(),
        llm,
        pipeline,
    };

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

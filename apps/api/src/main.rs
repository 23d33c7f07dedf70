mod config;
mod embedding;
mod errors;
mod evaluation;
mod extraction;
mod llm_client;
mod routes;
mod state;
mod suggestions;

use anyhow::{Context, Result};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::embedding::{Embedder, HashEmbedder, HttpEmbedder};
use crate::evaluation::pipeline::Evaluator;
use crate::evaluation::scoring::CompositeScorer;
use crate::llm_client::LlmClient;
use crate::routes::build_router;
use crate::state::AppState;
use crate::suggestions::{DisabledSuggestions, LlmSuggestionGenerator, SuggestionGenerator};

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Screener API v{}", env!("CARGO_PKG_VERSION"));

    let embedder = build_embedder(&config)?;
    info!("Embedder initialized (backend: {})", embedder.name());

    let suggester = build_suggester(&config)?;

    let scorer = CompositeScorer::new(config.weights, embedder);
    info!("Score weights: {:?}", scorer.weights());

    let state = AppState {
        evaluator: Arc::new(Evaluator::new(scorer, suggester)),
    };

    let app = build_router(state, config.max_upload_bytes)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()); // TODO: restrict origins once the dashboard host is fixed

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

fn build_embedder(config: &Config) -> Result<Arc<dyn Embedder>> {
    match &config.embedding_url {
        Some(url) => {
            let embedder = HttpEmbedder::new(
                url.clone(),
                config.embedding_model.clone(),
                config.embedding_api_key.clone(),
            )
            .context("Failed to build embedding client")?;
            info!("Using embedding service at {url} (model: {})", config.embedding_model);
            Ok(Arc::new(embedder))
        }
        None => {
            let embedder = HashEmbedder::new(config.hash_embedding_dim);
            info!(
                "EMBEDDING_URL not set; using feature hashing ({} dims)",
                embedder.dimension()
            );
            Ok(Arc::new(embedder))
        }
    }
}

fn build_suggester(config: &Config) -> Result<Arc<dyn SuggestionGenerator>> {
    match &config.anthropic_api_key {
        Some(key) => {
            let llm = LlmClient::new(key.clone()).context("Failed to build LLM client")?;
            info!("LLM client initialized (model: {})", llm_client::MODEL);
            Ok(Arc::new(LlmSuggestionGenerator(llm)))
        }
        None => {
            info!("ANTHROPIC_API_KEY not set; suggestions disabled");
            Ok(Arc::new(DisabledSuggestions))
        }
    }
}

use std::sync::Arc;

use crate::evaluation::pipeline::Evaluator;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Evaluation pipeline with its embedder and suggestion service already wired.
    pub evaluator: Arc<Evaluator>,
}

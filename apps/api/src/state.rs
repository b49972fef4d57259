use std::sync::Arc;

use crate::config::Config;
use crate::llm_client::ModelGateway;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Model gateway. Default: the Anthropic client; tests install scripted
    /// fakes without touching environment variables.
    pub model: Arc<dyn ModelGateway>,
    pub config: Config,
}

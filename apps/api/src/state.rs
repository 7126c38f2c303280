use std::sync::Arc;

use crate::llm_client::LlmClient;
use crate::sheets::SheetsApi;
use crate::store::InterviewStore;

/// Shared application state injected into all route handlers via Axum
/// extractors. The two external collaborators of the import pipeline sit
/// behind trait objects so tests can swap in fakes.
#[derive(Clone)]
pub struct AppState {
    pub sheets: Arc<dyn SheetsApi>,
    pub store: Arc<dyn InterviewStore>,
    pub llm: LlmClient,
}

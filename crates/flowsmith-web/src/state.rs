//! Shared application state for the web server.
//!
//! [`AppState`] is wrapped in an `Arc` and shared across all request
//! handlers.  The compiler inside it is built once at startup and injected
//! here; handlers never construct their own.

use std::sync::Arc;
use std::time::Instant;

use flowsmith_compiler::WorkflowGenerator;

/// Shared state accessible from every Axum handler.
#[derive(Debug, Clone)]
pub struct AppState {
    /// The prompt-to-workflow compiler.
    pub generator: Arc<WorkflowGenerator>,

    /// When this state was created, for uptime reporting.
    pub started_at: Instant,
}

impl AppState {
    pub fn new(generator: Arc<WorkflowGenerator>) -> Self {
        Self {
            generator,
            started_at: Instant::now(),
        }
    }
}

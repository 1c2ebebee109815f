//! REST API handlers.
//!
//! Each compiler stage has its own endpoint.  Request bodies are extracted
//! as `Result<Json<_>, JsonRejection>` so a missing or malformed body is
//! answered with a 400 `{ "error": ... }` instead of Axum's default plain
//! text rejection.

use std::sync::Arc;

use axum::Json;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use serde::{Deserialize, Serialize};

use flowsmith_compiler::{
    NodeRef, WorkflowConnection, WorkflowDefinition, WorkflowNode, WorkflowTrigger,
};

use crate::error::ApiError;
use crate::state::AppState;

// ── request and response bodies ─────────────────────────────────────

/// Body for the endpoints that only need a prompt.
#[derive(Debug, Deserialize)]
pub struct PromptRequest {
    pub prompt: String,
}

/// Body for `POST /ai-workflow/generate/connections`.
///
/// `nodes` accepts full node objects or bare `{ "id": ... }` references.
#[derive(Debug, Deserialize)]
pub struct ConnectionsRequest {
    pub nodes: Vec<NodeRef>,
    pub prompt: String,
}

#[derive(Debug, Serialize)]
pub struct WorkflowResponse {
    pub workflow: WorkflowDefinition,
}

#[derive(Debug, Serialize)]
pub struct NodesResponse {
    pub nodes: Vec<WorkflowNode>,
}

#[derive(Debug, Serialize)]
pub struct ConnectionsResponse {
    pub connections: Vec<WorkflowConnection>,
}

#[derive(Debug, Serialize)]
pub struct TriggerResponse {
    pub trigger: WorkflowTrigger,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusResponse {
    pub status: &'static str,
    pub version: &'static str,
    pub uptime_seconds: u64,
}

// ── handlers ────────────────────────────────────────────────────────

/// `GET /api/status`
pub async fn status(State(state): State<Arc<AppState>>) -> Json<StatusResponse> {
    Json(StatusResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
        uptime_seconds: state.started_at.elapsed().as_secs(),
    })
}

/// `POST /ai-workflow/generate`
pub async fn generate_workflow(
    State(state): State<Arc<AppState>>,
    body: Result<Json<PromptRequest>, JsonRejection>,
) -> Result<Json<WorkflowResponse>, ApiError> {
    let Json(req) = body?;
    let workflow = state.generator.generate_workflow(&req.prompt);
    Ok(Json(WorkflowResponse { workflow }))
}

/// `POST /ai-workflow/generate/nodes`
pub async fn generate_nodes(
    State(state): State<Arc<AppState>>,
    body: Result<Json<PromptRequest>, JsonRejection>,
) -> Result<Json<NodesResponse>, ApiError> {
    let Json(req) = body?;
    let nodes = state.generator.compile_nodes(&req.prompt);
    tracing::debug!(count = nodes.len(), "compiled nodes");
    Ok(Json(NodesResponse { nodes }))
}

/// `POST /ai-workflow/generate/connections`
pub async fn generate_connections(
    State(state): State<Arc<AppState>>,
    body: Result<Json<ConnectionsRequest>, JsonRejection>,
) -> Result<Json<ConnectionsResponse>, ApiError> {
    let Json(req) = body?;
    let connections = state.generator.compile_connections(&req.nodes, &req.prompt);
    tracing::debug!(
        nodes = req.nodes.len(),
        connections = connections.len(),
        "compiled connections"
    );
    Ok(Json(ConnectionsResponse { connections }))
}

/// `POST /ai-workflow/generate/trigger`
pub async fn generate_trigger(
    State(state): State<Arc<AppState>>,
    body: Result<Json<PromptRequest>, JsonRejection>,
) -> Result<Json<TriggerResponse>, ApiError> {
    let Json(req) = body?;
    let trigger = state.generator.generate_trigger(&req.prompt);
    tracing::debug!(kind = ?trigger.kind(), "compiled trigger");
    Ok(Json(TriggerResponse { trigger }))
}

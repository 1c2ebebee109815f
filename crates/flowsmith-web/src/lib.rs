//! HTTP API for the Flowsmith workflow compiler.
//!
//! This crate exposes each compiler stage as its own JSON endpoint so a
//! caller can request the full workflow definition or any single artifact:
//!
//! | Method | Path | Body | Response |
//! |--------|------|------|----------|
//! | POST | `/ai-workflow/generate` | `{ prompt }` | `{ workflow }` |
//! | POST | `/ai-workflow/generate/nodes` | `{ prompt }` | `{ nodes }` |
//! | POST | `/ai-workflow/generate/connections` | `{ nodes, prompt }` | `{ connections }` |
//! | POST | `/ai-workflow/generate/trigger` | `{ prompt }` | `{ trigger }` |
//! | GET | `/api/status` | | `{ status, version, uptimeSeconds }` |

pub mod api;
pub mod error;
pub mod server;
pub mod state;

pub use error::ApiError;
pub use server::{WebServer, build_router};
pub use state::AppState;

use serde::{Deserialize, Serialize};

/// Web server configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WebConfig {
    /// The address to bind the HTTP server to.
    pub bind_addr: String,
    /// The port to listen on.
    pub port: u16,
}

impl Default for WebConfig {
    fn default() -> Self {
        Self {
            bind_addr: "127.0.0.1".into(),
            port: 3000,
        }
    }
}

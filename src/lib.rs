pub mod api;
pub mod config;
pub mod database;
pub mod embeddings;
pub mod errors;
pub mod llm;
pub mod logging;
pub mod models;
pub mod shadow;

/// Service name reported by the health endpoint and startup logs
pub const SERVICE_NAME: &str = "museboard-ai";

pub use config::AppConfig;
pub use errors::*;

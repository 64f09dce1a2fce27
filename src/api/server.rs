//! HTTP server implementation

use std::sync::Arc;

use tower_http::compression::CompressionLayer;
use tower_http::cors::Any;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::api::handlers::AppState;
use crate::api::routes;
use crate::config::AppConfig;
use crate::database::Database;
use crate::embeddings::EmbeddingClient;
use crate::llm::LlmClient;
use crate::Result;

/// Start the API server
pub async fn serve_api(config: &AppConfig, host: String, port: u16, enable_cors: bool) -> Result<()> {
    info!("🚀 Starting Museboard AI service...");

    // Construct each client once; orchestrators receive handles and never
    // perform global lookups.
    let database = Arc::new(Database::from_config(config).await?);
    let embedder = Arc::new(EmbeddingClient::from_config(config)?);
    let generator = Arc::new(LlmClient::from_config(config)?);

    let state = AppState::new(embedder, database.clone(), generator, database);

    let mut app = routes::api_routes(state)
        .layer(TraceLayer::new_for_http())
        .layer(CompressionLayer::new());

    if enable_cors {
        info!("✅ CORS enabled");
        let cors = CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any);
        app = app.layer(cors);
    }

    let addr = format!("{host}:{port}");
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    info!("🌐 API server listening on http://{}", addr);
    info!("");
    info!("Available endpoints:");
    info!("  GET  /                        - Health check");
    info!("  POST /chat                    - Shadow chat");
    info!("  POST /search                  - RAG search over saved items");
    info!("  POST /mission/enhance         - Mission statement refinement");
    info!("  POST /onboarding/suggestions  - Hero/interest suggestions");
    info!("  POST /content/curate          - Starter content curation");

    axum::serve(listener, app).await?;

    Ok(())
}

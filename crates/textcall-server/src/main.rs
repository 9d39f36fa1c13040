use std::sync::Arc;

use axum::{routing::get, Json, Router};
use serde::Serialize;
use tower_http::cors::CorsLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use textcall::Summarizer;
use textcall_server::adapters::{MemoryStore, OpenAiSummarizer};
use textcall_server::application::{IdentityService, RelayService, SignalingService};
use textcall_server::routes;
use textcall_server::services::summary_worker::SummaryWorker;
use textcall_server::AppState;

#[derive(Serialize)]
struct HealthCheck {
    status: String,
    message: String,
    version: String,
}

async fn health_check() -> Json<HealthCheck> {
    Json(HealthCheck {
        status: "ok".to_string(),
        message: "TextCall signaling core is running".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

#[shuttle_runtime::main]
async fn main(
    #[shuttle_runtime::Secrets] secrets: shuttle_runtime::SecretStore,
) -> shuttle_axum::ShuttleAxum {
    tracing::info!("📞 TextCall initializing...");

    // The realtime document store and its three collection adapters.
    let store = MemoryStore::new();
    let directory = Arc::new(store.user_directory());
    let calls = Arc::new(store.call_store());
    let messages = Arc::new(store.message_log());

    // Application services
    let identity = Arc::new(IdentityService::new(directory.clone()));
    let signaling = Arc::new(SignalingService::new(calls.clone(), directory.clone()));
    let relay = Arc::new(RelayService::new(messages.clone()));

    // Initialize summarizer if configured
    let summarizer: Option<Arc<dyn Summarizer>> = match secrets.get("OPENAI_API_KEY") {
        Some(key) => {
            tracing::info!("📝 Summarizer initialized");
            Some(Arc::new(OpenAiSummarizer::new(key)) as Arc<dyn Summarizer>)
        }
        None => {
            tracing::warn!("⚠️  No OPENAI_API_KEY set - summaries disabled");
            None
        }
    };

    // Start the summary pipeline, decoupled from any client session
    match summarizer.clone() {
        Some(summarizer) => {
            let worker = SummaryWorker::new(calls.clone(), messages.clone(), summarizer, None);
            let _handle = worker
                .start()
                .await
                .expect("Failed to start summary pipeline");
            tracing::info!("📝 Summary pipeline started");
        }
        None => tracing::warn!("⚠️  Summary pipeline disabled (no summarizer)"),
    }

    // Create application state
    let state = AppState {
        identity,
        signaling,
        relay,
        summarizer,
    };

    // OpenAPI documentation
    let openapi = routes::swagger::ApiDoc::openapi();

    // Build router with shared state
    let router = Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", openapi))
        .route("/health", get(health_check))
        .merge(routes::summary::router())
        .layer(CorsLayer::permissive())
        .with_state(state);

    tracing::info!("📚 Swagger UI: /swagger-ui");
    tracing::info!("✅ TextCall ready - ring, chat, hang up, summarize");

    Ok(router.into())
}

use axum::{
    Router,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use std::any::Any;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::trace::TraceLayer;

use crate::config::Args;
use crate::error::ApiError;
use crate::generator::OllamaGenerator;
use crate::handlers::{
    chat_handler, health_handler, logs_handler, method_not_allowed_handler, metrics_handler,
    not_found_handler,
};
use crate::rate_limit::RateLimiter;
use crate::state::AppState;
use crate::store::LogStore;

/// Routes plus the error/trace layers. Shared by `main` and the tests.
pub fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/v1/chat", post(chat_handler))
        .route("/v1/logs", get(logs_handler))
        .route("/health", get(health_handler))
        .route("/metrics", get(metrics_handler))
        .fallback(not_found_handler)
        .method_not_allowed_fallback(method_not_allowed_handler)
        .layer(CatchPanicLayer::custom(panic_response))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn panic_response(err: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = err.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "unknown panic".to_string()
    };
    ApiError::Internal(format!("handler panicked: {detail}")).into_response()
}

/// Wires the real collaborators from CLI/env configuration.
pub async fn build_state(args: &Args) -> anyhow::Result<Arc<AppState>> {
    let store = LogStore::connect(&args.database_url()).await?;

    let generator = OllamaGenerator::new(reqwest::Client::new(), &args.ollama_url, &args.model)
        .with_api_key(args.api_key.clone());

    let rate_limiter = RateLimiter::new(args.rate_limit, Duration::from_secs(args.rate_window));

    Ok(Arc::new(AppState::new(
        Arc::new(generator),
        store,
        rate_limiter,
        args.max_tokens,
    )))
}

pub async fn serve(args: Args) -> anyhow::Result<()> {
    let state = build_state(&args).await?;
    let store = state.store.clone();
    let app = build_router(state);

    let addr = format!("0.0.0.0:{}", args.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    tracing::info!("Gateway running on http://localhost:{}", args.port);
    tracing::info!("Forwarding questions to {} (model {})", args.ollama_url, args.model);
    tracing::info!(
        "Rate limit: {} requests per {} seconds",
        args.rate_limit,
        args.rate_window
    );

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await?;

    store.close().await;
    tracing::info!("Gateway stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
}

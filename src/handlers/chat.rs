use axum::{Json, extract::State, extract::rejection::JsonRejection};
use std::sync::Arc;
use std::time::Instant;

use super::extract::{ClientKey, JsonBody, request_issues};
use crate::error::ApiError;
use crate::metrics::{CHAT_REQUESTS, LOG_ENTRIES, MODEL_LATENCY, record_rejection};
use crate::models::{ChatRequest, ChatResponse};
use crate::state::AppState;
use crate::validation::{ValidationError, validate_question};

// rate check -> validate -> generate -> log -> answer
pub async fn chat_handler(
    State(state): State<Arc<AppState>>,
    client: ClientKey,
    payload: Result<JsonBody<ChatRequest>, JsonRejection>,
) -> Result<Json<ChatResponse>, ApiError> {
    let JsonBody(payload) = payload.map_err(|rejection| {
        let details = request_issues(&rejection);
        tracing::warn!(client = %client, ?details, "Validation error");
        record_rejection("invalid_request");
        ApiError::InvalidRequest(details)
    })?;

    CHAT_REQUESTS.inc();
    tracing::info!(
        "[CHAT] {} | IP: {} | Question: {}",
        chrono::Utc::now().to_rfc3339(),
        client,
        payload.question
    );

    if let Err(limited) = state.rate_limiter.check(client.as_str()) {
        tracing::warn!(
            client = %client,
            retry_after_secs = limited.retry_after_secs(),
            "Rate limit exceeded"
        );
        record_rejection("rate_limited");
        return Err(limited.into());
    }

    let question = validate_question(&payload.question).map_err(|err| {
        match &err {
            ValidationError::Empty => {
                tracing::warn!(client = %client, "Received empty question input.")
            }
            ValidationError::TooLong { chars } => tracing::warn!(
                client = %client,
                "Received suspiciously long question: {} chars.",
                chars
            ),
            ValidationError::InvalidContent => tracing::warn!(
                client = %client,
                "Received question with possible SQL injection attempt: {}",
                payload.question
            ),
        }
        record_rejection(err.reason());
        ApiError::from(err)
    })?;

    let start_time = Instant::now();
    let answer = state.generator.generate(question, state.max_tokens).await?;
    MODEL_LATENCY.observe(start_time.elapsed().as_secs_f64());

    let entry = state.store.append(question, &answer).await?;
    LOG_ENTRIES.inc();
    tracing::debug!(id = entry.id, "logged answer");

    Ok(Json(ChatResponse { answer }))
}

use serde::{Deserialize, Serialize};

use crate::store::LogEntry;

// POST /v1/chat body
#[derive(Deserialize, Serialize, Clone, Debug)]
pub struct ChatRequest {
    pub question: String,
}

// POST /v1/chat success body
#[derive(Deserialize, Serialize, Clone, Debug)]
pub struct ChatResponse {
    pub answer: String,
}

// GET /v1/logs body
#[derive(Serialize, Clone, Debug)]
pub struct LogsResponse {
    pub logs: Vec<LogEntry>,
}

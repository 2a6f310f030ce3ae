mod chat;
mod extract;
mod fallback;
mod health;
mod logs;
mod metrics;

pub use chat::chat_handler;
pub use extract::{ClientKey, JsonBody, request_issues};
pub use fallback::{method_not_allowed_handler, not_found_handler};
pub use health::health_handler;
pub use logs::logs_handler;
pub use metrics::metrics_handler;

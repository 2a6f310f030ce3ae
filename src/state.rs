use std::sync::Arc;

use crate::generator::TextGenerator;
use crate::rate_limit::RateLimiter;
use crate::store::LogStore;

// app's shared state
pub struct AppState {
    pub generator: Arc<dyn TextGenerator>,
    pub store: LogStore,
    pub rate_limiter: RateLimiter,
    pub max_tokens: u32, // generation-length cap per answer
}

impl AppState {
    pub fn new(
        generator: Arc<dyn TextGenerator>,
        store: LogStore,
        rate_limiter: RateLimiter,
        max_tokens: u32,
    ) -> Self {
        Self {
            generator,
            store,
            rate_limiter,
            max_tokens,
        }
    }
}

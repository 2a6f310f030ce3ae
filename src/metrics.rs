use lazy_static::lazy_static;
use prometheus::{
    Counter, CounterVec, Encoder, Histogram, TextEncoder, register_counter, register_counter_vec,
    register_histogram,
};

lazy_static! {
    pub static ref CHAT_REQUESTS: Counter =
        register_counter!("chat_requests_total", "Total number of chat requests").unwrap();
    pub static ref CHAT_REJECTIONS: CounterVec = register_counter_vec!(
        "chat_rejections_total",
        "Chat requests rejected before reaching the model",
        &["reason"]
    )
    .unwrap();
    pub static ref MODEL_LATENCY: Histogram = register_histogram!(
        "chat_model_latency_seconds",
        "Text generation latency in seconds"
    )
    .unwrap();
    pub static ref LOG_ENTRIES: Counter =
        register_counter!("chat_log_entries_total", "Question/answer pairs written").unwrap();
}

pub fn record_rejection(reason: &str) {
    CHAT_REJECTIONS.with_label_values(&[reason]).inc();
}

// Text exposition of the default registry
pub fn render() -> Result<String, prometheus::Error> {
    let encoder = TextEncoder::new();
    let metric_families = prometheus::gather();
    let mut buffer = Vec::new();
    encoder.encode(&metric_families, &mut buffer)?;
    String::from_utf8(buffer).map_err(|e| prometheus::Error::Msg(e.to_string()))
}

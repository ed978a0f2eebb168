pub fn init() {
    // Initialize tracing subscriber once, honoring RUST_LOG if set.
    // stdout carries the MCP stdio transport, so logs always go to stderr.
    let env_filter = std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}

/// Record one outbound API call: latency always, an error count on failure.
pub fn record_call(endpoint: &'static str, elapsed_ms: f64, ok: bool) {
    metrics::histogram!("raindrop_request_latency_ms", "endpoint" => endpoint).record(elapsed_ms);
    if !ok {
        metrics::counter!("raindrop_request_errors_total", "endpoint" => endpoint).increment(1);
    }
    tracing::debug!(endpoint, elapsed_ms, ok, "raindrop call finished");
}

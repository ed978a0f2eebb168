use std::time::Duration;

use crate::infra::config::RaindropConfig;

/// Build the reqwest client used for API calls. Timeouts come from config;
/// there is no retry layer.
pub fn make_http_client(cfg: &RaindropConfig) -> reqwest::Result<reqwest::Client> {
    reqwest::Client::builder()
        .connect_timeout(Duration::from_millis(cfg.connect_timeout_ms))
        .timeout(Duration::from_millis(cfg.timeout_ms))
        .build()
}

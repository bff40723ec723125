use std::time::Duration;

use once_cell::sync::Lazy;
use reqwest::Client;

const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// One connection-pooled client for all outbound calls. Slow endpoints
/// override the timeout per request.
static HTTP_CLIENT: Lazy<Client> = Lazy::new(|| {
    Client::builder()
        .timeout(Duration::from_secs(DEFAULT_TIMEOUT_SECS))
        .build()
        .expect("Failed to build HTTP client")
});

pub fn get_http_client() -> &'static Client {
    &HTTP_CLIENT
}

// Shared helpers for integration tests
//
// Each test binary pulls this in with `mod common;`.

#![allow(dead_code)]

use std::path::Path;
use std::sync::Once;
use storefront_e2e::{BrowserSession, SuiteConfig};

static TRACING: Once = Once::new();

/// Installs the suite log format once per test binary.
pub fn init_tracing() {
    TRACING.call_once(storefront_e2e::logging::init);
}

/// Headless chrome configuration against `base_url`, writing artifacts
/// under `output_dir`.
pub fn config_for(base_url: &str, output_dir: &Path) -> SuiteConfig {
    let base_url = base_url.to_string();
    let mut config = SuiteConfig::from_lookup("test", |key| match key {
        "BASE_URL" => Some(base_url.clone()),
        "HEADLESS" => Some("true".to_string()),
        "TIMEOUT" => Some("60000".to_string()),
        _ => None,
    })
    .expect("Failed to build config");
    config.output_dir = output_dir.join("results");
    config.screenshot_dir = output_dir.join("screenshots");
    config
}

pub async fn launch(config: &SuiteConfig) -> BrowserSession {
    BrowserSession::launch(config)
        .await
        .expect("Failed to launch browser")
}

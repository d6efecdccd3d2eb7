//! BizOps Frontend Entry Point

mod api;
mod app;
mod components;
mod context;
mod details;
mod logging;
mod notify;
mod polling;
mod print;
mod pwa;
mod router;
mod storage;
mod store;

use app::App;
use leptos::prelude::*;
use tracing::{info, warn};

use bizops_core::config::{AppConfig, ConfigError};

const CONFIG_ELEMENT_ID: &str = "bizops-config";

/// Config from the embedded JSON block; defaults when absent or invalid
fn load_config() -> (AppConfig, Option<ConfigError>) {
    let json = web_sys::window()
        .and_then(|w| w.document())
        .and_then(|d| d.get_element_by_id(CONFIG_ELEMENT_ID))
        .and_then(|el| el.text_content());
    match json {
        Some(json) if !json.trim().is_empty() => match AppConfig::from_json(&json) {
            Ok(config) => (config, None),
            Err(e) => (AppConfig::default(), Some(e)),
        },
        _ => (AppConfig::default(), None),
    }
}

fn main() {
    console_error_panic_hook::set_once();

    let (config, config_error) = load_config();
    let logs = logging::init(&config.log);
    if let Some(e) = config_error {
        warn!(event = "config.invalid", error = %e, "falling back to defaults");
    }
    info!(event = "app.start", api_base = %config.api_base_url);

    pwa::register_service_worker(&config.service_worker);
    mount_to_body(move || view! { <App config=config logs=logs /> });
}

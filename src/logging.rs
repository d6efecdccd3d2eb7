//! Logger setup: rolling in-memory buffer plus browser console output.

use rolling_logger::{LogBuffer, LogLine};
use tracing::Level;

use bizops_core::config::LogSettings;

fn to_console(line: &LogLine) {
    let text = wasm_bindgen::JsValue::from_str(&format!("[{}] {}", line.target, line.message));
    match line.level {
        Level::ERROR => web_sys::console::error_1(&text),
        Level::WARN => web_sys::console::warn_1(&text),
        Level::INFO => web_sys::console::info_1(&text),
        _ => web_sys::console::log_1(&text),
    }
}

/// Install the global subscriber. A second call keeps the first logger and
/// returns a detached buffer.
pub fn init(settings: &LogSettings) -> LogBuffer {
    let level = rolling_logger::parse_level(&settings.level);
    match rolling_logger::init(settings.capacity, level, Box::new(to_console)) {
        Ok(buffer) => buffer,
        Err(e) => {
            web_sys::console::warn_1(&e.into());
            LogBuffer::new(settings.capacity)
        }
    }
}

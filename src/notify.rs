//! Browser notifications, used when the app is in the background.

use leptos::task::spawn_local;
use tracing::debug;
use wasm_bindgen::JsValue;
use wasm_bindgen_futures::JsFuture;
use web_sys::{Notification, NotificationOptions, NotificationPermission};

/// Some browsers ship without the Notification API
fn supported() -> bool {
    web_sys::window()
        .map(|w| js_sys::Reflect::has(&w, &JsValue::from_str("Notification")).unwrap_or(false))
        .unwrap_or(false)
}

/// A granted or denied answer is final
fn should_request(supported: bool, permission: NotificationPermission) -> bool {
    supported && permission == NotificationPermission::Default
}

/// Browsers only show the prompt while handling a user gesture, so call this
/// synchronously from a click or submit handler, never after an await.
pub fn request_permission() {
    if !should_request(supported(), Notification::permission()) {
        return;
    }
    if let Ok(promise) = Notification::request_permission() {
        spawn_local(async move {
            let answer = JsFuture::from(promise).await;
            debug!(event = "notify.permission", answer = ?answer.ok().and_then(|v| v.as_string()));
        });
    }
}

pub fn show(title: &str, body: &str) {
    if !supported() || Notification::permission() != NotificationPermission::Granted {
        return;
    }
    let options = NotificationOptions::new();
    options.set_body(body);
    if let Err(e) = Notification::new_with_options(title, &options) {
        debug!(event = "notify.failed", error = ?e);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_undecided_permission_is_requested() {
        assert!(should_request(true, NotificationPermission::Default));
        assert!(!should_request(true, NotificationPermission::Granted));
        assert!(!should_request(true, NotificationPermission::Denied));
        assert!(!should_request(false, NotificationPermission::Default));
    }
}

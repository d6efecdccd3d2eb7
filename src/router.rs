//! Address bar glue for the `Route` signal.

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;

use bizops_core::routes::Route;

pub fn current_path() -> String {
    web_sys::window()
        .and_then(|w| w.location().pathname().ok())
        .unwrap_or_else(|| "/".to_string())
}

pub fn push_path(path: &str) {
    if let Some(history) = web_sys::window().and_then(|w| w.history().ok()) {
        let _ = history.push_state_with_url(&JsValue::NULL, "", Some(path));
    }
}

pub fn replace_path(path: &str) {
    if let Some(history) = web_sys::window().and_then(|w| w.history().ok()) {
        let _ = history.replace_state_with_url(&JsValue::NULL, "", Some(path));
    }
}

/// Follow back/forward buttons for the lifetime of the page.
///
/// `on_change` receives the route now in the address bar.
pub fn bind_popstate(on_change: impl Fn(Route) + 'static) {
    let on_popstate = Closure::<dyn FnMut(web_sys::PopStateEvent)>::new(move |_ev: web_sys::PopStateEvent| {
        on_change(Route::parse(&current_path()));
    });
    if let Some(win) = web_sys::window() {
        let _ = win.add_event_listener_with_callback("popstate", on_popstate.as_ref().unchecked_ref());
    }
    on_popstate.forget();
}

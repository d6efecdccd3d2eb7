//! Service worker registration for the admin area.

use std::cell::Cell;
use std::rc::Rc;

use gloo_timers::callback::Interval;
use leptos::task::spawn_local;
use serde::Serialize;
use tracing::{debug, info, warn};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys::{RegistrationOptions, ServiceWorker, ServiceWorkerContainer, ServiceWorkerRegistration, ServiceWorkerState};

use bizops_core::config::ServiceWorkerSettings;

use crate::router;

const ADMIN_PREFIX: &str = "/admin";

#[derive(Serialize)]
struct WorkerMessage {
    #[serde(rename = "type")]
    kind: &'static str,
}

fn container() -> Option<ServiceWorkerContainer> {
    let navigator = web_sys::window()?.navigator();
    let supported = js_sys::Reflect::has(&navigator, &JsValue::from_str("serviceWorker")).unwrap_or(false);
    supported.then(|| navigator.service_worker())
}

/// Register the worker when the page is under the admin prefix
pub fn register_service_worker(settings: &ServiceWorkerSettings) {
    let path = router::current_path();
    if !path.starts_with(ADMIN_PREFIX) {
        debug!(event = "pwa.skipped", path = %path);
        return;
    }
    let Some(container) = container() else {
        debug!(event = "pwa.unsupported");
        return;
    };

    let options = RegistrationOptions::new();
    options.set_scope(&settings.scope);
    let promise = container.register_with_options(&settings.script, &options);
    let update_every_ms = settings.update_interval_mins.saturating_mul(60_000);

    reload_on_controller_change(&container);

    spawn_local(async move {
        match JsFuture::from(promise).await {
            Ok(value) => {
                let registration: ServiceWorkerRegistration = value.unchecked_into();
                info!(event = "pwa.registered", scope = %registration.scope());
                if let Some(waiting) = registration.waiting() {
                    prompt_update(&container, &waiting);
                }
                watch_for_updates(container, &registration);
                schedule_update_checks(registration, update_every_ms);
            }
            Err(e) => warn!(event = "pwa.register_failed", error = ?e),
        }
    });
}

fn schedule_update_checks(registration: ServiceWorkerRegistration, every_ms: u32) {
    if every_ms == 0 {
        return;
    }
    Interval::new(every_ms, move || {
        debug!(event = "pwa.update_check");
        if let Err(e) = registration.update() {
            warn!(event = "pwa.update_failed", error = ?e);
        }
    })
    .forget();
}

fn watch_for_updates(container: ServiceWorkerContainer, registration: &ServiceWorkerRegistration) {
    let reg = registration.clone();
    let on_update_found = Closure::<dyn FnMut()>::new(move || {
        let Some(installing) = reg.installing() else {
            return;
        };
        let worker = installing.clone();
        let container = container.clone();
        let on_state_change = Closure::<dyn FnMut()>::new(move || {
            // A controller means an older worker is serving this page
            if worker.state() == ServiceWorkerState::Installed && container.controller().is_some() {
                prompt_update(&container, &worker);
            }
        });
        installing.set_onstatechange(Some(on_state_change.as_ref().unchecked_ref()));
        on_state_change.forget();
    });
    registration.set_onupdatefound(Some(on_update_found.as_ref().unchecked_ref()));
    on_update_found.forget();
}

fn prompt_update(container: &ServiceWorkerContainer, worker: &ServiceWorker) {
    if container.controller().is_none() {
        return;
    }
    let Some(window) = web_sys::window() else {
        return;
    };
    let accepted = window
        .confirm_with_message("A new version of BizOps is available. Reload now?")
        .unwrap_or(false);
    if !accepted {
        info!(event = "pwa.update_deferred");
        return;
    }
    match serde_wasm_bindgen::to_value(&WorkerMessage { kind: "SKIP_WAITING" }) {
        Ok(message) => {
            if let Err(e) = worker.post_message(&message) {
                warn!(event = "pwa.skip_waiting_failed", error = ?e);
            }
        }
        Err(e) => warn!(event = "pwa.skip_waiting_failed", error = %e),
    }
}

/// Reload once when the new worker takes over
fn reload_on_controller_change(container: &ServiceWorkerContainer) {
    let reloading = Rc::new(Cell::new(false));
    let on_change = Closure::<dyn FnMut()>::new(move || {
        if reloading.replace(true) {
            return;
        }
        info!(event = "pwa.controller_changed");
        if let Some(window) = web_sys::window() {
            let _ = window.location().reload();
        }
    });
    container.set_oncontrollerchange(Some(on_change.as_ref().unchecked_ref()));
    on_change.forget();
}

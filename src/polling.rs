//! Operations auto-refresh.
//!
//! Ticks on a fixed interval while the Operations page is mounted. A tick
//! only fetches when the active tab is polled and the document is visible;
//! a higher total than last seen triggers one notification and one reload.

use gloo_timers::callback::Interval;
use leptos::prelude::*;
use leptos::task::spawn_local;
use tracing::{debug, info, warn};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;

use bizops_core::polling::{OperationsTab, PollController};
use bizops_core::toast::ToastKind;

use crate::context::use_app_context;
use crate::notify;

/// Handle the page uses to keep the poll baseline in step with its own reloads
#[derive(Clone, Copy)]
pub struct Poller {
    controller: StoredValue<PollController>,
}

impl Poller {
    pub fn reset_baseline(&self, total: u64) {
        self.controller.try_update_value(|c| c.reset_baseline(total));
    }
}

fn document_visible() -> bool {
    web_sys::window()
        .and_then(|w| w.document())
        .map(|d| !d.hidden())
        .unwrap_or(true)
}

/// Start polling for the lifetime of the calling component
pub fn use_item_polling(tab: ReadSignal<OperationsTab>, page: ReadSignal<u32>, search: ReadSignal<String>) -> Poller {
    let ctx = use_app_context();
    let controller = StoredValue::new(PollController::default());
    controller.update_value(|c| c.set_visible(document_visible()));

    Effect::new(move |_| {
        let active = tab.get();
        controller.try_update_value(|c| c.set_tab(active));
    });

    let interval_ms = ctx.config.with_value(|c| c.poll_interval_secs).saturating_mul(1000);
    let limit = ctx.config.with_value(|c| c.page_size);

    let interval = Interval::new(interval_ms, move || {
        if !controller.try_with_value(PollController::should_poll).unwrap_or(false) {
            debug!(event = "poll.skipped");
            return;
        }
        let (Some(page_no), Some(query)) = (page.try_get_untracked(), search.try_get_untracked()) else {
            return;
        };
        spawn_local(async move {
            let result = ctx.api().list_operation_items(page_no, limit, &query).await;
            match result {
                Ok(fresh) => {
                    // Outer None once the page is gone, inner None when nothing is new
                    let Some(Some(notice)) = controller.try_update_value(|c| c.tick(fresh.total)) else {
                        return;
                    };
                    info!(event = "poll.new_items", count = notice.count);
                    ctx.toast(ToastKind::Info, notice.message.clone());
                    notify::show("Operations", &notice.message);
                    ctx.reload();
                }
                Err(e) => warn!(event = "poll.failed", error = %e),
            }
        });
    });

    let on_visibility = Closure::<dyn FnMut()>::new(move || {
        let visible = document_visible();
        debug!(event = "poll.visibility", visible);
        controller.try_update_value(|c| c.set_visible(visible));
    });
    let document = web_sys::window().and_then(|w| w.document());
    if let Some(doc) = &document {
        let _ = doc.add_event_listener_with_callback("visibilitychange", on_visibility.as_ref().unchecked_ref());
    }

    let handles = StoredValue::new_local(Some((interval, on_visibility)));
    on_cleanup(move || {
        if let Some((interval, listener)) = handles.try_update_value(Option::take).flatten() {
            interval.cancel();
            if let Some(doc) = web_sys::window().and_then(|w| w.document()) {
                let _ = doc.remove_event_listener_with_callback("visibilitychange", listener.as_ref().unchecked_ref());
            }
            debug!(event = "poll.stopped");
        }
    });

    Poller { controller }
}

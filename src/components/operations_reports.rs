//! Reports tab.

use chrono::Utc;
use leptos::prelude::*;

use bizops_core::report;

use crate::context::use_app_context;
use crate::print;
use crate::store::{store_items_with_details, use_app_store, AppStateStoreFields};

#[component]
pub fn OperationsReports() -> impl IntoView {
    let ctx = use_app_context();
    let store = use_app_store();

    let print_inventory = move |_| {
        let items = store_items_with_details(&store);
        let html = report::inventory_report(&items, Utc::now());
        if let Err(message) = print::print_html(&html) {
            ctx.error(message);
        }
    };

    view! {
        <div class="operations-reports">
            <p>{move || format!("{} items on the current page.", store.items().with(Vec::len))}</p>
            <button class="primary" on:click=print_inventory>"Print inventory report"</button>
        </div>
    }
}

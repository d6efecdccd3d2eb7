//! Procurement Page
//!
//! Stock on hand plus shortcuts to suppliers and purchase orders.

use chrono::Utc;
use leptos::prelude::*;
use leptos::task::spawn_local;
use tracing::warn;

use bizops_core::format;
use bizops_core::report;
use bizops_core::routes::Route;

use crate::components::{ErrorBanner, StockList};
use crate::context::use_app_context;
use crate::print;
use crate::store::{use_app_store, AppStateStoreFields};

#[component]
pub fn ProcurementPage() -> impl IntoView {
    let ctx = use_app_context();
    let store = use_app_store();
    let error = RwSignal::new(None::<String>);

    Effect::new(move |_| {
        let _ = ctx.reload_trigger.get();
        spawn_local(async move {
            let api = ctx.api();
            let (suppliers, orders) = futures::join!(api.list_suppliers(), api.list_purchase_orders());
            match suppliers {
                Ok(list) => store.suppliers().set(list),
                Err(e) => {
                    warn!(event = "procurement.suppliers_failed", error = %e);
                    error.set(Some(e.user_message()));
                }
            }
            match orders {
                Ok(list) => store.purchase_orders().set(list),
                Err(e) => {
                    warn!(event = "procurement.orders_failed", error = %e);
                    error.set(Some(e.user_message()));
                }
            }
        });
    });

    let open_orders = move || store.purchase_orders().with(|orders| orders.iter().filter(|o| o.status.is_open()).count());

    let print_suppliers = move |_| {
        let html = report::supplier_report(&store.suppliers().get(), Utc::now());
        if let Err(message) = print::print_html(&html) {
            ctx.error(message);
        }
    };
    let print_orders = move |_| {
        let html = report::purchase_order_report(&store.purchase_orders().get(), Utc::now());
        if let Err(message) = print::print_html(&html) {
            ctx.error(message);
        }
    };

    view! {
        <section class="procurement-page">
            <h1>"Procurement"</h1>
            <ErrorBanner error=error />
            <div class="stat-cards">
                <button class="stat-card clickable" on:click=move |_| ctx.navigate(Route::Suppliers)>
                    <span class="stat-label">"Suppliers"</span>
                    <span class="stat-value">{move || format::count(store.suppliers().with(Vec::len) as u64)}</span>
                </button>
                <button class="stat-card clickable" on:click=move |_| ctx.navigate(Route::PurchaseOrders)>
                    <span class="stat-label">"Open purchase orders"</span>
                    <span class="stat-value">{move || format::count(open_orders() as u64)}</span>
                </button>
            </div>
            <div class="report-actions">
                <button on:click=print_suppliers>"Print supplier report"</button>
                <button on:click=print_orders>"Print purchase order report"</button>
            </div>
            <StockList />
        </section>
    }
}

//! Finance Page
//!
//! Inventory valuation, purchase order spend and supplier ranking.

use chrono::Utc;
use leptos::prelude::*;
use leptos::task::spawn_local;
use tracing::warn;

use bizops_core::dashboard::{finance_summary, FinanceSummary};
use bizops_core::format;
use bizops_core::report;

use crate::components::ErrorBanner;
use crate::context::use_app_context;
use crate::print;
use crate::store::{use_app_store, AppStateStoreFields};

const TOP_SUPPLIERS: usize = 5;

#[component]
pub fn FinancePage() -> impl IntoView {
    let ctx = use_app_context();
    let store = use_app_store();
    let error = RwSignal::new(None::<String>);
    let (loading, set_loading) = signal(true);
    let threshold = ctx.config.with_value(|c| c.low_stock_threshold);

    Effect::new(move |_| {
        let _ = ctx.reload_trigger.get();
        set_loading.set(true);
        spawn_local(async move {
            let api = ctx.api();
            let (stock, orders, suppliers) =
                futures::join!(api.list_stock(), api.list_purchase_orders(), api.list_suppliers());
            let mut failures = Vec::new();
            match stock {
                Ok(list) => store.stock().set(list),
                Err(e) => failures.push(e),
            }
            match orders {
                Ok(list) => store.purchase_orders().set(list),
                Err(e) => failures.push(e),
            }
            match suppliers {
                Ok(list) => store.suppliers().set(list),
                Err(e) => failures.push(e),
            }
            for e in &failures {
                warn!(event = "finance.load_failed", error = %e);
            }
            error.set(failures.first().map(|e| e.user_message()));
            set_loading.set(false);
        });
    });

    let summary = Memo::new(move |_| {
        store.stock().with(|stock| {
            store.purchase_orders().with(|orders| {
                store
                    .suppliers()
                    .with(|suppliers| finance_summary(stock, orders, suppliers, threshold, TOP_SUPPLIERS))
            })
        })
    });

    let print_report = move |_| {
        let html = report::finance_report(&summary.get(), Utc::now());
        if let Err(message) = print::print_html(&html) {
            ctx.error(message);
        }
    };

    view! {
        <section class="finance-page">
            <div class="list-toolbar">
                <h1>"Finance"</h1>
                <button on:click=print_report>"Print finance report"</button>
            </div>
            <ErrorBanner error=error />
            <Show when=move || loading.get()>
                <p class="loading">"Loading..."</p>
            </Show>
            {move || {
                let s: FinanceSummary = summary.get();
                let spend = s
                    .spend_by_status
                    .iter()
                    .map(|(status, total)| {
                        view! {
                            <tr>
                                <td>{status.to_string()}</td>
                                <td class="num">{format::currency(*total)}</td>
                            </tr>
                        }
                    })
                    .collect_view();
                let top = s
                    .top_suppliers
                    .iter()
                    .map(|(name, value)| {
                        view! {
                            <tr>
                                <td>{name.clone()}</td>
                                <td class="num">{format::currency(*value)}</td>
                            </tr>
                        }
                    })
                    .collect_view();
                view! {
                    <div class="stat-cards">
                        <div class="stat-card">
                            <span class="stat-label">"Inventory value"</span>
                            <span class="stat-value">{format::currency(s.inventory_value)}</span>
                        </div>
                        <div class="stat-card">
                            <span class="stat-label">"Stock lines"</span>
                            <span class="stat-value">{format::count(s.stock_lines as u64)}</span>
                        </div>
                        <div class="stat-card warning">
                            <span class="stat-label">"Low stock"</span>
                            <span class="stat-value">{format::count(s.low_stock_lines as u64)}</span>
                        </div>
                        <div class="stat-card">
                            <span class="stat-label">"Open commitments"</span>
                            <span class="stat-value">{format::currency(s.open_commitments)}</span>
                        </div>
                    </div>
                    <div class="two-column">
                        <table class="data-table">
                            <thead>
                                <tr><th>"Order status"</th><th>"Spend"</th></tr>
                            </thead>
                            <tbody>{spend}</tbody>
                        </table>
                        <table class="data-table">
                            <thead>
                                <tr><th>"Top suppliers"</th><th>"Inventory value"</th></tr>
                            </thead>
                            <tbody>{top}</tbody>
                        </table>
                    </div>
                }
            }}
        </section>
    }
}

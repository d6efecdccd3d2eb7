//! Purchase Orders Page
//!
//! Lists orders with their allowed status moves and hosts the create form.

use chrono::Utc;
use leptos::prelude::*;
use leptos::task::spawn_local;
use tracing::{info, warn};

use bizops_core::domain::{PurchaseOrder, PurchaseOrderStatus};
use bizops_core::format;
use bizops_core::report;

use crate::components::{ErrorBanner, PurchaseOrderForm};
use crate::context::use_app_context;
use crate::print;
use crate::store::{use_app_store, AppStateStoreFields};

#[component]
pub fn PurchaseOrdersPage() -> impl IntoView {
    let ctx = use_app_context();
    let store = use_app_store();
    let error = RwSignal::new(None::<String>);
    let (creating, set_creating) = signal(false);
    let (open_only, set_open_only) = signal(false);

    Effect::new(move |_| {
        let _ = ctx.reload_trigger.get();
        spawn_local(async move {
            let api = ctx.api();
            let (orders, suppliers) = futures::join!(api.list_purchase_orders(), api.list_suppliers());
            match orders {
                Ok(list) => {
                    error.set(None);
                    store.purchase_orders().set(list);
                }
                Err(e) => {
                    warn!(event = "procurement.orders_failed", error = %e);
                    error.set(Some(e.user_message()));
                }
            }
            // Suppliers only feed the form's picker
            if let Ok(list) = suppliers {
                store.suppliers().set(list);
            }
        });
    });

    let set_status = move |id: String, status: PurchaseOrderStatus| {
        spawn_local(async move {
            match ctx.api().set_purchase_order_status(&id, status).await {
                Ok(()) => {
                    info!(event = "procurement.po_status", id = %id, status = %status);
                    store.purchase_orders().update(|orders| {
                        if let Some(order) = orders.iter_mut().find(|o| o.id == id) {
                            order.status = status;
                        }
                    });
                    ctx.success(format!("Marked {}", status));
                }
                Err(e) => {
                    warn!(event = "procurement.po_status_failed", id = %id, error = %e);
                    ctx.error(e.user_message());
                    ctx.reload();
                }
            }
        });
    };

    let visible = move || {
        let open = open_only.get();
        store
            .purchase_orders()
            .get()
            .into_iter()
            .filter(|o| !open || o.status.is_open())
            .collect::<Vec<_>>()
    };

    let print_report = move |_| {
        let html = report::purchase_order_report(&visible(), Utc::now());
        if let Err(message) = print::print_html(&html) {
            ctx.error(message);
        }
    };

    let close = Callback::new(move |_: ()| set_creating.set(false));

    view! {
        <section class="purchase-orders-page">
            <div class="list-toolbar">
                <h1>"Purchase Orders"</h1>
                <label class="checkbox">
                    <input
                        type="checkbox"
                        prop:checked=move || open_only.get()
                        on:change=move |ev| set_open_only.set(event_target_checked(&ev))
                    />
                    "Open only"
                </label>
                <button class="primary" on:click=move |_| set_creating.set(true)>"New purchase order"</button>
                <button on:click=print_report>"Print report"</button>
            </div>
            <ErrorBanner error=error />
            <Show when=move || creating.get()>
                <PurchaseOrderForm on_done=close />
            </Show>
            <table class="data-table">
                <thead>
                    <tr>
                        <th>"PO"</th>
                        <th>"Supplier"</th>
                        <th>"Ordered"</th>
                        <th>"Expected"</th>
                        <th>"Lines"</th>
                        <th>"Total"</th>
                        <th>"Status"</th>
                        <th>"Move to"</th>
                    </tr>
                </thead>
                <tbody>
                    <For
                        each=visible
                        key=|o: &PurchaseOrder| (o.id.clone(), o.status)
                        children=move |o: PurchaseOrder| {
                            let expected = o
                                .expected_delivery
                                .map(|d| d.format("%Y-%m-%d").to_string())
                                .unwrap_or_else(|| "-".to_string());
                            let moves = o
                                .status
                                .next_statuses()
                                .iter()
                                .map(|next| {
                                    let next = *next;
                                    let id = o.id.clone();
                                    view! {
                                        <button class="status-btn" on:click=move |_| set_status(id.clone(), next)>
                                            {next.to_string()}
                                        </button>
                                    }
                                })
                                .collect_view();
                            view! {
                                <tr>
                                    <td>{o.po_number.clone()}</td>
                                    <td>{o.supplier_name.clone()}</td>
                                    <td>{format::date(&o.order_date)}</td>
                                    <td>{expected}</td>
                                    <td class="num">{o.lines.len()}</td>
                                    <td class="num">{format::currency(o.total())}</td>
                                    <td>
                                        <span class=format!("status-badge status-{}", o.status.to_string().to_lowercase())>
                                            {o.status.to_string()}
                                        </span>
                                    </td>
                                    <td class="status-actions">{moves}</td>
                                </tr>
                            }
                        }
                    />
                </tbody>
            </table>
        </section>
    }
}

//! Purchase Order Form Component
//!
//! Supplier choice, optional delivery date, and an editable list of lines.

use chrono::NaiveDate;
use leptos::prelude::*;
use leptos::task::spawn_local;
use tracing::info;

use bizops_core::domain::{NewPurchaseOrder, PurchaseOrderLine, Supplier};
use bizops_core::format;

use crate::context::use_app_context;
use crate::store::{use_app_store, AppStateStoreFields};

fn blank_line() -> PurchaseOrderLine {
    PurchaseOrderLine { description: String::new(), quantity: 1, unit_price: 0.0 }
}

#[component]
pub fn PurchaseOrderForm(#[prop(into)] on_done: Callback<()>) -> impl IntoView {
    let ctx = use_app_context();
    let store = use_app_store();

    let (draft, set_draft) = signal(NewPurchaseOrder { lines: vec![blank_line()], ..Default::default() });
    let (form_error, set_form_error) = signal(None::<String>);
    let (saving, set_saving) = signal(false);

    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let order = draft.get();
        if let Err(message) = order.validate() {
            set_form_error.set(Some(message));
            return;
        }
        set_form_error.set(None);
        set_saving.set(true);
        spawn_local(async move {
            let result = ctx.api().create_purchase_order(&order).await;
            set_saving.set(false);
            match result {
                Ok(created) => {
                    info!(event = "procurement.po_created", id = %created.id, po = %created.po_number);
                    ctx.success(format!("Purchase order {} created", created.po_number));
                    ctx.reload();
                    on_done.run(());
                }
                Err(e) => set_form_error.set(Some(e.user_message())),
            }
        });
    };

    let line_count = move || draft.with(|d| d.lines.len());

    let line_row = move |index: usize| {
        let line = move || draft.with(|d| d.lines.get(index).cloned().unwrap_or_else(blank_line));
        let edit = move |f: &dyn Fn(&mut PurchaseOrderLine)| {
            set_draft.update(|d| {
                if let Some(l) = d.lines.get_mut(index) {
                    f(l);
                }
            })
        };
        view! {
            <tr>
                <td>
                    <input
                        type="text"
                        placeholder="Description"
                        prop:value=move || line().description
                        on:input=move |ev| {
                            let value = event_target_value(&ev);
                            edit(&|l| l.description = value.clone());
                        }
                    />
                </td>
                <td>
                    <input
                        type="number"
                        min="1"
                        prop:value=move || line().quantity.to_string()
                        on:input=move |ev| {
                            let quantity = event_target_value(&ev).trim().parse().unwrap_or(0);
                            edit(&|l| l.quantity = quantity);
                        }
                    />
                </td>
                <td>
                    <input
                        type="number"
                        min="0"
                        step="0.01"
                        prop:value=move || line().unit_price.to_string()
                        on:input=move |ev| {
                            let price = event_target_value(&ev).trim().parse().unwrap_or(0.0);
                            edit(&|l| l.unit_price = price);
                        }
                    />
                </td>
                <td class="num">{move || format::currency(line().total())}</td>
                <td>
                    <button
                        type="button"
                        class="row-delete-btn"
                        title="Remove line"
                        on:click=move |_| set_draft.update(|d| {
                            if index < d.lines.len() {
                                d.lines.remove(index);
                            }
                        })
                    >
                        "×"
                    </button>
                </td>
            </tr>
        }
    };

    view! {
        <form class="po-form" on:submit=on_submit>
            <label class="form-field">
                <span>"Supplier"</span>
                <select on:change=move |ev| {
                    let id = event_target_value(&ev);
                    set_draft.update(|d| d.supplier_id = id);
                }>
                    <option value="" selected=move || draft.with(|d| d.supplier_id.is_empty())>
                        "Choose a supplier"
                    </option>
                    <For
                        each=move || store.suppliers().get()
                        key=|s: &Supplier| s.id.clone()
                        children=move |s: Supplier| {
                            let id = s.id.clone();
                            let selected = move || draft.with(|d| d.supplier_id == id);
                            view! { <option value=s.id.clone() selected=selected>{s.name.clone()}</option> }
                        }
                    />
                </select>
            </label>
            <label class="form-field">
                <span>"Expected delivery"</span>
                <input
                    type="date"
                    on:change=move |ev| {
                        let date = NaiveDate::parse_from_str(&event_target_value(&ev), "%Y-%m-%d").ok();
                        set_draft.update(|d| d.expected_delivery = date);
                    }
                />
            </label>

            <table class="data-table po-lines">
                <thead>
                    <tr>
                        <th>"Description"</th>
                        <th>"Qty"</th>
                        <th>"Unit price"</th>
                        <th>"Total"</th>
                        <th></th>
                    </tr>
                </thead>
                <tbody>
                    <For each=move || 0..line_count() key=|i: &usize| *i children=line_row />
                </tbody>
            </table>
            <button type="button" on:click=move |_| set_draft.update(|d| d.lines.push(blank_line()))>
                "Add line"
            </button>
            <p class="po-total">"Order total: " {move || format::currency(draft.with(NewPurchaseOrder::total))}</p>

            <label class="form-field">
                <span>"Notes"</span>
                <textarea on:input=move |ev| {
                    let text = event_target_value(&ev);
                    set_draft.update(|d| d.notes = if text.trim().is_empty() { None } else { Some(text) });
                }></textarea>
            </label>
            {move || form_error.get().map(|message| view! { <p class="form-error">{message}</p> })}
            <div class="form-actions">
                <button type="button" on:click=move |_| on_done.run(())>"Cancel"</button>
                <button type="submit" class="primary" disabled=move || saving.get()>"Create order"</button>
            </div>
        </form>
    }
}

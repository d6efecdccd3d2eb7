//! Stock list with low-stock highlighting and inline quantity edits.

use leptos::prelude::*;
use leptos::task::spawn_local;
use tracing::{info, warn};

use bizops_core::domain::{InventoryItem, StockInput};
use bizops_core::format;

use crate::components::DeleteConfirmButton;
use crate::context::use_app_context;
use crate::store::{store_remove_stock, store_upsert_stock, use_app_store, AppStateStoreFields};

#[component]
pub fn StockList() -> impl IntoView {
    let ctx = use_app_context();
    let store = use_app_store();
    let threshold = ctx.config.with_value(|c| c.low_stock_threshold);

    let (draft, set_draft) = signal(StockInput::default());
    let (adding, set_adding) = signal(false);
    let (form_error, set_form_error) = signal(None::<String>);

    Effect::new(move |_| {
        let _ = ctx.reload_trigger.get();
        spawn_local(async move {
            match ctx.api().list_stock().await {
                Ok(list) => store.stock().set(list),
                Err(e) => {
                    warn!(event = "procurement.stock_failed", error = %e);
                    ctx.error(e.user_message());
                }
            }
        });
    });

    let low_count = move || store.stock().with(|s| s.iter().filter(|i| i.is_low_stock(threshold)).count());

    let create = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let input = draft.get();
        if let Err(message) = input.validate() {
            set_form_error.set(Some(message));
            return;
        }
        set_form_error.set(None);
        spawn_local(async move {
            match ctx.api().create_stock(&input).await {
                Ok(created) => {
                    info!(event = "procurement.stock_created", id = %created.id);
                    store_upsert_stock(&store, created);
                    set_draft.set(StockInput::default());
                    set_adding.set(false);
                }
                Err(e) => set_form_error.set(Some(e.user_message())),
            }
        });
    };

    // Optimistic; the list is re-fetched when the write fails
    let set_quantity = move |item: InventoryItem, quantity: u32| {
        let mut updated = item.clone();
        updated.quantity = quantity;
        store_upsert_stock(&store, updated.clone());
        spawn_local(async move {
            if let Err(e) = ctx.api().update_stock(&item.id, &StockInput::from(&updated)).await {
                warn!(event = "procurement.stock_update_failed", id = %item.id, error = %e);
                ctx.error(e.user_message());
                ctx.reload();
            }
        });
    };

    let delete = move |id: String| {
        spawn_local(async move {
            match ctx.api().delete_stock(&id).await {
                Ok(()) => store_remove_stock(&store, &id),
                Err(e) => {
                    ctx.error(e.user_message());
                    ctx.reload();
                }
            }
        });
    };

    let text_field = move |placeholder: &'static str, get: fn(&StockInput) -> String, put: fn(&mut StockInput, String)| {
        view! {
            <input
                type="text"
                placeholder=placeholder
                prop:value=move || draft.with(get)
                on:input=move |ev| set_draft.update(|d| put(d, event_target_value(&ev)))
            />
        }
    };

    view! {
        <div class="stock-list">
            <div class="list-toolbar">
                <h2>"Stock"</h2>
                <span class="badge warning">{move || format!("{} low", low_count())}</span>
                <button class="primary" on:click=move |_| set_adding.update(|a| *a = !*a)>
                    {move || if adding.get() { "Close" } else { "New stock line" }}
                </button>
            </div>

            <Show when=move || adding.get()>
                <form class="stock-form" on:submit=create>
                    {text_field("Name", |d| d.name.clone(), |d, v| d.name = v)}
                    {text_field("SKU", |d| d.sku.clone(), |d, v| d.sku = v)}
                    {text_field("Category", |d| d.category.clone(), |d, v| d.category = v)}
                    {text_field("Quantity", |d| d.quantity.to_string(), |d, v| d.quantity = v.trim().parse().unwrap_or(0))}
                    {text_field("Unit price", |d| d.unit_price.to_string(), |d, v| d.unit_price = v.trim().parse().unwrap_or(0.0))}
                    {text_field("Reorder level", |d| d.reorder_level.to_string(), |d, v| d.reorder_level = v.trim().parse().unwrap_or(0))}
                    <button type="submit">"Save"</button>
                    {move || form_error.get().map(|message| view! { <p class="form-error">{message}</p> })}
                </form>
            </Show>

            <table class="data-table">
                <thead>
                    <tr>
                        <th>"Name"</th>
                        <th>"SKU"</th>
                        <th>"Category"</th>
                        <th>"Quantity"</th>
                        <th>"Unit price"</th>
                        <th>"Value"</th>
                        <th></th>
                    </tr>
                </thead>
                <tbody>
                    <For
                        each=move || store.stock().get()
                        key=|item: &InventoryItem| (item.id.clone(), item.quantity)
                        children=move |item: InventoryItem| {
                            let row_class = if item.is_low_stock(threshold) { "stock-row low-stock" } else { "stock-row" };
                            let delete_id = item.id.clone();
                            let delete_subject = item.name.clone();
                            let edit_item = item.clone();
                            view! {
                                <tr class=row_class>
                                    <td>{item.name.clone()}</td>
                                    <td>{item.sku.clone()}</td>
                                    <td>{item.category.clone()}</td>
                                    <td>
                                        <input
                                            type="number"
                                            min="0"
                                            class="qty-input"
                                            prop:value=item.quantity.to_string()
                                            on:change=move |ev| {
                                                if let Ok(quantity) = event_target_value(&ev).trim().parse::<u32>() {
                                                    set_quantity(edit_item.clone(), quantity);
                                                }
                                            }
                                        />
                                    </td>
                                    <td class="num">{format::currency(item.unit_price)}</td>
                                    <td class="num">{format::currency(item.value())}</td>
                                    <td>
                                        <DeleteConfirmButton
                                            subject=delete_subject
                                            compact=true
                                            on_confirm=move |_| delete(delete_id.clone())
                                        />
                                    </td>
                                </tr>
                            }
                        }
                    />
                </tbody>
            </table>
        </div>
    }
}

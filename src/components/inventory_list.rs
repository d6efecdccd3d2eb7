//! Inventory tab: searchable, paginated item list.

use leptos::prelude::*;
use leptos::task::spawn_local;
use tracing::{info, warn};

use bizops_core::domain::Item;
use bizops_core::format;
use bizops_core::routes::Route;

use crate::components::{DeleteConfirmButton, NewItemForm};
use crate::context::use_app_context;
use crate::store::{store_remove_item, use_app_store, AppStateStoreFields};

#[component]
pub fn InventoryList(
    page: ReadSignal<u32>,
    set_page: WriteSignal<u32>,
    search: ReadSignal<String>,
    set_search: WriteSignal<String>,
) -> impl IntoView {
    let ctx = use_app_context();
    let store = use_app_store();

    let (query, set_query) = signal(search.get_untracked());
    let (adding, set_adding) = signal(false);

    let page_count = move || {
        let limit = u64::from(ctx.config.with_value(|c| c.page_size).max(1));
        (store.item_total().get().div_ceil(limit)).max(1) as u32
    };

    let at_first = move || page.get() <= 1;
    let at_last = move || page.get() >= page_count();

    let on_search = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        set_page.set(1);
        set_search.set(query.get().trim().to_string());
    };

    let delete_item = move |id: String| {
        spawn_local(async move {
            match ctx.api().delete_operation_item(&id).await {
                Ok(()) => {
                    info!(event = "operations.item_deleted", id = %id);
                    store_remove_item(&store, &id);
                    ctx.success("Item deleted");
                }
                Err(e) => {
                    warn!(event = "operations.delete_failed", id = %id, error = %e);
                    ctx.error(e.user_message());
                }
            }
            ctx.reload();
        });
    };

    view! {
        <div class="inventory-list">
            <div class="list-toolbar">
                <form class="search-form" on:submit=on_search>
                    <input
                        type="search"
                        placeholder="Search part number, name or client"
                        prop:value=move || query.get()
                        on:input=move |ev| set_query.set(event_target_value(&ev))
                    />
                    <button type="submit">"Search"</button>
                </form>
                <button class="primary" on:click=move |_| set_adding.update(|a| *a = !*a)>
                    {move || if adding.get() { "Close" } else { "New item" }}
                </button>
            </div>

            <Show when=move || adding.get()>
                <NewItemForm on_done=move |_| set_adding.set(false) />
            </Show>

            <table class="data-table">
                <thead>
                    <tr>
                        <th>"Part #"</th>
                        <th>"Name"</th>
                        <th>"Client"</th>
                        <th>"Priority"</th>
                        <th>"Qty"</th>
                        <th>"Progress"</th>
                        <th></th>
                    </tr>
                </thead>
                <tbody>
                    <For
                        each=move || store.items().get()
                        key=|item: &Item| (item.id.clone(), item.progress())
                        children=move |item: Item| {
                            let (done, total) = item.progress();
                            let open_id = item.id.clone();
                            let delete_id = item.id.clone();
                            let delete_subject = item.part_number.clone();
                            view! {
                                <tr class="clickable" on:click=move |_| ctx.navigate(Route::OperationsItem(open_id.clone()))>
                                    <td>{item.part_number.clone()}</td>
                                    <td>{item.name.clone()}</td>
                                    <td>{item.client.clone()}</td>
                                    <td class=format!("priority-{}", item.priority.as_str())>{item.priority.to_string()}</td>
                                    <td class="num">{format::count(u64::from(item.quantity))}</td>
                                    <td class="num">{format!("{}/{} ({}%)", done, total, format::percent(done, total))}</td>
                                    <td>
                                        <DeleteConfirmButton
                                            subject=delete_subject
                                            compact=true
                                            on_confirm=move |_| delete_item(delete_id.clone())
                                        />
                                    </td>
                                </tr>
                            }
                        }
                    />
                </tbody>
            </table>

            <div class="pagination">
                <button disabled=at_first on:click=move |_| set_page.update(|p| *p = p.saturating_sub(1).max(1))>
                    "Previous"
                </button>
                <span>{move || format!("Page {} of {}", page.get(), page_count())}</span>
                <button disabled=at_last on:click=move |_| set_page.update(|p| *p += 1)>
                    "Next"
                </button>
            </div>
        </div>
    }
}

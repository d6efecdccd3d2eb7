//! New Item Form Component
//!
//! Form for creating production items with a priority selector.

use leptos::prelude::*;
use leptos::task::spawn_local;
use tracing::{info, warn};

use bizops_core::domain::{NewItem, Priority};

use crate::context::use_app_context;

#[component]
pub fn NewItemForm(#[prop(into)] on_done: Callback<()>) -> impl IntoView {
    let ctx = use_app_context();

    let (part_number, set_part_number) = signal(String::new());
    let (name, set_name) = signal(String::new());
    let (client, set_client) = signal(String::new());
    let (quantity, set_quantity) = signal(String::from("1"));
    let (priority, set_priority) = signal(Priority::Medium);
    let (form_error, set_form_error) = signal(None::<String>);

    let create_item = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let item = NewItem {
            part_number: part_number.get().trim().to_string(),
            name: name.get().trim().to_string(),
            client: client.get().trim().to_string(),
            priority: priority.get(),
            quantity: quantity.get().trim().parse().unwrap_or(0),
        };
        if let Err(message) = item.validate() {
            set_form_error.set(Some(message));
            return;
        }
        set_form_error.set(None);

        spawn_local(async move {
            match ctx.api().create_operation_item(&item).await {
                Ok(created) => {
                    info!(event = "operations.item_created", id = %created.id);
                    ctx.success(format!("Created {}", created.part_number));
                    set_part_number.set(String::new());
                    set_name.set(String::new());
                    set_client.set(String::new());
                    set_quantity.set(String::from("1"));
                    ctx.reload();
                    on_done.run(());
                }
                Err(e) => {
                    warn!(event = "operations.create_failed", error = %e);
                    set_form_error.set(Some(e.user_message()));
                }
            }
        });
    };

    view! {
        <form class="new-item-form" on:submit=create_item>
            <div class="new-item-row">
                <input
                    type="text"
                    placeholder="Part number"
                    prop:value=move || part_number.get()
                    on:input=move |ev| set_part_number.set(event_target_value(&ev))
                />
                <input
                    type="text"
                    placeholder="Name"
                    prop:value=move || name.get()
                    on:input=move |ev| set_name.set(event_target_value(&ev))
                />
                <input
                    type="text"
                    placeholder="Client"
                    prop:value=move || client.get()
                    on:input=move |ev| set_client.set(event_target_value(&ev))
                />
                <input
                    type="number"
                    min="1"
                    prop:value=move || quantity.get()
                    on:input=move |ev| set_quantity.set(event_target_value(&ev))
                />
                <button type="submit">"Add"</button>
            </div>

            <div class="type-selector-row">
                {Priority::ALL.into_iter().map(|p| {
                    let is_selected = move || priority.get() == p;
                    view! {
                        <button
                            type="button"
                            class=move || if is_selected() { "type-btn small active" } else { "type-btn small" }
                            on:click=move |_| set_priority.set(p)
                        >
                            {p.to_string()}
                        </button>
                    }
                }).collect_view()}
            </div>

            {move || form_error.get().map(|message| view! { <p class="form-error">{message}</p> })}
        </form>
    }
}

//! Supplier Form Component
//!
//! Create and edit form for suppliers. `editing` holds the id when updating.

use leptos::prelude::*;
use leptos::task::spawn_local;
use tracing::info;

use bizops_core::domain::SupplierInput;

use crate::context::use_app_context;
use crate::store::{store_upsert_supplier, use_app_store};

#[component]
pub fn SupplierForm(
    #[prop(into)] initial: SupplierInput,
    #[prop(optional, into)] editing: Option<String>,
    #[prop(into)] on_done: Callback<()>,
) -> impl IntoView {
    let ctx = use_app_context();
    let store = use_app_store();

    let (draft, set_draft) = signal(initial);
    let (form_error, set_form_error) = signal(None::<String>);
    let (saving, set_saving) = signal(false);
    let editing = StoredValue::new(editing);

    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let input = draft.get();
        if let Err(message) = input.validate() {
            set_form_error.set(Some(message));
            return;
        }
        set_form_error.set(None);
        set_saving.set(true);
        spawn_local(async move {
            let api = ctx.api();
            let result = match editing.get_value() {
                Some(id) => api.update_supplier(&id, &input).await.map(|()| {
                    info!(event = "procurement.supplier_updated", id = %id);
                }),
                None => api.create_supplier(&input).await.map(|created| {
                    info!(event = "procurement.supplier_created", id = %created.id);
                    store_upsert_supplier(&store, created);
                }),
            };
            set_saving.set(false);
            match result {
                Ok(()) => {
                    ctx.success("Supplier saved");
                    ctx.reload();
                    on_done.run(());
                }
                Err(e) => set_form_error.set(Some(e.user_message())),
            }
        });
    };

    let field = move |label: &'static str, get: fn(&SupplierInput) -> String, put: fn(&mut SupplierInput, String)| {
        view! {
            <label class="form-field">
                <span>{label}</span>
                <input
                    type="text"
                    prop:value=move || draft.with(get)
                    on:input=move |ev| set_draft.update(|d| put(d, event_target_value(&ev)))
                />
            </label>
        }
    };

    view! {
        <form class="supplier-form" on:submit=on_submit>
            {field("Name", |d| d.name.clone(), |d, v| d.name = v)}
            {field("Contact", |d| d.contact_name.clone(), |d, v| d.contact_name = v)}
            {field("Email", |d| d.email.clone(), |d, v| d.email = v)}
            {field("Phone", |d| d.phone.clone(), |d, v| d.phone = v)}
            {field("Address", |d| d.address.clone(), |d, v| d.address = v)}
            {field("City", |d| d.city.clone(), |d, v| d.city = v)}
            {field("State", |d| d.state.clone(), |d, v| d.state = v)}
            {field("ZIP", |d| d.zip.clone(), |d, v| d.zip = v)}
            <label class="form-field">
                <span>"Notes"</span>
                <textarea
                    prop:value=move || draft.with(|d| d.notes.clone().unwrap_or_default())
                    on:input=move |ev| {
                        let text = event_target_value(&ev);
                        set_draft.update(|d| d.notes = if text.trim().is_empty() { None } else { Some(text) });
                    }
                ></textarea>
            </label>
            {move || form_error.get().map(|message| view! { <p class="form-error">{message}</p> })}
            <div class="form-actions">
                <button type="button" on:click=move |_| on_done.run(())>"Cancel"</button>
                <button type="submit" class="primary" disabled=move || saving.get()>
                    {move || if saving.get() { "Saving..." } else { "Save" }}
                </button>
            </div>
        </form>
    }
}

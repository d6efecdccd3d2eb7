//! Suppliers Page

use chrono::Utc;
use leptos::prelude::*;
use leptos::task::spawn_local;
use tracing::{info, warn};

use bizops_core::domain::{Supplier, SupplierInput};
use bizops_core::format;
use bizops_core::report;

use crate::components::{DeleteConfirmButton, ErrorBanner, SupplierForm};
use crate::context::use_app_context;
use crate::print;
use crate::store::{store_remove_supplier, use_app_store, AppStateStoreFields};

/// Which form is open: none, a new supplier, or an existing one by id
#[derive(Clone, PartialEq)]
enum Editor {
    Closed,
    New,
    Edit(String),
}

#[component]
pub fn SuppliersPage() -> impl IntoView {
    let ctx = use_app_context();
    let store = use_app_store();
    let error = RwSignal::new(None::<String>);
    let (editor, set_editor) = signal(Editor::Closed);

    Effect::new(move |_| {
        let _ = ctx.reload_trigger.get();
        spawn_local(async move {
            match ctx.api().list_suppliers().await {
                Ok(list) => {
                    error.set(None);
                    store.suppliers().set(list);
                }
                Err(e) => {
                    warn!(event = "procurement.suppliers_failed", error = %e);
                    error.set(Some(e.user_message()));
                }
            }
        });
    });

    let delete = move |id: String| {
        spawn_local(async move {
            match ctx.api().delete_supplier(&id).await {
                Ok(()) => {
                    info!(event = "procurement.supplier_deleted", id = %id);
                    store_remove_supplier(&store, &id);
                    ctx.success("Supplier deleted");
                }
                Err(e) => ctx.error(e.user_message()),
            }
        });
    };

    let print_report = move |_| {
        let html = report::supplier_report(&store.suppliers().get(), Utc::now());
        if let Err(message) = print::print_html(&html) {
            ctx.error(message);
        }
    };

    let close = Callback::new(move |_: ()| set_editor.set(Editor::Closed));

    let form = move || match editor.get() {
        Editor::Closed => ().into_any(),
        Editor::New => view! { <SupplierForm initial=SupplierInput::default() on_done=close /> }.into_any(),
        Editor::Edit(id) => {
            let initial = store
                .suppliers()
                .with(|list| list.iter().find(|s| s.id == id).map(SupplierInput::from))
                .unwrap_or_default();
            view! { <SupplierForm initial=initial editing=id on_done=close /> }.into_any()
        }
    };

    view! {
        <section class="suppliers-page">
            <div class="list-toolbar">
                <h1>"Suppliers"</h1>
                <button class="primary" on:click=move |_| set_editor.set(Editor::New)>"New supplier"</button>
                <button on:click=print_report>"Print report"</button>
            </div>
            <ErrorBanner error=error />
            {form}
            <table class="data-table">
                <thead>
                    <tr>
                        <th>"Name"</th>
                        <th>"Contact"</th>
                        <th>"Email"</th>
                        <th>"Phone"</th>
                        <th>"Address"</th>
                        <th>"Items"</th>
                        <th>"Inventory value"</th>
                        <th></th>
                    </tr>
                </thead>
                <tbody>
                    <For
                        each=move || store.suppliers().get()
                        key=|s: &Supplier| (s.id.clone(), s.name.clone(), s.item_count)
                        children=move |s: Supplier| {
                            let edit_id = s.id.clone();
                            let delete_id = s.id.clone();
                            view! {
                                <tr>
                                    <td>
                                        <button class="link" on:click=move |_| set_editor.set(Editor::Edit(edit_id.clone()))>
                                            {s.name.clone()}
                                        </button>
                                    </td>
                                    <td>{s.contact_name.clone()}</td>
                                    <td>{s.email.clone()}</td>
                                    <td>{s.phone.clone()}</td>
                                    <td>{s.full_address()}</td>
                                    <td class="num">{format::count(u64::from(s.item_count))}</td>
                                    <td class="num">{format::currency(s.inventory_value)}</td>
                                    <td>
                                        <DeleteConfirmButton
                                            subject=s.name.clone()
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
        </section>
    }
}

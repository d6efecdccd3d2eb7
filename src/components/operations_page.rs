//! Operations Page
//!
//! Tabs over the current page of production items. The item list is kept
//! fresh by the poller while Dashboard or Inventory is showing.

use leptos::prelude::*;
use leptos::task::spawn_local;
use tracing::{debug, warn};

use bizops_core::polling::OperationsTab;

use crate::components::{ErrorBanner, InventoryList, OperationsDashboard, OperationsReports, PhasesOverview};
use crate::context::use_app_context;
use crate::details;
use crate::polling::use_item_polling;
use crate::store::{use_app_store, AppStateStoreFields};

#[component]
pub fn OperationsPage() -> impl IntoView {
    let ctx = use_app_context();
    let store = use_app_store();

    let (tab, set_tab) = signal(OperationsTab::Dashboard);
    let (page, set_page) = signal(1u32);
    let (search, set_search) = signal(String::new());
    let (loading, set_loading) = signal(false);
    let error = RwSignal::new(None::<String>);

    let poller = use_item_polling(tab, page, search);

    // Full reload: page, search or an explicit reload
    Effect::new(move |_| {
        let _ = ctx.reload_trigger.get();
        let page_no = page.get();
        let query = search.get();
        let limit = ctx.config.with_value(|c| c.page_size);
        set_loading.set(true);
        spawn_local(async move {
            match ctx.api().list_operation_items(page_no, limit, &query).await {
                Ok(result) => {
                    debug!(event = "operations.loaded", total = result.total, page = page_no);
                    poller.reset_baseline(result.total);
                    let ids: Vec<String> = result.items.iter().map(|i| i.id.clone()).collect();
                    store.item_total().set(result.total);
                    store.items().set(result.items);
                    error.set(None);
                    set_loading.set(false);
                    details::prefetch(ctx, store, ids).await;
                }
                Err(e) => {
                    warn!(event = "operations.load_failed", error = %e);
                    error.set(Some(e.user_message()));
                    set_loading.set(false);
                }
            }
        });
    });

    let tab_content = move || match tab.get() {
        OperationsTab::Dashboard => view! { <OperationsDashboard /> }.into_any(),
        OperationsTab::Inventory => view! {
            <InventoryList page=page set_page=set_page search=search set_search=set_search />
        }
        .into_any(),
        OperationsTab::Phases => view! { <PhasesOverview /> }.into_any(),
        OperationsTab::Reports => view! { <OperationsReports /> }.into_any(),
    };

    view! {
        <section class="operations-page">
            <h1>"Operations"</h1>
            <nav class="tab-bar">
                {OperationsTab::ALL
                    .into_iter()
                    .map(|t| {
                        let is_selected = move || tab.get() == t;
                        view! {
                            <button
                                class=move || if is_selected() { "tab active" } else { "tab" }
                                on:click=move |_| set_tab.set(t)
                            >
                                {t.label()}
                            </button>
                        }
                    })
                    .collect_view()}
            </nav>
            <ErrorBanner error=error />
            <Show when=move || loading.get()>
                <p class="loading">"Loading..."</p>
            </Show>
            {tab_content}
        </section>
    }
}

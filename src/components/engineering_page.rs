//! Engineering Page
//!
//! Per-phase progress for the first page of items, with estimate overruns.

use leptos::prelude::*;
use leptos::task::spawn_local;
use tracing::warn;

use bizops_core::dashboard::{phase_progress, PhaseProgress};
use bizops_core::format;
use bizops_core::routes::Route;

use crate::components::ErrorBanner;
use crate::context::use_app_context;
use crate::details;
use crate::store::{store_items_with_details, use_app_store, AppStateStoreFields};

#[component]
pub fn EngineeringPage() -> impl IntoView {
    let ctx = use_app_context();
    let store = use_app_store();
    let error = RwSignal::new(None::<String>);

    Effect::new(move |_| {
        let _ = ctx.reload_trigger.get();
        let limit = ctx.config.with_value(|c| c.page_size);
        spawn_local(async move {
            match ctx.api().list_operation_items(1, limit, "").await {
                Ok(result) => {
                    let ids = result.items.iter().map(|i| i.id.clone()).collect();
                    store.item_total().set(result.total);
                    store.items().set(result.items);
                    error.set(None);
                    details::prefetch(ctx, store, ids).await;
                }
                Err(e) => {
                    warn!(event = "engineering.load_failed", error = %e);
                    error.set(Some(e.user_message()));
                }
            }
        });
    });

    let rows = Memo::new(move |_| phase_progress(&store_items_with_details(&store)));
    let overruns = move || rows.with(|r| r.iter().filter(|p| p.is_over_estimate()).count());

    view! {
        <section class="engineering-page">
            <h1>"Engineering"</h1>
            <ErrorBanner error=error />
            <p class="summary-line">
                {move || format!("{} phases tracked, {} over estimate", rows.with(Vec::len), overruns())}
            </p>
            <table class="data-table">
                <thead>
                    <tr>
                        <th>"Part"</th>
                        <th>"Phase"</th>
                        <th>"Status"</th>
                        <th>"Subphases"</th>
                        <th>"Progress"</th>
                        <th>"Estimated"</th>
                        <th>"Actual"</th>
                    </tr>
                </thead>
                <tbody>
                    {move || {
                        rows.get()
                            .into_iter()
                            .map(|p: PhaseProgress| {
                                let percent = p.percent();
                                let row_class = if p.is_over_estimate() { "over-estimate" } else { "" };
                                let item_id = p.item_id.clone();
                                view! {
                                    <tr class=row_class>
                                        <td>
                                            <button
                                                class="link"
                                                on:click=move |_| ctx.navigate(Route::OperationsItem(item_id.clone()))
                                            >
                                                {p.part_number.clone()}
                                            </button>
                                        </td>
                                        <td>{p.phase_name.clone()}</td>
                                        <td>{p.status.label()}</td>
                                        <td class="num">{format!("{}/{}", p.done, p.total)}</td>
                                        <td>
                                            <div class="progress-bar">
                                                <div class="progress-fill" style=format!("width: {}%", percent)></div>
                                            </div>
                                            <span class="progress-text">{format!("{}%", percent)}</span>
                                        </td>
                                        <td>{format::duration_minutes(p.expected_minutes)}</td>
                                        <td>{format::duration_seconds(p.actual_seconds)}</td>
                                    </tr>
                                }
                            })
                            .collect_view()
                    }}
                </tbody>
            </table>
        </section>
    }
}

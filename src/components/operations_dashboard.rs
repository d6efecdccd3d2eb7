//! Operations dashboard tab: counts by priority and phase status.

use leptos::prelude::*;

use bizops_core::dashboard::operations_summary;
use bizops_core::format;

use crate::store::{store_items_with_details, use_app_store, AppStateStoreFields};

#[component]
pub fn OperationsDashboard() -> impl IntoView {
    let store = use_app_store();
    let summary = Memo::new(move |_| operations_summary(&store_items_with_details(&store)));

    view! {
        <div class="operations-dashboard">
            <div class="stat-cards">
                <div class="stat-card">
                    <span class="stat-label">"Items (all pages)"</span>
                    <span class="stat-value">{move || format::count(store.item_total().get())}</span>
                </div>
                <div class="stat-card">
                    <span class="stat-label">"Quantity on this page"</span>
                    <span class="stat-value">{move || format::count(summary.get().total_quantity)}</span>
                </div>
                <div class="stat-card">
                    <span class="stat-label">"Subphases complete"</span>
                    <span class="stat-value">{move || format!("{}%", summary.get().completion)}</span>
                </div>
            </div>

            <div class="dashboard-columns">
                <table class="data-table">
                    <thead><tr><th>"Priority"</th><th>"Items"</th></tr></thead>
                    <tbody>
                        {move || summary.get().by_priority.into_iter().map(|(priority, count)| view! {
                            <tr class=format!("priority-{}", priority.as_str())>
                                <td>{priority.to_string()}</td>
                                <td class="num">{count}</td>
                            </tr>
                        }).collect_view()}
                    </tbody>
                </table>
                <table class="data-table">
                    <thead><tr><th>"Phase status"</th><th>"Phases"</th></tr></thead>
                    <tbody>
                        {move || summary.get().by_phase_status.into_iter().map(|(status, count)| view! {
                            <tr>
                                <td>{status.label()}</td>
                                <td class="num">{count}</td>
                            </tr>
                        }).collect_view()}
                    </tbody>
                </table>
            </div>
        </div>
    }
}

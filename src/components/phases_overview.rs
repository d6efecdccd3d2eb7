//! Phases tab: every phase of the current page with its controls.

use leptos::prelude::*;

use bizops_core::domain::Item;
use bizops_core::format;
use bizops_core::routes::Route;

use crate::components::PhaseActions;
use crate::context::use_app_context;
use crate::store::{store_items_with_details, use_app_store};

#[component]
pub fn PhasesOverview() -> impl IntoView {
    let ctx = use_app_context();
    let store = use_app_store();
    let items = Memo::new(move |_| store_items_with_details(&store));

    let item_block = move |item: Item| {
        let open_id = item.id.clone();
        let item_id = item.id.clone();
        view! {
            <div class="phase-item">
                <h3 class="clickable" on:click=move |_| ctx.navigate(Route::OperationsItem(open_id.clone()))>
                    {format!("{} · {}", item.part_number, item.name)}
                </h3>
                <table class="data-table">
                    <thead>
                        <tr><th>"Phase"</th><th>"Status"</th><th>"Subphases"</th><th>"Time"</th><th></th></tr>
                    </thead>
                    <tbody>
                        {item.phases.into_iter().map(|phase| {
                            let status = phase.status();
                            let done = phase.completed_subphases();
                            let total = phase.subphases.len();
                            view! {
                                <tr>
                                    <td>{phase.name.clone()}</td>
                                    <td class=format!("status-{:?}", status).to_lowercase()>{status.label()}</td>
                                    <td class="num">{format!("{}/{}", done, total)}</td>
                                    <td class="num">
                                        {format!(
                                            "{} / {}",
                                            format::duration_seconds(phase.actual_seconds()),
                                            format::duration_minutes(phase.expected_minutes()),
                                        )}
                                    </td>
                                    <td>
                                        <PhaseActions item_id=item_id.clone() phase=phase on_done=move |_| ctx.reload() />
                                    </td>
                                </tr>
                            }
                        }).collect_view()}
                    </tbody>
                </table>
            </div>
        }
    };

    view! {
        <div class="phases-overview">
            {move || {
                let items = items.get();
                if items.is_empty() {
                    view! { <p class="empty">"No items on this page."</p> }.into_any()
                } else {
                    items.into_iter().map(item_block).collect_view().into_any()
                }
            }}
        </div>
    }
}

//! Item Detail Page
//!
//! One production item with its phases and subphases. Subphase edits are
//! applied locally first and the item is re-fetched afterwards.

use leptos::prelude::*;
use leptos::task::spawn_local;
use tracing::{info, warn};

use bizops_core::auth::Department;
use bizops_core::domain::{Item, Phase, Subphase, SubphaseUpdate};
use bizops_core::format;
use bizops_core::transfer::SubphaseRef;

use crate::components::{DeleteConfirmButton, ErrorBanner, PhaseActions, TransferDialog};
use crate::context::use_app_context;
use crate::details;
use crate::store::{store_remove_item, store_upsert_detail, use_app_store};

#[component]
pub fn ItemDetailPage(id: String) -> impl IntoView {
    let ctx = use_app_context();
    let store = use_app_store();

    let item = RwSignal::new(None::<Item>);
    let (version, set_version) = signal(0u32);
    let error = RwSignal::new(None::<String>);
    let transfer_from = RwSignal::new(None::<SubphaseRef>);
    let item_id = StoredValue::new(id);

    let refresh = move || set_version.update(|v| *v += 1);

    Effect::new(move |_| {
        let _ = version.get();
        let id = item_id.get_value();
        spawn_local(async move {
            match details::load_item(ctx, &id).await {
                Ok(loaded) => {
                    store_upsert_detail(&store, loaded.clone());
                    item.set(Some(loaded));
                    error.set(None);
                }
                Err(e) => {
                    warn!(event = "operations.item_load_failed", id = %id, error = %e);
                    error.set(Some(e.user_message()));
                }
            }
        });
    });

    // Local edit, then the server call; a failure reloads the server copy
    let update_subphase = move |at: SubphaseRef, update: SubphaseUpdate| {
        item.update(|current| {
            if let Some(sub) = current.as_mut().and_then(|i| subphase_mut(i, &at)) {
                if let Some(completed) = update.completed {
                    sub.completed = completed;
                }
                if let Some(quantity) = update.current_quantity {
                    sub.current_quantity = quantity;
                }
                if let Some(employee) = &update.assigned_employee {
                    sub.assigned_employee = Some(employee.clone()).filter(|e| !e.is_empty());
                }
            }
        });
        spawn_local(async move {
            if let Err(e) = ctx.api().update_subphase(&at, &update).await {
                warn!(event = "operations.subphase_update_failed", subphase = %at.subphase_id, error = %e);
                ctx.error(e.user_message());
            } else {
                info!(event = "operations.subphase_updated", subphase = %at.subphase_id);
            }
            refresh();
        });
    };

    let delete_item = move || {
        let id = item_id.get_value();
        spawn_local(async move {
            match ctx.api().delete_operation_item(&id).await {
                Ok(()) => {
                    store_remove_item(&store, &id);
                    ctx.success("Item deleted");
                    ctx.navigate(Department::Operations.home());
                }
                Err(e) => ctx.error(e.user_message()),
            }
        });
    };

    let phase_block = move |item_id: String, phase: Phase| {
        let phase_id = phase.id.clone();
        let actions_phase = phase.clone();
        let actions_item = item_id.clone();
        view! {
            <div class="phase-card">
                <div class="phase-header">
                    <h3>{phase.name.clone()}</h3>
                    <span class="phase-status">{phase.status().label()}</span>
                    <PhaseActions item_id=actions_item phase=actions_phase on_done=move |_| refresh() />
                </div>
                <table class="data-table">
                    <thead>
                        <tr>
                            <th>"Done"</th>
                            <th>"Subphase"</th>
                            <th>"Quantity"</th>
                            <th>"Expected time"</th>
                            <th>"Actual time"</th>
                            <th>"Assigned"</th>
                            <th></th>
                        </tr>
                    </thead>
                    <tbody>
                        {phase.subphases.into_iter().map(|sub| {
                            let at = SubphaseRef {
                                item_id: item_id.clone(),
                                phase_id: phase_id.clone(),
                                subphase_id: sub.id.clone(),
                            };
                            subphase_row(sub, at, update_subphase, transfer_from)
                        }).collect_view()}
                    </tbody>
                </table>
            </div>
        }
    };

    view! {
        <section class="item-detail">
            <button class="link-btn" on:click=move |_| ctx.navigate(Department::Operations.home())>"← Operations"</button>
            <ErrorBanner error=error />
            {move || item.get().map(|current| {
                let (done, total) = current.progress();
                let item_id = current.id.clone();
                let for_dialog = current.clone();
                view! {
                    <div class="item-header">
                        <h1>{format!("{} · {}", current.part_number, current.name)}</h1>
                        <DeleteConfirmButton subject=current.part_number.clone() on_confirm=move |_| delete_item() />
                    </div>
                    <dl class="item-facts">
                        <dt>"Client"</dt><dd>{current.client.clone()}</dd>
                        <dt>"Priority"</dt><dd>{current.priority.to_string()}</dd>
                        <dt>"Quantity"</dt><dd>{format::count(u64::from(current.quantity))}</dd>
                        <dt>"Progress"</dt><dd>{format!("{}/{} subphases ({}%)", done, total, format::percent(done, total))}</dd>
                    </dl>
                    {current.phases.into_iter().map(|phase| phase_block(item_id.clone(), phase)).collect_view()}
                    {move || transfer_from.get().map(|source| view! {
                        <TransferDialog
                            item=for_dialog.clone()
                            source=source
                            on_close=move |_| transfer_from.set(None)
                            on_done=move |_| {
                                transfer_from.set(None);
                                refresh();
                            }
                        />
                    })}
                }
            })}
        </section>
    }
}

fn subphase_mut<'a>(item: &'a mut Item, at: &SubphaseRef) -> Option<&'a mut Subphase> {
    item.phases
        .iter_mut()
        .find(|p| p.id == at.phase_id)?
        .subphases
        .iter_mut()
        .find(|s| s.id == at.subphase_id)
}

fn subphase_row(
    sub: Subphase,
    at: SubphaseRef,
    update_subphase: impl Fn(SubphaseRef, SubphaseUpdate) + Copy + 'static,
    transfer_from: RwSignal<Option<SubphaseRef>>,
) -> impl IntoView {
    let (assignee, set_assignee) = signal(sub.assigned_employee.clone().unwrap_or_default());
    let toggle_at = at.clone();
    let assign_at = at.clone();
    let completed = sub.completed;
    let expected_quantity = sub.expected_quantity;
    let nothing_to_move = sub.current_quantity == 0;
    let row_class = if completed { "subphase done" } else { "subphase" };

    view! {
        <tr class=row_class>
            <td>
                <input
                    type="checkbox"
                    prop:checked=completed
                    on:change=move |ev| {
                        let checked = event_target_checked(&ev);
                        let update = SubphaseUpdate {
                            completed: Some(checked),
                            current_quantity: checked.then_some(expected_quantity),
                            assigned_employee: None,
                        };
                        update_subphase(toggle_at.clone(), update);
                    }
                />
            </td>
            <td>{sub.name.clone()}</td>
            <td class="num">{format!("{}/{}", sub.current_quantity, sub.expected_quantity)}</td>
            <td class="num">{format::duration_minutes(sub.expected_duration)}</td>
            <td class="num">{format::duration_seconds(sub.actual_duration)}</td>
            <td>
                <input
                    type="text"
                    class="assignee-input"
                    placeholder="Unassigned"
                    prop:value=move || assignee.get()
                    on:input=move |ev| set_assignee.set(event_target_value(&ev))
                    on:change=move |_| {
                        let update = SubphaseUpdate {
                            assigned_employee: Some(assignee.get_untracked().trim().to_string()),
                            ..SubphaseUpdate::default()
                        };
                        update_subphase(assign_at.clone(), update);
                    }
                />
            </td>
            <td>
                <button
                    class="transfer-btn"
                    disabled=nothing_to_move
                    on:click=move |_| transfer_from.set(Some(at.clone()))
                >
                    "Transfer"
                </button>
            </td>
        </tr>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item() -> Item {
        serde_json::from_value(serde_json::json!({
            "id": "i1",
            "partNumber": "P-1",
            "name": "Bracket",
            "phases": [{
                "id": "p1",
                "name": "Cut",
                "subphases": [
                    { "id": "s1", "name": "Saw", "expectedQuantity": 4 },
                    { "id": "s2", "name": "Deburr", "expectedQuantity": 4 }
                ]
            }]
        }))
        .unwrap()
    }

    fn at(phase: &str, sub: &str) -> SubphaseRef {
        SubphaseRef { item_id: "i1".into(), phase_id: phase.into(), subphase_id: sub.into() }
    }

    #[test]
    fn test_subphase_mut_edits_in_place() {
        let mut item = item();
        subphase_mut(&mut item, &at("p1", "s2")).unwrap().current_quantity = 3;
        assert_eq!(item.subphase("p1", "s2").unwrap().current_quantity, 3);
        assert_eq!(item.subphase("p1", "s1").unwrap().current_quantity, 0);
    }

    #[test]
    fn test_subphase_mut_unknown_ids() {
        let mut item = item();
        assert!(subphase_mut(&mut item, &at("p9", "s1")).is_none());
        assert!(subphase_mut(&mut item, &at("p1", "s9")).is_none());
    }
}

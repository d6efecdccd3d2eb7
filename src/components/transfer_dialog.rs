//! Transfer Dialog
//!
//! Moves completed quantity from one subphase to another subphase of the
//! same item. The second write is compensated when it fails.

use leptos::prelude::*;
use leptos::task::spawn_local;
use tracing::{error, info, warn};

use bizops_core::domain::Item;
use bizops_core::transfer::{plan_transfer, SubphaseRef, TransferPlan, TransferRequest};

use crate::api::ApiClient;
use crate::context::use_app_context;

/// Run both writes; on a failed second write, put the source back
async fn execute(api: &ApiClient, plan: &TransferPlan, source_name: &str) -> Result<(), String> {
    api.apply_quantity(&plan.decrement_source)
        .await
        .map_err(|e| format!("Transfer aborted: {}", e.user_message()))?;

    let Err(target_error) = api.apply_quantity(&plan.increment_target).await else {
        return Ok(());
    };
    warn!(event = "transfer.target_failed", error = %target_error);

    match api.apply_quantity(&plan.compensation()).await {
        Ok(()) => {
            info!(event = "transfer.compensated", subphase = %plan.decrement_source.subphase.subphase_id);
            Err(format!("Transfer failed and was rolled back: {}", target_error.user_message()))
        }
        Err(e) => {
            error!(event = "transfer.compensation_failed", subphase = %plan.decrement_source.subphase.subphase_id, error = %e);
            Err(format!(
                "Transfer failed and \"{}\" could not be restored to {}. Check its quantity.",
                source_name, plan.decrement_source.previous_quantity
            ))
        }
    }
}

#[component]
pub fn TransferDialog(
    item: Item,
    source: SubphaseRef,
    #[prop(into)] on_close: Callback<()>,
    #[prop(into)] on_done: Callback<()>,
) -> impl IntoView {
    let ctx = use_app_context();

    let Some(source_sub) = item.subphase(&source.phase_id, &source.subphase_id).cloned() else {
        return view! { <div class="modal"><p>"Subphase no longer exists."</p></div> }.into_any();
    };

    // Every other subphase of the item, labelled "Phase / Subphase"
    let item_id = &item.id;
    let targets: Vec<(SubphaseRef, String)> = item
        .phases
        .iter()
        .flat_map(|phase| {
            phase.subphases.iter().map(move |sub| {
                let at = SubphaseRef {
                    item_id: item_id.clone(),
                    phase_id: phase.id.clone(),
                    subphase_id: sub.id.clone(),
                };
                let label = format!("{} / {} ({}/{})", phase.name, sub.name, sub.current_quantity, sub.expected_quantity);
                (at, label)
            })
        })
        .filter(|(at, _)| *at != source)
        .collect();

    let (target_index, set_target_index) = signal(0usize);
    let (quantity, set_quantity) = signal(String::from("1"));
    let (busy, set_busy) = signal(false);
    let (form_error, set_form_error) = signal(None::<String>);

    let item = StoredValue::new(item);
    let targets = StoredValue::new(targets);
    let source = StoredValue::new(source);
    let source_sub = StoredValue::new(source_sub);

    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let Some(target) = targets.with_value(|t| t.get(target_index.get()).map(|(at, _)| at.clone())) else {
            set_form_error.set(Some("Choose a target subphase".to_string()));
            return;
        };
        let request = TransferRequest {
            source: source.get_value(),
            target: target.clone(),
            quantity: quantity.get().trim().parse().unwrap_or(0),
        };
        let Some(target_sub) = item.with_value(|i| i.subphase(&target.phase_id, &target.subphase_id).cloned()) else {
            set_form_error.set(Some("Target subphase no longer exists".to_string()));
            return;
        };
        let source_sub = source_sub.get_value();
        let plan = match plan_transfer(&source_sub, &target_sub, &request) {
            Ok(plan) => plan,
            Err(e) => {
                set_form_error.set(Some(e.to_string()));
                return;
            }
        };

        set_form_error.set(None);
        set_busy.set(true);
        spawn_local(async move {
            let result = execute(&ctx.api(), &plan, &source_sub.name).await;
            set_busy.set(false);
            match result {
                Ok(()) => {
                    info!(event = "transfer.done", quantity = request.quantity);
                    ctx.success(format!("Moved {} from {}", request.quantity, source_sub.name));
                }
                Err(message) => ctx.error(message),
            }
            // Server state is the truth either way
            on_done.run(());
        });
    };

    view! {
        <div class="modal-backdrop" on:click=move |_| on_close.run(())>
            <form class="modal transfer-dialog" on:click=|ev| ev.stop_propagation() on:submit=on_submit>
                <h2>{move || format!("Transfer from {}", source_sub.with_value(|s| s.name.clone()))}</h2>
                <p class="hint">
                    {move || source_sub.with_value(|s| format!("{} completed units available", s.current_quantity))}
                </p>
                <label>
                    "Target"
                    <select on:change=move |ev| set_target_index.set(event_target_value(&ev).parse().unwrap_or(0))>
                        {targets.with_value(|t| {
                            t.iter()
                                .enumerate()
                                .map(|(index, (_, label))| view! { <option value=index.to_string()>{label.clone()}</option> })
                                .collect_view()
                        })}
                    </select>
                </label>
                <label>
                    "Quantity"
                    <input
                        type="number"
                        min="1"
                        prop:value=move || quantity.get()
                        on:input=move |ev| set_quantity.set(event_target_value(&ev))
                    />
                </label>
                {move || form_error.get().map(|message| view! { <p class="form-error">{message}</p> })}
                <div class="modal-actions">
                    <button type="button" on:click=move |_| on_close.run(())>"Cancel"</button>
                    <button type="submit" class="primary" disabled=move || busy.get()>"Transfer"</button>
                </div>
            </form>
        </div>
    }
    .into_any()
}

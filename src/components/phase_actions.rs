//! Start / pause / resume / end buttons for one phase.

use leptos::prelude::*;
use leptos::task::spawn_local;
use tracing::{info, warn};

use bizops_core::domain::{Phase, PhaseAction};

use crate::context::use_app_context;

#[component]
pub fn PhaseActions(
    #[prop(into)] item_id: String,
    phase: Phase,
    #[prop(into)] on_done: Callback<()>,
) -> impl IntoView {
    let ctx = use_app_context();
    let (busy, set_busy) = signal(false);
    let phase_id = phase.id.clone();
    let phase_name = phase.name.clone();

    let run = move |action: PhaseAction| {
        let item_id = item_id.clone();
        let phase_id = phase_id.clone();
        let phase_name = phase_name.clone();
        set_busy.set(true);
        spawn_local(async move {
            match ctx.api().phase_action(&item_id, &phase_id, action).await {
                Ok(()) => {
                    info!(event = "operations.phase_action", item = %item_id, phase = %phase_id, action = action.as_str());
                    ctx.success(format!("{}: {}", phase_name, action.label()));
                }
                Err(e) => {
                    warn!(event = "operations.phase_action_failed", item = %item_id, phase = %phase_id, error = %e);
                    ctx.error(e.user_message());
                }
            }
            set_busy.set(false);
            on_done.run(());
        });
    };

    view! {
        <span class="phase-actions">
            {phase
                .available_actions()
                .iter()
                .map(|action| {
                    let action = *action;
                    let run = run.clone();
                    view! {
                        <button
                            class=format!("phase-btn {}", action.as_str())
                            disabled=move || busy.get()
                            on:click=move |ev| {
                                ev.stop_propagation();
                                run(action);
                            }
                        >
                            {action.label()}
                        </button>
                    }
                })
                .collect_view()}
        </span>
    }
}

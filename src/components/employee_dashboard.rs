//! Employee Dashboard
//!
//! The signed-in employee's subphase assignments, a log entry form and
//! their own log history.

use leptos::prelude::*;
use leptos::task::spawn_local;
use tracing::{info, warn};

use bizops_core::dashboard::{assignments_for, Assignment};
use bizops_core::domain::{EmployeeLog, NewEmployeeLog, SubphaseUpdate};
use bizops_core::format;
use bizops_core::transfer::SubphaseRef;

use crate::components::ErrorBanner;
use crate::context::use_app_context;
use crate::details;
use crate::store::{store_items_with_details, use_app_store, AppStateStoreFields};

#[component]
pub fn EmployeeDashboard() -> impl IntoView {
    let ctx = use_app_context();
    let store = use_app_store();
    let error = RwSignal::new(None::<String>);
    let username = Memo::new(move |_| ctx.username());
    let (entry, set_entry) = signal(String::new());
    let (submitting, set_submitting) = signal(false);

    Effect::new(move |_| {
        let _ = ctx.reload_trigger.get();
        let who = username.get();
        let limit = ctx.config.with_value(|c| c.page_size);
        spawn_local(async move {
            let api = ctx.api();
            let (items, logs) =
                futures::join!(api.list_operation_items(1, limit, ""), api.list_employee_logs(Some(&who)));
            match logs {
                Ok(list) => store.employee_logs().set(list),
                Err(e) => warn!(event = "employee.logs_failed", error = %e),
            }
            match items {
                Ok(result) => {
                    let ids = result.items.iter().map(|i| i.id.clone()).collect();
                    store.items().set(result.items);
                    error.set(None);
                    details::prefetch(ctx, store, ids).await;
                }
                Err(e) => {
                    warn!(event = "employee.items_failed", error = %e);
                    error.set(Some(e.user_message()));
                }
            }
        });
    });

    let assignments = Memo::new(move |_| assignments_for(&store_items_with_details(&store), &username.get()));
    let open_count = move || assignments.with(|a| a.iter().filter(|x| !x.subphase.completed).count());

    let mark_complete = move |at: SubphaseRef, expected: u32| {
        spawn_local(async move {
            let update = SubphaseUpdate {
                completed: Some(true),
                current_quantity: Some(expected),
                ..Default::default()
            };
            match ctx.api().update_subphase(&at, &update).await {
                Ok(()) => {
                    info!(event = "employee.subphase_completed", item = %at.item_id, subphase = %at.subphase_id);
                    ctx.success("Marked complete");
                    ctx.reload();
                }
                Err(e) => ctx.error(e.user_message()),
            }
        });
    };

    let submit_log = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let details = entry.get().trim().to_string();
        if details.is_empty() {
            ctx.error("Write something before submitting");
            return;
        }
        set_submitting.set(true);
        let log = NewEmployeeLog { username: username.get_untracked(), details };
        spawn_local(async move {
            let result = ctx.api().create_employee_log(&log).await;
            set_submitting.set(false);
            match result {
                Ok(created) => {
                    store.employee_logs().update(|logs| logs.insert(0, created));
                    set_entry.set(String::new());
                    ctx.success("Log submitted");
                }
                Err(e) => ctx.error(e.user_message()),
            }
        });
    };

    view! {
        <section class="employee-dashboard">
            <h1>{move || format!("Welcome, {}", username.get())}</h1>
            <ErrorBanner error=error />

            <h2>{move || format!("My assignments ({} open)", open_count())}</h2>
            <table class="data-table">
                <thead>
                    <tr>
                        <th>"Part"</th>
                        <th>"Item"</th>
                        <th>"Phase"</th>
                        <th>"Subphase"</th>
                        <th>"Quantity"</th>
                        <th>"Estimate"</th>
                        <th></th>
                    </tr>
                </thead>
                <tbody>
                    <For
                        each=move || assignments.get()
                        key=|a: &Assignment| (a.at.clone(), a.subphase.completed, a.subphase.current_quantity)
                        children=move |a: Assignment| {
                            let done = a.subphase.completed;
                            let at = a.at.clone();
                            let expected = a.subphase.expected_quantity;
                            let row_class = if done { "assignment done" } else { "assignment" };
                            view! {
                                <tr class=row_class>
                                    <td>{a.part_number.clone()}</td>
                                    <td>{a.item_name.clone()}</td>
                                    <td>{a.phase_name.clone()}</td>
                                    <td>{a.subphase.name.clone()}</td>
                                    <td class="num">
                                        {format!("{}/{}", a.subphase.current_quantity, a.subphase.expected_quantity)}
                                    </td>
                                    <td>{format::duration_minutes(a.subphase.expected_duration)}</td>
                                    <td>
                                        <Show when=move || !done fallback=|| view! { <span class="badge">"Done"</span> }>
                                            <button on:click={
                                                let at = at.clone();
                                                move |_| mark_complete(at.clone(), expected)
                                            }>
                                                "Mark complete"
                                            </button>
                                        </Show>
                                    </td>
                                </tr>
                            }
                        }
                    />
                </tbody>
            </table>

            <h2>"Log activity"</h2>
            <form class="log-form" on:submit=submit_log>
                <textarea
                    placeholder="What did you work on?"
                    prop:value=move || entry.get()
                    on:input=move |ev| set_entry.set(event_target_value(&ev))
                ></textarea>
                <button type="submit" class="primary" disabled=move || submitting.get()>"Submit"</button>
            </form>

            <h2>"My log history"</h2>
            <ul class="log-history">
                <For
                    each=move || store.employee_logs().get()
                    key=|l: &EmployeeLog| (l.id.clone(), l.flagged)
                    children=|l: EmployeeLog| {
                        view! {
                            <li class:flagged=l.flagged>
                                <span class="log-time">{format::date_time(&l.timestamp)}</span>
                                <span class="log-details">{l.details.clone()}</span>
                            </li>
                        }
                    }
                />
            </ul>
        </section>
    }
}

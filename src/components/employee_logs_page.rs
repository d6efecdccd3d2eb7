//! Employee Logs Page
//!
//! HR review of employee activity: filter, flag, annotate and print.

use chrono::Utc;
use leptos::prelude::*;
use leptos::task::spawn_local;
use tracing::warn;

use bizops_core::dashboard::filter_logs;
use bizops_core::domain::{EmployeeLog, EmployeeLogUpdate};
use bizops_core::format;
use bizops_core::report;

use crate::components::ErrorBanner;
use crate::context::use_app_context;
use crate::print;
use crate::store::{store_update_log, use_app_store, AppStateStoreFields};

#[component]
pub fn EmployeeLogsPage() -> impl IntoView {
    let ctx = use_app_context();
    let store = use_app_store();
    let error = RwSignal::new(None::<String>);
    let (username, set_username) = signal(String::new());
    let (flagged_only, set_flagged_only) = signal(false);

    Effect::new(move |_| {
        let _ = ctx.reload_trigger.get();
        spawn_local(async move {
            match ctx.api().list_employee_logs(None).await {
                Ok(list) => {
                    error.set(None);
                    store.employee_logs().set(list);
                }
                Err(e) => {
                    warn!(event = "hr.logs_failed", error = %e);
                    error.set(Some(e.user_message()));
                }
            }
        });
    });

    let visible = move || {
        let name = username.get();
        let flagged = flagged_only.get();
        store
            .employee_logs()
            .with(|logs| filter_logs(logs, &name, flagged).into_iter().cloned().collect::<Vec<_>>())
    };

    // Optimistic: apply locally, re-fetch when the server rejects it
    let review = move |log: EmployeeLog, update: EmployeeLogUpdate| {
        let mut local = log.clone();
        local.apply(&update);
        store_update_log(&store, local);
        spawn_local(async move {
            if let Err(e) = ctx.api().update_employee_log(&log.id, &update).await {
                warn!(event = "hr.review_failed", id = %log.id, error = %e);
                ctx.error(e.user_message());
                ctx.reload();
            }
        });
    };

    let print_report = move |_| {
        let rows = visible();
        let refs: Vec<&EmployeeLog> = rows.iter().collect();
        let html = report::employee_log_report(&refs, Utc::now());
        if let Err(message) = print::print_html(&html) {
            ctx.error(message);
        }
    };

    view! {
        <section class="employee-logs-page">
            <div class="list-toolbar">
                <h1>"Employee Logs"</h1>
                <input
                    type="search"
                    placeholder="Filter by username"
                    prop:value=move || username.get()
                    on:input=move |ev| set_username.set(event_target_value(&ev))
                />
                <label class="checkbox">
                    <input
                        type="checkbox"
                        prop:checked=move || flagged_only.get()
                        on:change=move |ev| set_flagged_only.set(event_target_checked(&ev))
                    />
                    "Flagged only"
                </label>
                <button on:click=print_report>"Print report"</button>
            </div>
            <ErrorBanner error=error />
            <table class="data-table">
                <thead>
                    <tr>
                        <th>"When"</th>
                        <th>"Employee"</th>
                        <th>"Details"</th>
                        <th>"Flagged"</th>
                        <th>"Admin notes"</th>
                    </tr>
                </thead>
                <tbody>
                    <For
                        each=visible
                        key=|l: &EmployeeLog| (l.id.clone(), l.flagged, l.admin_notes.clone())
                        children=move |log: EmployeeLog| {
                            let flag_log = log.clone();
                            let notes_log = log.clone();
                            let row_class = if log.flagged { "log-row flagged" } else { "log-row" };
                            view! {
                                <tr class=row_class>
                                    <td>{format::date_time(&log.timestamp)}</td>
                                    <td>{log.username.clone()}</td>
                                    <td class="log-details">{log.details.clone()}</td>
                                    <td>
                                        <input
                                            type="checkbox"
                                            prop:checked=log.flagged
                                            on:change=move |ev| {
                                                let update = EmployeeLogUpdate {
                                                    flagged: Some(event_target_checked(&ev)),
                                                    ..Default::default()
                                                };
                                                review(flag_log.clone(), update);
                                            }
                                        />
                                    </td>
                                    <td>
                                        <input
                                            type="text"
                                            placeholder="Add a note"
                                            prop:value=log.admin_notes.clone().unwrap_or_default()
                                            on:change=move |ev| {
                                                let update = EmployeeLogUpdate {
                                                    admin_notes: Some(event_target_value(&ev).trim().to_string()),
                                                    ..Default::default()
                                                };
                                                review(notes_log.clone(), update);
                                            }
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

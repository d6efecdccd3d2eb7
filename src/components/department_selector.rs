//! Department Selector
//!
//! Admins pick the department they want to work in.

use leptos::prelude::*;

use bizops_core::auth::Session;

use crate::context::use_app_context;

#[component]
pub fn DepartmentSelector() -> impl IntoView {
    let ctx = use_app_context();
    let departments = move || ctx.session.with(|s| s.as_ref().map(Session::accessible_departments).unwrap_or_default());

    view! {
        <section class="department-selector">
            <h1>"Choose a department"</h1>
            <div class="department-grid">
                <For
                    each=departments
                    key=|d| *d
                    children=move |department| {
                        let selected = move || ctx.department.get() == Some(department);
                        view! {
                            <button
                                class=move || if selected() { "department-card selected" } else { "department-card" }
                                on:click=move |_| ctx.select_department(department)
                            >
                                <span class="department-name">{department.label()}</span>
                            </button>
                        }
                    }
                />
            </div>
        </section>
    }
}

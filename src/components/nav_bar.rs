//! Top Navigation Bar
//!
//! Department links for admins, the user name and logout.

use leptos::prelude::*;

use bizops_core::auth::Department;
use bizops_core::routes::Route;

use crate::context::use_app_context;

#[component]
pub fn NavBar() -> impl IntoView {
    let ctx = use_app_context();

    let is_admin = move || ctx.session.with(|s| s.as_ref().is_some_and(|s| s.is_admin()));
    let is_super = move || ctx.session.with(|s| s.as_ref().is_some_and(|s| s.is_super_admin()));
    let logged_in = move || ctx.session.with(Option::is_some);
    let department = move || ctx.auth_snapshot().selected_department;
    let in_procurement = move || department() == Some(Department::Procurement);

    let link = move |route: Route, label: &'static str| {
        let target = route.clone();
        let active = move || ctx.route.get() == target;
        view! {
            <button
                class=move || if active() { "nav-link active" } else { "nav-link" }
                on:click=move |_| ctx.navigate(route.clone())
            >
                {label}
            </button>
        }
    };

    view! {
        <header class="nav-bar">
            <span class="nav-brand">"BizOps"</span>
            <Show when=is_admin>
                <nav class="nav-links">
                    <Show when=is_super>
                        {link(Route::DepartmentSelector, "Departments")}
                    </Show>
                    {move || department().map(|d| link(d.home(), d.label()))}
                    <Show when=in_procurement>
                        {link(Route::Suppliers, "Suppliers")}
                        {link(Route::PurchaseOrders, "Purchase Orders")}
                    </Show>
                    {link(Route::Diagnostics, "Diagnostics")}
                </nav>
            </Show>
            <Show when=logged_in>
                <span class="nav-user">{move || ctx.username()}</span>
                <button class="nav-logout" on:click=move |_| ctx.logout()>"Log out"</button>
            </Show>
        </header>
    }
}

//! BizOps Frontend App
//!
//! Route signal, guards and the page switch.

use leptos::prelude::*;
use reactive_stores::Store;
use tracing::{info, warn};

use bizops_core::auth::{Department, UserType};
use bizops_core::config::AppConfig;
use bizops_core::routes::{self, Route};
use rolling_logger::LogBuffer;

use crate::components::{
    DepartmentSelector, DiagnosticsPage, EmployeeDashboard, EmployeeLogsPage, EngineeringPage, FinancePage,
    ItemDetailPage, LandingPage, LoginPage, NavBar, OperationsPage, ProcurementPage, PurchaseOrdersPage,
    SuppliersPage, ToastContainer,
};
use crate::context::AppContext;
use crate::router;
use crate::store::AppState;

#[component]
pub fn App(config: AppConfig, logs: LogBuffer) -> impl IntoView {
    let (route, set_route) = signal(Route::parse(&router::current_path()));
    let (reload_trigger, set_reload_trigger) = signal(0u32);

    let ctx = AppContext::new(config, logs, (route, set_route), (reload_trigger, set_reload_trigger));
    provide_context(ctx);
    provide_context(Store::new(AppState::default()));
    router::bind_popstate(move |route| ctx.follow_history(route));

    // Entry points send a returning user back where they left off
    let entry = route.get_untracked();
    if entry == Route::Landing || entry.is_login() {
        let decision = ctx.restore_decision();
        if decision.should_redirect {
            info!(event = "route.restored", route = %decision.route);
            ctx.redirect(Route::parse(&decision.route));
        }
    }

    // Guards
    Effect::new(move |_| {
        let current = route.get();
        let target = ctx.session.with(|s| routes::guard(&current, s.as_ref()));
        if let Some(target) = target {
            warn!(event = "route.denied", path = %current.path(), redirect = %target.path());
            ctx.redirect(target);
        }
    });

    let page = move || {
        let current = route.get();
        if ctx.session.with(|s| routes::guard(&current, s.as_ref()).is_some()) {
            return view! { <p class="loading">"Redirecting..."</p> }.into_any();
        }
        match current {
            Route::Landing => view! { <LandingPage /> }.into_any(),
            Route::AdminLogin => view! { <LoginPage user_type=UserType::Admin /> }.into_any(),
            Route::EmployeeLogin => view! { <LoginPage user_type=UserType::Employee /> }.into_any(),
            Route::DepartmentSelector => view! { <DepartmentSelector /> }.into_any(),
            Route::Department(Department::Operations) => view! { <OperationsPage /> }.into_any(),
            Route::Department(Department::Procurement) => view! { <ProcurementPage /> }.into_any(),
            Route::Department(Department::Finance) => view! { <FinancePage /> }.into_any(),
            Route::Department(Department::Hr) | Route::EmployeeLogs => view! { <EmployeeLogsPage /> }.into_any(),
            Route::Department(Department::Engineering) => view! { <EngineeringPage /> }.into_any(),
            Route::OperationsItem(id) => view! { <ItemDetailPage id=id /> }.into_any(),
            Route::Suppliers => view! { <SuppliersPage /> }.into_any(),
            Route::PurchaseOrders => view! { <PurchaseOrdersPage /> }.into_any(),
            Route::Diagnostics => view! { <DiagnosticsPage /> }.into_any(),
            Route::EmployeeDashboard => view! { <EmployeeDashboard /> }.into_any(),
            Route::NotFound(path) => view! {
                <div class="not-found">
                    <h1>"Page not found"</h1>
                    <p>{path}</p>
                    <button on:click=move |_| ctx.navigate(Route::Landing)>"Go home"</button>
                </div>
            }
            .into_any(),
        }
    };

    view! {
        <div class="app-layout">
            <NavBar />
            <ToastContainer />
            <main class="main-content">{page}</main>
        </div>
    }
}

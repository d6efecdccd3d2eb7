//! Public landing page with the two login entry points.

use leptos::prelude::*;

use bizops_core::routes::Route;

use crate::context::use_app_context;

#[component]
pub fn LandingPage() -> impl IntoView {
    let ctx = use_app_context();
    let logged_in = move || ctx.session.with(Option::is_some);

    view! {
        <section class="landing">
            <h1>"BizOps"</h1>
            <p class="landing-tagline">"Operations, procurement, finance and people in one place."</p>
            <Show
                when=logged_in
                fallback=move || view! {
                    <div class="landing-actions">
                        <button class="primary" on:click=move |_| ctx.navigate(Route::AdminLogin)>"Admin login"</button>
                        <button on:click=move |_| ctx.navigate(Route::EmployeeLogin)>"Employee login"</button>
                    </div>
                }
            >
                <button
                    class="primary"
                    on:click=move |_| {
                        let decision = ctx.restore_decision();
                        ctx.navigate(Route::parse(&decision.route));
                    }
                >
                    "Continue"
                </button>
            </Show>
        </section>
    }
}

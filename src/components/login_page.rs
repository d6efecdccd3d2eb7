//! Login Page
//!
//! Shared by admins and employees; only the endpoint and heading differ.

use leptos::prelude::*;
use leptos::task::spawn_local;
use tracing::warn;

use bizops_core::auth::{Credentials, UserType};
use bizops_core::routes::Route;

use crate::components::ErrorBanner;
use crate::context::use_app_context;
use crate::notify;

#[component]
pub fn LoginPage(user_type: UserType) -> impl IntoView {
    let ctx = use_app_context();

    let (username, set_username) = signal(String::new());
    let (password, set_password) = signal(String::new());
    let (busy, set_busy) = signal(false);
    let error = RwSignal::new(None::<String>);

    let heading = if user_type == UserType::Admin { "Admin login" } else { "Employee login" };

    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let credentials = Credentials { username: username.get().trim().to_string(), password: password.get() };
        if credentials.username.is_empty() || credentials.password.is_empty() {
            error.set(Some("Enter your username and password".to_string()));
            return;
        }
        // Still inside the submit gesture here
        notify::request_permission();
        set_busy.set(true);
        spawn_local(async move {
            let api = ctx.api();
            let result = match user_type {
                UserType::Admin => api.admin_login(&credentials).await,
                _ => api.employee_login(&credentials).await,
            };
            set_busy.set(false);
            match result {
                Ok(session) => {
                    ctx.login(session);
                    let decision = ctx.restore_decision();
                    ctx.redirect(Route::parse(&decision.route));
                }
                Err(e) => {
                    warn!(event = "auth.login_failed", error = %e);
                    error.set(Some(e.user_message()));
                }
            }
        });
    };

    view! {
        <section class="login-page">
            <h1>{heading}</h1>
            <ErrorBanner error=error />
            <form class="login-form" on:submit=on_submit>
                <label>
                    "Username"
                    <input
                        type="text"
                        autocomplete="username"
                        prop:value=move || username.get()
                        on:input=move |ev| set_username.set(event_target_value(&ev))
                    />
                </label>
                <label>
                    "Password"
                    <input
                        type="password"
                        autocomplete="current-password"
                        prop:value=move || password.get()
                        on:input=move |ev| set_password.set(event_target_value(&ev))
                    />
                </label>
                <button type="submit" class="primary" disabled=move || busy.get()>
                    {move || if busy.get() { "Signing in..." } else { "Sign in" }}
                </button>
            </form>
            <button class="link-btn" on:click=move |_| ctx.navigate(Route::Landing)>"Back"</button>
        </section>
    }
}

//! Toast Container Component

use leptos::prelude::*;

use bizops_core::toast::Toast;

use crate::context::use_app_context;

#[component]
pub fn ToastContainer() -> impl IntoView {
    let ctx = use_app_context();
    let toasts = move || ctx.toasts.with(|queue| queue.iter().cloned().collect::<Vec<Toast>>());

    view! {
        <div class="toast-container" aria-live="polite">
            <For
                each=toasts
                key=|toast| toast.id
                children=move |toast| {
                    let id = toast.id;
                    view! {
                        <div class=format!("toast {}", toast.kind.css_class())>
                            <span class="toast-message">{toast.message}</span>
                            <button class="toast-close" on:click=move |_| ctx.dismiss_toast(id)>"×"</button>
                        </div>
                    }
                }
            />
        </div>
    }
}

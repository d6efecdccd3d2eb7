//! Dismissible error banner shown above a page's content.

use leptos::prelude::*;

#[component]
pub fn ErrorBanner(error: RwSignal<Option<String>>) -> impl IntoView {
    move || {
        error.get().map(|message| {
            view! {
                <div class="error-banner" role="alert">
                    <span>{message}</span>
                    <button class="error-dismiss" on:click=move |_| error.set(None)>"×"</button>
                </div>
            }
        })
    }
}

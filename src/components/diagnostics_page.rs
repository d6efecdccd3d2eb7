//! Diagnostics Page
//!
//! Recent log lines from the in-memory ring and the effective config.

use leptos::prelude::*;
use tracing::Level;

use rolling_logger::LogLine;

use crate::context::use_app_context;

fn level_class(level: Level) -> &'static str {
    match level {
        Level::ERROR => "log-line error",
        Level::WARN => "log-line warn",
        Level::INFO => "log-line info",
        _ => "log-line debug",
    }
}

#[component]
pub fn DiagnosticsPage() -> impl IntoView {
    let ctx = use_app_context();
    let (version, set_version) = signal(0u32);

    let lines = move || {
        let _ = version.get();
        ctx.logs.with_value(|logs| logs.snapshot())
    };

    let config_json = ctx
        .config
        .with_value(serde_json::to_string_pretty)
        .unwrap_or_else(|e| format!("config could not be serialized: {e}"));

    view! {
        <section class="diagnostics-page">
            <div class="list-toolbar">
                <h1>"Diagnostics"</h1>
                <button on:click=move |_| set_version.update(|v| *v += 1)>"Refresh"</button>
                <button on:click=move |_| {
                    ctx.logs.with_value(|logs| logs.clear());
                    set_version.update(|v| *v += 1);
                }>"Clear"</button>
            </div>
            <h2>{move || format!("Recent log lines ({})", lines().len())}</h2>
            <ol class="log-lines">
                {move || {
                    lines()
                        .into_iter()
                        .map(|line: LogLine| view! { <li class=level_class(line.level)>{line.to_string()}</li> })
                        .collect_view()
                }}
            </ol>
            <h2>"Configuration"</h2>
            <pre class="config-dump">{config_json}</pre>
        </section>
    }
}

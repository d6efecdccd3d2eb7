//! Two-step delete for list rows and record headers.

use leptos::prelude::*;

/// Question shown once the first click arms the button
fn confirm_text(subject: &str) -> String {
    let subject = subject.trim();
    if subject.is_empty() {
        "Delete this record?".to_string()
    } else {
        format!("Delete {}?", subject)
    }
}

/// Asks "Delete <subject>?" before running `on_confirm`.
///
/// `compact` renders the small × used inside table rows; otherwise a labelled
/// button for page headers. Clicks never reach the enclosing row, whose own
/// click handler usually navigates.
#[component]
pub fn DeleteConfirmButton(
    #[prop(into)] subject: String,
    #[prop(into)] on_confirm: Callback<()>,
    #[prop(optional)] compact: bool,
) -> impl IntoView {
    let armed = RwSignal::new(false);
    let question = confirm_text(&subject);
    let (class, label) = if compact { ("row-delete-btn", "×") } else { ("delete-btn", "Delete") };

    view! {
        <Show
            when=move || armed.get()
            fallback=move || view! {
                <button
                    class=class
                    title="Delete"
                    on:click=move |ev| {
                        ev.stop_propagation();
                        armed.set(true);
                    }
                >
                    {label}
                </button>
            }
        >
            <span class="delete-confirm" role="alertdialog">
                <span class="delete-confirm-text">{question.clone()}</span>
                <button
                    class="confirm-btn danger"
                    on:click=move |ev| {
                        ev.stop_propagation();
                        armed.set(false);
                        on_confirm.run(());
                    }
                >
                    "Delete"
                </button>
                <button
                    class="cancel-btn"
                    on:click=move |ev| {
                        ev.stop_propagation();
                        armed.set(false);
                    }
                >
                    "Keep"
                </button>
            </span>
        </Show>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_confirm_text_names_the_record() {
        assert_eq!(confirm_text("Acme Steel"), "Delete Acme Steel?");
        assert_eq!(confirm_text("  stock line "), "Delete stock line?");
    }

    #[test]
    fn test_confirm_text_without_subject() {
        assert_eq!(confirm_text(""), "Delete this record?");
    }
}

use leptos::prelude::*;
use crate::state::AppState;

/// Read-only text of the last dump, one lineseg per line.
#[component]
pub fn DumpPanel() -> impl IntoView {
    let state = expect_context::<AppState>();

    view! {
        <textarea
            id="dump"
            class="dump-panel"
            readonly=true
            rows="8"
            prop:value=move || state.dump_text.get()
        ></textarea>
    }
}

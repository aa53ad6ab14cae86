use leptos::prelude::*;
use crate::components::dump_panel::DumpPanel;
use crate::components::spectrogram::Spectrogram;
use crate::components::toolbar::Toolbar;
use crate::net;
use crate::state::AppState;

#[component]
pub fn App() -> impl IntoView {
    let state = AppState::new();
    provide_context(state);

    // Initial metadata and background for the restored view
    net::refresh_view(state);

    view! {
        <div class="app">
            <Toolbar />
            <Spectrogram />
            <DumpPanel />
        </div>
    }
}

use leptos::prelude::*;
use crate::net;
use crate::state::AppState;

#[component]
pub fn Toolbar() -> impl IntoView {
    let state = expect_context::<AppState>();

    let on_back = move |_: web_sys::MouseEvent| {
        state.step(false);
        net::refresh_view(state);
    };
    let on_forward = move |_: web_sys::MouseEvent| {
        state.step(true);
        net::refresh_view(state);
    };
    let on_dump = move |_: web_sys::MouseEvent| {
        let text = state.editor.with_untracked(|ed| ed.dump());
        log::info!("Dumped {} linesegs", text.lines().count());
        state.dump_text.set(text);
    };

    view! {
        <div class="toolbar">
            <span class="toolbar-brand"><b>"abora"</b><i>"studio"</i></span>
            <button on:click=on_back title="Step back">"Back"</button>
            <button on:click=on_forward title="Step forward">"Forward"</button>
            <span class="toolbar-view">
                {move || {
                    let v = state.view.get();
                    format!("t = {:.2}s", v.offset)
                }}
            </span>

            // Spacer
            <div style="flex: 1;"></div>

            <span class="toolbar-cursor">
                {move || match state.cursor.get() {
                    Some((t, f)) => format!("{:.3}s  {:.0} Hz", t, f),
                    None => String::new(),
                }}
            </span>
            <button on:click=on_dump title="Write all linesegs as time:freq text">"Dump"</button>
        </div>
    }
}

use abora_core::EditorKey;
use leptos::prelude::*;
use leptos::ev::MouseEvent;
use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};
use crate::canvas::{background, lineseg_renderer, time_markers};
use crate::state::{AppState, CANVAS_HEIGHT, CANVAS_WIDTH};

fn get_canvas_ctx(canvas: &HtmlCanvasElement) -> Option<CanvasRenderingContext2d> {
    canvas
        .get_context("2d")
        .ok()?
        .and_then(|c| c.dyn_into::<CanvasRenderingContext2d>().ok())
}

/// Whether a key event was aimed at a text field rather than the canvas.
fn targets_text_input(ev: &web_sys::KeyboardEvent) -> bool {
    ev.target()
        .map(|t| t.has_type::<web_sys::HtmlTextAreaElement>() || t.has_type::<web_sys::HtmlInputElement>())
        .unwrap_or(false)
}

#[component]
pub fn Spectrogram() -> impl IntoView {
    let state = expect_context::<AppState>();
    let canvas_ref = NodeRef::<leptos::html::Canvas>::new();

    // Redraw on any model change or when a new background has loaded
    Effect::new(move || {
        let _bg = state.background_version.get();

        let Some(canvas_el) = canvas_ref.get() else { return };
        let canvas: &HtmlCanvasElement = canvas_el.as_ref();
        let Some(ctx) = get_canvas_ctx(canvas) else {
            log::error!("Canvas has no 2d context");
            return;
        };
        let w = canvas.width() as f64;
        let h = canvas.height() as f64;

        background::draw(&ctx, w, h);
        state.editor.with(|ed| {
            if ed.has_transform() {
                let trans = ed.transform();
                time_markers::draw_time_markers(&ctx, &trans, w, h);
                time_markers::draw_freq_markers(&ctx, &trans, w, h);
            }
            lineseg_renderer::draw_linesegs(&ctx, ed.linesegs(), ed.geometry());
        });
    });

    // Pixel position of a mouse event relative to the canvas
    let mouse_xy = move |ev: &MouseEvent| -> Option<(f64, f64)> {
        let canvas_el = canvas_ref.get()?;
        let canvas: &HtmlCanvasElement = canvas_el.as_ref();
        let rect = canvas.get_bounding_client_rect();
        if rect.width() <= 0.0 || rect.height() <= 0.0 {
            return None;
        }
        // Undo any CSS scaling of the canvas
        let sx = canvas.width() as f64 / rect.width();
        let sy = canvas.height() as f64 / rect.height();
        Some((
            (ev.client_x() as f64 - rect.left()) * sx,
            (ev.client_y() as f64 - rect.top()) * sy,
        ))
    };

    let on_mousedown = move |ev: MouseEvent| {
        if ev.button() != 0 { return; }
        let Some((x, y)) = mouse_xy(&ev) else { return };
        ev.prevent_default();
        let ctrl = ev.ctrl_key();
        state.editor.maybe_update(|ed| ed.pointer_down(x, y, ctrl));
    };

    let on_mousemove = move |ev: MouseEvent| {
        let Some((x, y)) = mouse_xy(&ev) else { return };
        state.editor.maybe_update(|ed| ed.pointer_move(x, y));
        let domain = state.editor.with_untracked(|ed| {
            ed.has_transform().then(|| ed.pointer_domain(x, y))
        });
        state.cursor.set(domain);
    };

    let on_mouseleave = move |_: MouseEvent| {
        state.cursor.set(None);
    };

    let keydown = window_event_listener(leptos::ev::keydown, move |ev| {
        if targets_text_input(&ev) { return; }
        let Some(key) = EditorKey::from_key(&ev.key()) else { return };
        // Backspace would otherwise navigate back in some browsers
        ev.prevent_default();
        state.editor.maybe_update(|ed| ed.key_down(key));
    });
    on_cleanup(move || keydown.remove());

    view! {
        <div class="spectrogram-container">
            <canvas
                node_ref=canvas_ref
                width=CANVAS_WIDTH.to_string()
                height=CANVAS_HEIGHT.to_string()
                on:mousedown=on_mousedown
                on:mousemove=on_mousemove
                on:mouseleave=on_mouseleave
            />
        </div>
    }
}

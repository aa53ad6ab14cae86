//! Spectrogram image drawn behind the annotations.
//!
//! `HtmlImageElement` is not `Send`, so the current image and its callbacks live in
//! thread-locals; `AppState::background_version` is bumped on load to trigger a redraw.

use std::cell::RefCell;
use leptos::prelude::*;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlImageElement};
use crate::state::AppState;

thread_local! {
    static IMAGE: RefCell<Option<HtmlImageElement>> = RefCell::new(None);
    static PENDING: RefCell<Option<HtmlImageElement>> = RefCell::new(None);
    static ON_LOAD: RefCell<Option<Closure<dyn FnMut()>>> = RefCell::new(None);
    static ON_ERROR: RefCell<Option<Closure<dyn FnMut()>>> = RefCell::new(None);
}

/// Start loading `url`. The previous image stays visible until the new one arrives.
pub fn load(state: AppState, url: &str) {
    let img = match HtmlImageElement::new() {
        Ok(i) => i,
        Err(e) => {
            log::error!("Failed to create image element: {e:?}");
            return;
        }
    };

    // A superseded request must not call into the closures dropped below.
    PENDING.with(|slot| {
        if let Some(old) = slot.borrow_mut().take() {
            old.set_onload(None);
            old.set_onerror(None);
        }
    });

    let loaded = img.clone();
    let on_load = Closure::<dyn FnMut()>::new(move || {
        IMAGE.with(|slot| *slot.borrow_mut() = Some(loaded.clone()));
        state.background_version.update(|v| *v = v.wrapping_add(1));
    });
    let failed_url = url.to_string();
    let on_error = Closure::<dyn FnMut()>::new(move || {
        log::warn!("Background image failed to load: {failed_url}");
    });

    img.set_onload(Some(on_load.as_ref().unchecked_ref()));
    img.set_onerror(Some(on_error.as_ref().unchecked_ref()));
    img.set_src(url);
    PENDING.with(|slot| *slot.borrow_mut() = Some(img));

    ON_LOAD.with(|slot| *slot.borrow_mut() = Some(on_load));
    ON_ERROR.with(|slot| *slot.borrow_mut() = Some(on_error));
}

/// Draw the loaded image stretched over the canvas, or black if none has loaded.
pub fn draw(ctx: &CanvasRenderingContext2d, width: f64, height: f64) {
    ctx.set_fill_style_str("#000");
    ctx.fill_rect(0.0, 0.0, width, height);

    IMAGE.with(|slot| {
        let slot = slot.borrow();
        let Some(img) = slot.as_ref() else { return };
        if !img.complete() || img.natural_width() == 0 {
            return;
        }
        if let Err(e) = ctx.draw_image_with_html_image_element_and_dw_and_dh(img, 0.0, 0.0, width, height) {
            log::error!("Failed to draw background: {e:?}");
        }
    });
}

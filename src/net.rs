//! Requests against the spectrogram server.

use abora_core::{SpectrogramMetadata, Transform};
use leptos::prelude::*;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::{spawn_local, JsFuture};
use web_sys::Response;

use crate::canvas::background;
use crate::state::{AppState, CANVAS_HEIGHT, CANVAS_WIDTH};

async fn fetch_text(url: &str) -> Result<String, JsValue> {
    let window = web_sys::window().ok_or_else(|| js_sys::Error::new("no window"))?;
    let resp: Response = JsFuture::from(window.fetch_with_str(url)).await?.dyn_into()?;
    if !resp.ok() {
        return Err(js_sys::Error::new(&format!("HTTP {} for {url}", resp.status())).into());
    }
    let body = JsFuture::from(resp.text()?).await?;
    body.as_string()
        .ok_or_else(|| js_sys::Error::new("response body is not text").into())
}

pub async fn fetch_metadata(url: &str) -> Result<SpectrogramMetadata, String> {
    let body = fetch_text(url).await.map_err(|e| format!("{e:?}"))?;
    SpectrogramMetadata::from_json(&body).map_err(|e| e.to_string())
}

/// Re-request metadata and background for the current view. Existing linesegs are
/// re-projected once the metadata arrives; a failed request leaves everything as is.
pub fn refresh_view(state: AppState) {
    let view = state.view.get_untracked();
    let params = view.params(CANVAS_WIDTH, CANVAS_HEIGHT);
    let base = state.config.with_value(|c| c.server_base.clone());
    let meta_url = params.metadata_url(&base);
    log::info!("Refreshing view at t={} (duration {})", view.offset, view.duration);

    spawn_local(async move {
        let meta = match fetch_metadata(&meta_url).await {
            Ok(m) => m,
            Err(e) => {
                log::warn!("Metadata request failed: {e}");
                return;
            }
        };
        match Transform::from_metadata(view.offset, &meta) {
            Ok(trans) => {
                log::debug!("New transform {trans:?}");
                let current = state.view.get_untracked();
                state
                    .editor
                    .maybe_update(|ed| ed.set_transform_for_view(&view, &current, trans));
            }
            Err(e) => log::warn!("Ignoring spectrogram metadata: {e}"),
        }
    });

    background::load(state, &params.png_url(&base));
}

use abora_core::{Editor, EditorConfig, ViewState};
use leptos::prelude::*;
use serde::{Deserialize, Serialize};

const CONFIG_KEY: &str = "abora.config";
const VIEW_KEY: &str = "abora.view";

/// Canvas size in pixels, also sent to the server as `pxWidth`/`pxHeight`.
pub const CANVAS_WIDTH: u32 = 1000;
pub const CANVAS_HEIGHT: u32 = 500;

/// Position remembered across reloads. The duration always comes from the config.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
struct SavedView {
    offset: f64,
}

#[derive(Clone, Copy)]
pub struct AppState {
    pub config: StoredValue<EditorConfig>,
    pub editor: RwSignal<Editor>,
    pub view: RwSignal<ViewState>,
    /// Bumped whenever a new background image finishes loading.
    pub background_version: RwSignal<u32>,
    pub dump_text: RwSignal<String>,
    /// (time, freq) under the pointer, if it is over the canvas.
    pub cursor: RwSignal<Option<(f64, f64)>>,
}

impl AppState {
    pub fn new() -> Self {
        let config = load_config();
        let view = match load_offset() {
            Some(offset) => ViewState::resume(offset, config.initial_duration),
            None => ViewState::new(config.initial_duration),
        };
        Self {
            editor: RwSignal::new(Editor::new(&config)),
            view: RwSignal::new(view),
            config: StoredValue::new(config),
            background_version: RwSignal::new(0),
            dump_text: RwSignal::new(String::new()),
            cursor: RwSignal::new(None),
        }
    }

    pub fn step(&self, forward: bool) {
        let step = self.config.with_value(|c| c.step_seconds);
        self.view.update(|v| {
            if forward {
                v.step_forward(step)
            } else {
                v.step_back(step)
            }
        });
        save_view(&self.view.get_untracked());
    }
}

fn local_storage() -> Option<web_sys::Storage> {
    web_sys::window()?.local_storage().ok().flatten()
}

fn load_config() -> EditorConfig {
    let Some(raw) = local_storage().and_then(|s| s.get_item(CONFIG_KEY).ok().flatten()) else {
        return EditorConfig::default();
    };
    match EditorConfig::from_json(&raw) {
        Ok(cfg) => {
            log::info!("Loaded editor config from localStorage");
            cfg
        }
        Err(e) => {
            log::warn!("Ignoring malformed {CONFIG_KEY}: {e}");
            EditorConfig::default()
        }
    }
}

fn load_offset() -> Option<f64> {
    let raw = local_storage()?.get_item(VIEW_KEY).ok().flatten()?;
    match serde_json::from_str::<SavedView>(&raw) {
        Ok(v) => Some(v.offset),
        Err(e) => {
            log::warn!("Ignoring malformed {VIEW_KEY}: {e}");
            None
        }
    }
}

fn save_view(view: &ViewState) {
    let Some(storage) = local_storage() else { return };
    let saved = SavedView { offset: view.offset };
    match serde_json::to_string(&saved) {
        Ok(json) => {
            if let Err(e) = storage.set_item(VIEW_KEY, &json) {
                log::warn!("Failed to save view: {e:?}");
            }
        }
        Err(e) => log::error!("Failed to serialize view: {e}"),
    }
}

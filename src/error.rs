use thiserror::Error;
use wasm_bindgen::JsValue;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("no global `window` exists")]
    NoWindow,
    #[error("window has no document")]
    NoDocument,
    #[error("canvas element is not mounted")]
    NoCanvas,
    #[error("canvas has no 2d rendering context")]
    NoContext,
    #[error("frame callback is not installed")]
    NoFrameCallback,
    #[error("{call} failed: {message}")]
    Js { call: &'static str, message: String },
    #[error("invalid config json: {0}")]
    ConfigParse(#[from] serde_json::Error),
    #[error("invalid config: {0}")]
    ConfigInvalid(String),
}

impl AppError {
    /// Wraps a thrown JS value, keeping the name of the DOM call that raised it.
    pub fn js(call: &'static str) -> impl FnOnce(JsValue) -> AppError {
        move |value| AppError::Js {
            call,
            message: value
                .as_string()
                .unwrap_or_else(|| format!("{value:?}")),
        }
    }
}

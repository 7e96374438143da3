//! Error types for plexus-home.

use thiserror::Error;
use wasm_bindgen::JsValue;

use plexus_field::FieldError;

#[derive(Debug, Error)]
pub enum HomeError {
    /// A DOM element, context or browser API was missing or refused.
    #[error("DOM error: {0}")]
    Dom(String),

    #[error(transparent)]
    Field(#[from] FieldError),
}

pub type Result<T> = std::result::Result<T, HomeError>;

impl From<HomeError> for JsValue {
    fn from(e: HomeError) -> Self {
        JsValue::from_str(&e.to_string())
    }
}

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Document, HtmlCanvasElement, Window};

use crate::error::{HomeError, Result};

pub fn window() -> Result<Window> {
    web_sys::window().ok_or_else(|| HomeError::Dom("no global window".into()))
}

pub fn document() -> Result<Document> {
    window()?
        .document()
        .ok_or_else(|| HomeError::Dom("no document".into()))
}

pub fn canvas(id: &str) -> Result<HtmlCanvasElement> {
    document()?
        .get_element_by_id(id)
        .ok_or_else(|| HomeError::Dom(format!("no #{id} canvas")))?
        .dyn_into()
        .map_err(|_| HomeError::Dom(format!("#{id} is not a canvas")))
}

/// Window inner size in CSS pixels.
pub fn viewport_size(window: &Window) -> (f64, f64) {
    let w = window
        .inner_width()
        .ok()
        .and_then(|v| v.as_f64())
        .unwrap_or(0.0);
    let h = window
        .inner_height()
        .ok()
        .and_then(|v| v.as_f64())
        .unwrap_or(0.0);
    (w, h)
}

pub fn device_pixel_ratio(window: &Window) -> f64 {
    let dpr = window.device_pixel_ratio();
    if dpr.is_finite() && dpr > 0.0 {
        dpr
    } else {
        1.0
    }
}

/// Render a JS exception for logs and errors.
pub fn js_err(e: JsValue) -> String {
    e.as_string().unwrap_or_else(|| format!("{e:?}"))
}

pub fn add_listener<E: ?Sized>(
    target: &web_sys::EventTarget,
    event: &str,
    cb: &Closure<E>,
) -> Result<()> {
    target
        .add_event_listener_with_callback(event, cb.as_ref().unchecked_ref())
        .map_err(|e| HomeError::Dom(format!("add {event} listener: {}", js_err(e))))
}

pub fn remove_listener<E: ?Sized>(target: &web_sys::EventTarget, event: &str, cb: &Closure<E>) {
    target
        .remove_event_listener_with_callback(event, cb.as_ref().unchecked_ref())
        .ok();
}

//! Reveal-on-scroll: `[data-reveal]` elements gain `visible` the first time
//! they scroll into view, and keep it.

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Element, IntersectionObserver, IntersectionObserverEntry, IntersectionObserverInit};

use crate::dom;
use crate::error::{HomeError, Result};

/// Fraction of the element that must be visible.
pub const THRESHOLD: f64 = 0.15;

pub fn wire() -> Result<usize> {
    let doc = dom::document()?;

    let on_intersect = Closure::wrap(Box::new(
        move |entries: js_sys::Array, observer: IntersectionObserver| {
            for entry in entries.iter() {
                let Ok(entry) = entry.dyn_into::<IntersectionObserverEntry>() else {
                    continue;
                };
                if entry.is_intersecting() {
                    let target: Element = entry.target();
                    target.class_list().add_1("visible").ok();
                    observer.unobserve(&target);
                }
            }
        },
    ) as Box<dyn FnMut(js_sys::Array, IntersectionObserver)>);

    let init = IntersectionObserverInit::new();
    init.set_threshold(&JsValue::from_f64(THRESHOLD));
    let observer =
        IntersectionObserver::new_with_options(on_intersect.as_ref().unchecked_ref(), &init)
            .map_err(|e| HomeError::Dom(format!("IntersectionObserver: {}", dom::js_err(e))))?;
    // The observer lives as long as the page.
    on_intersect.forget();

    let nodes = doc
        .query_selector_all("[data-reveal]")
        .map_err(|e| HomeError::Dom(dom::js_err(e)))?;
    let mut watched = 0;
    for i in 0..nodes.length() {
        if let Some(el) = nodes.item(i).and_then(|n| n.dyn_into::<Element>().ok()) {
            observer.observe(&el);
            watched += 1;
        }
    }
    log::debug!("reveal-on-scroll watching {watched} elements");
    Ok(watched)
}

//! Scroll spy and nav-link scrolling.

use std::cell::Cell;
use std::rc::Rc;

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Document, ScrollBehavior, ScrollIntoViewOptions};

use crate::dom;
use crate::error::Result;

/// Page sections in document order.
pub const SECTIONS: [&str; 5] = ["about", "projects", "skills", "education", "contact"];

/// A section counts as reached once its top is this close to the viewport top.
pub const SPY_OFFSET: f64 = 200.0;

/// Index of the last section whose top is above `SPY_OFFSET`, or `None` if
/// no section has been reached. Missing sections are `None` tops.
pub fn active_section(tops: &[Option<f64>]) -> Option<usize> {
    tops.iter()
        .rposition(|top| matches!(top, Some(t) if *t < SPY_OFFSET))
}

fn section_tops(doc: &Document) -> Vec<Option<f64>> {
    SECTIONS
        .iter()
        .map(|id| {
            doc.get_element_by_id(id)
                .map(|el| el.get_bounding_client_rect().top())
        })
        .collect()
}

fn highlight(doc: &Document, active: usize) {
    for (i, id) in SECTIONS.iter().enumerate() {
        let Ok(Some(link)) = doc.query_selector(&format!("[data-nav=\"{id}\"]")) else {
            continue;
        };
        let classes = link.class_list();
        if i == active {
            classes.add_1("active").ok();
        } else {
            classes.remove_1("active").ok();
        }
    }
}

/// Keep the nav highlight on the section being read, and make nav links
/// smooth-scroll to their section.
pub fn wire() -> Result<()> {
    let window = dom::window()?;
    let doc = dom::document()?;

    let current = Rc::new(Cell::new(0usize));
    highlight(&doc, 0);

    let d = doc.clone();
    let cur = current.clone();
    let on_scroll = Closure::wrap(Box::new(move |_: web_sys::Event| {
        if let Some(i) = active_section(&section_tops(&d)) {
            if i != cur.get() {
                cur.set(i);
                highlight(&d, i);
            }
        }
    }) as Box<dyn FnMut(web_sys::Event)>);
    dom::add_listener(window.as_ref(), "scroll", &on_scroll)?;
    on_scroll.forget();

    for id in SECTIONS {
        let Ok(Some(link)) = doc.query_selector(&format!("[data-nav=\"{id}\"]")) else {
            continue;
        };
        let d = doc.clone();
        let click = Closure::wrap(Box::new(move |_: web_sys::MouseEvent| {
            if let Some(section) = d.get_element_by_id(id) {
                let opts = ScrollIntoViewOptions::new();
                opts.set_behavior(ScrollBehavior::Smooth);
                section.scroll_into_view_with_scroll_into_view_options(&opts);
            }
        }) as Box<dyn FnMut(web_sys::MouseEvent)>);
        link.add_event_listener_with_callback("click", click.as_ref().unchecked_ref())
            .ok();
        click.forget();
    }

    Ok(())
}

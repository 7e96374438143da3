use std::cell::RefCell;

use wasm_bindgen::prelude::*;
use web_sys::{HtmlCanvasElement, PageTransitionEvent};

use plexus_field::{Animation, AnimationHandle, Field, FieldConfig};

use crate::dom;
use crate::error::Result;
use crate::host;
use crate::nav;
use crate::reveal;
use crate::viz::CanvasSurface;

/// Canvas the page backdrop draws into when auto-started.
pub const CANVAS_ID: &str = "particles";

thread_local! {
    static PAGE_BACKDROP: RefCell<Option<Backdrop>> = const { RefCell::new(None) };
}

/// Optional JSON tuning from the canvas's `data-config` attribute. A bad
/// value is logged and the defaults are used.
fn read_config(canvas: &HtmlCanvasElement) -> FieldConfig {
    let Some(json) = canvas.get_attribute("data-config") else {
        return FieldConfig::default();
    };
    match FieldConfig::from_json(&json) {
        Ok(cfg) => cfg,
        Err(e) => {
            log::warn!("ignoring #{} data-config: {e}", canvas.id());
            FieldConfig::default()
        }
    }
}

/// The animated particle backdrop bound to one canvas.
///
/// Stop it (or drop it) when the view it backs goes away.
#[wasm_bindgen]
pub struct Backdrop {
    handle: AnimationHandle,
}

#[wasm_bindgen]
impl Backdrop {
    /// Start animating the canvas with the given element id, sized to the
    /// window and following window resize and mouse movement.
    pub fn start(canvas_id: &str) -> std::result::Result<Backdrop, JsValue> {
        Ok(Self::start_on(dom::canvas(canvas_id)?)?)
    }

    /// Cancel the frame loop and detach listeners. Returns `false` if it was
    /// already stopped.
    pub fn stop(&self) -> bool {
        self.handle.stop()
    }

    #[wasm_bindgen(getter)]
    pub fn running(&self) -> bool {
        self.handle.is_running()
    }

    #[wasm_bindgen(getter)]
    pub fn frames(&self) -> f64 {
        self.handle.field().frame_count() as f64
    }
}

impl Backdrop {
    pub fn start_on(canvas: HtmlCanvasElement) -> Result<Backdrop> {
        let window = dom::window()?;
        let (width, height) = dom::viewport_size(&window);
        let config = read_config(&canvas);

        let field = Field::random(config, width, height)?;
        let surface = CanvasSurface::new(canvas, width, height)?;
        let (frames, events) = host::browser_host(&window);
        let handle = Animation::start(field, surface, frames, events)?;
        Ok(Backdrop { handle })
    }
}

/// Start the page backdrop on `#particles` if the page has one.
fn start_page_backdrop() {
    match dom::canvas(CANVAS_ID) {
        Ok(canvas) => match Backdrop::start_on(canvas) {
            Ok(backdrop) => {
                PAGE_BACKDROP.with(|b| *b.borrow_mut() = Some(backdrop));
            }
            Err(e) => log::error!("backdrop failed to start: {e}"),
        },
        Err(e) => log::info!("no page backdrop: {e}"),
    }
}

fn stop_page_backdrop() {
    PAGE_BACKDROP.with(|b| {
        if let Some(backdrop) = b.borrow_mut().take() {
            backdrop.stop();
        }
    });
}

/// Whether a `pageshow` should bring the backdrop back: only a page restored
/// from the back/forward cache, after `pagehide` tore it down.
fn restart_on_show(persisted: bool, running: bool) -> bool {
    persisted && !running
}

/// Page bootstrap: backdrop on `#particles` if present, scroll spy, reveal.
pub fn run() {
    log::info!("plexus-home starting...");

    start_page_backdrop();

    if let Err(e) = nav::wire() {
        log::warn!("scroll spy: {e}");
    }
    if let Err(e) = reveal::wire() {
        log::warn!("reveal-on-scroll: {e}");
    }

    if let Err(e) = follow_page_lifecycle() {
        log::warn!("page lifecycle hooks: {e}");
    }
}

/// Tear the page backdrop down on `pagehide` and bring it back when the page
/// is restored from the back/forward cache.
fn follow_page_lifecycle() -> Result<()> {
    let window = dom::window()?;

    let hide_cb = Closure::wrap(Box::new(move |_: web_sys::Event| {
        stop_page_backdrop();
    }) as Box<dyn FnMut(web_sys::Event)>);
    dom::add_listener(window.as_ref(), "pagehide", &hide_cb)?;
    hide_cb.forget();

    let show_cb = Closure::wrap(Box::new(move |e: PageTransitionEvent| {
        let running = PAGE_BACKDROP.with(|b| b.borrow().is_some());
        if restart_on_show(e.persisted(), running) {
            log::debug!("page restored from cache, restarting backdrop");
            start_page_backdrop();
        }
    }) as Box<dyn FnMut(PageTransitionEvent)>);
    dom::add_listener(window.as_ref(), "pageshow", &show_cb)?;
    show_cb.forget();

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_restart_only_after_cache_restore() {
        assert!(restart_on_show(true, false));
        // First load fires pageshow too, with the backdrop already up.
        assert!(!restart_on_show(false, true));
        assert!(!restart_on_show(false, false));
        assert!(!restart_on_show(true, true));
    }
}

use wasm_bindgen::prelude::*;

mod app;
mod dom;
mod error;
mod host;
mod nav;
mod reveal;
mod viz;

pub use app::{Backdrop, CANVAS_ID};
pub use error::HomeError;
pub use host::{AnimationFrames, WindowEvents};
pub use nav::active_section;
pub use viz::CanvasSurface;

#[wasm_bindgen(start)]
pub fn main() {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    app::run();
}

//! Drawing surface abstraction and the two in-process surfaces.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use serde::{Deserialize, Serialize};

/// An opaque RGB color; serializes as `[r, g, b]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    pub fn with_alpha(self, alpha: f64) -> Rgba {
        Rgba { rgb: self, alpha }
    }
}

/// A translucent color. `Display` yields CSS `rgba(r,g,b,a)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rgba {
    pub rgb: Rgb,
    pub alpha: f64,
}

impl fmt::Display for Rgba {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Rgb(r, g, b) = self.rgb;
        write!(f, "rgba({r},{g},{b},{:.3})", self.alpha)
    }
}

/// What the field needs from a 2D drawing target, in logical units.
pub trait Surface {
    /// Erase the rectangle `[0, width] × [0, height]`.
    fn clear(&mut self, width: f64, height: f64);

    fn fill_circle(&mut self, x: f64, y: f64, radius: f64, color: Rgba);

    fn stroke_line(&mut self, from: (f64, f64), to: (f64, f64), color: Rgba);

    /// The viewport changed size. Surfaces with a backing store resize it here.
    fn resize(&mut self, _width: f64, _height: f64) {}
}

/// Discards all drawing. Used to step physics headlessly.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSurface;

impl Surface for NullSurface {
    fn clear(&mut self, _width: f64, _height: f64) {}
    fn fill_circle(&mut self, _x: f64, _y: f64, _radius: f64, _color: Rgba) {}
    fn stroke_line(&mut self, _from: (f64, f64), _to: (f64, f64), _color: Rgba) {}
}

/// One recorded draw call.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawOp {
    Clear { width: f64, height: f64 },
    Circle { x: f64, y: f64, radius: f64, color: Rgba },
    Line { from: (f64, f64), to: (f64, f64), color: Rgba },
    Resize { width: f64, height: f64 },
}

/// Records draw calls into a log shared between clones, so a test can keep
/// one clone while the animation owns the other.
#[derive(Debug, Default, Clone)]
pub struct Recorder {
    ops: Rc<RefCell<Vec<DrawOp>>>,
}

impl Recorder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of everything recorded so far.
    pub fn ops(&self) -> Vec<DrawOp> {
        self.ops.borrow().clone()
    }

    /// Drain the log.
    pub fn take(&self) -> Vec<DrawOp> {
        std::mem::take(&mut *self.ops.borrow_mut())
    }

    pub fn len(&self) -> usize {
        self.ops.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.ops.borrow().is_empty()
    }

    pub fn clears(&self) -> usize {
        self.count(|op| matches!(op, DrawOp::Clear { .. }))
    }

    pub fn circles(&self) -> usize {
        self.count(|op| matches!(op, DrawOp::Circle { .. }))
    }

    pub fn lines(&self) -> Vec<((f64, f64), (f64, f64), Rgba)> {
        self.ops
            .borrow()
            .iter()
            .filter_map(|op| match *op {
                DrawOp::Line { from, to, color } => Some((from, to, color)),
                _ => None,
            })
            .collect()
    }

    fn count(&self, pred: impl Fn(&DrawOp) -> bool) -> usize {
        self.ops.borrow().iter().filter(|op| pred(op)).count()
    }

    fn push(&self, op: DrawOp) {
        self.ops.borrow_mut().push(op);
    }
}

impl Surface for Recorder {
    fn clear(&mut self, width: f64, height: f64) {
        self.push(DrawOp::Clear { width, height });
    }

    fn fill_circle(&mut self, x: f64, y: f64, radius: f64, color: Rgba) {
        self.push(DrawOp::Circle { x, y, radius, color });
    }

    fn stroke_line(&mut self, from: (f64, f64), to: (f64, f64), color: Rgba) {
        self.push(DrawOp::Line { from, to, color });
    }

    fn resize(&mut self, width: f64, height: f64) {
        self.push(DrawOp::Resize { width, height });
    }
}

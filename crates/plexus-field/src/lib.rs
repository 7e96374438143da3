//! A drifting particle field with proximity links.
//!
//! Particles wander the viewport, reflect off its edges, and are joined by
//! faint lines when close to each other or to the pointer. The crate knows
//! nothing about browsers: drawing goes through [`Surface`], the frame loop
//! through [`FrameScheduler`], and resize/pointer input through
//! [`EventSource`]. [`Animation::start`] ties them together and returns a
//! handle that must be stopped (or dropped) when the owning view goes away.

pub mod animation;
pub mod config;
pub mod error;
pub mod field;
pub mod particle;
pub mod schedule;
pub mod surface;

pub use animation::{Animation, AnimationHandle};
pub use config::FieldConfig;
pub use error::{FieldError, Result};
pub use field::Field;
pub use particle::{Particle, Pointer, Viewport};
pub use schedule::{
    EventSource, FrameRequest, FrameScheduler, HostEvent, ManualEvents, ManualFrames,
    Subscription,
};
pub use surface::{DrawOp, NullSurface, Recorder, Rgb, Rgba, Surface};

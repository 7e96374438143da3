//! The particle field: a fixed set of particles, the viewport bounding them,
//! the pointer they reach for, and the per-frame update + draw.

use rand::Rng;

use crate::config::{FieldConfig, QUADRATIC_WARN_COUNT};
use crate::error::Result;
use crate::particle::{Particle, Pointer, Viewport};
use crate::surface::{NullSurface, Surface};

/// Linear fade from `base` at distance 0 to 0 at `range`.
pub fn fade(base: f64, distance: f64, range: f64) -> f64 {
    base * (1.0 - distance / range)
}

/// A drifting particle field.
///
/// The particle count is fixed between (re)initializations; frames mutate
/// positions and velocities only.
#[derive(Debug, Clone)]
pub struct Field {
    config: FieldConfig,
    particles: Vec<Particle>,
    viewport: Viewport,
    pointer: Pointer,
    frames: u64,
}

impl Field {
    /// Scatter `config.count` particles over a `width × height` viewport.
    pub fn new<R: Rng + ?Sized>(
        config: FieldConfig,
        width: f64,
        height: f64,
        rng: &mut R,
    ) -> Result<Self> {
        config.validate()?;
        if config.count > QUADRATIC_WARN_COUNT {
            log::warn!(
                "{} particles: pair linking checks {} pairs per frame, consider a spatial index",
                config.count,
                config.count * (config.count - 1) / 2
            );
        }
        let mut field = Self::with_particles(config, width, height, Vec::new());
        field.reinitialize(rng);
        Ok(field)
    }

    /// Like [`Field::new`], seeded from the thread RNG.
    pub fn random(config: FieldConfig, width: f64, height: f64) -> Result<Self> {
        Self::new(config, width, height, &mut rand::thread_rng())
    }

    /// Build a field around explicit particles. `config.count` is ignored
    /// until the next [`Field::reinitialize`].
    pub fn with_particles(
        config: FieldConfig,
        width: f64,
        height: f64,
        particles: Vec<Particle>,
    ) -> Self {
        Self {
            config,
            particles,
            viewport: Viewport::new(width, height),
            pointer: Pointer::SENTINEL,
            frames: 0,
        }
    }

    /// Replace every particle with a fresh random one; the count returns to
    /// `config.count`.
    pub fn reinitialize<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        let viewport = self.viewport;
        let cfg = &self.config;
        self.particles = (0..cfg.count)
            .map(|_| Particle::random(&mut *rng, viewport, cfg))
            .collect();
    }

    pub fn config(&self) -> &FieldConfig {
        &self.config
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn pointer(&self) -> Pointer {
        self.pointer
    }

    /// Frames run so far.
    pub fn frame_count(&self) -> u64 {
        self.frames
    }

    /// New bounds for reflection and clearing. Particles keep their positions;
    /// anything now outside reflects back on its next move.
    pub fn resize(&mut self, width: f64, height: f64) {
        self.viewport = Viewport::new(width, height);
        log::debug!("field resized to {}x{}", self.viewport.width, self.viewport.height);
    }

    pub fn set_pointer(&mut self, x: f64, y: f64) {
        self.pointer = Pointer { x, y };
    }

    /// One frame: clear, then for each particle in index order move it,
    /// draw it, link it to every higher-indexed particle within
    /// `link_distance`, and link it to the pointer within `pointer_distance`.
    ///
    /// Links from particle `i` see the already-moved positions of particles
    /// `0..=i` and last frame's positions of `i+1..`.
    pub fn frame<S: Surface + ?Sized>(&mut self, surface: &mut S) {
        let Viewport { width, height } = self.viewport;
        let cfg = &self.config;
        let dot = cfg.color.with_alpha(cfg.dot_alpha);
        let pointer = self.pointer;

        surface.clear(width, height);

        for i in 0..self.particles.len() {
            let (head, tail) = self.particles.split_at_mut(i + 1);
            let p = &mut head[i];
            p.advance(self.viewport);
            surface.fill_circle(p.x, p.y, p.radius(), dot);

            for q in tail.iter() {
                let dist = p.distance_to(q.x, q.y);
                if dist < cfg.link_distance {
                    let alpha = fade(cfg.link_alpha, dist, cfg.link_distance);
                    surface.stroke_line((p.x, p.y), (q.x, q.y), cfg.color.with_alpha(alpha));
                }
            }

            let md = p.distance_to(pointer.x, pointer.y);
            if md < cfg.pointer_distance {
                let alpha = fade(cfg.pointer_alpha, md, cfg.pointer_distance);
                surface.stroke_line((p.x, p.y), (pointer.x, pointer.y), cfg.color.with_alpha(alpha));
            }
        }

        self.frames += 1;
    }

    /// Advance physics one frame without drawing.
    pub fn step(&mut self) {
        self.frame(&mut NullSurface);
    }
}

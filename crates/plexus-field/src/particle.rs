//! Particle state and per-particle motion.

use rand::Rng;

use crate::config::FieldConfig;

/// Logical size of the drawing surface.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

impl Viewport {
    /// Negative or NaN sizes collapse to zero.
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width: width.max(0.0),
            height: height.max(0.0),
        }
    }

    pub fn contains(&self, x: f64, y: f64) -> bool {
        (0.0..=self.width).contains(&x) && (0.0..=self.height).contains(&y)
    }
}

/// Last known cursor position in surface coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pointer {
    pub x: f64,
    pub y: f64,
}

impl Pointer {
    /// Far outside any viewport, so nothing links to the pointer before the
    /// first real move.
    pub const SENTINEL: Pointer = Pointer { x: -1000.0, y: -1000.0 };
}

impl Default for Pointer {
    fn default() -> Self {
        Self::SENTINEL
    }
}

/// A drifting point.
#[derive(Debug, Clone, PartialEq)]
pub struct Particle {
    pub x: f64,
    pub y: f64,
    pub vx: f64,
    pub vy: f64,
    /// Fixed at creation.
    radius: f64,
}

impl Particle {
    pub fn new(x: f64, y: f64, vx: f64, vy: f64, radius: f64) -> Self {
        Self { x, y, vx, vy, radius }
    }

    /// Uniform position in the viewport, velocity in `[-speed/2, speed/2]`
    /// per axis, radius in `[radius_min, radius_max]`.
    ///
    /// Samples `rng.gen::<f64>()` and scales rather than using `gen_range`,
    /// so a zero-size viewport or zero speed is fine.
    pub fn random<R: Rng + ?Sized>(rng: &mut R, viewport: Viewport, cfg: &FieldConfig) -> Self {
        let x = rng.gen::<f64>() * viewport.width;
        let y = rng.gen::<f64>() * viewport.height;
        let vx = (rng.gen::<f64>() - 0.5) * cfg.speed;
        let vy = (rng.gen::<f64>() - 0.5) * cfg.speed;
        let radius = rng.gen::<f64>() * (cfg.radius_max - cfg.radius_min) + cfg.radius_min;
        Self::new(x, y, vx, vy, radius)
    }

    pub fn radius(&self) -> f64 {
        self.radius
    }

    /// Move by one frame of velocity, then reflect on any axis whose new
    /// coordinate lies outside `[0, extent]`.
    ///
    /// Reflection points the velocity back toward the interior rather than
    /// negating it whenever the coordinate is outside, as the page this
    /// backdrop came from did. For a particle that just crossed an edge the
    /// two agree. They differ for one stranded far outside by a shrinking
    /// viewport: negation leaves it jittering in place, this walks it home.
    /// Positions are never clamped.
    pub fn advance(&mut self, viewport: Viewport) {
        self.x += self.vx;
        self.y += self.vy;

        if self.x < 0.0 {
            self.vx = self.vx.abs();
        } else if self.x > viewport.width {
            self.vx = -self.vx.abs();
        }
        if self.y < 0.0 {
            self.vy = self.vy.abs();
        } else if self.y > viewport.height {
            self.vy = -self.vy.abs();
        }
    }

    pub fn distance_to(&self, x: f64, y: f64) -> f64 {
        let dx = self.x - x;
        let dy = self.y - y;
        (dx * dx + dy * dy).sqrt()
    }
}

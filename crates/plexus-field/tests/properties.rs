//! Property tests for the field invariants.

use plexus_field::{Field, FieldConfig, Particle, Recorder, Viewport};
use proptest::prelude::*;

fn arb_particle(w: f64, h: f64) -> impl Strategy<Value = Particle> {
    (0.0..w, 0.0..h, -0.2..0.2_f64, -0.2..0.2_f64, 1.0..3.0_f64)
        .prop_map(|(x, y, vx, vy, r)| Particle::new(x, y, vx, vy, r))
}

proptest! {
    #[test]
    fn crossing_an_edge_flips_that_axis(
        y in 0.0..600.0_f64,
        vx in 0.01..0.2_f64,
        slack in 0.0..1.0_f64,
    ) {
        let vp = Viewport::new(800.0, 600.0);
        // Starts inside, within one step of the right edge, heading out.
        let x = 800.0 - vx * slack;
        let mut p = Particle::new(x, y, vx, 0.0, 1.0);
        p.advance(vp);
        if p.x > 800.0 {
            prop_assert!(p.vx < 0.0);
            let outside = p.x;
            p.advance(vp);
            prop_assert!(p.x < outside);
        } else {
            prop_assert!(p.vx > 0.0);
        }

        // Same on the left edge.
        let mut q = Particle::new(vx * slack, y, -vx, 0.0, 1.0);
        q.advance(vp);
        if q.x < 0.0 {
            prop_assert!(q.vx > 0.0);
        } else {
            prop_assert!(q.vx < 0.0);
        }
    }

    #[test]
    fn particles_stay_near_viewport(
        particles in prop::collection::vec(arb_particle(400.0, 300.0), 1..20),
        frames in 1usize..400,
    ) {
        let mut field = Field::with_particles(FieldConfig::default(), 400.0, 300.0, particles);
        for _ in 0..frames {
            field.step();
        }
        for p in field.particles() {
            prop_assert!(p.x >= -0.2 && p.x <= 400.2);
            prop_assert!(p.y >= -0.2 && p.y <= 300.2);
        }
    }

    #[test]
    fn radius_and_count_are_stable(
        particles in prop::collection::vec(arb_particle(800.0, 600.0), 0..30),
        frames in 1usize..50,
    ) {
        let radii: Vec<f64> = particles.iter().map(Particle::radius).collect();
        let n = particles.len();
        let mut field = Field::with_particles(FieldConfig::default(), 800.0, 600.0, particles);
        for _ in 0..frames {
            field.step();
        }
        prop_assert_eq!(field.particles().len(), n);
        let after: Vec<f64> = field.particles().iter().map(Particle::radius).collect();
        prop_assert_eq!(radii, after);
    }

    /// With motion frozen, each unordered pair closer than the link distance
    /// is drawn exactly once and no other pair is drawn.
    #[test]
    fn each_close_pair_links_once(
        points in prop::collection::vec((0.0..400.0_f64, 0.0..400.0_f64), 0..25),
    ) {
        let particles: Vec<Particle> = points
            .iter()
            .map(|&(x, y)| Particle::new(x, y, 0.0, 0.0, 1.0))
            .collect();
        let mut field = Field::with_particles(FieldConfig::default(), 400.0, 400.0, particles);
        let mut rec = Recorder::new();
        field.frame(&mut rec);

        let mut expected = 0;
        for i in 0..points.len() {
            for j in (i + 1)..points.len() {
                let (dx, dy) = (points[i].0 - points[j].0, points[i].1 - points[j].1);
                if (dx * dx + dy * dy).sqrt() < 150.0 {
                    expected += 1;
                }
            }
        }

        let lines = rec.lines();
        prop_assert_eq!(lines.len(), expected);
        for (k, (a, b, _)) in lines.iter().enumerate() {
            for (c, d, _) in &lines[k + 1..] {
                let same = (a == c && b == d) || (a == d && b == c);
                prop_assert!(!same, "pair drawn twice: {:?} {:?}", a, b);
            }
        }
        for (_, _, color) in &lines {
            prop_assert!(color.alpha > 0.0 && color.alpha <= 0.08);
        }
    }
}

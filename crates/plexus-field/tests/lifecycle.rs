//! Integration tests for running a field against the manual host.

use std::rc::Rc;

use approx::assert_relative_eq;
use plexus_field::{
    Animation, AnimationHandle, DrawOp, Field, FieldConfig, HostEvent, ManualEvents,
    ManualFrames, Particle, Pointer, Recorder,
};
use rand::rngs::StdRng;
use rand::SeedableRng;

struct Host {
    frames: Rc<ManualFrames>,
    events: Rc<ManualEvents>,
    surface: Recorder,
}

impl Host {
    fn new() -> Self {
        Self {
            frames: Rc::new(ManualFrames::new()),
            events: Rc::new(ManualEvents::new()),
            surface: Recorder::new(),
        }
    }

    fn start(&self, field: Field) -> AnimationHandle {
        Animation::start(
            field,
            self.surface.clone(),
            self.frames.clone(),
            self.events.clone(),
        )
        .unwrap()
    }
}

fn seeded_field(seed: u64) -> Field {
    let mut rng = StdRng::seed_from_u64(seed);
    Field::new(FieldConfig::default(), 800.0, 600.0, &mut rng).unwrap()
}

#[test]
fn count_is_fixed_across_frames() {
    let host = Host::new();
    let handle = host.start(seeded_field(1));
    assert_eq!(handle.field().particles().len(), 60);

    assert_eq!(host.frames.run_frames(100), 100);
    assert_eq!(handle.field().particles().len(), 60);
    assert_eq!(handle.field().frame_count(), 101);
    assert_eq!(host.surface.clears(), 101);
    assert_eq!(host.surface.circles(), 101 * 60);
}

#[test]
fn radius_never_changes() {
    let host = Host::new();
    let handle = host.start(seeded_field(2));
    let radii: Vec<f64> = handle.field().particles().iter().map(Particle::radius).collect();

    host.frames.run_frames(500);
    let after: Vec<f64> = handle.field().particles().iter().map(Particle::radius).collect();
    assert_eq!(radii, after);
}

#[test]
fn no_frame_runs_after_stop() {
    let host = Host::new();
    let handle = host.start(seeded_field(3));
    host.frames.run_frames(3);
    let frames_before = handle.field().frame_count();

    assert!(handle.stop());
    assert!(!handle.is_running());
    assert_eq!(host.frames.pending(), 0);
    assert_eq!(host.events.listener_count(), 0);

    assert_eq!(host.frames.run_frame(), 0);
    assert_eq!(handle.field().frame_count(), frames_before);
}

#[test]
fn stop_is_idempotent() {
    let host = Host::new();
    let handle = host.start(seeded_field(4));
    assert!(handle.stop());
    assert!(!handle.stop());
    assert!(!handle.stop());
    assert_eq!(host.frames.pending(), 0);
    assert_eq!(host.frames.run_frame(), 0);
}

#[test]
fn drop_stops_the_loop() {
    let host = Host::new();
    let handle = host.start(seeded_field(5));
    assert_eq!(host.frames.pending(), 1);

    drop(handle);
    assert_eq!(host.frames.pending(), 0);
    assert_eq!(host.events.listener_count(), 0);
    let clears = host.surface.clears();
    host.frames.run_frames(10);
    assert_eq!(host.surface.clears(), clears);
}

#[test]
fn resize_updates_bounds_not_positions() {
    let host = Host::new();
    let handle = host.start(seeded_field(6));
    let before = handle.field().particles().to_vec();

    host.events.emit(HostEvent::Resize {
        width: 320.0,
        height: 240.0,
    });
    let field = handle.field();
    assert_eq!(field.viewport().width, 320.0);
    assert_eq!(field.viewport().height, 240.0);
    assert_eq!(field.particles(), &before[..]);
    drop(field);

    host.frames.run_frame();
    let ops = host.surface.ops();
    assert!(ops.contains(&DrawOp::Resize {
        width: 320.0,
        height: 240.0
    }));
    assert!(ops.contains(&DrawOp::Clear {
        width: 320.0,
        height: 240.0
    }));
}

#[test]
fn shrunk_viewport_pulls_particles_back() {
    let host = Host::new();
    let field = Field::with_particles(
        FieldConfig::default(),
        800.0,
        600.0,
        vec![
            Particle::new(790.0, 590.0, 0.2, 0.2, 1.0),
            Particle::new(700.0, 10.0, -0.2, 0.2, 1.0),
            Particle::new(5.0, 500.0, 0.2, -0.2, 1.0),
        ],
    );
    let handle = host.start(field);
    host.events.emit(HostEvent::Resize {
        width: 200.0,
        height: 150.0,
    });

    // The farthest needs (790 - 200) / 0.2 = 2950 frames to get back.
    host.frames.run_frames(4000);
    let field = handle.field();
    for p in field.particles() {
        assert!(p.x >= -0.2 && p.x <= 200.2, "x = {}", p.x);
        assert!(p.y >= -0.2 && p.y <= 150.2, "y = {}", p.y);
    }
}

#[test]
fn pointer_move_links_nearby_particles() {
    let host = Host::new();
    let field = Field::with_particles(
        FieldConfig::default(),
        800.0,
        600.0,
        vec![Particle::new(50.0, 50.0, 0.0, 0.0, 1.0)],
    );
    let _handle = host.start(field);
    assert!(host.surface.lines().is_empty());

    host.events.emit(HostEvent::PointerMove { x: 50.0, y: 110.0 });
    host.surface.take();
    host.frames.run_frame();

    let lines = host.surface.lines();
    assert_eq!(lines.len(), 1);
    assert_eq!(lines[0].0, (50.0, 50.0));
    assert_eq!(lines[0].1, (50.0, 110.0));
    assert_relative_eq!(lines[0].2.alpha, 0.075, epsilon = 1e-12);
}

#[test]
fn events_after_stop_are_ignored() {
    let host = Host::new();
    let handle = host.start(seeded_field(8));
    handle.stop();
    host.events.emit(HostEvent::PointerMove { x: 1.0, y: 1.0 });
    assert_eq!(handle.field().pointer(), Pointer::SENTINEL);
}

#[test]
fn bottom_edge_reflection_scenario() {
    let host = Host::new();
    let field = Field::with_particles(
        FieldConfig::default(),
        800.0,
        600.0,
        vec![Particle::new(10.0, 599.0, 0.1, 0.3, 2.0)],
    );
    // start() runs the first tick.
    let handle = host.start(field);
    {
        let field = handle.field();
        let p = &field.particles()[0];
        assert_relative_eq!(p.y, 599.3, epsilon = 1e-9);
        assert!(p.vy > 0.0);
    }

    let mut ticks = 1;
    while handle.field().particles()[0].vy > 0.0 {
        host.frames.run_frame();
        ticks += 1;
        assert!(ticks < 10, "never reflected");
    }
    assert_eq!(ticks, 4);
    let y_at_flip = handle.field().particles()[0].y;
    assert!(y_at_flip > 600.0);
    assert_relative_eq!(handle.field().particles()[0].vy, -0.3);

    host.frames.run_frame();
    assert!(handle.field().particles()[0].y < y_at_flip);
}

#[test]
fn seeded_runs_are_reproducible() {
    let run = |seed| {
        let host = Host::new();
        let handle = host.start(seeded_field(seed));
        host.frames.run_frames(250);
        let out = handle.field().particles().to_vec();
        out
    };
    assert_eq!(run(99), run(99));
    assert_ne!(run(99), run(100));
}

//! Start/stop lifecycle for a field bound to a surface and a host loop.
//!
//! The host keeps an [`AnimationHandle`]; its tick and event callbacks hold
//! only weak references, so once the handle is stopped or dropped a stale
//! host callback finds nothing to run.

use std::cell::{Cell, Ref, RefCell};
use std::rc::{Rc, Weak};

use rand::Rng;

use crate::error::{FieldError, Result};
use crate::field::Field;
use crate::schedule::{
    EventSink, EventSource, FrameRequest, FrameScheduler, HostEvent, Subscription, Tick,
};
use crate::surface::Surface;

struct Scene {
    field: Field,
    surface: Box<dyn Surface>,
}

struct Shared {
    scene: RefCell<Scene>,
    scheduler: Rc<dyn FrameScheduler>,
    events: Rc<dyn EventSource>,
    running: Cell<bool>,
    pending: Cell<Option<FrameRequest>>,
    subscription: Cell<Option<Subscription>>,
    tick: RefCell<Option<Tick>>,
}

impl Shared {
    fn tick(&self) {
        if !self.running.get() {
            return;
        }
        self.pending.set(None);
        {
            let mut scene = self.scene.borrow_mut();
            let Scene { field, surface } = &mut *scene;
            field.frame(&mut **surface);
        }
        self.schedule_next();
    }

    fn schedule_next(&self) {
        let Some(tick) = self.tick.borrow().clone() else {
            return;
        };
        match self.scheduler.schedule(tick) {
            Ok(request) => self.pending.set(Some(request)),
            Err(e) => {
                log::error!("frame scheduling failed, stopping animation: {e}");
                self.halt();
            }
        }
    }

    fn on_event(&self, event: HostEvent) {
        if !self.running.get() {
            return;
        }
        let mut scene = self.scene.borrow_mut();
        match event {
            HostEvent::Resize { width, height } => {
                scene.field.resize(width, height);
                scene.surface.resize(width, height);
            }
            HostEvent::PointerMove { x, y } => scene.field.set_pointer(x, y),
        }
    }

    /// Returns whether this call did the stopping.
    fn halt(&self) -> bool {
        if !self.running.replace(false) {
            return false;
        }
        if let Some(request) = self.pending.take() {
            self.scheduler.cancel(request);
        }
        if let Some(sub) = self.subscription.take() {
            self.events.unsubscribe(sub);
        }
        self.tick.borrow_mut().take();
        true
    }
}

/// Entry point for running a field against a host.
pub struct Animation;

impl Animation {
    /// Attach to `events`, draw the first frame immediately, then keep
    /// drawing one frame per `scheduler` tick until the handle is stopped.
    pub fn start<S>(
        field: Field,
        surface: S,
        scheduler: Rc<dyn FrameScheduler>,
        events: Rc<dyn EventSource>,
    ) -> Result<AnimationHandle>
    where
        S: Surface + 'static,
    {
        let shared = Rc::new(Shared {
            scene: RefCell::new(Scene {
                field,
                surface: Box::new(surface),
            }),
            scheduler,
            events,
            running: Cell::new(true),
            pending: Cell::new(None),
            subscription: Cell::new(None),
            tick: RefCell::new(None),
        });

        let weak: Weak<Shared> = Rc::downgrade(&shared);
        let sink: EventSink = Rc::new(move |event: HostEvent| {
            if let Some(shared) = weak.upgrade() {
                shared.on_event(event);
            }
        });
        let sub = match shared.events.subscribe(sink) {
            Ok(sub) => sub,
            Err(e) => {
                shared.running.set(false);
                return Err(e);
            }
        };
        shared.subscription.set(Some(sub));

        let weak = Rc::downgrade(&shared);
        let tick: Tick = Rc::new(move || {
            if let Some(shared) = weak.upgrade() {
                shared.tick();
            }
        });
        *shared.tick.borrow_mut() = Some(tick);

        {
            let scene = shared.scene.borrow();
            let vp = scene.field.viewport();
            log::debug!(
                "animation starting: {} particles on {}x{}",
                scene.field.particles().len(),
                vp.width,
                vp.height
            );
        }

        let handle = AnimationHandle { shared };
        handle.shared.tick();
        if !handle.is_running() {
            // First schedule failed; halt already cleaned up.
            return Err(FieldError::Host("scheduler refused the first frame".into()));
        }
        Ok(handle)
    }
}

/// Owning handle for a running animation. Dropping it stops the loop.
pub struct AnimationHandle {
    shared: Rc<Shared>,
}

impl AnimationHandle {
    /// Cancel the pending frame and detach from host events.
    ///
    /// Safe to call repeatedly; returns `true` only on the call that stopped it.
    pub fn stop(&self) -> bool {
        let stopped = self.shared.halt();
        if stopped {
            log::debug!(
                "animation stopped after {} frames",
                self.shared.scene.borrow().field.frame_count()
            );
        }
        stopped
    }

    pub fn is_running(&self) -> bool {
        self.shared.running.get()
    }

    pub fn field(&self) -> Ref<'_, Field> {
        Ref::map(self.shared.scene.borrow(), |scene| &scene.field)
    }

    /// Fresh particles at the configured count, keeping viewport and pointer.
    pub fn reinitialize<R: Rng + ?Sized>(&self, rng: &mut R) {
        self.shared.scene.borrow_mut().field.reinitialize(rng);
    }
}

impl Drop for AnimationHandle {
    fn drop(&mut self) {
        self.stop();
    }
}

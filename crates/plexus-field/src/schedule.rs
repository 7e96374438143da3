//! Host seams: a "run before next repaint" scheduler and a source of resize
//! and pointer events. `ManualFrames` and `ManualEvents` implement both
//! in-process for headless driving and tests.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use crate::error::Result;

/// Callback run once per frame.
pub type Tick = Rc<dyn Fn()>;

/// Callback receiving host events.
pub type EventSink = Rc<dyn Fn(HostEvent)>;

/// Token for a queued frame, used to cancel it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FrameRequest(pub i64);

/// Token for an attached event listener set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Subscription(pub u32);

/// A signal from the host environment.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum HostEvent {
    Resize { width: f64, height: f64 },
    PointerMove { x: f64, y: f64 },
}

/// Runs a callback once, before the host's next repaint.
pub trait FrameScheduler {
    fn schedule(&self, tick: Tick) -> Result<FrameRequest>;

    /// Drop a queued frame. Unknown or already-run requests are ignored.
    fn cancel(&self, request: FrameRequest);
}

/// Delivers resize and pointer-move events until unsubscribed.
pub trait EventSource {
    fn subscribe(&self, sink: EventSink) -> Result<Subscription>;

    /// Detach a subscription. Unknown subscriptions are ignored.
    fn unsubscribe(&self, subscription: Subscription);
}

/// A frame queue that runs only when told to.
#[derive(Default)]
pub struct ManualFrames {
    next: Cell<i64>,
    queue: RefCell<Vec<(FrameRequest, Tick)>>,
}

impl ManualFrames {
    pub fn new() -> Self {
        Self::default()
    }

    /// Run every frame queued before this call; frames they queue wait for
    /// the next call. Returns how many ran.
    pub fn run_frame(&self) -> usize {
        let due = std::mem::take(&mut *self.queue.borrow_mut());
        let n = due.len();
        for (_, tick) in due {
            tick();
        }
        n
    }

    /// Run up to `n` frames, stopping early if the queue drains.
    pub fn run_frames(&self, n: usize) -> usize {
        let mut ran = 0;
        for _ in 0..n {
            if self.run_frame() == 0 {
                break;
            }
            ran += 1;
        }
        ran
    }

    pub fn pending(&self) -> usize {
        self.queue.borrow().len()
    }
}

impl FrameScheduler for ManualFrames {
    fn schedule(&self, tick: Tick) -> Result<FrameRequest> {
        let id = self.next.get() + 1;
        self.next.set(id);
        let request = FrameRequest(id);
        self.queue.borrow_mut().push((request, tick));
        Ok(request)
    }

    fn cancel(&self, request: FrameRequest) {
        self.queue.borrow_mut().retain(|(r, _)| *r != request);
    }
}

/// Broadcasts events to its subscribers on [`ManualEvents::emit`].
#[derive(Default)]
pub struct ManualEvents {
    next: Cell<u32>,
    sinks: RefCell<Vec<(Subscription, EventSink)>>,
}

impl ManualEvents {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn emit(&self, event: HostEvent) {
        // Clone out so a sink may unsubscribe while being called.
        let sinks: Vec<EventSink> = self.sinks.borrow().iter().map(|(_, s)| s.clone()).collect();
        for sink in sinks {
            sink(event);
        }
    }

    pub fn listener_count(&self) -> usize {
        self.sinks.borrow().len()
    }
}

impl EventSource for ManualEvents {
    fn subscribe(&self, sink: EventSink) -> Result<Subscription> {
        let id = self.next.get() + 1;
        self.next.set(id);
        let sub = Subscription(id);
        self.sinks.borrow_mut().push((sub, sink));
        Ok(sub)
    }

    fn unsubscribe(&self, subscription: Subscription) {
        self.sinks.borrow_mut().retain(|(s, _)| *s != subscription);
    }
}

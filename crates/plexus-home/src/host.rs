//! Browser implementations of the field's host seams.

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::rc::Rc;

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{MouseEvent, Window};

use plexus_field::schedule::{EventSink, Tick};
use plexus_field::{
    EventSource, FieldError, FrameRequest, FrameScheduler, HostEvent, ManualFrames, Subscription,
};

use crate::dom;

/// Ticks waiting for the next repaint, and the browser frame request that
/// will run them. At most one request is outstanding at a time.
#[derive(Default)]
struct RepaintQueue {
    due: ManualFrames,
    requested: Cell<Option<i32>>,
}

impl RepaintQueue {
    /// Queue `tick`. The flag is true when no browser frame is requested yet.
    fn push(&self, tick: Tick) -> plexus_field::Result<(FrameRequest, bool)> {
        let request = self.due.schedule(tick)?;
        Ok((request, self.requested.get().is_none()))
    }

    fn mark_requested(&self, id: i32) {
        self.requested.set(Some(id));
    }

    /// Drop a queued tick. Returns the browser request to cancel once
    /// nothing is left waiting on it.
    fn remove(&self, request: FrameRequest) -> Option<i32> {
        self.due.cancel(request);
        if self.due.pending() == 0 {
            self.requested.take()
        } else {
            None
        }
    }

    /// Run everything queued before this repaint.
    fn run(&self) -> usize {
        self.requested.set(None);
        self.due.run_frame()
    }
}

/// `requestAnimationFrame` scheduler.
///
/// One JS callback lives as long as the scheduler and drains a queue of
/// ticks, so a loop can re-queue itself from inside the callback and any
/// number of loops can share an instance.
pub struct AnimationFrames {
    window: Window,
    queue: Rc<RepaintQueue>,
    callback: Closure<dyn FnMut()>,
}

impl AnimationFrames {
    pub fn new(window: Window) -> Self {
        let queue = Rc::new(RepaintQueue::default());
        let q = queue.clone();
        let callback = Closure::wrap(Box::new(move || {
            q.run();
        }) as Box<dyn FnMut()>);
        Self {
            window,
            queue,
            callback,
        }
    }
}

impl FrameScheduler for AnimationFrames {
    fn schedule(&self, tick: Tick) -> plexus_field::Result<FrameRequest> {
        let (request, first) = self.queue.push(tick)?;
        if first {
            match self
                .window
                .request_animation_frame(self.callback.as_ref().unchecked_ref())
            {
                Ok(id) => self.queue.mark_requested(id),
                Err(e) => {
                    self.queue.remove(request);
                    return Err(FieldError::Host(format!(
                        "requestAnimationFrame: {}",
                        dom::js_err(e)
                    )));
                }
            }
        }
        Ok(request)
    }

    fn cancel(&self, request: FrameRequest) {
        if let Some(id) = self.queue.remove(request) {
            self.window.cancel_animation_frame(id).ok();
        }
    }
}

impl Drop for AnimationFrames {
    fn drop(&mut self) {
        // The browser must not call into the callback once it is freed.
        if let Some(id) = self.queue.requested.take() {
            self.window.cancel_animation_frame(id).ok();
        }
    }
}

struct Listeners {
    resize: Closure<dyn FnMut(web_sys::Event)>,
    mousemove: Closure<dyn FnMut(MouseEvent)>,
}

/// Window `resize` and `mousemove` listeners, one pair per subscription.
pub struct WindowEvents {
    window: Window,
    next: Cell<u32>,
    attached: RefCell<HashMap<u32, Listeners>>,
}

impl WindowEvents {
    pub fn new(window: Window) -> Self {
        Self {
            window,
            next: Cell::new(0),
            attached: RefCell::new(HashMap::new()),
        }
    }
}

impl EventSource for WindowEvents {
    fn subscribe(&self, sink: EventSink) -> plexus_field::Result<Subscription> {
        let win = self.window.clone();
        let s = sink.clone();
        let resize = Closure::wrap(Box::new(move |_: web_sys::Event| {
            let (width, height) = dom::viewport_size(&win);
            s(HostEvent::Resize { width, height });
        }) as Box<dyn FnMut(web_sys::Event)>);

        let s = sink;
        let mousemove = Closure::wrap(Box::new(move |e: MouseEvent| {
            s(HostEvent::PointerMove {
                x: e.client_x() as f64,
                y: e.client_y() as f64,
            });
        }) as Box<dyn FnMut(MouseEvent)>);

        let target: &web_sys::EventTarget = self.window.as_ref();
        dom::add_listener(target, "resize", &resize).map_err(|e| FieldError::Host(e.to_string()))?;
        if let Err(e) = dom::add_listener(target, "mousemove", &mousemove) {
            dom::remove_listener(target, "resize", &resize);
            return Err(FieldError::Host(e.to_string()));
        }

        let id = self.next.get() + 1;
        self.next.set(id);
        self.attached
            .borrow_mut()
            .insert(id, Listeners { resize, mousemove });
        Ok(Subscription(id))
    }

    fn unsubscribe(&self, subscription: Subscription) {
        let Some(l) = self.attached.borrow_mut().remove(&subscription.0) else {
            return;
        };
        let target: &web_sys::EventTarget = self.window.as_ref();
        dom::remove_listener(target, "resize", &l.resize);
        dom::remove_listener(target, "mousemove", &l.mousemove);
    }
}

impl Drop for WindowEvents {
    fn drop(&mut self) {
        let ids: Vec<u32> = self.attached.borrow().keys().copied().collect();
        for id in ids {
            self.unsubscribe(Subscription(id));
        }
    }
}

/// Shared handles for one animation's host wiring.
pub fn browser_host(window: &Window) -> (Rc<AnimationFrames>, Rc<WindowEvents>) {
    (
        Rc::new(AnimationFrames::new(window.clone())),
        Rc::new(WindowEvents::new(window.clone())),
    )
}

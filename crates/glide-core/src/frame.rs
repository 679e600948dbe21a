//! Frame-batched DOM mutation
//!
//! High-frequency inputs (scroll, pointer move) enqueue their writes here
//! instead of touching layout directly. The first write in a frame asks the
//! scheduler for one display frame; later writes ride along. When the frame
//! fires, every queued write runs once, in registration order.

use std::cell::Cell;
use std::fmt;

use crate::element::ElementId;

/// Asks the host for a callback on the next display refresh
pub trait FrameScheduler {
    fn request_frame(&self);
}

/// Scheduler for headless runs: records requests, the caller drives frames
#[derive(Debug, Default)]
pub struct ManualScheduler {
    requests: Cell<u32>,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Total frames requested so far
    pub fn requests(&self) -> u32 {
        self.requests.get()
    }
}

impl FrameScheduler for ManualScheduler {
    fn request_frame(&self) {
        self.requests.set(self.requests.get() + 1);
    }
}

impl<S: FrameScheduler + ?Sized> FrameScheduler for &S {
    fn request_frame(&self) {
        (**self).request_frame()
    }
}

/// Identifies a write that supersedes earlier writes with the same key
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FrameKey {
    pub channel: &'static str,
    pub element: Option<ElementId>,
}

impl FrameKey {
    /// A page-wide write such as the scroll offset
    pub const fn channel(channel: &'static str) -> Self {
        Self {
            channel,
            element: None,
        }
    }

    /// A write to one element, such as its parallax offset
    pub const fn element(channel: &'static str, id: ElementId) -> Self {
        Self {
            channel,
            element: Some(id),
        }
    }
}

/// A queued write
pub type Mutation<C> = Box<dyn FnOnce(&mut C)>;

struct Slot<C> {
    key: Option<FrameKey>,
    mutation: Mutation<C>,
}

/// Queue of writes flushed once per frame
///
/// `C` is whatever the writes operate on: the DOM handle set in the browser,
/// plain state in tests.
pub struct FrameBatcher<C, S> {
    scheduler: S,
    queue: Vec<Slot<C>>,
    pending: bool,
}

impl<C, S: FrameScheduler> FrameBatcher<C, S> {
    pub fn new(scheduler: S) -> Self {
        Self {
            scheduler,
            queue: Vec::new(),
            pending: false,
        }
    }

    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    /// True while a frame has been requested and not yet run
    #[inline]
    pub fn is_pending(&self) -> bool {
        self.pending
    }

    /// Writes waiting for the next frame
    #[inline]
    pub fn len(&self) -> usize {
        self.queue.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    /// Enqueue a write for the next frame
    pub fn schedule<F>(&mut self, mutation: F)
    where
        F: FnOnce(&mut C) + 'static,
    {
        self.queue.push(Slot {
            key: None,
            mutation: Box::new(mutation),
        });
        self.mark_dirty();
    }

    /// Enqueue a write that replaces any queued write with the same key
    ///
    /// The replacement keeps the original slot, so ordering follows the
    /// first registration in the frame.
    pub fn schedule_keyed<F>(&mut self, key: FrameKey, mutation: F)
    where
        F: FnOnce(&mut C) + 'static,
    {
        match self.queue.iter_mut().find(|slot| slot.key == Some(key)) {
            Some(slot) => slot.mutation = Box::new(mutation),
            None => self.queue.push(Slot {
                key: Some(key),
                mutation: Box::new(mutation),
            }),
        }
        self.mark_dirty();
    }

    /// Run every queued write in order; returns how many ran
    ///
    /// Call from the scheduler's frame callback.
    pub fn run_frame(&mut self, ctx: &mut C) -> usize {
        let writes = self.drain();
        let count = writes.len();
        for write in writes {
            write(ctx);
        }
        count
    }

    /// Take the queued writes and clear the pending flag
    ///
    /// For hosts that share the batcher behind a `RefCell`: release the
    /// borrow, then run the writes so they can schedule follow-ups.
    pub fn drain(&mut self) -> Vec<Mutation<C>> {
        self.pending = false;
        std::mem::take(&mut self.queue)
            .into_iter()
            .map(|slot| slot.mutation)
            .collect()
    }

    /// Drop queued writes without running them
    pub fn clear(&mut self) {
        self.queue.clear();
    }

    fn mark_dirty(&mut self) {
        if !self.pending {
            self.pending = true;
            self.scheduler.request_frame();
        }
    }
}

impl<C, S> fmt::Debug for FrameBatcher<C, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FrameBatcher")
            .field("queued", &self.queue.len())
            .field("pending", &self.pending)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_one_request_per_frame() {
        let scheduler = ManualScheduler::new();
        let mut batcher: FrameBatcher<Vec<u32>, _> = FrameBatcher::new(&scheduler);

        for i in 0..5 {
            batcher.schedule(move |log: &mut Vec<u32>| log.push(i));
        }
        assert_eq!(scheduler.requests(), 1);
        assert!(batcher.is_pending());

        let mut log = Vec::new();
        assert_eq!(batcher.run_frame(&mut log), 5);
        assert_eq!(log, vec![0, 1, 2, 3, 4]);
        assert!(!batcher.is_pending());

        batcher.schedule(|log: &mut Vec<u32>| log.push(9));
        assert_eq!(scheduler.requests(), 2);
    }

    #[test]
    fn test_keyed_writes_collapse_in_place() {
        let scheduler = ManualScheduler::new();
        let mut batcher: FrameBatcher<Vec<String>, _> = FrameBatcher::new(&scheduler);
        let scroll = FrameKey::channel("scroll");

        batcher.schedule_keyed(scroll, |log: &mut Vec<String>| log.push("scroll 10".into()));
        batcher.schedule(|log: &mut Vec<String>| log.push("header".into()));
        batcher.schedule_keyed(scroll, |log: &mut Vec<String>| log.push("scroll 40".into()));
        assert_eq!(batcher.len(), 2);

        let mut log = Vec::new();
        batcher.run_frame(&mut log);
        assert_eq!(log, vec!["scroll 40".to_string(), "header".to_string()]);
        assert_eq!(scheduler.requests(), 1);
    }

    #[test]
    fn test_keys_distinguish_elements() {
        let scheduler = ManualScheduler::new();
        let mut batcher: FrameBatcher<Vec<u32>, _> = FrameBatcher::new(&scheduler);
        batcher.schedule_keyed(FrameKey::element("parallax", ElementId(1)), |l: &mut Vec<u32>| l.push(1));
        batcher.schedule_keyed(FrameKey::element("parallax", ElementId(2)), |l: &mut Vec<u32>| l.push(2));
        assert_eq!(batcher.len(), 2);
    }

    #[test]
    fn test_empty_frame_runs_nothing() {
        let mut batcher: FrameBatcher<u32, _> = FrameBatcher::new(ManualScheduler::new());
        let mut ctx = 0;
        assert_eq!(batcher.run_frame(&mut ctx), 0);
        assert_eq!(batcher.scheduler().requests(), 0);
    }

    #[test]
    fn test_follow_up_goes_to_next_frame() {
        use std::cell::RefCell;
        use std::rc::Rc;

        let batcher: Rc<RefCell<FrameBatcher<Vec<u32>, ManualScheduler>>> =
            Rc::new(RefCell::new(FrameBatcher::new(ManualScheduler::new())));

        let shared = Rc::clone(&batcher);
        batcher.borrow_mut().schedule(move |log: &mut Vec<u32>| {
            log.push(1);
            shared.borrow_mut().schedule(|log: &mut Vec<u32>| log.push(2));
        });

        let mut log = Vec::new();
        let writes = batcher.borrow_mut().drain();
        for write in writes {
            write(&mut log);
        }
        assert_eq!(log, vec![1]);
        assert!(batcher.borrow().is_pending());
        assert_eq!(batcher.borrow().scheduler().requests(), 2);

        batcher.borrow_mut().run_frame(&mut log);
        assert_eq!(log, vec![1, 2]);
    }
}

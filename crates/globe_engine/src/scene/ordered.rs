//! Ordered renderable queue
//!
//! The compositor half of the deferred-drawing contract. Renderables do not
//! draw when visited; they enqueue a record here. After every renderable in
//! a pass has been visited, the queue is drained in descending eye-distance
//! order, so translucent geometry composites correctly regardless of the
//! order objects were visited in.

use crate::render::RenderError;
use crate::scene::context::DrawContext;
use std::rc::Rc;

/// A record that can be queued for distance-sorted drawing
pub trait OrderedRenderable {
    /// Distance from the camera eye to this record's anchor
    ///
    /// Determines composite order; farther records draw first.
    fn eye_distance(&self) -> f64;

    /// Draw the record against the frame's context
    ///
    /// Invoked by the queue exactly once per enqueued record, after global
    /// sorting, and only for records that survived culling.
    ///
    /// # Errors
    /// Returns [`RenderError`] if the device rejects the draw; the queue
    /// logs the error and omits the record for this frame.
    fn draw(&self, ctx: &mut DrawContext<'_>) -> Result<(), RenderError>;
}

/// Queue of deferred draw records for one pass
#[derive(Default)]
pub struct OrderedQueue {
    entries: Vec<Rc<dyn OrderedRenderable>>,
}

impl OrderedQueue {
    /// Create an empty queue
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a record for later, sorted invocation
    pub fn enqueue(&mut self, renderable: Rc<dyn OrderedRenderable>) {
        self.entries.push(renderable);
    }

    /// Number of queued records
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the queue is empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Drain the queue sorted back-to-front (descending eye distance)
    ///
    /// Records with exactly equal distance come out in unspecified order.
    pub fn take_sorted(&mut self) -> Vec<Rc<dyn OrderedRenderable>> {
        let mut entries = std::mem::take(&mut self.entries);
        entries.sort_unstable_by(|a, b| b.eye_distance().total_cmp(&a.eye_distance()));
        entries
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    struct Scripted {
        distance: f64,
        order: Rc<RefCell<Vec<f64>>>,
    }

    impl OrderedRenderable for Scripted {
        fn eye_distance(&self) -> f64 {
            self.distance
        }

        fn draw(&self, _ctx: &mut DrawContext<'_>) -> Result<(), RenderError> {
            self.order.borrow_mut().push(self.distance);
            Ok(())
        }
    }

    #[test]
    fn test_take_sorted_is_back_to_front() {
        let order = Rc::new(RefCell::new(Vec::new()));
        let mut queue = OrderedQueue::new();
        for distance in [10.0, 50.0, 25.0] {
            queue.enqueue(Rc::new(Scripted {
                distance,
                order: Rc::clone(&order),
            }));
        }

        let sorted: Vec<f64> = queue
            .take_sorted()
            .iter()
            .map(|r| r.eye_distance())
            .collect();
        assert_eq!(sorted, vec![50.0, 25.0, 10.0]);
        assert!(queue.is_empty());
    }
}

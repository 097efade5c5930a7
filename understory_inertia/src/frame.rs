// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Display-refresh scheduling contract.
//!
//! Simulations never sleep or spawn. They ask a [`FrameScheduler`] for one
//! callback per display refresh and the host calls back into the interaction
//! with the [`FrameHandle`] it was given.

use std::collections::VecDeque;

/// Identifies one requested frame callback.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct FrameHandle(pub u64);

/// Schedules callbacks on the next display refresh.
pub trait FrameScheduler {
    /// Request a callback on the next refresh.
    fn request_frame(&mut self) -> FrameHandle;
    /// Cancel a pending request. Unknown handles are ignored.
    fn cancel_frame(&mut self, handle: FrameHandle);
}

/// A FIFO scheduler for headless hosts and tests.
///
/// The host drains it with [`FrameQueue::next_frame`] and forwards each handle to
/// the interaction.
#[derive(Clone, Debug, Default)]
pub struct FrameQueue {
    next: u64,
    pending: VecDeque<FrameHandle>,
}

impl FrameQueue {
    /// Empty queue.
    pub fn new() -> Self {
        Self::default()
    }

    /// Pop the oldest pending frame.
    pub fn next_frame(&mut self) -> Option<FrameHandle> {
        self.pending.pop_front()
    }

    /// Pending frames in request order.
    pub fn pending(&self) -> impl Iterator<Item = FrameHandle> + '_ {
        self.pending.iter().copied()
    }

    /// Returns true if nothing is pending.
    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}

impl FrameScheduler for FrameQueue {
    fn request_frame(&mut self) -> FrameHandle {
        let handle = FrameHandle(self.next);
        self.next += 1;
        self.pending.push_back(handle);
        handle
    }

    fn cancel_frame(&mut self, handle: FrameHandle) {
        self.pending.retain(|h| *h != handle);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn handles_are_unique_and_cancellable() {
        let mut q = FrameQueue::new();
        let a = q.request_frame();
        let b = q.request_frame();
        assert_ne!(a, b);
        q.cancel_frame(a);
        q.cancel_frame(FrameHandle(99));
        assert!(q.pending().eq([b]));
        assert_eq!(q.next_frame(), Some(b));
        assert!(q.is_empty());
        assert_eq!(q.next_frame(), None);
    }

    #[test]
    fn frames_pop_in_request_order() {
        let mut q = FrameQueue::new();
        let handles = [q.request_frame(), q.request_frame(), q.request_frame()];
        for h in handles {
            assert_eq!(q.next_frame(), Some(h));
        }
        assert!(q.is_empty());
    }
}

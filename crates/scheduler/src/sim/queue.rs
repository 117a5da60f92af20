//! Ready queue for round-robin dispatch.
//!
//! The queue holds indices into the simulator's run-state arena. It provides:
//! 1. **FIFO Order:** Processes are dispatched strictly from the head.
//! 2. **Tail Reinsertion:** Preempted processes rejoin at the tail.
//! 3. **Membership Tracking:** A process is never queued twice at the same time.

use std::collections::VecDeque;

/// FIFO of run-state indices with at-most-once membership.
#[derive(Clone, Debug, Default)]
pub struct ReadyQueue {
    /// Queued indices, head first.
    order: VecDeque<usize>,
    /// `queued[i]` is true while index `i` is in `order`.
    queued: Vec<bool>,
}

impl ReadyQueue {
    /// Creates an empty queue able to hold indices `0..capacity`.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            order: VecDeque::with_capacity(capacity),
            queued: vec![false; capacity],
        }
    }

    /// Returns the number of queued processes.
    #[inline]
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Returns true if no process is queued.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Returns the index at the head without removing it.
    #[inline]
    pub fn front(&self) -> Option<usize> {
        self.order.front().copied()
    }

    /// Returns true if `index` is currently queued.
    pub fn contains(&self, index: usize) -> bool {
        self.queued.get(index).copied().unwrap_or(false)
    }

    /// Appends `index` at the tail.
    ///
    /// Returns false, leaving the queue untouched, if `index` is already
    /// queued.
    pub fn push_back(&mut self, index: usize) -> bool {
        if index >= self.queued.len() {
            self.queued.resize(index + 1, false);
        }
        if self.queued[index] {
            return false;
        }
        self.queued[index] = true;
        self.order.push_back(index);
        true
    }

    /// Removes and returns the index at the head.
    pub fn pop_front(&mut self) -> Option<usize> {
        let index = self.order.pop_front()?;
        self.queued[index] = false;
        Some(index)
    }

    /// Iterates over queued indices, head first.
    pub fn iter(&self) -> impl Iterator<Item = usize> + '_ {
        self.order.iter().copied()
    }
}

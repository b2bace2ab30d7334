//=========================================================================
// Input Buffer
//
// Collects input events between frame boundaries in two categories:
// discrete and continuous. Acts as a transient event aggregator between
// the winit callbacks and the channel flush on RedrawRequested.
//
// Responsibilities:
// - Keep discrete inputs (keys, touch start/end) in arrival order
// - Drop immediately repeated discrete inputs (OS key repeat)
// - Coalesce continuous inputs (TouchMoved) to the latest per finger
//
// Ordering: a pending move for a finger is committed to the discrete
// list before that finger's start/end, so per-finger order survives
// the flush even when the OS reuses touch ids (Android pointer 0).
//
//=========================================================================

//=== Standard Library Imports ============================================

use std::collections::HashSet;

//=== Internal Modules ====================================================

use crate::core::input::InputEvent;

//=== InputBuffer =========================================================

/// Transient event store for one frame of input.
pub(crate) struct InputBuffer {
    discrete: Vec<InputEvent>,
    continuous: HashSet<InputEvent>,
}

impl InputBuffer {
    //--- Construction -----------------------------------------------------

    pub(crate) fn new() -> Self {
        const DISCRETE_BASE: usize = 64;
        const CONTINUOUS_BASE: usize = 8;

        Self {
            discrete: Vec::with_capacity(DISCRETE_BASE),
            continuous: HashSet::with_capacity(CONTINUOUS_BASE),
        }
    }

    //--- Event Handling ---------------------------------------------------

    /// Routes an event to the matching category.
    pub(crate) fn push(&mut self, event: InputEvent) {
        if event.is_continuous() {
            self.push_continuous(event);
        } else {
            self.push_discrete(event);
        }
    }

    /// Inserts or replaces a continuous input; latest wins per finger.
    pub(crate) fn push_continuous(&mut self, event: InputEvent) {
        self.continuous.replace(event);
    }

    /// Appends a discrete input, ignoring an exact repeat of the last one.
    pub(crate) fn push_discrete(&mut self, event: InputEvent) {
        match event {
            InputEvent::Unidentified => return,
            InputEvent::TouchStarted { id, .. } | InputEvent::TouchEnded { id } => {
                self.commit_pending_move(id);
            }
            InputEvent::FocusLost => {
                self.discrete.extend(self.continuous.drain());
            }
            _ => {}
        }

        if self.discrete.last() != Some(&event) {
            self.discrete.push(event);
        }
    }

    //--- Drain ------------------------------------------------------------

    /// Returns `(discrete, continuous)` and clears the buffer.
    ///
    /// Returns `None` when nothing was buffered.
    pub(crate) fn drain(&mut self) -> Option<(Vec<InputEvent>, Vec<InputEvent>)> {
        if self.is_empty() {
            return None;
        }

        let discrete = std::mem::take(&mut self.discrete);
        let continuous = self.continuous.drain().collect();
        Some((discrete, continuous))
    }

    //--- Internal Helpers -------------------------------------------------

    /// Moves the coalesced `TouchMoved` for `id`, if any, to the discrete list.
    fn commit_pending_move(&mut self, id: u64) {
        let key = InputEvent::TouchMoved { id, x: 0.0, y: 0.0 };
        if let Some(pending) = self.continuous.take(&key) {
            self.discrete.push(pending);
        }
    }

    //--- Utilities --------------------------------------------------------

    #[cfg(test)]
    pub(crate) fn len(&self) -> usize {
        self.discrete.len() + self.continuous.len()
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.discrete.is_empty() && self.continuous.is_empty()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

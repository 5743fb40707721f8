//=========================================================================
// Input Buffer
//=========================================================================
//
// Per-frame store between winit callbacks and the core channel.
//
// - `discrete`:   presses, touches, wheel steps; order preserved, an event
//                 identical to the previous one is dropped
// - `continuous`: pointer position and window size; last one wins
//
// Drained on every `RedrawRequested`.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::collections::HashSet;

//=== Internal Dependencies ===============================================

use crate::core::input::InputEvent;

//=== InputBuffer =========================================================

pub(crate) struct InputBuffer {
    discrete: Vec<InputEvent>,
    continuous: HashSet<InputEvent>,
}

impl InputBuffer {
    pub(crate) fn new() -> Self {
        const DISCRETE_BASE: usize = 32;
        const CONTINUOUS_BASE: usize = 4;

        Self {
            discrete: Vec::with_capacity(DISCRETE_BASE),
            continuous: HashSet::with_capacity(CONTINUOUS_BASE),
        }
    }

    /// Routes an event to the discrete or continuous store.
    pub(crate) fn push(&mut self, event: InputEvent) {
        if event.is_continuous() {
            self.push_continuous(event);
        } else {
            self.push_discrete(event);
        }
    }

    /// Replaces any pending event of the same kind.
    pub(crate) fn push_continuous(&mut self, event: InputEvent) {
        self.continuous.replace(event);
    }

    /// Appends, ignoring an exact repeat of the last discrete event.
    ///
    /// Wheel steps are never deduplicated: two identical notches are two
    /// notches of scroll.
    pub(crate) fn push_discrete(&mut self, event: InputEvent) {
        let is_wheel = matches!(event, InputEvent::MouseWheel { .. });
        if is_wheel || self.discrete.last() != Some(&event) {
            self.discrete.push(event);
        }
    }

    /// Takes this frame's events, or `None` if nothing was buffered.
    pub(crate) fn drain(&mut self) -> Option<(Vec<InputEvent>, Vec<InputEvent>)> {
        if self.is_empty() {
            return None;
        }

        let discrete = self.discrete.drain(..).collect();
        let continuous = self.continuous.drain().collect();
        Some((discrete, continuous))
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.discrete.is_empty() && self.continuous.is_empty()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

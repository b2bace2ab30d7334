//=========================================================================
// Keyboard State
//=========================================================================
//
// Persistent key-held tracking with per-frame press/release deltas.
//
// Architecture:
//   InputEvent → process_events() → HashSet (keys held) → query
//
// Frame lifecycle: begin_frame() → process_events() → query
//
//=========================================================================

//=== External Dependencies ===============================================

use std::collections::HashSet;

//=== Internal Dependencies ===============================================

use super::event::{InputEvent, KeyCode};

//=== KeyboardState =======================================================

/// Tracks keys held across frames and keys pressed/released this frame.
#[derive(Debug, Default)]
pub struct KeyboardState {
    //--- Persistent State (survives frame boundary) ----------------------
    keys_down: HashSet<KeyCode>,

    //--- Frame Deltas (reset each frame via begin_frame()) ---------------
    keys_pressed_this_frame: HashSet<KeyCode>,
    keys_released_this_frame: HashSet<KeyCode>,
}

impl KeyboardState {
    pub fn new() -> Self {
        Self::default()
    }

    //--- Frame Processing -------------------------------------------------

    /// Clears frame-specific deltas.
    pub(super) fn begin_frame(&mut self) {
        self.keys_pressed_this_frame.clear();
        self.keys_released_this_frame.clear();
    }

    /// Applies keyboard events; touch and unidentified events are skipped.
    ///
    /// `FocusLost` releases every held key.
    pub(super) fn process_events(&mut self, events: &[InputEvent]) {
        for event in events {
            match event {
                InputEvent::KeyDown(key) => {
                    // Auto-repeat arrives as repeated KeyDown; only the first counts
                    if self.keys_down.insert(*key) {
                        self.keys_pressed_this_frame.insert(*key);
                    }
                }
                InputEvent::KeyUp(key) => {
                    if self.keys_down.remove(key) {
                        self.keys_released_this_frame.insert(*key);
                    }
                }
                InputEvent::FocusLost => self.release_all(),
                _ => {}
            }
        }
    }

    /// Releases every held key (window focus lost, scene exit).
    pub(super) fn release_all(&mut self) {
        self.keys_released_this_frame.extend(self.keys_down.drain());
    }

    //=====================================================================
    // Query API
    //=====================================================================

    /// Returns `true` while key is held.
    pub fn is_key_down(&self, key: KeyCode) -> bool {
        self.keys_down.contains(&key)
    }

    /// Returns `true` if either key is held.
    pub fn is_either_down(&self, a: KeyCode, b: KeyCode) -> bool {
        self.is_key_down(a) || self.is_key_down(b)
    }

    /// Returns `true` if key transitioned UP → DOWN this frame.
    pub fn is_key_pressed(&self, key: KeyCode) -> bool {
        self.keys_pressed_this_frame.contains(&key)
    }

    /// Returns `true` if key transitioned DOWN → UP this frame.
    pub fn is_key_released(&self, key: KeyCode) -> bool {
        self.keys_released_this_frame.contains(&key)
    }

    /// Returns an iterator over all keys currently held.
    pub fn keys_down(&self) -> impl Iterator<Item = &KeyCode> {
        self.keys_down.iter()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

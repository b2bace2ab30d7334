//=========================================================================
// Input Event Types
//
// Defines the internal representation of low-level input events.
//
// This module abstracts away platform-specific input (Winit keyboard and
// touch events) into a unified format used by the input unifier.
//
// Responsibilities:
// - Represent keyboard and touch inputs in a stable, portable way
// - Provide equality and hashing semantics for deduplication
// - Enable event coalescing (e.g., multiple TouchMoved → last position)
//
// Event Flow:
// ```text
// Platform Layer (Winit)
//         ↓
//    InputEvent (this module)
//         ↓
//    InputManager (keyboard state + touch control)
//         ↓
//    MovementVector (per frame)
// ```
//
//=========================================================================

//=== Standard Library Imports ============================================

use std::hash::{Hash, Hasher};

//=== KeyCode =============================================================

/// Physical keyboard key identifier.
///
/// Represents the physical key location, not the character produced.
/// `KeyW` is always the same physical key regardless of layout, which keeps
/// WASD movement in place on AZERTY keyboards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyCode {
    //--- Alphabetic Keys --------------------------------------------------

    /// Letter keys: A-Z (physical location, not character)
    KeyA, KeyB, KeyC, KeyD, KeyE, KeyF, KeyG, KeyH, KeyI,
    KeyJ, KeyK, KeyL, KeyM, KeyN, KeyO, KeyP, KeyQ, KeyR,
    KeyS, KeyT, KeyU, KeyV, KeyW, KeyX, KeyY, KeyZ,

    //--- Arrow Keys -------------------------------------------------------

    ArrowDown,
    ArrowLeft,
    ArrowRight,
    ArrowUp,

    //--- Special Keys -----------------------------------------------------

    Space,
    Enter,
    Escape,
    Tab,

    /// Fallback for keys not explicitly mapped by the input layer.
    Unidentified,
}

//=== InputEvent ==========================================================

/// Low-level input event from the platform layer.
///
/// # Equality & Hashing Semantics
///
/// Discrete events compare by type + payload. `TouchMoved` compares by
/// touch id only, so a `HashSet` keeps just the latest position of each
/// finger per frame.
///
/// ```text
/// KeyDown(W)            == KeyDown(W)             ✓
/// KeyDown(W)            == KeyUp(W)               ✗
/// TouchMoved{id:1, ..}  == TouchMoved{id:1, ..}   ✓ (coordinates ignored)
/// TouchMoved{id:1, ..}  == TouchMoved{id:2, ..}   ✗
/// ```
///
/// Touch coordinates are in logical pixels, top-left origin.
#[derive(Debug, Clone, Copy)]
pub enum InputEvent {
    /// Key pressed down.
    KeyDown(KeyCode),

    /// Key released.
    KeyUp(KeyCode),

    /// A finger touched the surface.
    TouchStarted { id: u64, x: f32, y: f32 },

    /// A finger moved while touching.
    TouchMoved { id: u64, x: f32, y: f32 },

    /// A finger lifted (or the touch was cancelled by the OS).
    TouchEnded { id: u64 },

    /// The window lost focus; no key-up or touch-end will follow for
    /// inputs held at that moment.
    FocusLost,

    /// Unrecognized or unsupported event. Ignored by consumers.
    Unidentified,
}

impl InputEvent {
    /// Returns `true` for events whose latest value supersedes earlier ones.
    pub fn is_continuous(&self) -> bool {
        matches!(self, Self::TouchMoved { .. })
    }
}

//--- Trait Implementations -----------------------------------------------

impl PartialEq for InputEvent {
    fn eq(&self, other: &Self) -> bool {
        use InputEvent::*;
        match (self, other) {
            (KeyDown(a), KeyDown(b)) => a == b,
            (KeyUp(a), KeyUp(b)) => a == b,
            (TouchStarted { id: a, x: ax, y: ay }, TouchStarted { id: b, x: bx, y: by }) => {
                a == b && ax == bx && ay == by
            }
            // TouchMoved: coordinates ignored, coalesced per finger
            (TouchMoved { id: a, .. }, TouchMoved { id: b, .. }) => a == b,
            (TouchEnded { id: a }, TouchEnded { id: b }) => a == b,
            (FocusLost, FocusLost) => true,
            (Unidentified, Unidentified) => true,
            _ => false,
        }
    }
}

impl Eq for InputEvent {}

/// Hashes discriminant + key or touch id. Coordinates are never hashed,
/// which keeps `a == b → hash(a) == hash(b)` for `TouchMoved`.
impl Hash for InputEvent {
    fn hash<H: Hasher>(&self, state: &mut H) {
        std::mem::discriminant(self).hash(state);

        match self {
            Self::KeyDown(key) | Self::KeyUp(key) => key.hash(state),
            Self::TouchStarted { id, .. }
            | Self::TouchMoved { id, .. }
            | Self::TouchEnded { id } => id.hash(state),
            Self::FocusLost | Self::Unidentified => {}
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::hash_map::DefaultHasher;
    use std::collections::HashSet;

    //--- Test Helpers -----------------------------------------------------

    fn hash_of<T: Hash>(value: &T) -> u64 {
        let mut hasher = DefaultHasher::new();
        value.hash(&mut hasher);
        hasher.finish()
    }

    //=====================================================================
    // Equality Tests
    //=====================================================================

    #[test]
    fn equality_same_key() {
        assert_eq!(InputEvent::KeyDown(KeyCode::KeyW), InputEvent::KeyDown(KeyCode::KeyW));
    }

    #[test]
    fn equality_different_discriminant() {
        assert_ne!(InputEvent::KeyDown(KeyCode::KeyW), InputEvent::KeyUp(KeyCode::KeyW));
    }

    #[test]
    fn touch_moved_ignores_coordinates() {
        let a = InputEvent::TouchMoved { id: 3, x: 1.0, y: 2.0 };
        let b = InputEvent::TouchMoved { id: 3, x: 50.0, y: 80.0 };
        assert_eq!(a, b);
        assert_eq!(hash_of(&a), hash_of(&b));
    }

    #[test]
    fn touch_moved_distinguishes_fingers() {
        let a = InputEvent::TouchMoved { id: 1, x: 1.0, y: 2.0 };
        let b = InputEvent::TouchMoved { id: 2, x: 1.0, y: 2.0 };
        assert_ne!(a, b);
    }

    #[test]
    fn only_touch_moved_is_continuous() {
        assert!(InputEvent::TouchMoved { id: 0, x: 0.0, y: 0.0 }.is_continuous());
        assert!(!InputEvent::TouchStarted { id: 0, x: 0.0, y: 0.0 }.is_continuous());
        assert!(!InputEvent::KeyDown(KeyCode::KeyA).is_continuous());
    }

    //=====================================================================
    // HashSet Behavior
    //=====================================================================

    #[test]
    fn hashset_replaces_touch_move_per_finger() {
        let mut set = HashSet::new();
        set.replace(InputEvent::TouchMoved { id: 1, x: 1.0, y: 1.0 });
        set.replace(InputEvent::TouchMoved { id: 1, x: 9.0, y: 9.0 });
        set.replace(InputEvent::TouchMoved { id: 2, x: 4.0, y: 4.0 });

        assert_eq!(set.len(), 2);
        let latest = set
            .iter()
            .find_map(|e| match e {
                InputEvent::TouchMoved { id: 1, x, y } => Some((*x, *y)),
                _ => None,
            });
        assert_eq!(latest, Some((9.0, 9.0)));
    }
}

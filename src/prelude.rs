//=========================================================================
// Prelude
//=========================================================================
//
// Convenience module that re-exports commonly used types and traits.
//
// Usage:
//   use conference_companion::prelude::*;
//
//=========================================================================

//=== Public API ==========================================================

// Engine core
pub use crate::engine::{Engine, EngineBuilder};
pub use crate::PlatformError;

// Global systems and context
pub use crate::core::globals::{GlobalContext, GlobalSystems};

// Input unifier
pub use crate::core::input::{
    DeviceProfile, InputEvent, InputManager, JoystickVector, KeyCode, MovementVector,
    TouchControl, VirtualJoystick,
};

// Event bus
pub use crate::core::event_bus::{EventBus, EventKind, GameEvent, Subscription};

// Points of interest
pub use crate::core::poi::{
    InteractionKind, Poi, PoiCatalog, PoiInteraction, PoiKind, ProximityDetector,
};

// Scene system
pub use crate::core::scene::{Scene, SceneKey, SceneTransition};

// UI state
pub use crate::ui::{PoiStats, PoiTracker};

//=========================================================================
// Event Bus
//=========================================================================
//
// Decouples game-logic producers (proximity detection, selection) from
// UI consumers (the POI panel) within the logic thread.
//
// Pattern: on() → emit() (synchronous fan-out) → unsubscribe()/off()
//
//=========================================================================

//=== Module Declarations =================================================

mod bus;
mod event;

//=== Public API ==========================================================

pub use bus::{Callback, EventBus, Subscription};
pub use event::{EventKind, GameEvent, UnknownEventName};

//=========================================================================
// Scene System
//=========================================================================
//
// Manages scene lifecycle and stack-based scene switching.
//
// Architecture:
//   SceneManager
//     ├─ scenes: HashMap<S, Box<dyn Scene<S>>>
//     └─ stack: Vec<S>
//
// Flow:
//   update() → collect_active_scenes() → Scene::update(ctx, delta_ms)
//
// Scenes live on the logic thread and may hold thread-local handles such
// as the EventBus, so `Scene` carries no `Send` bound.
//
//=========================================================================

//=== Internal Dependencies ===============================================

use crate::core::globals::GlobalContext;

//=== Module Declarations =================================================

mod scene_manager;
mod transition_queue;

//=== Public API ==========================================================

pub use scene_manager::{SceneKey, SceneManager, SceneTransition};
pub use transition_queue::TransitionQueue;

//=== Scene Trait =========================================================

/// Defines scene behavior with lifecycle hooks and update logic.
///
/// Scenes are registered in SceneManager and activated via scene stack.
/// Each scene maintains its own state between activations.
///
/// Per-scene resources (an `InputManager`, bus subscriptions) are created
/// in `on_enter` and released in `on_exit`.
///
/// # Minimal Implementation
///
/// ```rust
/// # use conference_companion::prelude::*;
/// # #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
/// # enum VenueScene { Hall }
/// # impl SceneKey for VenueScene {}
/// struct HallScene;
///
/// impl Scene<VenueScene> for HallScene {
///     fn update(&mut self, _context: &mut GlobalContext<VenueScene>, _delta_ms: f64) {
///         // Only this method is required
///     }
/// }
/// ```
pub trait Scene<S: SceneKey> {
    /// Called when scene enters the active stack.
    fn on_enter(&mut self, _context: &mut GlobalContext<S>) {}

    /// Called when scene exits the active stack (including engine shutdown).
    fn on_exit(&mut self, _context: &mut GlobalContext<S>) {}

    /// Called every tick while scene is active on stack.
    ///
    /// `delta_ms` is the time since the previous tick in milliseconds.
    fn update(&mut self, context: &mut GlobalContext<S>, delta_ms: f64);

    /// Whether scenes below this one should receive updates.
    ///
    /// Transparent scenes (HUD overlays, pause menus) let underlying scenes
    /// keep updating. Opaque scenes block updates to lower stack.
    fn is_transparent(&self) -> bool {
        false
    }
}

//=========================================================================
// Global Systems
//=========================================================================
//
// Container for engine-level systems with logic.
//
// Systems operate on GlobalContext data. Currently this is the scene
// manager; scenes own their InputManager and bus subscriptions.
//
//=========================================================================

//=== Internal Dependencies ===============================================

use super::GlobalContext;
use crate::core::scene::{SceneKey, SceneManager};

//=== GlobalSystems =======================================================

/// Container for engine-level logic systems.
///
/// Handed to the `Engine::init` closure on the logic thread so scenes can
/// be registered before the first tick.
pub struct GlobalSystems<S: SceneKey> {
    /// The scene manager for scene lifecycle and stack management.
    pub scene_manager: SceneManager<S>,
}

impl<S: SceneKey> GlobalSystems<S> {
    /// Creates a new systems container with default-initialized systems.
    pub(crate) fn new() -> Self {
        Self {
            scene_manager: SceneManager::new(),
        }
    }

    //--- Lifecycle --------------------------------------------------------

    /// Enters the scenes placed on the stack during initialization.
    pub(crate) fn start(&mut self, context: &mut GlobalContext<S>) {
        self.scene_manager.start(context);
        self.scene_manager.process_transitions(context);
    }

    /// Updates all engine systems for the current tick.
    ///
    /// # Processing Pipeline
    ///
    /// 1. **Scene Update**: Updates all active scenes with current context
    /// 2. **Transition Processing**: Applies queued scene transitions
    pub(crate) fn update(&mut self, context: &mut GlobalContext<S>, delta_ms: f64) {
        self.scene_manager.update(context, delta_ms);
        self.scene_manager.process_transitions(context);
    }

    /// Exits every active scene so per-scene resources are released.
    pub(crate) fn shutdown(&mut self, context: &mut GlobalContext<S>) {
        self.scene_manager.shutdown(context);
    }
}

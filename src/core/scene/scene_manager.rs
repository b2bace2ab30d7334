//=========================================================================
// Scene Manager
//=========================================================================
//
// Manages scene registration, stack operations, and lifecycle.
//
// Scenes are stored in a HashMap by key and referenced via a stack
// of keys. This allows scenes to maintain state between activations.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::collections::HashMap;
use std::fmt::Debug;
use std::hash::Hash;

use log::{debug, info, warn};

//=== Internal Dependencies ===============================================

use super::Scene;
use crate::core::globals::GlobalContext;

//=== Scene Transition ====================================================

/// Encapsulates scene stack operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SceneTransition<K: SceneKey> {
    /// Adds a new scene to the top of the stack.
    Push(K),

    /// Removes a specific scene from the stack by key.
    Remove(K),

    /// Replaces a specific scene with another scene.
    Replace(K, K),

    /// Clears all scenes from the stack.
    Clear,
}

//=== Scene Key Trait =====================================================

/// Marker trait for scene identifiers.
///
/// Typically implemented by game-specific enums.
pub trait SceneKey: Clone + Copy + Eq + Hash + Debug + Send + 'static {}

//=== Scene Manager =======================================================

/// Manages scene lifecycle and stack-based scene switching.
///
/// The topmost scene receives updates; transparent scenes also let the
/// scene below them update.
pub struct SceneManager<S: SceneKey> {
    scenes: HashMap<S, Box<dyn Scene<S>>>,
    stack: Vec<S>,
}

impl<S: SceneKey> SceneManager<S> {
    //--- Construction -----------------------------------------------------

    /// Creates a new scene manager with an empty stack.
    pub fn new() -> Self {
        Self {
            scenes: HashMap::new(),
            stack: Vec::new(),
        }
    }

    //--- Registration -----------------------------------------------------

    /// Registers a scene with the manager.
    ///
    /// Scenes must be registered before being pushed to the stack.
    pub fn register_scene<T>(&mut self, key: S, scene: T)
    where
        T: Scene<S> + 'static,
    {
        if self.scenes.insert(key, Box::new(scene)).is_some() {
            warn!("Scene {:?} was already registered and has been replaced", key);
        }
    }

    /// Registers a scene and places it on the stack before the engine starts.
    ///
    /// `on_enter` runs when [`start`](Self::start) is called.
    pub fn register_default<T>(&mut self, key: S, scene: T)
    where
        T: Scene<S> + 'static,
    {
        self.register_scene(key, scene);

        if self.stack.contains(&key) {
            warn!("Scene {:?} is already in the stack", key);
        } else {
            debug!("Registered scene {:?} as default and added to stack", key);
            self.stack.push(key);
        }
    }

    /// Calls `on_enter` on every scene placed by `register_default`,
    /// bottom to top.
    pub fn start(&mut self, context: &mut GlobalContext<S>) {
        for &key in &self.stack {
            debug!("Starting scene {:?}", key);
            match self.scenes.get_mut(&key) {
                Some(scene) => scene.on_enter(context),
                None => warn!("Initial scene {:?} not registered", key),
            }
        }
    }

    /// Exits every scene on the stack, top to bottom, and empties it.
    pub fn shutdown(&mut self, context: &mut GlobalContext<S>) {
        info!("Shutting down {} active scene(s)", self.stack.len());
        self.clear_internal(context);
    }

    //--- Update Loop ------------------------------------------------------

    /// Updates active scenes.
    ///
    /// Calls update on all transparent scenes and the topmost opaque scene.
    pub fn update(&mut self, context: &mut GlobalContext<S>, delta_ms: f64) {
        if self.stack.is_empty() {
            return;
        }

        let scenes_to_update = self.collect_active_scenes();

        for key in scenes_to_update {
            if let Some(scene) = self.scenes.get_mut(&key) {
                scene.update(context, delta_ms);
            }
        }
    }

    //--- Transition Processing --------------------------------------------

    /// Processes all queued scene transitions.
    ///
    /// Called at the tick boundary after scene updates. Transitions are
    /// processed in FIFO order with on_enter/on_exit for affected scenes.
    pub fn process_transitions(&mut self, context: &mut GlobalContext<S>) {
        for transition in context.scene_transitions.take() {
            match transition {
                SceneTransition::Push(key) => self.push_internal(key, context),
                SceneTransition::Remove(key) => self.remove_internal(key, context),
                SceneTransition::Replace(old_key, new_key) => {
                    self.replace_internal(old_key, new_key, context)
                }
                SceneTransition::Clear => self.clear_internal(context),
            }
        }
    }

    //--- Query API --------------------------------------------------------

    /// Active stack, bottom first.
    pub fn stack(&self) -> &[S] {
        &self.stack
    }

    pub fn is_active(&self, key: S) -> bool {
        self.stack.contains(&key)
    }

    pub fn is_registered(&self, key: S) -> bool {
        self.scenes.contains_key(&key)
    }

    //--- Internal Helpers -------------------------------------------------

    fn push_internal(&mut self, key: S, context: &mut GlobalContext<S>) {
        if self.stack.contains(&key) {
            warn!("Scene {:?} is already in the stack, skipping push", key);
            return;
        }

        let Some(scene) = self.scenes.get_mut(&key) else {
            warn!("Attempted to push unregistered scene {:?}", key);
            return;
        };

        debug!("Pushing scene {:?} onto stack", key);
        self.stack.push(key);
        scene.on_enter(context);
    }

    fn remove_internal(&mut self, key: S, context: &mut GlobalContext<S>) {
        let Some(pos) = self.stack.iter().position(|&k| k == key) else {
            debug!("Scene {:?} not found in stack, skipping removal", key);
            return;
        };

        debug!("Removing scene {:?} from stack at position {}", key, pos);
        self.stack.remove(pos);

        if let Some(scene) = self.scenes.get_mut(&key) {
            scene.on_exit(context);
        }
    }

    fn replace_internal(&mut self, old_key: S, new_key: S, context: &mut GlobalContext<S>) {
        let Some(pos) = self.stack.iter().position(|&k| k == old_key) else {
            warn!("Scene {:?} not found in stack, skipping replacement", old_key);
            return;
        };

        if self.stack.contains(&new_key) {
            warn!("Scene {:?} is already in the stack, skipping replacement", new_key);
            return;
        }

        if !self.scenes.contains_key(&new_key) {
            warn!("Attempted to replace with unregistered scene {:?}", new_key);
            return;
        }

        debug!("Replacing scene {:?} with {:?} at position {}", old_key, new_key, pos);

        if let Some(scene) = self.scenes.get_mut(&old_key) {
            scene.on_exit(context);
        }

        self.stack[pos] = new_key;

        if let Some(scene) = self.scenes.get_mut(&new_key) {
            scene.on_enter(context);
        }
    }

    fn clear_internal(&mut self, context: &mut GlobalContext<S>) {
        debug!("Clearing all scenes from stack");

        for key in self.stack.drain(..).rev() {
            if let Some(scene) = self.scenes.get_mut(&key) {
                scene.on_exit(context);
            }
        }
    }

    fn collect_active_scenes(&self) -> Vec<S> {
        let mut active = Vec::new();

        // Iterate stack top-down, stop at first opaque scene
        for &key in self.stack.iter().rev() {
            active.insert(0, key);

            if let Some(scene) = self.scenes.get(&key) {
                if !scene.is_transparent() {
                    break;
                }
            }
        }

        active
    }
}

impl<S: SceneKey> Default for SceneManager<S> {
    fn default() -> Self {
        Self::new()
    }
}

//=== Tests ===============================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::input::DeviceProfile;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[derive(Clone, Copy, Eq, PartialEq, Hash, Debug)]
    enum TestScene {
        Map,
        Hud,
        Menu,
    }

    impl SceneKey for TestScene {}

    type Journal = Rc<RefCell<Vec<String>>>;

    /// Scene that records its lifecycle calls.
    struct Probe {
        name: &'static str,
        transparent: bool,
        journal: Journal,
    }

    impl Scene<TestScene> for Probe {
        fn on_enter(&mut self, _context: &mut GlobalContext<TestScene>) {
            self.journal.borrow_mut().push(format!("{}:enter", self.name));
        }

        fn on_exit(&mut self, _context: &mut GlobalContext<TestScene>) {
            self.journal.borrow_mut().push(format!("{}:exit", self.name));
        }

        fn update(&mut self, _context: &mut GlobalContext<TestScene>, _delta_ms: f64) {
            self.journal.borrow_mut().push(format!("{}:update", self.name));
        }

        fn is_transparent(&self) -> bool {
            self.transparent
        }
    }

    fn setup() -> (SceneManager<TestScene>, GlobalContext<TestScene>, Journal) {
        let journal: Journal = Rc::new(RefCell::new(Vec::new()));
        let mut manager = SceneManager::new();
        for (key, name, transparent) in [
            (TestScene::Map, "map", false),
            (TestScene::Hud, "hud", true),
            (TestScene::Menu, "menu", false),
        ] {
            manager.register_scene(
                key,
                Probe {
                    name,
                    transparent,
                    journal: Rc::clone(&journal),
                },
            );
        }
        let context = GlobalContext::new(DeviceProfile::desktop(1280.0));
        (manager, context, journal)
    }

    fn drain(journal: &Journal) -> Vec<String> {
        journal.borrow_mut().drain(..).collect()
    }

    //--- Transitions ------------------------------------------------------

    #[test]
    fn push_calls_on_enter() {
        let (mut manager, mut ctx, journal) = setup();
        ctx.scene_transitions.push(SceneTransition::Push(TestScene::Map));
        manager.process_transitions(&mut ctx);

        assert_eq!(manager.stack(), &[TestScene::Map]);
        assert_eq!(drain(&journal), vec!["map:enter"]);
    }

    #[test]
    fn duplicate_push_is_skipped() {
        let (mut manager, mut ctx, journal) = setup();
        ctx.scene_transitions.push(SceneTransition::Push(TestScene::Map));
        ctx.scene_transitions.push(SceneTransition::Push(TestScene::Map));
        manager.process_transitions(&mut ctx);

        assert_eq!(manager.stack().len(), 1);
        assert_eq!(drain(&journal), vec!["map:enter"]);
    }

    #[test]
    fn replace_exits_old_and_enters_new() {
        let (mut manager, mut ctx, journal) = setup();
        ctx.scene_transitions.push(SceneTransition::Push(TestScene::Map));
        ctx.scene_transitions.push(SceneTransition::Replace(TestScene::Map, TestScene::Menu));
        manager.process_transitions(&mut ctx);

        assert_eq!(manager.stack(), &[TestScene::Menu]);
        assert_eq!(drain(&journal), vec!["map:enter", "map:exit", "menu:enter"]);
    }

    #[test]
    fn remove_unknown_is_noop() {
        let (mut manager, mut ctx, journal) = setup();
        ctx.scene_transitions.push(SceneTransition::Remove(TestScene::Hud));
        manager.process_transitions(&mut ctx);
        assert!(drain(&journal).is_empty());
    }

    //--- Update -----------------------------------------------------------

    #[test]
    fn transparent_scene_lets_lower_scene_update() {
        let (mut manager, mut ctx, journal) = setup();
        ctx.scene_transitions.push(SceneTransition::Push(TestScene::Map));
        ctx.scene_transitions.push(SceneTransition::Push(TestScene::Hud));
        manager.process_transitions(&mut ctx);
        drain(&journal);

        manager.update(&mut ctx, 16.0);
        assert_eq!(drain(&journal), vec!["map:update", "hud:update"]);
    }

    #[test]
    fn opaque_scene_blocks_lower_scene() {
        let (mut manager, mut ctx, journal) = setup();
        ctx.scene_transitions.push(SceneTransition::Push(TestScene::Map));
        ctx.scene_transitions.push(SceneTransition::Push(TestScene::Menu));
        manager.process_transitions(&mut ctx);
        drain(&journal);

        manager.update(&mut ctx, 16.0);
        assert_eq!(drain(&journal), vec!["menu:update"]);
    }

    //--- Lifecycle --------------------------------------------------------

    #[test]
    fn start_enters_defaults_and_shutdown_exits_top_down() {
        let journal: Journal = Rc::new(RefCell::new(Vec::new()));
        let mut manager = SceneManager::new();
        let mut ctx = GlobalContext::new(DeviceProfile::desktop(1280.0));
        manager.register_default(
            TestScene::Map,
            Probe { name: "map", transparent: false, journal: Rc::clone(&journal) },
        );
        manager.register_default(
            TestScene::Hud,
            Probe { name: "hud", transparent: true, journal: Rc::clone(&journal) },
        );

        manager.start(&mut ctx);
        manager.shutdown(&mut ctx);

        assert!(manager.stack().is_empty());
        assert_eq!(
            drain(&journal),
            vec!["map:enter", "hud:enter", "hud:exit", "map:exit"]
        );
    }
}

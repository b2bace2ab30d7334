//=========================================================================
// Global Context
//=========================================================================
//
// Shared data container for scenes.
//
// Contains state data that scenes read/write:
// - scene_transitions: Command queue for scene changes
// - event_bus: Handle to the logic thread's EventBus
// - frame_events / device / timing: refreshed at the start of each tick
//
//=========================================================================

//=== Internal Dependencies ===============================================

use crate::core::event_bus::EventBus;
use crate::core::input::{DeviceProfile, InputEvent};
use crate::core::scene::{SceneKey, TransitionQueue};

//=== GlobalContext =======================================================

/// Shared context data accessible to scenes during updates.
///
/// Scenes receive `&mut GlobalContext` during their lifecycle methods.
/// This separates scene-accessible data from internal engine systems.
pub struct GlobalContext<S: SceneKey> {
    /// Transition queue for scene changes.
    ///
    /// Scenes queue transitions here during updates. The scene manager
    /// processes this queue at tick boundaries.
    pub scene_transitions: TransitionQueue<S>,

    /// Event bus shared by every scene on the logic thread.
    ///
    /// Clone it to hand a handle to producers or a `PoiTracker`.
    pub event_bus: EventBus,

    frame_events: Vec<InputEvent>,
    device: DeviceProfile,
    elapsed_ms: f64,
    tick: u64,
}

impl<S: SceneKey> GlobalContext<S> {
    /// Creates a new context with empty state.
    pub(crate) fn new(device: DeviceProfile) -> Self {
        Self {
            scene_transitions: TransitionQueue::new(),
            event_bus: EventBus::new(),
            frame_events: Vec::new(),
            device,
            elapsed_ms: 0.0,
            tick: 0,
        }
    }

    /// Installs this tick's input and timing.
    pub(crate) fn begin_tick(
        &mut self,
        events: Vec<InputEvent>,
        viewport: Option<(f32, f32)>,
        delta_ms: f64,
    ) {
        self.frame_events = events;
        if let Some((width, _height)) = viewport {
            self.device.viewport_width = width;
        }
        self.elapsed_ms += delta_ms;
        self.tick += 1;
    }

    //--- Query API --------------------------------------------------------

    /// Raw input events delivered since the previous tick.
    pub fn frame_events(&self) -> &[InputEvent] {
        &self.frame_events
    }

    /// Device capabilities with the latest known viewport width.
    pub fn device(&self) -> &DeviceProfile {
        &self.device
    }

    /// Milliseconds of logic time accumulated since start.
    pub fn elapsed_ms(&self) -> f64 {
        self.elapsed_ms
    }

    /// Number of ticks begun so far.
    pub fn tick(&self) -> u64 {
        self.tick
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

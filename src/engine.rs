//=========================================================================
// Conference Companion Engine
//
// Main entry point and coordinator for the runtime.
//
// Architecture:
// ```text
//     EngineBuilder  ──build()──>  Engine  ──run()──>  [Runtime]
//         │                          │
//         ├─ with_tps()              ├─ init() queues scene setup
//         ├─ with_channel_capacity() └─ spawns logic thread
//         ├─ with_window_title()        runs platform
//         ├─ with_window_size()         blocks until exit
//         └─ with_device_profile()
// ```
//
//=========================================================================

//=== External Dependencies ===============================================

use crossbeam_channel::{bounded, Receiver, Sender};
use log::{error, info};

//=== Internal Dependencies ===============================================

use crate::core::globals::GlobalSystems;
use crate::core::input::DeviceProfile;
use crate::core::platform_bridge::{PlatformError, PlatformEvent};
use crate::core::scene::SceneKey;
use crate::core::CoreSystemsOrchestrator;
use crate::platform::{Platform, WindowConfig};

//=== EngineBuilder =======================================================

/// Builder for configuring and constructing an [`Engine`].
///
/// # Default Values
///
/// - **TPS**: 60.0 (logic updates per second)
/// - **Channel capacity**: 128 events
/// - **Window**: "Conference Companion", 1280x720 logical pixels
/// - **Device profile**: [`DeviceProfile::detect`]
///
/// # Examples
///
/// ```no_run
/// use conference_companion::EngineBuilder;
/// use conference_companion::core::scene::SceneKey;
///
/// #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
/// enum VenueScene { Hall }
/// impl SceneKey for VenueScene {}
///
/// EngineBuilder::<VenueScene>::new()
///     .with_tps(120.0)
///     .with_window_title("Expo Hall")
///     .build()
///     .init(|systems| {
///         // systems.scene_manager.register_default(VenueScene::Hall, ...);
///     })
///     .run()
///     .unwrap();
/// ```
pub struct EngineBuilder<S: SceneKey> {
    tps: f64,
    channel_capacity: usize,
    window: WindowConfig,
    device: DeviceProfile,
    _phantom: std::marker::PhantomData<S>,
}

impl<S: SceneKey> EngineBuilder<S> {
    /// Creates a new builder with default settings.
    pub fn new() -> Self {
        Self {
            tps: 60.0,
            channel_capacity: 128,
            window: WindowConfig::default(),
            device: DeviceProfile::detect(),
            _phantom: std::marker::PhantomData,
        }
    }

    /// Sets the target ticks per second for the logic thread.
    ///
    /// Default: 60.0
    ///
    /// # Panics
    ///
    /// Panics if `tps <= 0.0`.
    pub fn with_tps(mut self, tps: f64) -> Self {
        assert!(tps > 0.0, "TPS must be positive, got {}", tps);
        self.tps = tps;
        self
    }

    /// Sets the channel capacity for platform → core communication.
    ///
    /// Default: 128
    ///
    /// # Panics
    ///
    /// Panics if `capacity == 0`.
    pub fn with_channel_capacity(mut self, capacity: usize) -> Self {
        assert!(capacity > 0, "Channel capacity must be positive");
        self.channel_capacity = capacity;
        self
    }

    pub fn with_window_title(mut self, title: impl Into<String>) -> Self {
        self.window.title = title.into();
        self
    }

    /// Sets the initial inner window size in logical pixels.
    ///
    /// # Panics
    ///
    /// Panics if either dimension is zero.
    pub fn with_window_size(mut self, width: u32, height: u32) -> Self {
        assert!(width > 0 && height > 0, "Window size must be non-zero, got {}x{}", width, height);
        self.window.width = width;
        self.window.height = height;
        self
    }

    /// Overrides the detected device profile.
    ///
    /// The viewport width is refreshed from the real window once it opens.
    pub fn with_device_profile(mut self, device: DeviceProfile) -> Self {
        self.device = device;
        self
    }

    /// Builds the engine instance.
    pub fn build(self) -> Engine<S> {
        info!(
            "Building engine (TPS: {}, channel: {}, window: {}x{})",
            self.tps, self.channel_capacity, self.window.width, self.window.height
        );

        Engine {
            orchestrator: CoreSystemsOrchestrator::new(self.device),
            tps: self.tps,
            channel_capacity: self.channel_capacity,
            window: self.window,
        }
    }
}

impl<S: SceneKey> Default for EngineBuilder<S> {
    fn default() -> Self {
        Self::new()
    }
}

//=== Engine ==============================================================

/// Runtime that hosts the scenes, the event bus and the window.
///
/// # Architecture
///
/// ```text
/// Engine (Main Thread)
///   ├─► CoreSystemsOrchestrator (Logic Thread @ TPS)
///   │     └─► GlobalSystems, GlobalContext, EventBus
///   │
///   └─► Platform (Event Loop)
///         └─► Window, keyboard + touch polling
///
/// Communication: bounded crossbeam channel (PlatformEvent)
/// ```
pub struct Engine<S: SceneKey> {
    orchestrator: CoreSystemsOrchestrator<S>,
    tps: f64,
    channel_capacity: usize,
    window: WindowConfig,
}

impl<S: SceneKey> Engine<S> {
    //--- Initialization ---------------------------------------------------

    /// Queues scene registration for the logic thread.
    ///
    /// The closure runs on the logic thread right before the first tick, so
    /// scenes may hold thread-local handles (`Rc`, the `EventBus`) even
    /// though the closure itself must be `Send`. Multiple calls run in order.
    pub fn init<F>(mut self, init_fn: F) -> Self
    where
        F: FnOnce(&mut GlobalSystems<S>) + Send + 'static,
    {
        info!("Queued engine initialization");
        self.orchestrator.add_init(Box::new(init_fn));
        self
    }

    //--- Execution --------------------------------------------------------

    /// Starts the engine runtime and blocks until the application exits.
    ///
    /// # Lifecycle
    ///
    /// 1. Creates the bounded channel for platform → core communication
    /// 2. Spawns logic thread running at configured TPS
    /// 3. Runs platform event loop (blocks here)
    /// 4. On window close: core exits scenes, then the thread is joined
    ///
    /// # Errors
    ///
    /// Returns [`PlatformError`] if the event loop fails. The logic thread
    /// is still joined first.
    pub fn run(self) -> Result<(), PlatformError> {
        info!("Starting engine runtime (TPS: {})", self.tps);

        //--- 1. Create communication channel -----------------------------
        let (tx, rx): (Sender<PlatformEvent>, Receiver<PlatformEvent>) =
            bounded(self.channel_capacity);

        //--- 2. Spawn the core logic thread -------------------------------
        let core_handle = self.orchestrator.spawn_core_thread(rx, self.tps);
        info!("Core logic thread spawned");

        //--- 3. Launch the platform subsystem -----------------------------
        let platform = Platform::new(tx, self.window);
        let result = platform.run();

        if let Err(e) = &result {
            error!("Platform error: {}", e);
        }

        info!("Platform event loop exited");

        //--- 4. Cleanup: Wait for logic thread to terminate --------------
        if core_handle.join().is_err() {
            error!("Core thread panicked");
        } else {
            info!("Core thread terminated cleanly");
        }

        info!("Engine shutdown complete");
        result
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

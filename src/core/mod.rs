//=========================================================================
// Core Systems Orchestrator
//
// Central coordinator for all engine subsystems running on the logic
// (non-platform) thread.
//
// Responsibilities:
// - Build GlobalContext and GlobalSystems on the logic thread
// - Receive platform events via the crossbeam channel
// - Maintain deterministic pacing using a fixed tick rate (TPS)
// - Shut scenes down cleanly when the window closes
//
// Notes:
// The EventBus and every scene use `Rc` handles, so they are created
// inside the logic thread and never cross it. Only the init closure and
// the device profile are moved in.
//
//=========================================================================

//=== Module Declarations =================================================

pub mod event_bus;
pub mod globals;
pub mod input;
pub mod poi;
pub mod scene;

pub(crate) mod platform_bridge;

//=== Standard Library Imports ============================================

use std::thread;
use std::time::{Duration, Instant};

//=== External Crates =====================================================

use crossbeam_channel::Receiver;
use log::{debug, info};

//=== Internal Modules ====================================================

use globals::{GlobalContext, GlobalSystems};
use input::DeviceProfile;
use platform_bridge::{EventCollector, PlatformEvent, TickControl};
use scene::SceneKey;

//=== Init Hook ===========================================================

/// Closure that registers scenes before the first tick.
pub(crate) type InitFn<S> = Box<dyn FnOnce(&mut GlobalSystems<S>) + Send>;

//=== CoreSystemsOrchestrator =============================================

/// Owns the configuration the logic thread is started with.
pub(crate) struct CoreSystemsOrchestrator<S: SceneKey> {
    device: DeviceProfile,
    init_fns: Vec<InitFn<S>>,
}

impl<S: SceneKey> CoreSystemsOrchestrator<S> {
    //--- Construction -----------------------------------------------------

    pub(crate) fn new(device: DeviceProfile) -> Self {
        Self {
            device,
            init_fns: Vec::new(),
        }
    }

    /// Queues an init closure; closures run in registration order.
    pub(crate) fn add_init(&mut self, init_fn: InitFn<S>) {
        self.init_fns.push(init_fn);
    }

    //--- spawn_core_thread() ---------------------------------------------
    //
    // Spawns the logic thread responsible for ticking all core systems
    // at a fixed update frequency (TPS - ticks per second).
    //
    // Each tick:
    //  1. Collects platform events
    //  2. Updates scenes with the measured delta
    //  3. Sleeps to maintain fixed pacing
    //  4. Exits cleanly when a shutdown signal is received
    //
    pub(crate) fn spawn_core_thread(
        self,
        receiver: Receiver<PlatformEvent>,
        tps: f64,
    ) -> thread::JoinHandle<()> {
        let frame_duration = Duration::from_secs_f64(1.0 / tps);

        thread::spawn(move || {
            let mut context = GlobalContext::new(self.device);
            let mut systems = GlobalSystems::new();

            for init_fn in self.init_fns {
                init_fn(&mut systems);
            }

            systems.start(&mut context);
            info!("Core thread started at {} TPS", tps);

            let mut collector = EventCollector::new(receiver);
            let mut last_tick = Instant::now();

            loop {
                let frame_start = Instant::now();

                //--- Step 1: Gather platform events ------------------------
                if collector.collect_frame() == TickControl::Exit {
                    info!("Core thread exiting");
                    break;
                }

                //--- Step 2: Update subsystems -----------------------------
                let delta_ms = frame_start.duration_since(last_tick).as_secs_f64() * 1000.0;
                last_tick = frame_start;

                context.begin_tick(collector.take_events(), collector.viewport(), delta_ms);
                systems.update(&mut context, delta_ms);

                //--- Step 3: Maintain deterministic pacing ----------------
                let elapsed = frame_start.elapsed();
                if elapsed < frame_duration {
                    thread::sleep(frame_duration - elapsed);
                } else {
                    debug!("Tick overran budget by {:?}", elapsed - frame_duration);
                }
            }

            systems.shutdown(&mut context);
            context.event_bus.clear_all();
        })
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

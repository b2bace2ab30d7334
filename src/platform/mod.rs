//=========================================================================
// Platform Subsystem
//
// Bridges Winit (OS-level events) with the engine's core thread via a
// bounded crossbeam channel.
//
// Architecture:
// ```text
//  Main Thread:                     Logic Thread:
//  ┌──────────────────────────┐    ┌──────────────────┐
//  │  Winit Event Loop        │    │  EventCollector  │
//  │   ↓                      │    │  ↓               │
//  │  InputProcessor          │    │  GlobalContext   │
//  │   ├─ Converts Winit      │    │  ↓               │
//  │   └─ Tracks scale factor │    │  Scenes          │
//  │   ↓                      │    │   └─ InputManager│
//  │  InputBuffer             │    │   └─ EventBus    │
//  │   ├─ discrete: Vec<>     │    └──────────────────┘
//  │   └─ continuous: Set<>   │             ↑
//  │   ↓                      │             │
//  │  RedrawRequested (flush) │             │
//  │   ↓                      │             │
//  │  Channel ────────────────┼─────────────┘
//  └──────────────────────────┘    PlatformEvent
// ```
//
// Key Design Decisions:
// - **RedrawRequested = frame boundary**: Batches all input atomically
// - **Logical pixels**: Touch positions and viewport width are divided by
//   the scale factor before crossing the channel
// - **Graceful channel disconnect**: If the core thread dies, platform logs
//   a warning but keeps running so the window can still be closed
// - **Main thread requirement**: Winit mandates main thread on macOS/iOS,
//   so this runs on the thread that called `Engine::run()`
//
//=========================================================================

//=== Submodules ==========================================================

mod input_buffer;
mod input_processor;

//=== External Crates =====================================================

use crossbeam_channel::Sender;
use log::*;
use winit::{
    application::ApplicationHandler,
    dpi::{LogicalSize, PhysicalSize},
    event::WindowEvent,
    event_loop::{ActiveEventLoop, EventLoop},
    window::{Window, WindowAttributes},
};

//=== Internal Imports ====================================================

use crate::core::input::InputEvent;
use crate::core::platform_bridge::{PlatformError, PlatformEvent};
use input_buffer::InputBuffer;
use input_processor::InputProcessor;

//=== WindowConfig ========================================================

/// Window settings chosen through the engine builder.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct WindowConfig {
    pub title: String,
    pub width: u32,
    pub height: u32,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "Conference Companion".to_string(),
            width: 1280,
            height: 720,
        }
    }
}

//=== Platform ============================================================

/// Window manager and input event aggregator.
///
/// Runs on the main thread and sends batched events to the core thread.
///
/// # Lifecycle
///
/// 1. **Construction**: `Platform::new(sender, config)` - initializes subsystems
/// 2. **Execution**: `platform.run()` - runs the event loop until close
/// 3. **Event processing**: Winit calls `ApplicationHandler` methods
/// 4. **Shutdown**: User closes window → sends `WindowClosed` → exits
pub(crate) struct Platform {
    /// OS window handle (None until `resumed()` called).
    window: Option<Window>,

    config: WindowConfig,

    /// Buffers discrete/continuous input until frame boundary.
    buffer: InputBuffer,

    /// Channel to send events to core thread.
    event_sender: Sender<PlatformEvent>,

    /// Converts Winit events to engine InputEvents.
    input_processor: InputProcessor,
}

impl Platform {
    //--- Construction -----------------------------------------------------

    /// Creates a new platform instance with the given event sender.
    ///
    /// Does not create window yet - that happens lazily in `resumed()`.
    pub fn new(event_sender: Sender<PlatformEvent>, config: WindowConfig) -> Self {
        info!(target: "platform", "Platform subsystem initialized");
        Self {
            window: None,
            config,
            buffer: InputBuffer::new(),
            event_sender,
            input_processor: InputProcessor::new(),
        }
    }

    //--- Execution --------------------------------------------------------

    /// Runs the event loop on the calling thread until the window closes.
    ///
    /// # Errors
    ///
    /// Returns [`PlatformError`] if the event loop cannot be created or
    /// terminates abnormally.
    pub fn run(mut self) -> Result<(), PlatformError> {
        debug!(target: "platform", "Starting Winit event loop");

        let event_loop = EventLoop::new().map_err(PlatformError::EventLoopCreation)?;

        event_loop
            .run_app(&mut self)
            .map_err(PlatformError::EventLoopExecution)
    }

    //--- Internal Helpers -------------------------------------------------

    /// Flushes buffered input events to the core thread.
    ///
    /// If the channel is disconnected (core thread panicked or exited early),
    /// logs a warning and drops the events.
    fn flush_input_buffer(&mut self) {
        if let Some((discrete, continuous)) = self.buffer.drain() {
            let discrete_count = discrete.len();
            let continuous_count = continuous.len();

            trace!(
                target: "platform::input",
                "Flushing {} discrete + {} continuous events",
                discrete_count,
                continuous_count
            );

            if self.event_sender.send(PlatformEvent::Inputs { discrete, continuous }).is_err() {
                warn!(
                    target: "platform::input",
                    "Channel disconnected, dropping {} events ({} discrete, {} continuous)",
                    discrete_count + continuous_count,
                    discrete_count,
                    continuous_count
                );
            }
        }
    }

    /// Reports the window's logical size to the core thread.
    fn send_viewport(&self, size: PhysicalSize<u32>) {
        let logical = size.to_logical::<f32>(self.input_processor.scale_factor());
        debug!(target: "platform", "Viewport {}x{} (logical)", logical.width, logical.height);

        let event = PlatformEvent::Viewport {
            width: logical.width,
            height: logical.height,
        };
        if self.event_sender.send(event).is_err() {
            warn!(target: "platform", "Channel disconnected, dropping viewport update");
        }
    }

    //--- Test Accessors ---------------------------------------------------

    #[cfg(test)]
    pub(crate) fn window(&self) -> Option<&Window> {
        self.window.as_ref()
    }
}

//=== Winit Integration ===================================================

impl ApplicationHandler for Platform {
    /// Called when app becomes active (startup or mobile resume).
    ///
    /// Creates the window if it doesn't exist yet. On mobile, this may be
    /// called multiple times (suspend/resume cycle).
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            debug!(target: "platform", "Window already exists (mobile resume?)");
            return;
        }

        let attrs = WindowAttributes::default()
            .with_title(self.config.title.clone())
            .with_inner_size(LogicalSize::new(self.config.width, self.config.height));

        match event_loop.create_window(attrs) {
            Ok(window) => {
                info!(
                    target: "platform",
                    "Window created: {}x{} @ {}x DPI",
                    window.inner_size().width,
                    window.inner_size().height,
                    window.scale_factor()
                );
                self.input_processor.update_scale_factor(window.scale_factor());
                self.send_viewport(window.inner_size());
                window.request_redraw();
                self.window = Some(window);
            }
            Err(e) => {
                error!(target: "platform", "Window creation failed: {}", e);
                let _ = self.event_sender.send(PlatformEvent::WindowClosed);
                event_loop.exit();
            }
        }
    }

    /// Handles per-window events.
    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: winit::window::WindowId,
        event: WindowEvent,
    ) {
        match &event {
            WindowEvent::CloseRequested => {
                info!(target: "platform", "Window close requested");
                self.flush_input_buffer();
                let _ = self.event_sender.send(PlatformEvent::WindowClosed);
                event_loop.exit();
            }

            WindowEvent::ScaleFactorChanged { scale_factor, .. } => {
                trace!(target: "platform", "Scale factor changed: {}", scale_factor);
                self.input_processor.update_scale_factor(*scale_factor);
            }

            WindowEvent::Resized(size) => {
                self.send_viewport(*size);
            }

            WindowEvent::Focused(false) => {
                // No key-up or touch-end arrives for inputs held now
                debug!(target: "platform::input", "Focus lost, releasing held inputs");
                self.buffer.push(InputEvent::FocusLost);
            }

            WindowEvent::KeyboardInput { event: key_event, .. } => {
                if let Some(event) = self.input_processor.process_key_event(key_event) {
                    self.buffer.push(event);
                } else {
                    trace!(target: "platform::input", "Unmapped key ignored");
                }
            }

            WindowEvent::Touch(touch) => {
                let event = self.input_processor.process_touch(touch);
                self.buffer.push(event);
            }

            WindowEvent::RedrawRequested => {
                // Frame boundary: flush all buffered input
                self.flush_input_buffer();

                if let Some(window) = &self.window {
                    window.request_redraw();
                }
            }

            _ => {}
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

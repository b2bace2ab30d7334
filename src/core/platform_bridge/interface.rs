//=========================================================================
// Platform Bridge Interface
//=========================================================================
//
// Platform-to-core interface types (events and errors).
//
// Defines the contract for communication between platform and core threads.
//
//=========================================================================

//=== External Dependencies ===============================================

use thiserror::Error;

//=== Internal Dependencies ===============================================

use crate::core::input::InputEvent;

//=== PlatformEvent =======================================================

/// Events sent from platform to core over the crossbeam channel.
#[derive(Debug, Clone)]
pub(crate) enum PlatformEvent {
    /// Batched input events for a frame.
    ///
    /// `discrete` keeps arrival order (keys, touch start/end); `continuous`
    /// holds the latest `TouchMoved` per finger.
    Inputs {
        discrete: Vec<InputEvent>,
        continuous: Vec<InputEvent>,
    },

    /// Window resized; logical pixels.
    Viewport { width: f32, height: f32 },

    /// Window close requested.
    WindowClosed,
}

//=== PlatformError =======================================================

/// Platform initialization and runtime errors.
///
/// These are fatal: without an event loop the engine cannot run.
#[derive(Debug, Error)]
pub enum PlatformError {
    /// Event loop creation failed (OS-level issue).
    #[error("event loop creation failed: {0}")]
    EventLoopCreation(#[source] winit::error::EventLoopError),

    /// Event loop execution error.
    #[error("event loop error: {0}")]
    EventLoopExecution(#[source] winit::error::EventLoopError),
}

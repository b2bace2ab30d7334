//=========================================================================
// Event Collector
//=========================================================================
//
// Platform event collector with bounded polling and shutdown detection.
//
// Architecture:
//   Receiver<PlatformEvent> → collect_frame() → frame events → TickControl
//                                             → latest viewport
//
// Bounded polling prevents starvation. Each batch is flattened as
// discrete events first, then the coalesced continuous ones, so a touch
// start is always seen before that finger's movement.
//
//=========================================================================

//=== External Dependencies ===============================================

use crossbeam_channel::{Receiver, TryRecvError};
use log::{debug, warn};

//=== Internal Dependencies ===============================================

use super::PlatformEvent;
use crate::core::input::InputEvent;

//=== TickControl =========================================================

/// Update loop control signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum TickControl {
    Continue,
    Exit,
}

//=== EventCollector ======================================================

/// Collects platform events with bounded polling.
pub(crate) struct EventCollector {
    receiver: Receiver<PlatformEvent>,
    frame_events: Vec<InputEvent>,
    viewport: Option<(f32, f32)>,
}

impl EventCollector {
    pub(crate) fn new(receiver: Receiver<PlatformEvent>) -> Self {
        Self {
            receiver,
            frame_events: Vec::with_capacity(32),
            viewport: None,
        }
    }

    /// Collects pending platform events (bounded to prevent starvation).
    pub(crate) fn collect_frame(&mut self) -> TickControl {
        const MAX_EVENTS_PER_FRAME: usize = 100;

        self.frame_events.clear();
        let mut drained = 0;

        while drained < MAX_EVENTS_PER_FRAME {
            match self.receiver.try_recv() {
                Ok(event) => {
                    if self.handle_event(event) == TickControl::Exit {
                        return TickControl::Exit;
                    }
                    drained += 1;
                }
                Err(TryRecvError::Disconnected) => return TickControl::Exit,
                Err(TryRecvError::Empty) => break,
            }
        }

        if drained >= MAX_EVENTS_PER_FRAME {
            warn!("Event queue backlog: drained {} events this frame", drained);
        }

        TickControl::Continue
    }

    /// Returns collected input events for this frame.
    #[cfg(test)]
    pub(crate) fn events(&self) -> &[InputEvent] {
        &self.frame_events
    }

    /// Takes ownership of the collected events, leaving an empty vec.
    pub(crate) fn take_events(&mut self) -> Vec<InputEvent> {
        std::mem::take(&mut self.frame_events)
    }

    /// Most recent viewport size reported by the platform, if any.
    pub(crate) fn viewport(&self) -> Option<(f32, f32)> {
        self.viewport
    }

    fn handle_event(&mut self, event: PlatformEvent) -> TickControl {
        match event {
            PlatformEvent::Inputs { discrete, continuous } => {
                self.frame_events.extend(discrete);
                self.frame_events.extend(continuous);
                TickControl::Continue
            }
            PlatformEvent::Viewport { width, height } => {
                debug!("Viewport changed to {}x{}", width, height);
                self.viewport = Some((width, height));
                TickControl::Continue
            }
            PlatformEvent::WindowClosed => TickControl::Exit,
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

//=========================================================================
// Input Processor
//=========================================================================
//
// Converts platform-specific Winit events into engine InputEvents.
//
// Architecture:
//   Winit Events → InputProcessor → InputEvent (engine type) → InputBuffer
//
// Stateful scale tracking: caches the window scale factor so touch
// locations arrive in logical pixels, matching the joystick radius and
// viewport width. Unmapped keys are filtered (returns None).
//
//=========================================================================

//=== External Dependencies ===============================================

use winit::{
    dpi::PhysicalPosition,
    event::{ElementState, KeyEvent, Touch, TouchPhase},
    keyboard::{KeyCode as WinitKeyCode, PhysicalKey},
};

//=== Internal Dependencies ===============================================

use crate::core::input::{InputEvent, KeyCode};

//=== InputProcessor ======================================================

/// Converts Winit events to engine InputEvents.
pub(crate) struct InputProcessor {
    scale_factor: f64,
}

impl InputProcessor {
    //--- Construction -----------------------------------------------------

    pub(crate) fn new() -> Self {
        Self { scale_factor: 1.0 }
    }

    //--- Scale State Management -------------------------------------------

    /// Updates cached scale factor (applied to subsequent touch events).
    pub(crate) fn update_scale_factor(&mut self, scale_factor: f64) {
        if scale_factor > 0.0 {
            self.scale_factor = scale_factor;
        }
    }

    pub(crate) fn scale_factor(&self) -> f64 {
        self.scale_factor
    }

    //--- Event Processing -------------------------------------------------

    /// Converts Winit KeyEvent to InputEvent (filters unmapped keys).
    pub(crate) fn process_key_event(&self, key_event: &KeyEvent) -> Option<InputEvent> {
        self.process_key(key_event.physical_key, key_event.state)
    }

    /// Converts a Winit touch to a touch InputEvent in logical pixels.
    pub(crate) fn process_touch(&self, touch: &Touch) -> InputEvent {
        self.convert_touch(touch.id, touch.phase, touch.location)
    }

    //--- Internal Helpers -------------------------------------------------

    fn process_key(&self, physical_key: PhysicalKey, state: ElementState) -> Option<InputEvent> {
        let key_code = match physical_key {
            PhysicalKey::Code(code) => KeyCode::from(code),
            _ => return None,
        };

        if matches!(key_code, KeyCode::Unidentified) {
            return None;
        }

        Some(match state {
            ElementState::Pressed => InputEvent::KeyDown(key_code),
            ElementState::Released => InputEvent::KeyUp(key_code),
        })
    }

    fn convert_touch(&self, id: u64, phase: TouchPhase, location: PhysicalPosition<f64>) -> InputEvent {
        let logical = location.to_logical::<f32>(self.scale_factor);

        match phase {
            TouchPhase::Started => InputEvent::TouchStarted { id, x: logical.x, y: logical.y },
            TouchPhase::Moved => InputEvent::TouchMoved { id, x: logical.x, y: logical.y },
            TouchPhase::Ended | TouchPhase::Cancelled => InputEvent::TouchEnded { id },
        }
    }
}

//=========================================================================
// Winit Conversions
//=========================================================================

/// Converts Winit physical key codes to engine key codes.
///
/// Maps A-Z, arrows, and common special keys. Everything else returns
/// `KeyCode::Unidentified`.
impl From<WinitKeyCode> for KeyCode {
    fn from(code: WinitKeyCode) -> Self {
        use WinitKeyCode::*;
        match code {
            //--- Letters ------------------------------------------------------

            KeyA => KeyCode::KeyA,
            KeyB => KeyCode::KeyB,
            KeyC => KeyCode::KeyC,
            KeyD => KeyCode::KeyD,
            KeyE => KeyCode::KeyE,
            KeyF => KeyCode::KeyF,
            KeyG => KeyCode::KeyG,
            KeyH => KeyCode::KeyH,
            KeyI => KeyCode::KeyI,
            KeyJ => KeyCode::KeyJ,
            KeyK => KeyCode::KeyK,
            KeyL => KeyCode::KeyL,
            KeyM => KeyCode::KeyM,
            KeyN => KeyCode::KeyN,
            KeyO => KeyCode::KeyO,
            KeyP => KeyCode::KeyP,
            KeyQ => KeyCode::KeyQ,
            KeyR => KeyCode::KeyR,
            KeyS => KeyCode::KeyS,
            KeyT => KeyCode::KeyT,
            KeyU => KeyCode::KeyU,
            KeyV => KeyCode::KeyV,
            KeyW => KeyCode::KeyW,
            KeyX => KeyCode::KeyX,
            KeyY => KeyCode::KeyY,
            KeyZ => KeyCode::KeyZ,

            //--- Arrows -------------------------------------------------------

            ArrowUp => KeyCode::ArrowUp,
            ArrowDown => KeyCode::ArrowDown,
            ArrowLeft => KeyCode::ArrowLeft,
            ArrowRight => KeyCode::ArrowRight,

            //--- Special ------------------------------------------------------

            Space => KeyCode::Space,
            Enter => KeyCode::Enter,
            Escape => KeyCode::Escape,
            Tab => KeyCode::Tab,

            _ => KeyCode::Unidentified,
        }
    }
}

//=========================================================================
// Tests
//=========================================================================

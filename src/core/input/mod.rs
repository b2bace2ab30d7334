//=========================================================================
// Input System
//=========================================================================
//
// Unifies keyboard and touch input into one movement vector per frame.
//
// Architecture:
//   Platform → InputEvent ─┬─> KeyboardState ──┐
//                          └─> TouchControl ───┴─> InputManager → MovementVector
//
// Frame lifecycle: process_events() → movement_vector() → (next frame)
//
//=========================================================================

//=== Module Declarations =================================================

mod device;
pub mod event;
mod input_manager;
mod joystick;
mod keyboard;
mod movement;

//=== Public API ==========================================================

pub use device::{DeviceProfile, MOBILE_VIEWPORT_THRESHOLD};
pub use event::{InputEvent, KeyCode};
pub use input_manager::InputManager;
pub use joystick::{JoystickVector, TouchControl, VirtualJoystick, DEFAULT_JOYSTICK_RADIUS};
pub use keyboard::KeyboardState;
pub use movement::MovementVector;

//=========================================================================
// Input Manager
//
// Merges the keyboard and a touch-control collaborator into a single
// movement vector per frame.
//
// Responsibilities:
// - Fold each frame's raw `InputEvent`s into keyboard state
// - Forward the same events to the owned touch control
// - Produce one authoritative `MovementVector` per query
// - Cache the mobile classification computed at construction
//
// Precedence:
// ```text
//   keyboard (arrows / WASD, last check per axis wins)
//        ↓ normalize diagonal to unit length
//   touch.magnitude > 0 ?  ── yes ──> touch vector replaces keyboard
//        ↓ no
//   keyboard vector
// ```
//
// One `InputManager` lives per active scene: created in `on_enter`,
// polled in `update`, destroyed in `on_exit`.
//
//=========================================================================

use std::fmt;

use log::{debug, info};

use super::device::DeviceProfile;
use super::event::{InputEvent, KeyCode};
use super::joystick::{JoystickVector, TouchControl};
use super::keyboard::KeyboardState;
use super::movement::MovementVector;

//=== InputManager =========================================================

pub struct InputManager {
    /// `None` when the host has no keyboard; reads as all-zero input.
    keyboard: Option<KeyboardState>,
    /// `None` once destroyed.
    touch: Option<Box<dyn TouchControl>>,
    is_mobile: bool,
}

impl InputManager {
    //--- Constructor ------------------------------------------------------

    /// Creates a manager for the given device, taking ownership of `touch`.
    ///
    /// The mobile classification is evaluated here, once, from `device`.
    pub fn new(device: &DeviceProfile, touch: Box<dyn TouchControl>) -> Self {
        let is_mobile = device.is_mobile();
        let keyboard = device.keyboard_available.then(KeyboardState::new);

        info!(
            "Input manager created (mobile: {}, keyboard: {})",
            is_mobile,
            keyboard.is_some()
        );

        Self {
            keyboard,
            touch: Some(touch),
            is_mobile,
        }
    }

    //--- process_events() -------------------------------------------------
    //
    // Consumes all `InputEvent`s for the current frame. Keyboard deltas from
    // the previous frame are cleared first.
    //
    pub fn process_events(&mut self, events: &[InputEvent]) {
        if let Some(keyboard) = self.keyboard.as_mut() {
            keyboard.begin_frame();
            keyboard.process_events(events);
        }

        if let Some(touch) = self.touch.as_mut() {
            for event in events {
                touch.handle_event(event);
            }
        }
    }

    //--- movement_vector() ------------------------------------------------

    /// Returns this frame's unified movement vector.
    pub fn movement_vector(&self) -> MovementVector {
        let (mut x, mut y) = self.keyboard_axes();

        if x != 0.0 && y != 0.0 {
            let length = (x * x + y * y).sqrt();
            x /= length;
            y /= length;
        }

        let touch = self.joystick_vector();
        if touch.magnitude > 0.0 {
            x = touch.x;
            y = touch.y;
        }

        MovementVector::new(x, y)
    }

    //--- Query Methods ----------------------------------------------------

    /// Mobile classification fixed at construction.
    pub fn is_mobile_device(&self) -> bool {
        self.is_mobile
    }

    pub fn has_keyboard(&self) -> bool {
        self.keyboard.is_some()
    }

    pub fn is_destroyed(&self) -> bool {
        self.touch.is_none()
    }

    /// Raw keyboard state, if the host has a keyboard.
    pub fn keyboard(&self) -> Option<&KeyboardState> {
        self.keyboard.as_ref()
    }

    /// Current touch deflection, idle once destroyed.
    pub fn joystick_vector(&self) -> JoystickVector {
        self.touch
            .as_ref()
            .map(|touch| touch.vector())
            .unwrap_or(JoystickVector::IDLE)
    }

    //--- destroy() --------------------------------------------------------

    /// Releases the touch control. Later calls do nothing.
    pub fn destroy(&mut self) {
        if let Some(mut touch) = self.touch.take() {
            touch.destroy();
            debug!("Input manager destroyed");
        }
        if let Some(keyboard) = self.keyboard.as_mut() {
            keyboard.release_all();
        }
    }

    //--- Internal Helpers -------------------------------------------------

    // Each check overwrites its axis; opposing keys do not cancel out.
    fn keyboard_axes(&self) -> (f32, f32) {
        let Some(kb) = self.keyboard.as_ref() else {
            return (0.0, 0.0);
        };

        let mut x = 0.0;
        let mut y = 0.0;

        if kb.is_either_down(KeyCode::ArrowLeft, KeyCode::KeyA) {
            x = -1.0;
        }
        if kb.is_either_down(KeyCode::ArrowRight, KeyCode::KeyD) {
            x = 1.0;
        }
        if kb.is_either_down(KeyCode::ArrowUp, KeyCode::KeyW) {
            y = -1.0;
        }
        if kb.is_either_down(KeyCode::ArrowDown, KeyCode::KeyS) {
            y = 1.0;
        }

        (x, y)
    }
}

impl Drop for InputManager {
    fn drop(&mut self) {
        self.destroy();
    }
}

//=== Debug Trait ==========================================================

impl fmt::Debug for InputManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let pressed: Vec<_> = self
            .keyboard
            .iter()
            .flat_map(|kb| kb.keys_down())
            .map(|k| format!("{:?}", k))
            .collect();

        f.debug_struct("InputManager")
            .field("mobile", &self.is_mobile)
            .field("destroyed", &self.is_destroyed())
            .field("joystick", &self.joystick_vector())
            .field("pressed", &pressed)
            .finish()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::input::joystick::VirtualJoystick;
    use std::cell::Cell;
    use std::rc::Rc;

    const EPS: f32 = 1e-3;

    //--- Test Doubles -----------------------------------------------------

    /// Touch control reporting a fixed vector and counting destroy calls.
    struct FixedTouch {
        vector: JoystickVector,
        destroyed: Rc<Cell<u32>>,
    }

    impl TouchControl for FixedTouch {
        fn vector(&self) -> JoystickVector {
            self.vector
        }

        fn destroy(&mut self) {
            self.destroyed.set(self.destroyed.get() + 1);
        }
    }

    fn fixed(vector: JoystickVector) -> (Box<dyn TouchControl>, Rc<Cell<u32>>) {
        let counter = Rc::new(Cell::new(0));
        let touch = FixedTouch {
            vector,
            destroyed: Rc::clone(&counter),
        };
        (Box::new(touch), counter)
    }

    fn desktop_manager() -> InputManager {
        InputManager::new(&DeviceProfile::desktop(1280.0), Box::new(VirtualJoystick::default()))
    }

    fn press(im: &mut InputManager, keys: &[KeyCode]) {
        let events: Vec<_> = keys.iter().map(|k| InputEvent::KeyDown(*k)).collect();
        im.process_events(&events);
    }

    //--- Keyboard Path ----------------------------------------------------

    #[test]
    fn no_input_is_zero() {
        let im = desktop_manager();
        assert_eq!(im.movement_vector(), MovementVector::ZERO);
    }

    #[test]
    fn up_right_is_normalized_diagonal() {
        let mut im = desktop_manager();
        press(&mut im, &[KeyCode::ArrowUp, KeyCode::ArrowRight]);

        let v = im.movement_vector();
        assert!((v.x - 0.7071).abs() < EPS);
        assert!((v.y + 0.7071).abs() < EPS);
        assert!(v.is_moving);
    }

    #[test]
    fn wasd_matches_arrows() {
        let mut im = desktop_manager();
        press(&mut im, &[KeyCode::KeyS]);
        assert_eq!(im.movement_vector(), MovementVector::new(0.0, 1.0));
    }

    #[test]
    fn single_axis_is_not_normalized() {
        let mut im = desktop_manager();
        press(&mut im, &[KeyCode::KeyA]);
        assert_eq!(im.movement_vector(), MovementVector::new(-1.0, 0.0));
    }

    #[test]
    fn opposing_keys_last_check_wins() {
        let mut im = desktop_manager();
        press(&mut im, &[KeyCode::ArrowLeft, KeyCode::ArrowRight]);
        assert_eq!(im.movement_vector(), MovementVector::new(1.0, 0.0));

        let mut im = desktop_manager();
        press(&mut im, &[KeyCode::KeyW, KeyCode::KeyS]);
        assert_eq!(im.movement_vector(), MovementVector::new(0.0, 1.0));
    }

    #[test]
    fn release_stops_movement() {
        let mut im = desktop_manager();
        press(&mut im, &[KeyCode::KeyD]);
        im.process_events(&[InputEvent::KeyUp(KeyCode::KeyD)]);
        assert!(!im.movement_vector().is_moving);
    }

    #[test]
    fn missing_keyboard_reads_as_zero() {
        let mut device = DeviceProfile::desktop(1280.0);
        device.keyboard_available = false;
        let mut im = InputManager::new(&device, Box::new(VirtualJoystick::default()));

        press(&mut im, &[KeyCode::ArrowUp]);
        assert!(!im.has_keyboard());
        assert_eq!(im.movement_vector(), MovementVector::ZERO);
    }

    //--- Touch Precedence -------------------------------------------------

    #[test]
    fn active_touch_overrides_keyboard() {
        let (touch, _) = fixed(JoystickVector { x: 0.5, y: 0.5, magnitude: 0.707 });
        let mut im = InputManager::new(&DeviceProfile::desktop(1280.0), touch);
        press(&mut im, &[KeyCode::ArrowLeft]);

        let v = im.movement_vector();
        assert_eq!((v.x, v.y), (0.5, 0.5));
        assert!(v.is_moving);
    }

    #[test]
    fn weak_touch_still_overrides_full_keyboard() {
        let (touch, _) = fixed(JoystickVector { x: 0.01, y: 0.0, magnitude: 0.01 });
        let mut im = InputManager::new(&DeviceProfile::desktop(1280.0), touch);
        press(&mut im, &[KeyCode::KeyW, KeyCode::KeyD]);

        assert_eq!(im.movement_vector(), MovementVector::new(0.01, 0.0));
    }

    #[test]
    fn idle_touch_leaves_keyboard_in_charge() {
        let (touch, _) = fixed(JoystickVector::IDLE);
        let mut im = InputManager::new(&DeviceProfile::desktop(1280.0), touch);
        press(&mut im, &[KeyCode::ArrowDown]);

        assert_eq!(im.movement_vector(), MovementVector::new(0.0, 1.0));
    }

    #[test]
    fn touch_events_reach_virtual_joystick() {
        let mut im = desktop_manager();
        im.process_events(&[
            InputEvent::TouchStarted { id: 1, x: 100.0, y: 100.0 },
            InputEvent::TouchMoved { id: 1, x: 100.0, y: 40.0 },
        ]);

        let v = im.movement_vector();
        assert!(v.x.abs() < EPS);
        assert!((v.y + 1.0).abs() < EPS);
    }

    #[test]
    fn focus_lost_stops_keyboard_and_touch_movement() {
        let mut im = desktop_manager();
        im.process_events(&[
            InputEvent::KeyDown(KeyCode::KeyW),
            InputEvent::TouchStarted { id: 1, x: 100.0, y: 100.0 },
            InputEvent::TouchMoved { id: 1, x: 160.0, y: 100.0 },
        ]);
        assert!(im.movement_vector().is_moving);

        im.process_events(&[InputEvent::FocusLost]);
        assert_eq!(im.movement_vector(), MovementVector::ZERO);
    }

    //--- Mobile Classification --------------------------------------------

    #[test]
    fn mobile_flag_fixed_at_construction() {
        let mut device = DeviceProfile::desktop(500.0);
        device.touch_capable = true;
        let im = InputManager::new(&device, Box::new(VirtualJoystick::default()));
        assert!(im.is_mobile_device());

        // Viewport grows after construction
        device.viewport_width = 1920.0;
        assert!(!device.is_mobile());
        assert!(im.is_mobile_device());
    }

    //--- Destroy ----------------------------------------------------------

    #[test]
    fn destroy_releases_touch_once() {
        let (touch, destroyed) = fixed(JoystickVector { x: 1.0, y: 0.0, magnitude: 1.0 });
        let mut im = InputManager::new(&DeviceProfile::desktop(1280.0), touch);

        im.destroy();
        im.destroy();
        assert_eq!(destroyed.get(), 1);
        assert!(im.is_destroyed());
        assert_eq!(im.joystick_vector(), JoystickVector::IDLE);

        drop(im);
        assert_eq!(destroyed.get(), 1);
    }

    #[test]
    fn drop_destroys_touch() {
        let (touch, destroyed) = fixed(JoystickVector::IDLE);
        let im = InputManager::new(&DeviceProfile::desktop(1280.0), touch);
        drop(im);
        assert_eq!(destroyed.get(), 1);
    }
}

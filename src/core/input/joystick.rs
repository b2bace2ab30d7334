//=========================================================================
// Virtual Joystick
//=========================================================================
//
// On-screen directional control driven by touch events.
//
// Architecture:
//   TouchStarted → anchor base at finger
//   TouchMoved   → offset from base / radius → JoystickVector
//   TouchEnded   → back to idle (magnitude 0)
//
// Only one finger steers at a time; other touches are ignored until the
// steering finger lifts.
//
//=========================================================================

//=== External Dependencies ===============================================

use log::debug;

//=== Internal Dependencies ===============================================

use super::event::InputEvent;

//=== Constants ===========================================================

/// Drag distance (logical pixels) that maps to full deflection.
pub const DEFAULT_JOYSTICK_RADIUS: f32 = 60.0;

//=== JoystickVector ======================================================

/// Direction plus deflection of a touch control.
///
/// `x` and `y` are the drag offset divided by the radius, so their combined
/// length equals `magnitude`. `magnitude` is 0 while idle and in `(0, 1]`
/// during a drag.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct JoystickVector {
    pub x: f32,
    pub y: f32,
    pub magnitude: f32,
}

impl JoystickVector {
    /// Idle joystick.
    pub const IDLE: Self = Self {
        x: 0.0,
        y: 0.0,
        magnitude: 0.0,
    };

    /// Returns `true` while a drag deflects the stick.
    pub fn is_active(&self) -> bool {
        self.magnitude > 0.0
    }
}

//=== TouchControl Trait ==================================================

/// Touch-control collaborator owned by an [`InputManager`](super::InputManager).
///
/// Implementations turn touch events into a [`JoystickVector`]. The input
/// manager forwards every frame event and calls `destroy` exactly once when
/// torn down.
pub trait TouchControl {
    /// Current stick deflection.
    fn vector(&self) -> JoystickVector;

    /// Consumes one raw input event. Non-touch events should be ignored.
    fn handle_event(&mut self, _event: &InputEvent) {}

    /// Releases resources held by the control.
    fn destroy(&mut self);
}

//=== VirtualJoystick =====================================================

/// Floating virtual joystick: the base appears wherever the finger lands.
#[derive(Debug)]
pub struct VirtualJoystick {
    radius: f32,
    /// Steering finger and where it first touched down.
    anchor: Option<(u64, f32, f32)>,
    vector: JoystickVector,
    destroyed: bool,
}

impl VirtualJoystick {
    /// Creates a joystick with the given full-deflection radius.
    ///
    /// # Panics
    ///
    /// Panics if `radius <= 0.0`.
    pub fn new(radius: f32) -> Self {
        assert!(radius > 0.0, "Joystick radius must be positive, got {}", radius);
        Self {
            radius,
            anchor: None,
            vector: JoystickVector::IDLE,
            destroyed: false,
        }
    }

    pub fn radius(&self) -> f32 {
        self.radius
    }

    pub fn is_destroyed(&self) -> bool {
        self.destroyed
    }

    //--- Internal Helpers -------------------------------------------------

    fn deflect(&mut self, dx: f32, dy: f32) {
        let distance = (dx * dx + dy * dy).sqrt();
        if distance == 0.0 || !distance.is_finite() {
            self.vector = JoystickVector::IDLE;
            return;
        }

        let clamped = distance.min(self.radius);
        let scale = clamped / (distance * self.radius);
        self.vector = JoystickVector {
            x: dx * scale,
            y: dy * scale,
            magnitude: clamped / self.radius,
        };
    }

    fn reset(&mut self) {
        self.anchor = None;
        self.vector = JoystickVector::IDLE;
    }
}

impl Default for VirtualJoystick {
    fn default() -> Self {
        Self::new(DEFAULT_JOYSTICK_RADIUS)
    }
}

impl TouchControl for VirtualJoystick {
    fn vector(&self) -> JoystickVector {
        self.vector
    }

    fn handle_event(&mut self, event: &InputEvent) {
        if self.destroyed {
            return;
        }

        match *event {
            InputEvent::TouchStarted { id, x, y } => {
                if self.anchor.is_none() {
                    self.anchor = Some((id, x, y));
                    self.vector = JoystickVector::IDLE;
                }
            }
            InputEvent::TouchMoved { id, x, y } => {
                if let Some((active, bx, by)) = self.anchor {
                    if active == id {
                        self.deflect(x - bx, y - by);
                    }
                }
            }
            InputEvent::TouchEnded { id } => {
                if matches!(self.anchor, Some((active, _, _)) if active == id) {
                    self.reset();
                }
            }
            InputEvent::FocusLost => self.reset(),
            _ => {}
        }
    }

    fn destroy(&mut self) {
        if self.destroyed {
            return;
        }
        debug!("Virtual joystick destroyed");
        self.reset();
        self.destroyed = true;
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f32 = 1e-5;

    fn start(id: u64, x: f32, y: f32) -> InputEvent {
        InputEvent::TouchStarted { id, x, y }
    }

    fn moved(id: u64, x: f32, y: f32) -> InputEvent {
        InputEvent::TouchMoved { id, x, y }
    }

    #[test]
    fn idle_until_dragged() {
        let mut stick = VirtualJoystick::new(100.0);
        assert!(!stick.vector().is_active());

        stick.handle_event(&start(1, 200.0, 200.0));
        assert!(!stick.vector().is_active());
    }

    #[test]
    fn partial_drag_scales_by_radius() {
        let mut stick = VirtualJoystick::new(100.0);
        stick.handle_event(&start(1, 200.0, 200.0));
        stick.handle_event(&moved(1, 250.0, 200.0));

        let v = stick.vector();
        assert!((v.x - 0.5).abs() < EPS);
        assert!(v.y.abs() < EPS);
        assert!((v.magnitude - 0.5).abs() < EPS);
    }

    #[test]
    fn drag_beyond_radius_clamps_to_unit() {
        let mut stick = VirtualJoystick::new(50.0);
        stick.handle_event(&start(1, 0.0, 0.0));
        stick.handle_event(&moved(1, 0.0, -400.0));

        let v = stick.vector();
        assert!(v.x.abs() < EPS);
        assert!((v.y + 1.0).abs() < EPS);
        assert!((v.magnitude - 1.0).abs() < EPS);
    }

    #[test]
    fn diagonal_components_match_magnitude() {
        let mut stick = VirtualJoystick::new(100.0);
        stick.handle_event(&start(7, 0.0, 0.0));
        stick.handle_event(&moved(7, 50.0, 50.0));

        let v = stick.vector();
        assert!((v.x - 0.5).abs() < EPS);
        assert!((v.y - 0.5).abs() < EPS);
        assert!(((v.x * v.x + v.y * v.y).sqrt() - v.magnitude).abs() < EPS);
    }

    #[test]
    fn second_finger_does_not_steer() {
        let mut stick = VirtualJoystick::new(100.0);
        stick.handle_event(&start(1, 0.0, 0.0));
        stick.handle_event(&start(2, 500.0, 500.0));
        stick.handle_event(&moved(2, 600.0, 500.0));
        assert!(!stick.vector().is_active());
    }

    #[test]
    fn touch_end_returns_to_idle() {
        let mut stick = VirtualJoystick::new(100.0);
        stick.handle_event(&start(1, 0.0, 0.0));
        stick.handle_event(&moved(1, 30.0, 0.0));
        stick.handle_event(&InputEvent::TouchEnded { id: 1 });
        assert_eq!(stick.vector(), JoystickVector::IDLE);

        // Stray move after lift is ignored
        stick.handle_event(&moved(1, 90.0, 0.0));
        assert_eq!(stick.vector(), JoystickVector::IDLE);
    }

    #[test]
    fn destroy_is_idempotent_and_stops_input() {
        let mut stick = VirtualJoystick::default();
        stick.handle_event(&start(1, 0.0, 0.0));
        stick.handle_event(&moved(1, 30.0, 0.0));

        stick.destroy();
        stick.destroy();
        assert!(stick.is_destroyed());
        assert_eq!(stick.vector(), JoystickVector::IDLE);

        stick.handle_event(&start(2, 0.0, 0.0));
        stick.handle_event(&moved(2, 30.0, 0.0));
        assert_eq!(stick.vector(), JoystickVector::IDLE);
    }

    #[test]
    fn non_finite_touch_leaves_stick_idle() {
        let mut stick = VirtualJoystick::new(100.0);
        stick.handle_event(&start(1, 0.0, 0.0));
        stick.handle_event(&moved(1, f32::NAN, 10.0));
        assert_eq!(stick.vector(), JoystickVector::IDLE);

        stick.handle_event(&moved(1, f32::INFINITY, 0.0));
        assert_eq!(stick.vector(), JoystickVector::IDLE);

        // A valid move afterwards still steers
        stick.handle_event(&moved(1, 50.0, 0.0));
        assert!((stick.vector().magnitude - 0.5).abs() < EPS);
    }

    #[test]
    fn focus_lost_releases_drag() {
        let mut stick = VirtualJoystick::new(100.0);
        stick.handle_event(&start(1, 0.0, 0.0));
        stick.handle_event(&moved(1, 80.0, 0.0));

        stick.handle_event(&InputEvent::FocusLost);
        assert_eq!(stick.vector(), JoystickVector::IDLE);

        // Moves from the abandoned finger no longer steer
        stick.handle_event(&moved(1, 90.0, 0.0));
        assert_eq!(stick.vector(), JoystickVector::IDLE);
    }

    #[test]
    #[should_panic(expected = "Joystick radius must be positive")]
    fn zero_radius_panics() {
        VirtualJoystick::new(0.0);
    }
}

//=========================================================================
// Movement Vector
//=========================================================================

/// Unified per-frame movement request.
///
/// Screen-space axes: `x` grows to the right, `y` grows downward, so
/// "up" is `y = -1`. Recomputed every frame and owned by the caller.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct MovementVector {
    pub x: f32,
    pub y: f32,
    pub is_moving: bool,
}

impl MovementVector {
    /// No movement on either axis.
    pub const ZERO: Self = Self {
        x: 0.0,
        y: 0.0,
        is_moving: false,
    };

    /// Builds a vector, deriving `is_moving` from the components.
    pub fn new(x: f32, y: f32) -> Self {
        Self {
            x,
            y,
            is_moving: x != 0.0 || y != 0.0,
        }
    }

    /// Euclidean length of `(x, y)`.
    pub fn length(&self) -> f32 {
        (self.x * self.x + self.y * self.y).sqrt()
    }

    /// Displacement for this frame at `speed` units per second.
    pub fn scaled(&self, speed: f32, delta_seconds: f32) -> (f32, f32) {
        (self.x * speed * delta_seconds, self.y * speed * delta_seconds)
    }
}

//=========================================================================
// POI Model
//=========================================================================
//
// Points of interest on the venue map and the interactions recorded
// against them.
//
//=========================================================================

use serde::{Deserialize, Serialize};

//=== PoiKind =============================================================

/// Category of a point of interest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PoiKind {
    Booth,
    Stage,
    Workshop,
    Food,
    Lounge,
    Info,
    Restroom,
    Sponsor,
}

//=== Poi =================================================================

/// A named location on the venue map.
///
/// `position` is the map-space centre; `radius` is how close the player
/// must be for the POI to count as nearby.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Poi {
    pub id: String,
    pub name: String,
    pub kind: PoiKind,
    #[serde(default)]
    pub floor: i32,
    #[serde(default)]
    pub zone: String,
    pub position: (f32, f32),
    #[serde(default = "default_radius")]
    pub radius: f32,
    #[serde(default = "default_active")]
    pub active: bool,
}

fn default_radius() -> f32 {
    64.0
}

fn default_active() -> bool {
    true
}

impl Poi {
    /// Creates an active POI on floor 0 with the default radius.
    pub fn new(id: impl Into<String>, name: impl Into<String>, kind: PoiKind) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            kind,
            floor: 0,
            zone: String::new(),
            position: (0.0, 0.0),
            radius: default_radius(),
            active: true,
        }
    }

    pub fn with_floor(mut self, floor: i32) -> Self {
        self.floor = floor;
        self
    }

    pub fn with_zone(mut self, zone: impl Into<String>) -> Self {
        self.zone = zone.into();
        self
    }

    pub fn at(mut self, x: f32, y: f32) -> Self {
        self.position = (x, y);
        self
    }

    pub fn with_radius(mut self, radius: f32) -> Self {
        self.radius = radius;
        self
    }

    pub fn inactive(mut self) -> Self {
        self.active = false;
        self
    }

    /// Returns `true` if `point` lies within this POI's radius.
    pub fn contains(&self, point: (f32, f32)) -> bool {
        let dx = point.0 - self.position.0;
        let dy = point.1 - self.position.1;
        dx * dx + dy * dy <= self.radius * self.radius
    }
}

//=== Interactions ========================================================

/// What the attendee did at a POI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum InteractionKind {
    Visited,
    Scanned,
    Bookmarked,
    CheckedIn,
}

/// One recorded interaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PoiInteraction {
    pub poi_id: String,
    pub kind: InteractionKind,
    /// Milliseconds since session start.
    pub timestamp_ms: u64,
}

impl PoiInteraction {
    pub fn new(poi_id: impl Into<String>, kind: InteractionKind, timestamp_ms: u64) -> Self {
        Self {
            poi_id: poi_id.into(),
            kind,
            timestamp_ms,
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

//=========================================================================
// Proximity Detector
//=========================================================================
//
// Game-side producer of `poi-proximity` events.
//
// Each frame the player's position is tested against every active POI.
// Only transitions are published:
//
// ```text
//   outside → inside   emit PoiProximity { in_range: true }
//   inside  → outside  emit PoiProximity { in_range: false }
//   POI deactivated / removed while inside → in_range: false
// ```
//
//=========================================================================

use std::collections::HashMap;

use log::debug;

use super::model::Poi;
use crate::core::event_bus::{EventBus, GameEvent};

//=== ProximityDetector ===================================================

/// Tracks which POIs currently contain the player.
#[derive(Debug, Default)]
pub struct ProximityDetector {
    /// POIs the player is inside, keyed by id, as last seen.
    inside: HashMap<String, Poi>,
}

impl ProximityDetector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Tests `player` against `pois` and emits one event per transition.
    ///
    /// Returns the number of events emitted.
    pub fn update(&mut self, player: (f32, f32), pois: &[Poi], bus: &EventBus) -> usize {
        let mut emitted = 0;

        for poi in pois.iter().filter(|poi| poi.active) {
            let now_inside = poi.contains(player);
            let was_inside = self.inside.contains_key(&poi.id);

            if now_inside && !was_inside {
                debug!("Entered POI `{}`", poi.id);
                self.inside.insert(poi.id.clone(), poi.clone());
                bus.emit(&GameEvent::PoiProximity { poi: poi.clone(), in_range: true });
                emitted += 1;
            } else if !now_inside && was_inside {
                debug!("Left POI `{}`", poi.id);
                self.inside.remove(&poi.id);
                bus.emit(&GameEvent::PoiProximity { poi: poi.clone(), in_range: false });
                emitted += 1;
            }
        }

        // POIs that vanished or went inactive while occupied
        let stale: Vec<String> = self
            .inside
            .keys()
            .filter(|id| !pois.iter().any(|poi| poi.active && &poi.id == *id))
            .cloned()
            .collect();

        for id in stale {
            if let Some(poi) = self.inside.remove(&id) {
                bus.emit(&GameEvent::PoiProximity { poi, in_range: false });
                emitted += 1;
            }
        }

        emitted
    }

    /// Returns `true` if the player was inside `id` at the last update.
    pub fn is_inside(&self, id: &str) -> bool {
        self.inside.contains_key(id)
    }

    /// Forgets all occupancy without emitting.
    pub fn reset(&mut self) {
        self.inside.clear();
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

//=========================================================================
// Companion Demo
//
// Walks an attendee marker around an expo hall with WASD / arrows or a
// floating touch joystick. Entering a POI's radius publishes proximity on
// the event bus; a transparent HUD scene folds those events into the POI
// view state and logs a summary whenever it changes.
//
// Controls:
//   WASD / arrows  move
//   Enter          select the nearest POI in range
//   Space          record a visit at the selected POI
//   Escape         clear selection
//
// Run with `RUST_LOG=debug cargo run` to see bus traffic.
//
//=========================================================================

use conference_companion::prelude::*;
use log::info;

//=== Scene Keys ==========================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum VenueScene {
    ExpoHall,
    Hud,
}

impl SceneKey for VenueScene {}

//=== Expo Hall ===========================================================

/// Map pixels per second at full deflection.
const WALK_SPEED: f32 = 240.0;

struct ExpoHall {
    pois: Vec<Poi>,
    input: Option<InputManager>,
    proximity: ProximityDetector,
    player: (f32, f32),
    selected: Option<String>,
}

impl ExpoHall {
    fn new(pois: Vec<Poi>) -> Self {
        Self {
            pois,
            input: None,
            proximity: ProximityDetector::new(),
            player: (160.0, 560.0),
            selected: None,
        }
    }

    fn nearest_in_range(&self) -> Option<&Poi> {
        let distance = |poi: &Poi| {
            let dx = poi.position.0 - self.player.0;
            let dy = poi.position.1 - self.player.1;
            dx * dx + dy * dy
        };

        self.pois
            .iter()
            .filter(|poi| poi.active && self.proximity.is_inside(&poi.id))
            .min_by(|a, b| distance(*a).total_cmp(&distance(*b)))
    }

    fn handle_keys(&mut self, context: &mut GlobalContext<VenueScene>) {
        let Some(keyboard) = self.input.as_ref().and_then(|input| input.keyboard()) else {
            return;
        };
        let select = keyboard.is_key_pressed(KeyCode::Enter);
        let visit = keyboard.is_key_pressed(KeyCode::Space);
        let clear = keyboard.is_key_pressed(KeyCode::Escape);

        if select {
            let poi = self.nearest_in_range().cloned();
            self.selected = poi.as_ref().map(|poi| poi.id.clone());
            context.event_bus.emit(&GameEvent::PoiSelected(poi));
        }

        if visit {
            if let Some(id) = &self.selected {
                let interaction = PoiInteraction::new(
                    id.clone(),
                    InteractionKind::Visited,
                    context.elapsed_ms() as u64,
                );
                context.event_bus.emit(&GameEvent::PoiInteraction(interaction));
            }
        }

        if clear && self.selected.take().is_some() {
            context.event_bus.emit(&GameEvent::PoiSelected(None));
        }
    }
}

impl Scene<VenueScene> for ExpoHall {
    fn on_enter(&mut self, context: &mut GlobalContext<VenueScene>) {
        let joystick = VirtualJoystick::default();
        self.input = Some(InputManager::new(context.device(), Box::new(joystick)));
    }

    fn on_exit(&mut self, _context: &mut GlobalContext<VenueScene>) {
        if let Some(mut input) = self.input.take() {
            input.destroy();
        }
        self.proximity.reset();
    }

    fn update(&mut self, context: &mut GlobalContext<VenueScene>, delta_ms: f64) {
        let Some(input) = self.input.as_mut() else {
            return;
        };

        input.process_events(context.frame_events());
        let movement = input.movement_vector();

        if movement.is_moving {
            let (dx, dy) = movement.scaled(WALK_SPEED, (delta_ms / 1000.0) as f32);
            self.player.0 += dx;
            self.player.1 += dy;
        }

        self.proximity.update(self.player, &self.pois, &context.event_bus);
        self.handle_keys(context);
    }
}

//=== HUD =================================================================

struct Hud {
    pois: Vec<Poi>,
    tracker: Option<PoiTracker>,
    last_revision: u64,
}

impl Scene<VenueScene> for Hud {
    fn on_enter(&mut self, context: &mut GlobalContext<VenueScene>) {
        let tracker = PoiTracker::attach(&context.event_bus);
        tracker.update_poi_list(self.pois.clone());
        self.last_revision = tracker.revision();
        self.tracker = Some(tracker);
    }

    fn on_exit(&mut self, _context: &mut GlobalContext<VenueScene>) {
        if let Some(mut tracker) = self.tracker.take() {
            tracker.detach();
        }
    }

    fn update(&mut self, _context: &mut GlobalContext<VenueScene>, _delta_ms: f64) {
        let Some(tracker) = &self.tracker else {
            return;
        };
        if tracker.revision() == self.last_revision {
            return;
        }
        self.last_revision = tracker.revision();

        let stats = tracker.stats();
        let nearby: Vec<String> = tracker.nearby_pois().into_iter().map(|poi| poi.name).collect();
        info!(
            "selected: {:?} | nearby: {:?} | {} POIs ({} active), {} recent interactions",
            tracker.selected_poi().map(|poi| poi.name),
            nearby,
            stats.total,
            stats.active,
            stats.recent_interactions,
        );
    }

    fn is_transparent(&self) -> bool {
        true
    }
}

//=== Entry Point =========================================================

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let catalog = PoiCatalog::from_json_str(include_str!("../assets/pois.json"))?;
    info!("Loaded {} POIs", catalog.len());
    let pois = catalog.into_pois();

    EngineBuilder::<VenueScene>::new()
        .with_window_title("Conference Companion - Expo Hall")
        .with_window_size(1280, 720)
        .build()
        .init(move |systems| {
            systems
                .scene_manager
                .register_default(VenueScene::ExpoHall, ExpoHall::new(pois.clone()));
            systems.scene_manager.register_default(
                VenueScene::Hud,
                Hud {
                    pois,
                    tracker: None,
                    last_revision: 0,
                },
            );
        })
        .run()?;

    Ok(())
}

//=========================================================================
// POI Tracker
//
// UI-side mirror of POI state, folded from EventBus notifications.
//
// Responsibilities:
// - Subscribe to the five POI channels and fold their payloads into a
//   local `PoiViewState`
// - Expose read accessors, imperative actions and query helpers to the
//   view layer
// - Derive a statistics snapshot for panels and badges
//
// Event folding:
// ```text
//   poi-selected     → selected = payload
//   poi-hover-start  → hovered  = payload
//   poi-hover-end    → hovered  = None   (only if it is the same POI)
//   poi-proximity    → nearby  += / -= payload (dedup by id)
//   poi-interaction  → history.push(payload), keep newest 20
// ```
//
// Not authoritative: the POI list is whatever was last pushed through
// `update_poi_list`.
//
//=========================================================================

use std::cell::{Cell, RefCell};
use std::collections::{BTreeMap, VecDeque};
use std::rc::Rc;

use log::{debug, trace};

use crate::core::event_bus::{EventBus, EventKind, GameEvent, Subscription};
use crate::core::poi::{Poi, PoiInteraction, PoiKind};

//=== Constants ===========================================================

/// Interactions retained in the recent-history ring.
pub const INTERACTION_HISTORY_LIMIT: usize = 20;

//=== PoiViewState ========================================================

/// Derived, ephemeral POI state for the view layer.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PoiViewState {
    pub selected: Option<Poi>,
    pub hovered: Option<Poi>,
    pub pois: Vec<Poi>,
    pub nearby: Vec<Poi>,
    pub interactions: VecDeque<PoiInteraction>,
}

impl PoiViewState {
    /// Folds one bus event into the state.
    fn apply(&mut self, event: &GameEvent) {
        match event {
            GameEvent::PoiSelected(poi) => {
                self.selected = poi.clone();
            }
            GameEvent::PoiHoverStart(poi) => {
                self.hovered = Some(poi.clone());
            }
            GameEvent::PoiHoverEnd(poi) => {
                if self.hovered.as_ref().is_some_and(|h| h.id == poi.id) {
                    self.hovered = None;
                }
            }
            GameEvent::PoiProximity { poi, in_range: true } => {
                match self.nearby.iter_mut().find(|n| n.id == poi.id) {
                    Some(existing) => *existing = poi.clone(),
                    None => self.nearby.push(poi.clone()),
                }
            }
            GameEvent::PoiProximity { poi, in_range: false } => {
                self.nearby.retain(|n| n.id != poi.id);
            }
            GameEvent::PoiInteraction(interaction) => {
                self.interactions.push_back(interaction.clone());
                while self.interactions.len() > INTERACTION_HISTORY_LIMIT {
                    self.interactions.pop_front();
                }
            }
        }
    }
}

//=== PoiStats ============================================================

/// Summary counts over the tracked POI state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PoiStats {
    pub total: usize,
    pub by_kind: BTreeMap<PoiKind, usize>,
    pub active: usize,
    pub nearby: usize,
    pub recent_interactions: usize,
}

//=== PoiTracker ==========================================================

/// Keeps a [`PoiViewState`] in sync with an [`EventBus`].
///
/// Subscriptions are removed by [`detach`](Self::detach) or on drop.
pub struct PoiTracker {
    bus: EventBus,
    state: Rc<RefCell<PoiViewState>>,
    revision: Rc<Cell<u64>>,
    subscriptions: Vec<Subscription>,
}

impl PoiTracker {
    //--- Construction -----------------------------------------------------

    /// Subscribes a fresh tracker to every POI channel on `bus`.
    pub fn attach(bus: &EventBus) -> Self {
        let state = Rc::new(RefCell::new(PoiViewState::default()));
        let revision = Rc::new(Cell::new(0u64));

        let subscriptions = EventKind::ALL
            .into_iter()
            .map(|kind| {
                let state = Rc::clone(&state);
                let revision = Rc::clone(&revision);
                bus.on(kind, move |event| {
                    trace!("POI tracker folding `{}`", event.kind());
                    state.borrow_mut().apply(event);
                    revision.set(revision.get() + 1);
                })
            })
            .collect();

        debug!("POI tracker attached");

        Self {
            bus: bus.clone(),
            state,
            revision,
            subscriptions,
        }
    }

    /// Unsubscribes from the bus. State stays readable; calling again
    /// does nothing.
    pub fn detach(&mut self) {
        if self.subscriptions.is_empty() {
            return;
        }
        for sub in self.subscriptions.drain(..) {
            sub.unsubscribe();
        }
        debug!("POI tracker detached");
    }

    pub fn is_attached(&self) -> bool {
        !self.subscriptions.is_empty()
    }

    /// Counter bumped on every state change; compare to skip redraws.
    pub fn revision(&self) -> u64 {
        self.revision.get()
    }

    //--- Read State -------------------------------------------------------

    /// Copy of the whole view state.
    pub fn snapshot(&self) -> PoiViewState {
        self.state.borrow().clone()
    }

    pub fn selected_poi(&self) -> Option<Poi> {
        self.state.borrow().selected.clone()
    }

    pub fn hovered_poi(&self) -> Option<Poi> {
        self.state.borrow().hovered.clone()
    }

    pub fn nearby_pois(&self) -> Vec<Poi> {
        self.state.borrow().nearby.clone()
    }

    pub fn all_pois(&self) -> Vec<Poi> {
        self.state.borrow().pois.clone()
    }

    /// Recent interactions, oldest first.
    pub fn interactions(&self) -> Vec<PoiInteraction> {
        self.state.borrow().interactions.iter().cloned().collect()
    }

    //--- Actions ----------------------------------------------------------

    /// Selects `poi` and announces it on the bus.
    pub fn select_poi(&self, poi: Poi) {
        self.set_selected(Some(poi.clone()));
        self.bus.emit(&GameEvent::PoiSelected(Some(poi)));
    }

    /// Clears the selection and announces it on the bus.
    pub fn clear_selection(&self) {
        self.set_selected(None);
        self.bus.emit(&GameEvent::PoiSelected(None));
    }

    /// Replaces the tracked POI list.
    pub fn update_poi_list(&self, pois: Vec<Poi>) {
        self.mutate(|state| state.pois = pois);
    }

    /// Forgets every nearby POI.
    pub fn clear_nearby_pois(&self) {
        self.mutate(|state| state.nearby.clear());
    }

    //--- Queries ----------------------------------------------------------

    pub fn pois_by_kind(&self, kind: PoiKind) -> Vec<Poi> {
        self.filter_pois(|poi| poi.kind == kind)
    }

    pub fn pois_by_floor(&self, floor: i32) -> Vec<Poi> {
        self.filter_pois(|poi| poi.floor == floor)
    }

    pub fn pois_by_zone(&self, zone: &str) -> Vec<Poi> {
        self.filter_pois(|poi| poi.zone == zone)
    }

    pub fn is_poi_selected(&self, id: &str) -> bool {
        self.state.borrow().selected.as_ref().is_some_and(|poi| poi.id == id)
    }

    pub fn is_poi_hovered(&self, id: &str) -> bool {
        self.state.borrow().hovered.as_ref().is_some_and(|poi| poi.id == id)
    }

    /// Recent interactions with one POI, oldest first.
    pub fn poi_interactions(&self, id: &str) -> Vec<PoiInteraction> {
        self.state
            .borrow()
            .interactions
            .iter()
            .filter(|interaction| interaction.poi_id == id)
            .cloned()
            .collect()
    }

    /// Summary counts for the current state.
    pub fn stats(&self) -> PoiStats {
        let state = self.state.borrow();

        let mut by_kind = BTreeMap::new();
        for poi in &state.pois {
            *by_kind.entry(poi.kind).or_insert(0) += 1;
        }

        PoiStats {
            total: state.pois.len(),
            by_kind,
            active: state.pois.iter().filter(|poi| poi.active).count(),
            nearby: state.nearby.len(),
            recent_interactions: state.interactions.len(),
        }
    }

    //--- Internal Helpers -------------------------------------------------

    fn set_selected(&self, poi: Option<Poi>) {
        self.mutate(|state| state.selected = poi);
    }

    fn mutate(&self, f: impl FnOnce(&mut PoiViewState)) {
        f(&mut self.state.borrow_mut());
        self.revision.set(self.revision.get() + 1);
    }

    fn filter_pois(&self, predicate: impl Fn(&Poi) -> bool) -> Vec<Poi> {
        self.state
            .borrow()
            .pois
            .iter()
            .filter(|poi| predicate(poi))
            .cloned()
            .collect()
    }
}

impl Drop for PoiTracker {
    fn drop(&mut self) {
        self.detach();
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::poi::InteractionKind;

    //--- Test Helpers -----------------------------------------------------

    fn poi(id: &str, kind: PoiKind) -> Poi {
        Poi::new(id, id.to_uppercase(), kind)
    }

    fn venue() -> Vec<Poi> {
        vec![
            poi("stage", PoiKind::Stage).with_floor(1).with_zone("hall-a"),
            poi("b1", PoiKind::Booth).with_floor(1).with_zone("expo"),
            poi("b2", PoiKind::Booth).with_floor(2).with_zone("expo").inactive(),
            poi("cafe", PoiKind::Food).with_floor(2).with_zone("hall-a"),
        ]
    }

    fn interaction(id: &str, ts: u64) -> GameEvent {
        GameEvent::PoiInteraction(PoiInteraction::new(id, InteractionKind::Visited, ts))
    }

    //--- Event Folding ----------------------------------------------------

    #[test]
    fn selection_follows_bus() {
        let bus = EventBus::new();
        let tracker = PoiTracker::attach(&bus);

        bus.emit(&GameEvent::PoiSelected(Some(poi("b1", PoiKind::Booth))));
        assert!(tracker.is_poi_selected("b1"));

        bus.emit(&GameEvent::PoiSelected(None));
        assert_eq!(tracker.selected_poi(), None);
    }

    #[test]
    fn hover_end_only_clears_matching_poi() {
        let bus = EventBus::new();
        let tracker = PoiTracker::attach(&bus);

        bus.emit(&GameEvent::PoiHoverStart(poi("b1", PoiKind::Booth)));
        bus.emit(&GameEvent::PoiHoverEnd(poi("b2", PoiKind::Booth)));
        assert!(tracker.is_poi_hovered("b1"));

        bus.emit(&GameEvent::PoiHoverEnd(poi("b1", PoiKind::Booth)));
        assert_eq!(tracker.hovered_poi(), None);
    }

    #[test]
    fn nearby_is_deduplicated_by_id() {
        let bus = EventBus::new();
        let tracker = PoiTracker::attach(&bus);

        let near = |p: Poi| GameEvent::PoiProximity { poi: p, in_range: true };
        bus.emit(&near(poi("b1", PoiKind::Booth)));
        bus.emit(&near(poi("cafe", PoiKind::Food)));
        bus.emit(&near(poi("b1", PoiKind::Booth).with_zone("moved")));

        let nearby = tracker.nearby_pois();
        assert_eq!(nearby.len(), 2);
        assert_eq!(nearby[0].zone, "moved");

        bus.emit(&GameEvent::PoiProximity { poi: poi("b1", PoiKind::Booth), in_range: false });
        assert_eq!(tracker.nearby_pois().len(), 1);
    }

    #[test]
    fn interaction_history_keeps_newest_twenty() {
        let bus = EventBus::new();
        let tracker = PoiTracker::attach(&bus);

        for ts in 0..35 {
            bus.emit(&interaction("b1", ts));
        }

        let history = tracker.interactions();
        assert_eq!(history.len(), INTERACTION_HISTORY_LIMIT);
        let stamps: Vec<u64> = history.iter().map(|i| i.timestamp_ms).collect();
        assert_eq!(stamps, (15..35).collect::<Vec<_>>());
    }

    #[test]
    fn poi_interactions_filters_by_id() {
        let bus = EventBus::new();
        let tracker = PoiTracker::attach(&bus);

        bus.emit(&interaction("b1", 1));
        bus.emit(&interaction("cafe", 2));
        bus.emit(&interaction("b1", 3));

        let b1: Vec<u64> = tracker.poi_interactions("b1").iter().map(|i| i.timestamp_ms).collect();
        assert_eq!(b1, vec![1, 3]);
        assert!(tracker.poi_interactions("stage").is_empty());
    }

    //--- Actions ----------------------------------------------------------

    #[test]
    fn select_poi_announces_on_bus() {
        let bus = EventBus::new();
        let tracker = PoiTracker::attach(&bus);
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        let _sub = bus.on(EventKind::PoiSelected, move |event| sink.borrow_mut().push(event.clone()));

        tracker.select_poi(poi("stage", PoiKind::Stage));
        assert!(tracker.is_poi_selected("stage"));

        tracker.clear_selection();
        assert!(!tracker.is_poi_selected("stage"));

        let seen = seen.borrow();
        assert_eq!(seen.len(), 2);
        assert_eq!(seen[1], GameEvent::PoiSelected(None));
    }

    #[test]
    fn clear_nearby_pois_empties_list() {
        let bus = EventBus::new();
        let tracker = PoiTracker::attach(&bus);
        bus.emit(&GameEvent::PoiProximity { poi: poi("b1", PoiKind::Booth), in_range: true });

        tracker.clear_nearby_pois();
        assert!(tracker.nearby_pois().is_empty());
    }

    //--- Queries & Stats --------------------------------------------------

    #[test]
    fn queries_filter_poi_list() {
        let bus = EventBus::new();
        let tracker = PoiTracker::attach(&bus);
        tracker.update_poi_list(venue());

        assert_eq!(tracker.pois_by_kind(PoiKind::Booth).len(), 2);
        assert_eq!(tracker.pois_by_floor(2).len(), 2);
        assert_eq!(tracker.pois_by_zone("hall-a").len(), 2);
        assert!(tracker.pois_by_zone("basement").is_empty());
    }

    #[test]
    fn stats_summarize_state() {
        let bus = EventBus::new();
        let tracker = PoiTracker::attach(&bus);
        tracker.update_poi_list(venue());
        bus.emit(&GameEvent::PoiProximity { poi: poi("cafe", PoiKind::Food), in_range: true });
        bus.emit(&interaction("cafe", 5));

        let stats = tracker.stats();
        assert_eq!(stats.total, 4);
        assert_eq!(stats.active, 3);
        assert_eq!(stats.nearby, 1);
        assert_eq!(stats.recent_interactions, 1);
        assert_eq!(stats.by_kind.get(&PoiKind::Booth), Some(&2));
        assert_eq!(stats.by_kind.get(&PoiKind::Stage), Some(&1));
        assert_eq!(stats.by_kind.get(&PoiKind::Lounge), None);
    }

    //--- Lifecycle --------------------------------------------------------

    #[test]
    fn detach_stops_folding() {
        let bus = EventBus::new();
        let mut tracker = PoiTracker::attach(&bus);
        assert_eq!(bus.listener_count(EventKind::PoiSelected), 1);

        tracker.detach();
        tracker.detach();
        assert!(!tracker.is_attached());
        assert_eq!(bus.listener_count(EventKind::PoiSelected), 0);

        bus.emit(&GameEvent::PoiSelected(Some(poi("b1", PoiKind::Booth))));
        assert_eq!(tracker.selected_poi(), None);
    }

    #[test]
    fn drop_unsubscribes() {
        let bus = EventBus::new();
        {
            let _tracker = PoiTracker::attach(&bus);
            for kind in EventKind::ALL {
                assert!(bus.has_listeners(kind));
            }
        }
        for kind in EventKind::ALL {
            assert!(!bus.has_listeners(kind));
        }
    }

    #[test]
    fn revision_advances_on_change() {
        let bus = EventBus::new();
        let tracker = PoiTracker::attach(&bus);
        let start = tracker.revision();

        bus.emit(&interaction("b1", 1));
        assert!(tracker.revision() > start);
    }
}

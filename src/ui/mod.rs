//=========================================================================
// UI State
//=========================================================================
//
// View-layer state containers fed by the EventBus. Nothing here renders;
// a UI shell reads these containers and calls their actions.
//
//=========================================================================

mod poi_tracker;

pub use poi_tracker::{PoiStats, PoiTracker, PoiViewState, INTERACTION_HISTORY_LIMIT};

//=========================================================================
// Points of Interest
//=========================================================================
//
// POI records, the JSON catalog they are loaded from, and the game-side
// proximity detector that publishes `poi-proximity` events.
//
//=========================================================================

mod catalog;
mod model;
mod proximity;

pub use catalog::{CatalogError, PoiCatalog};
pub use model::{InteractionKind, Poi, PoiInteraction, PoiKind};
pub use proximity::ProximityDetector;

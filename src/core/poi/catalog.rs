//=========================================================================
// POI Catalog
//=========================================================================
//
// Loads the venue's POI list from JSON.
//
// Format: a top-level array of POI objects.
//
// ```json
// [
//   { "id": "stage-a", "name": "Main Stage", "kind": "stage",
//     "floor": 1, "zone": "hall-a", "position": [420.0, 180.0] }
// ]
// ```
//
// `floor`, `zone`, `radius` and `active` are optional.
//
//=========================================================================

use std::collections::HashSet;

use log::info;
use thiserror::Error;

use super::model::Poi;

//=== CatalogError ========================================================

/// Errors raised while loading a POI catalog.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("malformed POI catalog: {0}")]
    Json(#[from] serde_json::Error),

    #[error("duplicate POI id `{0}`")]
    DuplicateId(String),

    #[error("POI `{0}` has a non-positive radius")]
    InvalidRadius(String),
}

//=== PoiCatalog ==========================================================

/// Validated, ordered set of POIs.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PoiCatalog {
    pois: Vec<Poi>,
}

impl PoiCatalog {
    /// Parses and validates a JSON catalog.
    pub fn from_json_str(json: &str) -> Result<Self, CatalogError> {
        let pois: Vec<Poi> = serde_json::from_str(json)?;
        let catalog = Self::from_pois(pois)?;
        info!("Loaded POI catalog ({} entries)", catalog.len());
        Ok(catalog)
    }

    /// Validates an already-built list: ids must be unique, radii positive.
    pub fn from_pois(pois: Vec<Poi>) -> Result<Self, CatalogError> {
        let mut seen = HashSet::with_capacity(pois.len());
        for poi in &pois {
            if !seen.insert(poi.id.as_str()) {
                return Err(CatalogError::DuplicateId(poi.id.clone()));
            }
            if poi.radius <= 0.0 {
                return Err(CatalogError::InvalidRadius(poi.id.clone()));
            }
        }
        Ok(Self { pois })
    }

    pub fn pois(&self) -> &[Poi] {
        &self.pois
    }

    pub fn get(&self, id: &str) -> Option<&Poi> {
        self.pois.iter().find(|poi| poi.id == id)
    }

    pub fn len(&self) -> usize {
        self.pois.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pois.is_empty()
    }

    pub fn into_pois(self) -> Vec<Poi> {
        self.pois
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

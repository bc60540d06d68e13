use foundation::{LatLng, SiteId};
use serde::{Deserialize, Serialize};

/// A located, described site as it appears in the dataset.
///
/// Field names on the wire follow the published dataset
/// (`province` / `city` for the region and sub-region labels).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Site {
    pub id: SiteId,
    pub name: String,
    #[serde(rename = "province")]
    pub region: String,
    #[serde(rename = "city")]
    pub sub_region: String,
    pub lat: f64,
    pub lng: f64,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub address: String,
}

impl Site {
    pub fn position(&self) -> LatLng {
        LatLng::new(self.lat, self.lng)
    }
}

/// Top-level dataset document.
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct SiteDataset {
    #[serde(alias = "sites")]
    pub museums: Vec<Site>,
}

use catalog::SiteStore;
use layers::aggregation::{self, RegionGroups};
use layers::markers::{self, Marker};
use scene::{DisplayMode, Viewport, ViewportStatus};
use serde::Serialize;

use crate::config::MapConfig;

/// A loaded store with its region groups, fixed at construction.
///
/// Holds no viewport or selection state, so one instance can answer
/// marker queries for any zoom from many readers at once.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SiteMap {
    config: MapConfig,
    store: SiteStore,
    groups: RegionGroups,
}

/// Markers for one zoom level plus the status line for it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ZoomedMarkers {
    pub status: ViewportStatus,
    pub markers: Vec<Marker>,
}

impl SiteMap {
    pub fn new(config: MapConfig, store: SiteStore) -> Self {
        let groups = aggregation::group(store.sites());
        Self {
            config,
            store,
            groups,
        }
    }

    pub fn config(&self) -> &MapConfig {
        &self.config
    }

    pub fn store(&self) -> &SiteStore {
        &self.store
    }

    pub fn groups(&self) -> &RegionGroups {
        &self.groups
    }

    pub fn markers(&self, mode: DisplayMode) -> Vec<Marker> {
        markers::present(mode, &self.groups, self.store.sites())
    }

    pub fn at_zoom(&self, zoom: f64) -> ZoomedMarkers {
        let viewport = Viewport::new(zoom, self.config.aggregation_threshold);
        ZoomedMarkers {
            status: viewport.status(),
            markers: self.markers(viewport.mode()),
        }
    }
}

use foundation::LatLng;
use scene::ZoomRange;
use serde::Serialize;

/// Map presentation settings. Also served to clients for substrate setup.
#[derive(Debug, Copy, Clone, PartialEq, Serialize)]
pub struct MapConfig {
    pub initial_zoom: f64,
    /// Enforced by the substrate, not by the view.
    pub zoom_range: ZoomRange,
    /// Zoom at or below which sites are shown per region.
    pub aggregation_threshold: f64,
    pub center: LatLng,
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            initial_zoom: 4.0,
            zoom_range: ZoomRange::new(3.0, 10.0),
            aggregation_threshold: 5.0,
            center: LatLng::new(35.8617, 104.1954),
        }
    }
}

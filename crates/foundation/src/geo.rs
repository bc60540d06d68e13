use serde::{Deserialize, Serialize};

/// Latitude bounds in degrees.
pub const LAT_RANGE: (f64, f64) = (-90.0, 90.0);
/// Longitude bounds in degrees.
pub const LNG_RANGE: (f64, f64) = (-180.0, 180.0);

/// A WGS84 position in decimal degrees.
///
/// Values are not clamped or validated on construction; use
/// [`LatLng::is_in_range`] where a range check is wanted.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

impl LatLng {
    pub const fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    pub fn is_in_range(&self) -> bool {
        (LAT_RANGE.0..=LAT_RANGE.1).contains(&self.lat)
            && (LNG_RANGE.0..=LNG_RANGE.1).contains(&self.lng)
    }

    /// Unweighted arithmetic mean of `points`, per axis.
    ///
    /// Returns `None` for an empty input.
    pub fn mean<I>(points: I) -> Option<Self>
    where
        I: IntoIterator<Item = LatLng>,
    {
        let mut count = 0usize;
        let mut lat_sum = 0.0;
        let mut lng_sum = 0.0;
        for p in points {
            count += 1;
            lat_sum += p.lat;
            lng_sum += p.lng;
        }
        if count == 0 {
            return None;
        }
        let n = count as f64;
        Some(Self::new(lat_sum / n, lng_sum / n))
    }
}

impl From<(f64, f64)> for LatLng {
    fn from((lat, lng): (f64, f64)) -> Self {
        Self::new(lat, lng)
    }
}

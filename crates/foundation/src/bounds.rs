use crate::geo::LatLng;

/// Axis-aligned lat/lng extents.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct GeoBounds {
    pub min: LatLng,
    pub max: LatLng,
}

impl GeoBounds {
    pub fn new(min: LatLng, max: LatLng) -> Self {
        GeoBounds { min, max }
    }

    /// Tight bounds around `points`; `None` when empty.
    pub fn from_points<I>(points: I) -> Option<Self>
    where
        I: IntoIterator<Item = LatLng>,
    {
        let mut iter = points.into_iter();
        let first = iter.next()?;
        let mut b = GeoBounds::new(first, first);
        for p in iter {
            b.min.lat = b.min.lat.min(p.lat);
            b.min.lng = b.min.lng.min(p.lng);
            b.max.lat = b.max.lat.max(p.lat);
            b.max.lng = b.max.lng.max(p.lng);
        }
        Some(b)
    }

    pub fn contains(&self, p: LatLng) -> bool {
        p.lat >= self.min.lat
            && p.lat <= self.max.lat
            && p.lng >= self.min.lng
            && p.lng <= self.max.lng
    }
}

use std::collections::BTreeMap;

use foundation::LatLng;

use crate::markers::{Marker, MarkerKey};
use crate::symbology::MarkerIcon;

/// Marker half of the map substrate. Every call is keyed by marker identity.
pub trait MarkerSurface {
    /// Creates a marker with its initial visual state.
    fn place(&mut self, key: &MarkerKey, position: LatLng, icon: &MarkerIcon);
    fn set_icon(&mut self, key: &MarkerKey, icon: &MarkerIcon);
    fn set_position(&mut self, key: &MarkerKey, position: LatLng);
    fn remove(&mut self, key: &MarkerKey);
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SyncReport {
    pub placed: usize,
    pub restyled: usize,
    pub moved: usize,
    pub removed: usize,
}

impl SyncReport {
    pub fn is_noop(&self) -> bool {
        *self == Self::default()
    }
}

#[derive(Debug, Clone, PartialEq)]
struct Applied {
    position: LatLng,
    icon: MarkerIcon,
}

/// Tracks what has been pushed to a [`MarkerSurface`] and applies only the
/// difference on each pass.
///
/// New keys are placed once with their icon; surviving keys get `set_icon`
/// only when the icon changed (e.g. a badge count) and `set_position` only
/// when the position moved.
#[derive(Debug, Default)]
pub struct MarkerSync {
    applied: BTreeMap<MarkerKey, Applied>,
}

impl MarkerSync {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.applied.len()
    }

    pub fn is_empty(&self) -> bool {
        self.applied.is_empty()
    }

    pub fn contains(&self, key: &MarkerKey) -> bool {
        self.applied.contains_key(key)
    }

    pub fn apply<S: MarkerSurface + ?Sized>(
        &mut self,
        surface: &mut S,
        markers: &[Marker],
    ) -> SyncReport {
        let mut report = SyncReport::default();
        let mut next: BTreeMap<MarkerKey, Applied> = BTreeMap::new();

        for marker in markers {
            match self.applied.remove(&marker.key) {
                Some(prev) => {
                    if prev.icon != marker.icon {
                        surface.set_icon(&marker.key, &marker.icon);
                        report.restyled += 1;
                    }
                    if prev.position != marker.position {
                        surface.set_position(&marker.key, marker.position);
                        report.moved += 1;
                    }
                }
                None => {
                    if next.contains_key(&marker.key) {
                        continue;
                    }
                    surface.place(&marker.key, marker.position, &marker.icon);
                    report.placed += 1;
                }
            }
            next.insert(
                marker.key.clone(),
                Applied {
                    position: marker.position,
                    icon: marker.icon.clone(),
                },
            );
        }

        for key in self.applied.keys() {
            surface.remove(key);
            report.removed += 1;
        }

        self.applied = next;
        report
    }

    /// Removes everything previously placed.
    pub fn clear<S: MarkerSurface + ?Sized>(&mut self, surface: &mut S) -> usize {
        let removed = self.applied.len();
        for key in self.applied.keys() {
            surface.remove(key);
        }
        self.applied.clear();
        removed
    }
}

use catalog::Site;
use foundation::{LatLng, SiteId};
use scene::DisplayMode;
use serde::{Serialize, Serializer};

use crate::aggregation::{RegionGroup, RegionGroups};
use crate::symbology::MarkerIcon;

/// Identity of a rendered marker, stable across recomputation for
/// unchanged underlying data.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum MarkerKey {
    Region(String),
    Site(SiteId),
}

impl std::fmt::Display for MarkerKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MarkerKey::Region(region) => write!(f, "region-{region}"),
            MarkerKey::Site(id) => write!(f, "site-{id}"),
        }
    }
}

impl Serialize for MarkerKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MarkerKind {
    Aggregate,
    Individual,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MemberEntry {
    pub id: SiteId,
    pub name: String,
}

/// What a marker reveals when activated.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum MarkerPayload {
    Aggregate {
        region: String,
        count: usize,
        members: Vec<MemberEntry>,
    },
    Individual {
        site: Site,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Marker {
    pub key: MarkerKey,
    pub position: LatLng,
    pub icon: MarkerIcon,
    pub payload: MarkerPayload,
}

impl Marker {
    pub fn aggregate(group: &RegionGroup) -> Self {
        let count = group.len();
        Self {
            key: MarkerKey::Region(group.region.clone()),
            position: group.centroid,
            icon: MarkerIcon::Badge { count },
            payload: MarkerPayload::Aggregate {
                region: group.region.clone(),
                count,
                members: group
                    .members
                    .iter()
                    .map(|s| MemberEntry {
                        id: s.id,
                        name: s.name.clone(),
                    })
                    .collect(),
            },
        }
    }

    pub fn individual(site: &Site) -> Self {
        Self {
            key: MarkerKey::Site(site.id),
            position: site.position(),
            icon: MarkerIcon::Pulse,
            payload: MarkerPayload::Individual { site: site.clone() },
        }
    }

    pub fn kind(&self) -> MarkerKind {
        match self.payload {
            MarkerPayload::Aggregate { .. } => MarkerKind::Aggregate,
            MarkerPayload::Individual { .. } => MarkerKind::Individual,
        }
    }

    /// Popup heading: region label or site name.
    pub fn title(&self) -> &str {
        match &self.payload {
            MarkerPayload::Aggregate { region, .. } => region.as_str(),
            MarkerPayload::Individual { site } => site.name.as_str(),
        }
    }
}

/// Builds the active marker set. Exactly one of the two sets is produced.
pub fn present(mode: DisplayMode, groups: &RegionGroups, sites: &[Site]) -> Vec<Marker> {
    match mode {
        DisplayMode::Aggregated => groups.iter().map(Marker::aggregate).collect(),
        DisplayMode::Detailed => sites.iter().map(Marker::individual).collect(),
    }
}

/// The active marker set together with the mode that produced it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MarkerSnapshot {
    pub mode: DisplayMode,
    pub markers: Vec<Marker>,
}

impl MarkerSnapshot {
    pub fn build(mode: DisplayMode, groups: &RegionGroups, sites: &[Site]) -> Self {
        Self {
            mode,
            markers: present(mode, groups, sites),
        }
    }
}

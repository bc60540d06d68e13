use std::collections::HashMap;

use catalog::Site;
use foundation::{GeoBounds, LatLng};

/// Sites sharing one region label, with their mean position.
#[derive(Debug, Clone, PartialEq)]
pub struct RegionGroup {
    pub region: String,
    /// Encounter order from grouping.
    pub members: Vec<Site>,
    pub centroid: LatLng,
}

impl RegionGroup {
    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn bounds(&self) -> Option<GeoBounds> {
        GeoBounds::from_points(self.members.iter().map(Site::position))
    }
}

/// Region label -> group mapping, iterated in first-seen order.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct RegionGroups {
    groups: Vec<RegionGroup>,
    index: HashMap<String, usize>,
}

impl RegionGroups {
    pub fn get(&self, region: &str) -> Option<&RegionGroup> {
        self.index.get(region).map(|&i| &self.groups[i])
    }

    pub fn iter(&self) -> std::slice::Iter<'_, RegionGroup> {
        self.groups.iter()
    }

    pub fn regions(&self) -> impl Iterator<Item = &str> + '_ {
        self.groups.iter().map(|g| g.region.as_str())
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}

impl<'a> IntoIterator for &'a RegionGroups {
    type Item = &'a RegionGroup;
    type IntoIter = std::slice::Iter<'a, RegionGroup>;

    fn into_iter(self) -> Self::IntoIter {
        self.groups.iter()
    }
}

/// Partitions `sites` by region label in a single pass, then computes
/// each group's centroid as the unweighted mean of member coordinates.
///
/// Coordinates are taken as given; no range validation happens here.
pub fn group(sites: &[Site]) -> RegionGroups {
    let mut members: Vec<(String, Vec<Site>)> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();

    for site in sites {
        let slot = match index.get(&site.region) {
            Some(&i) => i,
            None => {
                index.insert(site.region.clone(), members.len());
                members.push((site.region.clone(), Vec::new()));
                members.len() - 1
            }
        };
        members[slot].1.push(site.clone());
    }

    let groups = members
        .into_iter()
        .filter_map(|(region, members)| {
            let centroid = LatLng::mean(members.iter().map(Site::position))?;
            Some(RegionGroup {
                region,
                members,
                centroid,
            })
        })
        .collect();

    RegionGroups { groups, index }
}

#[cfg(test)]
mod tests {
    use super::group;
    use catalog::Site;
    use foundation::{LatLng, SiteId};
    use pretty_assertions::assert_eq;

    fn site(id: i64, region: &str, lat: f64, lng: f64) -> Site {
        Site {
            id: SiteId(id),
            name: format!("site {id}"),
            region: region.to_string(),
            sub_region: String::new(),
            lat,
            lng,
            description: String::new(),
            address: String::new(),
        }
    }

    fn sample() -> Vec<Site> {
        vec![
            site(1, "A", 30.0, 110.0),
            site(2, "A", 32.0, 112.0),
            site(3, "B", 40.0, 120.0),
        ]
    }

    #[test]
    fn groups_by_region_with_mean_centroid() {
        let groups = group(&sample());
        assert_eq!(groups.len(), 2);
        assert_eq!(groups.regions().collect::<Vec<_>>(), vec!["A", "B"]);

        let a = groups.get("A").unwrap();
        assert_eq!(a.len(), 2);
        assert_eq!(a.centroid, LatLng::new(31.0, 111.0));

        let b = groups.get("B").unwrap();
        assert_eq!(b.len(), 1);
        assert_eq!(b.centroid, LatLng::new(40.0, 120.0));
    }

    #[test]
    fn empty_input_yields_empty_mapping() {
        let groups = group(&[]);
        assert!(groups.is_empty());
        assert!(groups.get("A").is_none());
    }

    #[test]
    fn every_site_lands_in_exactly_one_group() {
        let sites = vec![
            site(1, "A", 30.0, 110.0),
            site(2, "B", 31.0, 111.0),
            site(3, "A", 32.0, 112.0),
            site(4, "C", 33.0, 113.0),
            site(5, "B", 34.0, 114.0),
        ];
        let groups = group(&sites);

        let mut seen: Vec<i64> = groups
            .iter()
            .flat_map(|g| g.members.iter().map(|s| s.id.0))
            .collect();
        seen.sort_unstable();
        assert_eq!(seen, vec![1, 2, 3, 4, 5]);

        for g in &groups {
            assert!(g.members.iter().all(|s| s.region == g.region));
        }
        let a: Vec<i64> = groups.get("A").unwrap().members.iter().map(|s| s.id.0).collect();
        assert_eq!(a, vec![1, 3]);
    }

    #[test]
    fn centroid_lies_within_member_bounds() {
        let sites = vec![
            site(1, "A", -12.5, 170.0),
            site(2, "A", 44.25, -179.5),
            site(3, "A", 0.1, 3.3),
            site(4, "A", 80.0, 60.0),
        ];
        let groups = group(&sites);
        let a = groups.get("A").unwrap();
        assert!(a.bounds().unwrap().contains(a.centroid));
    }

    #[test]
    fn regrouping_is_deterministic() {
        let sites = sample();
        assert_eq!(group(&sites), group(&sites));
    }
}

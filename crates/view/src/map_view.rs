use catalog::{CatalogError, SiteStore};
use foundation::SiteId;
use layers::aggregation::RegionGroups;
use layers::markers::{Marker, MarkerKey, MarkerPayload, MarkerSnapshot, MemberEntry};
use layers::sync::{MarkerSurface, MarkerSync, SyncReport};
use scene::{
    DisplayMode, EventBus, ModeChange, SelectionRelay, ViewEvent, ViewEventKind, Viewport,
    ViewportStatus,
};
use tracing::{debug, error, info};

use crate::config::MapConfig;
use crate::site_map::SiteMap;

/// The map substrate as seen by the view: a zoom read plus marker placement.
pub trait MapSubstrate: MarkerSurface {
    fn zoom(&self) -> f64;
}

/// Outcome of activating a marker.
#[derive(Debug, Clone, PartialEq)]
pub enum Activation {
    /// Individual marker; the site went to the selection relay.
    Selected(SiteId),
    /// Aggregate marker; member list for display only.
    Revealed {
        region: String,
        members: Vec<MemberEntry>,
    },
    /// Key is not part of the active marker set.
    Unknown,
}

/// Owned view state: store, derived region groups, viewport and the
/// active marker set.
///
/// Groups are rebuilt from the store on every store change. The marker
/// set is rebuilt on store changes and on mode flips; zoom changes that
/// stay within one mode leave it untouched.
#[derive(Debug)]
pub struct MapView {
    map: SiteMap,
    viewport: Viewport,
    markers: Vec<Marker>,
    sync: MarkerSync,
    relay: SelectionRelay,
    events: EventBus,
    revision: u64,
}

impl MapView {
    pub fn new(config: MapConfig, relay: SelectionRelay) -> Self {
        Self {
            map: SiteMap::new(config, SiteStore::new()),
            viewport: Viewport::new(config.initial_zoom, config.aggregation_threshold),
            markers: Vec::new(),
            sync: MarkerSync::new(),
            relay,
            events: EventBus::new(),
            revision: 0,
        }
    }

    pub fn with_store(config: MapConfig, relay: SelectionRelay, store: SiteStore) -> Self {
        let mut view = Self::new(config, relay);
        view.set_store(store);
        view
    }

    pub fn config(&self) -> &MapConfig {
        self.map.config()
    }

    pub fn store(&self) -> &SiteStore {
        self.map.store()
    }

    pub fn groups(&self) -> &RegionGroups {
        self.map.groups()
    }

    pub fn site_map(&self) -> &SiteMap {
        &self.map
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn mode(&self) -> DisplayMode {
        self.viewport.mode()
    }

    pub fn status(&self) -> ViewportStatus {
        self.viewport.status()
    }

    pub fn markers(&self) -> &[Marker] {
        &self.markers
    }

    pub fn snapshot(&self) -> MarkerSnapshot {
        MarkerSnapshot {
            mode: self.viewport.mode(),
            markers: self.markers.clone(),
        }
    }

    /// Bumped on every store replacement.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn relay_mut(&mut self) -> &mut SelectionRelay {
        &mut self.relay
    }

    pub fn events(&self) -> &[ViewEvent] {
        self.events.events()
    }

    pub fn drain_events(&mut self) -> Vec<ViewEvent> {
        self.events.drain()
    }

    /// Replaces the store and recomputes groups and markers from it.
    pub fn set_store(&mut self, store: SiteStore) {
        self.map = SiteMap::new(*self.map.config(), store);
        self.revision += 1;
        self.rebuild_markers();
    }

    /// Completes the one-time dataset load. A failure leaves an empty store.
    pub fn finish_load(&mut self, result: Result<SiteStore, CatalogError>) {
        match result {
            Ok(store) => {
                info!(sites = store.len(), "sites loaded");
                self.events.emit(ViewEventKind::DatasetLoaded { sites: store.len() });
                self.set_store(store);
            }
            Err(e) => {
                error!("failed to load sites: {e}");
                self.events.emit(ViewEventKind::DatasetFailed {
                    message: e.to_string(),
                });
                self.set_store(SiteStore::new());
            }
        }
    }

    /// Zoom-change notification from the substrate.
    pub fn on_zoom_changed(&mut self, zoom: f64) -> Option<ModeChange> {
        let change = self.viewport.set_zoom(zoom)?;
        debug!(zoom, from = ?change.from, to = ?change.to, "display mode changed");
        self.events.emit(ViewEventKind::ModeChanged {
            zoom,
            mode: change.to,
        });
        self.rebuild_markers();
        Some(change)
    }

    /// Activation (click) on the marker identified by `key`.
    pub fn activate(&mut self, key: &MarkerKey) -> Activation {
        let Some(marker) = self.markers.iter().find(|m| &m.key == key) else {
            return Activation::Unknown;
        };
        match &marker.payload {
            MarkerPayload::Individual { site } => {
                self.relay.on_select(site);
                self.events
                    .emit(ViewEventKind::SiteSelected { site: site.id });
                Activation::Selected(site.id)
            }
            MarkerPayload::Aggregate {
                region, members, ..
            } => Activation::Revealed {
                region: region.clone(),
                members: members.clone(),
            },
        }
    }

    /// Pushes the active marker set to `surface`, touching only what changed.
    pub fn render<S: MarkerSurface + ?Sized>(&mut self, surface: &mut S) -> SyncReport {
        let report = self.sync.apply(surface, &self.markers);
        if !report.is_noop() {
            debug!(
                placed = report.placed,
                restyled = report.restyled,
                moved = report.moved,
                removed = report.removed,
                "markers synced"
            );
        }
        report
    }

    /// Reads the substrate's current zoom and renders onto it.
    pub fn attach<S: MapSubstrate + ?Sized>(&mut self, substrate: &mut S) -> SyncReport {
        self.on_zoom_changed(substrate.zoom());
        self.render(substrate)
    }

    fn rebuild_markers(&mut self) {
        self.markers = self.map.markers(self.viewport.mode());
    }
}

#[cfg(test)]
mod tests {
    use super::{Activation, MapSubstrate, MapView};
    use crate::config::MapConfig;
    use catalog::{CatalogError, Site, SiteStore};
    use foundation::{LatLng, SiteId};
    use layers::markers::{MarkerKey, MarkerKind};
    use layers::symbology::MarkerIcon;
    use layers::sync::MarkerSurface;
    use pretty_assertions::assert_eq;
    use scene::{DisplayMode, SelectionRelay, ViewEventKind};
    use std::cell::RefCell;
    use std::collections::BTreeMap;
    use std::rc::Rc;

    fn site(id: i64, region: &str, lat: f64, lng: f64) -> Site {
        Site {
            id: SiteId(id),
            name: format!("site {id}"),
            region: region.to_string(),
            sub_region: format!("city {id}"),
            lat,
            lng,
            description: format!("about {id}"),
            address: format!("street {id}"),
        }
    }

    fn sample_store() -> SiteStore {
        SiteStore::from_sites(vec![
            site(1, "A", 30.0, 110.0),
            site(2, "A", 32.0, 112.0),
            site(3, "B", 40.0, 120.0),
        ])
    }

    fn detached_view() -> MapView {
        MapView::with_store(MapConfig::default(), SelectionRelay::detached(), sample_store())
    }

    #[derive(Default)]
    struct FakeMap {
        zoom: f64,
        placed: BTreeMap<String, (LatLng, MarkerIcon)>,
        icon_updates: usize,
    }

    impl MarkerSurface for FakeMap {
        fn place(&mut self, key: &MarkerKey, position: LatLng, icon: &MarkerIcon) {
            self.placed.insert(key.to_string(), (position, icon.clone()));
        }
        fn set_icon(&mut self, key: &MarkerKey, icon: &MarkerIcon) {
            self.icon_updates += 1;
            if let Some(entry) = self.placed.get_mut(&key.to_string()) {
                entry.1 = icon.clone();
            }
        }
        fn set_position(&mut self, key: &MarkerKey, position: LatLng) {
            if let Some(entry) = self.placed.get_mut(&key.to_string()) {
                entry.0 = position;
            }
        }
        fn remove(&mut self, key: &MarkerKey) {
            self.placed.remove(&key.to_string());
        }
    }

    impl MapSubstrate for FakeMap {
        fn zoom(&self) -> f64 {
            self.zoom
        }
    }

    #[test]
    fn zoom_switches_between_aggregate_and_individual_sets() {
        let mut view = detached_view();

        view.on_zoom_changed(4.0);
        assert_eq!(view.mode(), DisplayMode::Aggregated);
        let agg: Vec<(MarkerKey, LatLng)> =
            view.markers().iter().map(|m| (m.key.clone(), m.position)).collect();
        assert_eq!(
            agg,
            vec![
                (MarkerKey::Region("A".into()), LatLng::new(31.0, 111.0)),
                (MarkerKey::Region("B".into()), LatLng::new(40.0, 120.0)),
            ]
        );

        view.on_zoom_changed(6.0);
        assert_eq!(view.mode(), DisplayMode::Detailed);
        assert_eq!(view.markers().len(), 3);
        assert!(view.markers().iter().all(|m| m.kind() == MarkerKind::Individual));
    }

    #[test]
    fn threshold_zoom_is_aggregated() {
        let mut view = detached_view();
        view.on_zoom_changed(7.0);
        assert!(view.on_zoom_changed(5.0).is_some());
        assert_eq!(view.mode(), DisplayMode::Aggregated);
    }

    #[test]
    fn mode_flip_does_not_touch_groups() {
        let mut view = detached_view();
        let before = view.groups().clone();
        let revision = view.revision();
        view.on_zoom_changed(8.0);
        view.on_zoom_changed(3.0);
        assert_eq!(view.groups(), &before);
        assert_eq!(view.revision(), revision);
    }

    #[test]
    fn activating_individual_marker_relays_that_site_only() {
        let got: Rc<RefCell<Vec<Site>>> = Rc::default();
        let sink = Rc::clone(&got);
        let relay = SelectionRelay::new(move |s: &Site| sink.borrow_mut().push(s.clone()));
        let mut view = MapView::with_store(MapConfig::default(), relay, sample_store());
        view.on_zoom_changed(6.0);

        let outcome = view.activate(&MarkerKey::Site(SiteId(2)));
        assert_eq!(outcome, Activation::Selected(SiteId(2)));
        assert_eq!(*got.borrow(), vec![site(2, "A", 32.0, 112.0)]);
        assert!(
            view.events()
                .iter()
                .any(|e| e.kind == ViewEventKind::SiteSelected { site: SiteId(2) })
        );
    }

    #[test]
    fn activating_aggregate_reveals_members_without_relaying() {
        let count = Rc::new(RefCell::new(0));
        let c = Rc::clone(&count);
        let relay = SelectionRelay::new(move |_| *c.borrow_mut() += 1);
        let mut view = MapView::with_store(MapConfig::default(), relay, sample_store());

        let outcome = view.activate(&MarkerKey::Region("A".into()));
        let Activation::Revealed { region, members } = outcome else {
            panic!("expected member list");
        };
        assert_eq!(region, "A");
        assert_eq!(members.iter().map(|m| m.id).collect::<Vec<_>>(), vec![SiteId(1), SiteId(2)]);
        assert_eq!(*count.borrow(), 0);
    }

    #[test]
    fn inactive_keys_are_unknown() {
        let mut view = detached_view();
        // aggregated at the default zoom, so site markers are not active
        assert_eq!(view.activate(&MarkerKey::Site(SiteId(1))), Activation::Unknown);
    }

    #[test]
    fn failed_load_leaves_empty_view_in_both_modes() {
        let mut view = MapView::new(MapConfig::default(), SelectionRelay::detached());
        view.finish_load(Err(CatalogError::Parse("bad".into())));
        assert!(view.store().is_empty());
        assert!(view.markers().is_empty());
        view.on_zoom_changed(9.0);
        assert!(view.markers().is_empty());
        assert!(matches!(
            view.events()[0].kind,
            ViewEventKind::DatasetFailed { .. }
        ));
    }

    #[test]
    fn zoom_after_load_sees_loaded_sites() {
        let mut view = MapView::new(MapConfig::default(), SelectionRelay::detached());
        view.on_zoom_changed(8.0);
        assert!(view.markers().is_empty());
        view.finish_load(Ok(sample_store()));
        assert_eq!(view.markers().len(), 3);
        view.on_zoom_changed(4.0);
        assert_eq!(view.markers().len(), 2);
    }

    #[test]
    fn render_restyles_badge_after_reload() {
        let mut map = FakeMap {
            zoom: 4.0,
            ..FakeMap::default()
        };
        let mut view = detached_view();
        let first = view.attach(&mut map);
        assert_eq!(first.placed, 2);
        assert_eq!(map.placed["region-B"].1, MarkerIcon::Badge { count: 1 });

        let mut sites = sample_store().sites().to_vec();
        sites.push(site(4, "B", 42.0, 122.0));
        view.set_store(SiteStore::from_sites(sites));
        let second = view.render(&mut map);
        assert_eq!(second.placed, 0);
        assert_eq!(second.restyled, 1);
        assert_eq!(map.icon_updates, 1);
        assert_eq!(
            map.placed["region-B"],
            (LatLng::new(41.0, 121.0), MarkerIcon::Badge { count: 2 })
        );

        assert!(view.render(&mut map).is_noop());
    }

    #[test]
    fn site_markers_cannot_be_selected_while_aggregated() {
        let count = Rc::new(RefCell::new(0));
        let c = Rc::clone(&count);
        let relay = SelectionRelay::new(move |_| *c.borrow_mut() += 1);
        let mut view = MapView::with_store(MapConfig::default(), relay, sample_store());
        assert_eq!(view.mode(), DisplayMode::Aggregated);

        assert_eq!(view.activate(&MarkerKey::Site(SiteId(2))), Activation::Unknown);
        assert_eq!(*count.borrow(), 0);
        assert!(
            !view
                .events()
                .iter()
                .any(|e| matches!(e.kind, ViewEventKind::SiteSelected { .. }))
        );

        view.on_zoom_changed(6.0);
        assert_eq!(view.activate(&MarkerKey::Site(SiteId(2))), Activation::Selected(SiteId(2)));
        assert_eq!(*count.borrow(), 1);
    }

    #[test]
    fn snapshot_reports_mode_and_markers() {
        let mut view = detached_view();
        view.on_zoom_changed(6.0);
        let snap = view.snapshot();
        assert_eq!(snap.mode, DisplayMode::Detailed);
        assert_eq!(snap.markers, view.markers().to_vec());
    }
}

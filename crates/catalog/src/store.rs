use std::collections::HashSet;
use std::fs;
use std::path::Path;

use foundation::SiteId;
use tracing::{error, info, warn};

use crate::CatalogError;
use crate::site::{Site, SiteDataset};

/// Flat, immutable list of sites loaded from a dataset.
///
/// A store is replaced wholesale on reload, never patched.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct SiteStore {
    sites: Vec<Site>,
}

/// Findings from the load-time scan. Records are kept either way.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct LoadDiagnostics {
    pub out_of_range: Vec<SiteId>,
    pub duplicate_ids: Vec<SiteId>,
}

impl LoadDiagnostics {
    pub fn is_clean(&self) -> bool {
        self.out_of_range.is_empty() && self.duplicate_ids.is_empty()
    }
}

impl SiteStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_sites(sites: Vec<Site>) -> Self {
        let store = Self { sites };
        let diag = store.diagnose();
        for id in &diag.out_of_range {
            warn!(site = %id, "site coordinates outside lat/lng range");
        }
        for id in &diag.duplicate_ids {
            warn!(site = %id, "duplicate site id in dataset");
        }
        store
    }

    pub fn from_dataset(dataset: SiteDataset) -> Self {
        Self::from_sites(dataset.museums)
    }

    pub fn from_json_str(raw: &str) -> Result<Self, CatalogError> {
        let dataset: SiteDataset = serde_json::from_str(raw)?;
        Ok(Self::from_dataset(dataset))
    }

    pub fn from_json_slice(raw: &[u8]) -> Result<Self, CatalogError> {
        let dataset: SiteDataset = serde_json::from_slice(raw)?;
        Ok(Self::from_dataset(dataset))
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path).map_err(|e| CatalogError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;
        let store = Self::from_json_str(&raw)?;
        info!(path = %path.display(), sites = store.len(), "dataset loaded");
        Ok(store)
    }

    /// Like [`SiteStore::load`], but a failure is logged and yields an empty store.
    pub fn load_or_empty(path: impl AsRef<Path>) -> Self {
        Self::load(path).unwrap_or_else(|e| {
            error!("failed to load sites: {e}");
            Self::new()
        })
    }

    pub fn sites(&self) -> &[Site] {
        &self.sites
    }

    pub fn get(&self, id: SiteId) -> Option<&Site> {
        self.sites.iter().find(|s| s.id == id)
    }

    pub fn len(&self) -> usize {
        self.sites.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sites.is_empty()
    }

    pub fn to_dataset(&self) -> SiteDataset {
        SiteDataset {
            museums: self.sites.clone(),
        }
    }

    pub fn diagnose(&self) -> LoadDiagnostics {
        let mut diag = LoadDiagnostics::default();
        let mut seen = HashSet::with_capacity(self.sites.len());
        for site in &self.sites {
            if !site.position().is_in_range() {
                diag.out_of_range.push(site.id);
            }
            if !seen.insert(site.id) {
                diag.duplicate_ids.push(site.id);
            }
        }
        diag
    }
}

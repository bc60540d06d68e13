use serde::Serialize;

/// Which marker set is presented.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DisplayMode {
    /// One marker per region.
    Aggregated,
    /// One marker per site.
    Detailed,
}

impl DisplayMode {
    /// Hard threshold, inclusive on the aggregated side. No hysteresis.
    pub fn for_zoom(zoom: f64, threshold: f64) -> Self {
        if zoom <= threshold {
            DisplayMode::Aggregated
        } else {
            DisplayMode::Detailed
        }
    }

    pub fn hint(self) -> &'static str {
        match self {
            DisplayMode::Aggregated => "Zoom in to see individual sites",
            DisplayMode::Detailed => "Showing individual sites",
        }
    }
}

/// Zoom bounds enforced by the map substrate. Informational only here.
#[derive(Debug, Copy, Clone, PartialEq, Serialize)]
pub struct ZoomRange {
    pub min: f64,
    pub max: f64,
}

impl ZoomRange {
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct ModeChange {
    pub from: DisplayMode,
    pub to: DisplayMode,
}

/// Status overlay content for the current view.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ViewportStatus {
    pub zoom: f64,
    pub mode: DisplayMode,
    pub hint: &'static str,
}

/// Current zoom and the display mode derived from it.
///
/// Mutated only through zoom-change notifications.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Viewport {
    zoom: f64,
    threshold: f64,
    mode: DisplayMode,
}

impl Viewport {
    pub fn new(initial_zoom: f64, threshold: f64) -> Self {
        Self {
            zoom: initial_zoom,
            threshold,
            mode: DisplayMode::for_zoom(initial_zoom, threshold),
        }
    }

    pub fn zoom(&self) -> f64 {
        self.zoom
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    pub fn mode(&self) -> DisplayMode {
        self.mode
    }

    pub fn is_aggregated(&self) -> bool {
        self.mode == DisplayMode::Aggregated
    }

    /// Applies a zoom-change notification.
    ///
    /// Returns the transition when the display mode flips.
    pub fn set_zoom(&mut self, zoom: f64) -> Option<ModeChange> {
        self.zoom = zoom;
        let next = DisplayMode::for_zoom(zoom, self.threshold);
        if next == self.mode {
            return None;
        }
        let change = ModeChange {
            from: self.mode,
            to: next,
        };
        self.mode = next;
        Some(change)
    }

    pub fn status(&self) -> ViewportStatus {
        ViewportStatus {
            zoom: self.zoom,
            mode: self.mode,
            hint: self.mode.hint(),
        }
    }
}

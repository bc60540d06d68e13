use serde::Serialize;

pub const MARKER_FILL: &str = "#f97316";
pub const MARKER_RING: &str = "#1e40af";

#[derive(Debug, Copy, Clone, PartialEq, Serialize)]
pub struct IconStyle {
    pub size_px: [u32; 2],
    pub anchor_px: [u32; 2],
    pub fill: &'static str,
}

/// Visual treatment of a marker.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum MarkerIcon {
    /// Round badge with the member count of a region.
    Badge { count: usize },
    /// Highlighted dot for a single site, pulsing ring.
    Pulse,
}

impl MarkerIcon {
    pub const BADGE_STYLE: IconStyle = IconStyle {
        size_px: [40, 40],
        anchor_px: [20, 20],
        fill: MARKER_FILL,
    };

    pub const PULSE_STYLE: IconStyle = IconStyle {
        size_px: [24, 24],
        anchor_px: [12, 12],
        fill: MARKER_FILL,
    };

    /// Pulse animation period.
    pub const PULSE_PERIOD_S: f32 = 1.5;

    pub fn style(&self) -> IconStyle {
        match self {
            MarkerIcon::Badge { .. } => Self::BADGE_STYLE,
            MarkerIcon::Pulse => Self::PULSE_STYLE,
        }
    }

    /// Self-contained HTML for substrates that take HTML marker bodies.
    pub fn to_html(&self) -> String {
        let style = self.style();
        let [w, h] = style.size_px;
        match self {
            MarkerIcon::Badge { count } => format!(
                "<div style=\"width:{w}px;height:{h}px;background:{fill};border-radius:50%;\
                 display:flex;align-items:center;justify-content:center;color:white;\
                 font-weight:bold;font-size:16px;box-shadow:0 2px 8px rgba(0,0,0,0.3);\
                 cursor:pointer\">{count}</div>",
                fill = style.fill,
            ),
            MarkerIcon::Pulse => format!(
                "<div style=\"width:{w}px;height:{h}px;background:{fill};border-radius:50%;\
                 border:2px solid white;box-shadow:0 0 0 2px {ring},0 2px 8px rgba(0,0,0,0.3);\
                 animation:pulse {period}s infinite\"></div>",
                fill = style.fill,
                ring = MARKER_RING,
                period = Self::PULSE_PERIOD_S,
            ),
        }
    }
}

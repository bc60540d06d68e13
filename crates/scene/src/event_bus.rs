use foundation::SiteId;

use crate::viewport::DisplayMode;

#[derive(Debug, Clone, PartialEq)]
pub enum ViewEventKind {
    DatasetLoaded { sites: usize },
    DatasetFailed { message: String },
    ModeChanged { zoom: f64, mode: DisplayMode },
    SiteSelected { site: SiteId },
}

/// Recorded view event for traceability.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewEvent {
    pub seq: u64,
    pub kind: ViewEventKind,
}

#[derive(Debug, Default)]
pub struct EventBus {
    next_seq: u64,
    events: Vec<ViewEvent>,
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn emit(&mut self, kind: ViewEventKind) {
        self.events.push(ViewEvent {
            seq: self.next_seq,
            kind,
        });
        self.next_seq += 1;
    }

    pub fn events(&self) -> &[ViewEvent] {
        &self.events
    }

    pub fn drain(&mut self) -> Vec<ViewEvent> {
        std::mem::take(&mut self.events)
    }
}

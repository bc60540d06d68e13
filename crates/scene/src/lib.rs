pub mod event_bus;
pub mod selection;
pub mod viewport;

pub use event_bus::*;
pub use selection::*;
pub use viewport::*;

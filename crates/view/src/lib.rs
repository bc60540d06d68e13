pub mod config;
pub mod map_view;
pub mod site_map;

pub use config::*;
pub use map_view::*;
pub use site_map::*;

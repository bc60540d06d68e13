pub mod aggregation;
pub mod markers;
pub mod symbology;
pub mod sync;

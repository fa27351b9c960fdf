pub mod asset_resolver;
pub mod map_composer;
pub mod marker_builder;
pub mod province_filter;

pub use asset_resolver::{StaticAsset, StaticAssetResolver};
pub use map_composer::{ComposedMap, MapComposer};
pub use marker_builder::{MarkerBatch, MarkerBuilder, MarkerOutcome};
pub use province_filter::{filter_by_province, province_options};

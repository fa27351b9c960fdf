pub mod dataset_reader;
pub mod geo_layer;

pub use dataset_reader::{DatasetLoad, DatasetReader};
pub use geo_layer::{GeoLayer, GeoLayerCache};

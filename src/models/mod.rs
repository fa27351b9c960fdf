pub mod dataset;
pub mod map;
pub mod notice;
pub mod selection;

pub use dataset::{Dataset, Row};
pub use map::{MapView, MarkerCluster, MarkerIcon, OverlayLayer, PolygonStyle, StationMarker, TileLayer};
pub use notice::{Notice, NoticeLevel};
pub use selection::{BasemapType, InstrumentType, ProvinceFilter, Selection, SelectionQuery};

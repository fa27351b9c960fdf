use crate::readers::GeoLayer;
use crate::utils::constants::{
    MAP_CENTER_LAT, MAP_CENTER_LON, MAP_HEIGHT_PX, MAP_WIDTH_PX, MAP_ZOOM, MARKER_COLOR,
    MARKER_ICON, MARKER_LAYER_NAME, OVERLAY_LAYER_NAME, TILE_ATTRIBUTION, TILE_NAME, TILE_URL,
};
use serde::Serialize;
use std::sync::Arc;

/// Everything the browser needs to draw the interactive map.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MapView {
    /// `[lat, lon]`
    pub center: [f64; 2],
    pub zoom: u8,
    pub width: u32,
    pub height: u32,
    pub tiles: TileLayer,
    pub overlay: Option<OverlayLayer>,
    pub cluster: Option<MarkerCluster>,
    pub layer_control: bool,
}

impl MapView {
    pub fn new() -> Self {
        Self {
            center: [MAP_CENTER_LAT, MAP_CENTER_LON],
            zoom: MAP_ZOOM,
            width: MAP_WIDTH_PX,
            height: MAP_HEIGHT_PX,
            tiles: TileLayer::default(),
            overlay: None,
            cluster: None,
            layer_control: false,
        }
    }

    pub fn marker_count(&self) -> usize {
        self.cluster.as_ref().map_or(0, |c| c.markers.len())
    }
}

impl Default for MapView {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TileLayer {
    pub name: String,
    pub url: String,
    pub attribution: String,
}

impl Default for TileLayer {
    fn default() -> Self {
        Self {
            name: TILE_NAME.to_string(),
            url: TILE_URL.to_string(),
            attribution: TILE_ATTRIBUTION.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PolygonStyle {
    pub fill_color: String,
    pub color: String,
    pub weight: u32,
}

impl PolygonStyle {
    /// Unfilled polygons with a thin black outline
    pub fn outline() -> Self {
        Self {
            fill_color: "none".to_string(),
            color: "black".to_string(),
            weight: 1,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OverlayLayer {
    pub name: String,
    pub style: PolygonStyle,
    pub layer: Arc<GeoLayer>,
}

impl OverlayLayer {
    pub fn zom(layer: Arc<GeoLayer>) -> Self {
        Self {
            name: OVERLAY_LAYER_NAME.to_string(),
            style: PolygonStyle::outline(),
            layer,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MarkerIcon {
    pub color: String,
    pub icon: String,
}

impl Default for MarkerIcon {
    fn default() -> Self {
        Self {
            color: MARKER_COLOR.to_string(),
            icon: MARKER_ICON.to_string(),
        }
    }
}

/// One station pin with its popup HTML.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StationMarker {
    pub latitude: f64,
    pub longitude: f64,
    pub name: String,
    pub province: String,
    pub popup: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MarkerCluster {
    pub name: String,
    pub icon: MarkerIcon,
    pub markers: Vec<StationMarker>,
}

impl MarkerCluster {
    pub fn new(markers: Vec<StationMarker>) -> Self {
        Self {
            name: MARKER_LAYER_NAME.to_string(),
            icon: MarkerIcon::default(),
            markers,
        }
    }
}

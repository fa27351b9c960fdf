use crate::models::{BasemapType, Dataset, MapView, MarkerCluster, Notice, OverlayLayer};
use crate::processors::marker_builder::{MarkerBuilder, MarkerOutcome};
use crate::readers::GeoLayerCache;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{debug, warn};

/// A composed map together with the notices raised while building it.
#[derive(Debug, Clone, PartialEq)]
pub struct ComposedMap {
    pub map: MapView,
    pub notices: Vec<Notice>,
    pub markers: MarkerOutcome,
}

pub struct MapComposer {
    geojson_path: PathBuf,
    cache: Arc<GeoLayerCache>,
    markers: MarkerBuilder,
}

impl MapComposer {
    pub fn new(geojson_path: impl Into<PathBuf>, cache: Arc<GeoLayerCache>) -> Self {
        Self {
            geojson_path: geojson_path.into(),
            cache,
            markers: MarkerBuilder::new(),
        }
    }

    pub fn compose(&self, basemap: BasemapType, stations: &Dataset) -> ComposedMap {
        let mut map = MapView::new();
        let mut notices = Vec::new();

        if basemap.is_overlay() {
            match self.cache.get_or_load(&self.geojson_path) {
                Ok(layer) => {
                    map.overlay = Some(OverlayLayer::zom(layer));
                    notices.push(Notice::success("Layer ZOM berhasil dimuat"));
                }
                Err(err) => {
                    warn!(
                        path = %self.geojson_path.display(),
                        error = %err,
                        "Overlay layer unavailable"
                    );
                    notices.push(Notice::warning(format!("Gagal memuat layer ZOM: {}", err)));
                }
            }
        } else {
            notices.push(Notice::info("Basemap: Provinsi"));
        }

        let markers = self.markers.build(stations);
        match &markers {
            MarkerOutcome::Markers(batch) => {
                debug!(
                    markers = batch.markers.len(),
                    skipped = batch.skipped,
                    "Placed station markers"
                );
                map.cluster = Some(MarkerCluster::new(batch.markers.clone()));
            }
            outcome => notices.extend(outcome.notice()),
        }

        map.layer_control = true;

        ComposedMap {
            map,
            notices,
            markers,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::NoticeLevel;
    use tempfile::TempDir;

    const ONE_ZONE: &str = r#"{"type":"FeatureCollection","features":[{"type":"Feature","properties":{},"geometry":{"type":"Polygon","coordinates":[[[95.0,5.0],[96.0,5.0],[96.0,6.0],[95.0,5.0]]]}}]}"#;

    fn stations() -> Dataset {
        Dataset::new(
            vec![
                "latt_station".to_string(),
                "long_station".to_string(),
                "name_station".to_string(),
                "nama_propinsi".to_string(),
            ],
            vec![
                vec![
                    Some("-6.2".to_string()),
                    Some("106.8".to_string()),
                    Some("Station A".to_string()),
                    Some("DKI Jakarta".to_string()),
                ],
                vec![
                    Some("bad".to_string()),
                    Some("106.8".to_string()),
                    Some("Station B".to_string()),
                    Some("DKI Jakarta".to_string()),
                ],
            ],
        )
    }

    fn levels(composed: &ComposedMap) -> Vec<NoticeLevel> {
        composed.notices.iter().map(|n| n.level).collect()
    }

    #[test]
    fn test_overlay_mode_with_layer() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("zom.geojson");
        std::fs::write(&path, ONE_ZONE).unwrap();

        let composer = MapComposer::new(&path, Arc::new(GeoLayerCache::new()));
        let composed = composer.compose(BasemapType::Zom, &stations());

        let overlay = composed.map.overlay.as_ref().unwrap();
        assert_eq!(overlay.name, "ZOM");
        assert_eq!(overlay.style.fill_color, "none");
        assert_eq!(overlay.style.color, "black");
        assert_eq!(overlay.style.weight, 1);
        assert_eq!(composed.map.marker_count(), 1);
        assert!(composed.map.layer_control);
        assert_eq!(levels(&composed), vec![NoticeLevel::Success]);
    }

    #[test]
    fn test_overlay_failure_still_renders_markers() {
        let temp_dir = TempDir::new().unwrap();
        let composer = MapComposer::new(
            temp_dir.path().join("missing.geojson"),
            Arc::new(GeoLayerCache::new()),
        );

        let composed = composer.compose(BasemapType::Zom, &stations());

        assert!(composed.map.overlay.is_none());
        assert_eq!(composed.map.marker_count(), 1);
        assert_eq!(levels(&composed), vec![NoticeLevel::Warning]);
        assert!(composed.notices[0].message.starts_with("Gagal memuat layer ZOM:"));
    }

    #[test]
    fn test_plain_mode_skips_overlay() {
        let composer = MapComposer::new("unused.geojson", Arc::new(GeoLayerCache::new()));
        let composed = composer.compose(BasemapType::Provinsi, &Dataset::empty());

        assert!(composed.map.overlay.is_none());
        assert!(composed.map.cluster.is_none());
        assert_eq!(composed.map.center, [-2.5, 118.0]);
        assert_eq!(composed.map.zoom, 5);
        assert_eq!(composed.markers, MarkerOutcome::Empty);
        assert_eq!(
            composed.notices,
            vec![
                Notice::info("Basemap: Provinsi"),
                Notice::info("Tidak ada data untuk ditampilkan."),
            ]
        );
    }

    #[test]
    fn test_missing_columns_warns_once() {
        let dataset = Dataset::new(
            vec!["latt_station".to_string(), "name_station".to_string()],
            vec![vec![Some("-6.2".to_string()), Some("Station A".to_string())]],
        );
        let composer = MapComposer::new("unused.geojson", Arc::new(GeoLayerCache::new()));
        let composed = composer.compose(BasemapType::Provinsi, &dataset);

        assert_eq!(composed.map.marker_count(), 0);
        assert_eq!(
            composed.markers,
            MarkerOutcome::MissingColumns(vec!["long_station".to_string()])
        );
        let warnings = composed
            .notices
            .iter()
            .filter(|n| n.level == NoticeLevel::Warning)
            .count();
        assert_eq!(warnings, 1);
    }
}

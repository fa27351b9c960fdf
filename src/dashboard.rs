//! One render pass of the dashboard: selections in, complete view out.
//!
//! Every request rebuilds the view from the files on disk. The only state
//! carried between passes is the shared geo-layer cache.

use crate::models::{
    BasemapType, InstrumentType, MapView, Notice, ProvinceFilter, Selection, SelectionQuery,
};
use crate::processors::{
    filter_by_province, province_options, MapComposer, MarkerOutcome, StaticAsset,
    StaticAssetResolver,
};
use crate::readers::{DatasetReader, GeoLayerCache};
use crate::settings::Settings;
use crate::utils::constants::{PAGE_TITLE, PROVINCE_ALL};
use serde::Serialize;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::debug;

/// Row counts for the dataset behind the current view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DatasetSummary {
    pub path: PathBuf,
    pub rows: usize,
    pub filtered_rows: usize,
    pub skipped_lines: usize,
    pub markers: usize,
    pub skipped_markers: usize,
    pub missing_columns: Vec<String>,
}

/// Everything a page shows for one set of selections.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardView {
    pub title: &'static str,
    pub selection: Selection,
    pub instrument_options: Vec<&'static str>,
    pub basemap_options: Vec<&'static str>,
    /// Province dropdown entries, the "all" sentinel first
    pub province_options: Vec<String>,
    pub dataset: DatasetSummary,
    /// Messages shown above the map, in the order they were raised
    pub notices: Vec<Notice>,
    pub map: MapView,
    pub asset: StaticAsset,
    pub asset_notice: Option<Notice>,
}

pub struct Dashboard {
    reader: DatasetReader,
    composer: MapComposer,
    assets: StaticAssetResolver,
}

impl Dashboard {
    pub fn new(settings: &Settings, cache: Arc<GeoLayerCache>) -> Self {
        Self {
            reader: DatasetReader::new(settings.data_path()),
            composer: MapComposer::new(settings.geojson_file(), cache),
            assets: StaticAssetResolver::new(settings.image_path()),
        }
    }

    pub fn from_settings(settings: &Settings) -> Self {
        Self::new(settings, Arc::new(GeoLayerCache::new()))
    }

    pub fn render(&self, query: &SelectionQuery) -> DashboardView {
        let mut selection = Selection::from_query(query);
        let mut notices = Vec::new();

        let load = self.reader.load(selection.instrument);
        notices.extend(load.notice());

        let provinces = province_options(&load.dataset);
        if let ProvinceFilter::Province(name) = &selection.province {
            if !provinces.contains(name) {
                debug!(province = %name, "Province not in current dataset, showing all");
                selection.province = ProvinceFilter::All;
            }
        }

        let filtered = filter_by_province(&load.dataset, &selection.province);
        let composed = self.composer.compose(selection.basemap, &filtered);
        notices.extend(composed.notices);

        let (markers, skipped_markers, missing_columns) = match composed.markers {
            MarkerOutcome::Markers(batch) => (batch.markers.len(), batch.skipped, Vec::new()),
            MarkerOutcome::MissingColumns(missing) => (0, 0, missing),
            MarkerOutcome::Empty => (0, 0, Vec::new()),
        };

        let asset = self.static_asset(selection.basemap, selection.instrument);
        let asset_notice = asset.notice();

        let mut province_choices = Vec::with_capacity(provinces.len() + 1);
        province_choices.push(PROVINCE_ALL.to_string());
        province_choices.extend(provinces);

        DashboardView {
            title: PAGE_TITLE,
            instrument_options: InstrumentType::ALL.iter().map(|i| i.code()).collect(),
            basemap_options: BasemapType::ALL.iter().map(|b| b.code()).collect(),
            province_options: province_choices,
            dataset: DatasetSummary {
                path: load.path,
                rows: load.dataset.len(),
                filtered_rows: filtered.len(),
                skipped_lines: load.skipped_lines,
                markers,
                skipped_markers,
                missing_columns,
            },
            selection,
            notices,
            map: composed.map,
            asset,
            asset_notice,
        }
    }

    pub fn static_asset(&self, basemap: BasemapType, instrument: InstrumentType) -> StaticAsset {
        self.assets.resolve(basemap, instrument)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::NoticeLevel;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    const AWS_CSV: &str = "latt_station;long_station;name_station;nama_propinsi\n\
        -6.2;106.8;Station A;DKI Jakarta\n\
        bad;106.8;Station B;DKI Jakarta\n\
        -6.6;106.7;Station C;Jawa Barat\n";

    fn fixture() -> (TempDir, Settings) {
        let temp_dir = TempDir::new().unwrap();
        std::fs::create_dir_all(temp_dir.path().join("data")).unwrap();
        std::fs::create_dir_all(temp_dir.path().join("image")).unwrap();
        std::fs::write(temp_dir.path().join("data/aws.csv"), AWS_CSV).unwrap();
        let settings = Settings::default().with_root(temp_dir.path());
        (temp_dir, settings)
    }

    fn query(instrument: &str, basemap: &str, province: Option<&str>) -> SelectionQuery {
        SelectionQuery {
            instrument: Some(instrument.to_string()),
            basemap: Some(basemap.to_string()),
            province: province.map(str::to_string),
        }
    }

    #[test]
    fn test_render_all_provinces() {
        let (_dir, settings) = fixture();
        let view = Dashboard::from_settings(&settings).render(&query("AWS", "Provinsi", None));

        assert_eq!(
            view.province_options,
            vec!["Semua", "DKI Jakarta", "Jawa Barat"]
        );
        assert_eq!(view.dataset.rows, 3);
        assert_eq!(view.dataset.filtered_rows, 3);
        assert_eq!(view.dataset.markers, 2);
        assert_eq!(view.dataset.skipped_markers, 1);
        assert_eq!(view.map.marker_count(), 2);
        assert_eq!(view.notices, vec![Notice::info("Basemap: Provinsi")]);
        assert_eq!(view.asset.file_name, "shp_AWS.png");
        assert_eq!(
            view.asset_notice,
            Some(Notice::warning("Peta statis untuk AWS dengan Provinsi belum tersedia."))
        );
    }

    #[test]
    fn test_render_single_province() {
        let (_dir, settings) = fixture();
        let view = Dashboard::from_settings(&settings).render(&query(
            "AWS",
            "Provinsi",
            Some("Jawa Barat"),
        ));

        assert_eq!(view.selection.province, ProvinceFilter::from("Jawa Barat"));
        assert_eq!(view.dataset.filtered_rows, 1);
        assert_eq!(view.map.marker_count(), 1);
    }

    #[test]
    fn test_stale_province_resets_to_all() {
        let (_dir, settings) = fixture();
        let view =
            Dashboard::from_settings(&settings).render(&query("AWS", "Provinsi", Some("Papua")));

        assert!(view.selection.province.is_all());
        assert_eq!(view.dataset.filtered_rows, 3);
    }

    #[test]
    fn test_missing_dataset_and_layer() {
        let (_dir, settings) = fixture();
        let view = Dashboard::from_settings(&settings).render(&query("ARG", "ZOM", None));

        let levels: Vec<_> = view.notices.iter().map(|n| n.level).collect();
        assert_eq!(
            levels,
            vec![NoticeLevel::Error, NoticeLevel::Warning, NoticeLevel::Info]
        );
        assert_eq!(view.province_options, vec!["Semua"]);
        assert_eq!(view.dataset.rows, 0);
        assert!(view.map.overlay.is_none());
        assert!(view.map.layer_control);
        assert_eq!(view.asset.file_name, "zom_ARG.png");
    }

    #[test]
    fn test_static_image_available() {
        let (dir, settings) = fixture();
        std::fs::write(dir.path().join("image/zom_AWS.png"), b"png").unwrap();

        let view = Dashboard::from_settings(&settings).render(&query("aws", "zom", None));
        assert!(view.asset.available);
        assert!(view.asset_notice.is_none());
    }
}

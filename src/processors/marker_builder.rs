use crate::models::{Dataset, Notice, Row, StationMarker};
use crate::utils::constants::{
    COLUMN_LATITUDE, COLUMN_LONGITUDE, COLUMN_NAME, COLUMN_PROVINCE, PROVINCE_UNKNOWN,
    REQUIRED_COLUMNS,
};
use crate::utils::coordinates::parse_position;
use crate::utils::html::escape_html;
use tracing::{debug, warn};

/// Markers built from a dataset plus the number of rows that were dropped.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct MarkerBatch {
    pub markers: Vec<StationMarker>,
    pub skipped: usize,
}

/// What the marker stage produced for one dataset.
#[derive(Debug, Clone, PartialEq)]
pub enum MarkerOutcome {
    Markers(MarkerBatch),
    MissingColumns(Vec<String>),
    Empty,
}

impl MarkerOutcome {
    pub fn notice(&self) -> Option<Notice> {
        match self {
            MarkerOutcome::Markers(_) => None,
            MarkerOutcome::MissingColumns(_) => Some(Notice::warning(
                "Data tidak lengkap: Pastikan kolom 'latt_station', 'long_station', dan 'name_station' ada.",
            )),
            MarkerOutcome::Empty => Some(Notice::info("Tidak ada data untuk ditampilkan.")),
        }
    }
}

pub struct MarkerBuilder {
    unknown_province: String,
}

impl MarkerBuilder {
    pub fn new() -> Self {
        Self {
            unknown_province: PROVINCE_UNKNOWN.to_string(),
        }
    }

    #[cfg(test)]
    fn with_unknown_province(unknown_province: impl Into<String>) -> Self {
        Self {
            unknown_province: unknown_province.into(),
        }
    }

    /// Check the dataset shape and build markers when it has the required columns
    pub fn build(&self, dataset: &Dataset) -> MarkerOutcome {
        if dataset.is_empty() {
            return MarkerOutcome::Empty;
        }

        let missing = dataset.missing_columns(&REQUIRED_COLUMNS);
        if !missing.is_empty() {
            warn!(missing = ?missing, "Dataset lacks required station columns");
            return MarkerOutcome::MissingColumns(missing);
        }

        MarkerOutcome::Markers(self.build_markers(dataset))
    }

    /// Parse-or-skip every row; rows that cannot be placed are counted, not fatal
    pub fn build_markers(&self, dataset: &Dataset) -> MarkerBatch {
        let mut batch = MarkerBatch::default();

        for row in dataset.rows() {
            match self.marker_from_row(&row) {
                Some(marker) => batch.markers.push(marker),
                None => batch.skipped += 1,
            }
        }

        if batch.skipped > 0 {
            debug!(
                markers = batch.markers.len(),
                skipped = batch.skipped,
                "Skipped rows without a valid position or name"
            );
        }

        batch
    }

    fn marker_from_row(&self, row: &Row<'_>) -> Option<StationMarker> {
        let (latitude, longitude) =
            parse_position(row.get(COLUMN_LATITUDE), row.get(COLUMN_LONGITUDE))?;
        let name = row.get(COLUMN_NAME)?;
        let province = row
            .get(COLUMN_PROVINCE)
            .unwrap_or(self.unknown_province.as_str());

        let popup = format!(
            "<b>{}</b><br>Provinsi: {}",
            escape_html(name),
            escape_html(province)
        );

        Some(StationMarker {
            latitude,
            longitude,
            name: name.to_string(),
            province: province.to_string(),
            popup,
        })
    }
}

impl Default for MarkerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

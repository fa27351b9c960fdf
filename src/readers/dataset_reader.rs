use crate::error::{DashboardError, Result};
use crate::models::{Dataset, InstrumentType, Notice};
use crate::utils::constants::DATASET_DELIMITER;
use csv::ReaderBuilder;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Cell values read as null, in addition to the empty string.
const NULL_MARKERS: [&str; 18] = [
    "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND", "1.#QNAN",
    "<NA>", "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

/// Result of loading one instrument dataset. Never an error: failures leave
/// an empty dataset and keep the cause for display.
#[derive(Debug)]
pub struct DatasetLoad {
    pub path: PathBuf,
    pub dataset: Dataset,
    pub skipped_lines: usize,
    pub error: Option<DashboardError>,
}

impl DatasetLoad {
    pub fn notice(&self) -> Option<Notice> {
        self.error
            .as_ref()
            .map(|err| Notice::error(format!("Gagal memuat data CSV: {}", err)))
    }
}

pub struct DatasetReader {
    data_dir: PathBuf,
}

impl DatasetReader {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    /// `<data_dir>/<instrument lower-case>.csv`
    pub fn dataset_path(&self, instrument: InstrumentType) -> PathBuf {
        self.data_dir.join(instrument.dataset_file_name())
    }

    /// Load the dataset for `instrument`, turning any failure into an empty table
    pub fn load(&self, instrument: InstrumentType) -> DatasetLoad {
        let path = self.dataset_path(instrument);

        match self.read_dataset(&path) {
            Ok((dataset, skipped_lines)) => {
                debug!(
                    path = %path.display(),
                    rows = dataset.len(),
                    skipped_lines,
                    "Loaded station dataset"
                );
                DatasetLoad {
                    path,
                    dataset,
                    skipped_lines,
                    error: None,
                }
            }
            Err(err) => {
                warn!(path = %path.display(), error = %err, "Failed to load station dataset");
                DatasetLoad {
                    path,
                    dataset: Dataset::empty(),
                    skipped_lines: 0,
                    error: Some(err),
                }
            }
        }
    }

    /// Read a delimited station file, returning the table and the number of
    /// malformed lines that were skipped
    pub fn read_dataset(&self, path: &Path) -> Result<(Dataset, usize)> {
        let mut reader = ReaderBuilder::new()
            .delimiter(DATASET_DELIMITER)
            .has_headers(true)
            .flexible(true)
            .from_path(path)?;

        let columns: Vec<String> = reader
            .headers()?
            .iter()
            .map(|header| header.trim().to_string())
            .collect();

        if columns.is_empty() || columns.iter().all(|c| c.is_empty()) {
            return Err(DashboardError::NoColumns(path.display().to_string()));
        }

        let mut rows = Vec::new();
        let mut skipped_lines = 0;

        for record_result in reader.records() {
            let record = record_result?;

            // Lines with more fields than the header are malformed
            if record.len() > columns.len() {
                skipped_lines += 1;
                debug!(
                    line = record.position().map(|p| p.line()),
                    fields = record.len(),
                    expected = columns.len(),
                    "Skipping malformed line"
                );
                continue;
            }

            rows.push(record.iter().map(parse_cell).collect());
        }

        Ok((Dataset::new(columns, rows), skipped_lines))
    }
}

fn parse_cell(raw: &str) -> Option<String> {
    if raw.is_empty() || NULL_MARKERS.contains(&raw) {
        None
    } else {
        Some(raw.to_string())
    }
}

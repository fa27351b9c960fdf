use crate::models::{BasemapType, InstrumentType, Notice};
use crate::utils::constants::IMAGE_MIME;
use crate::utils::filename::static_image_filename;
use serde::Serialize;
use std::path::PathBuf;

/// The pre-rendered image expected for a (basemap, instrument) combination.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StaticAsset {
    pub instrument: InstrumentType,
    pub basemap: BasemapType,
    pub file_name: String,
    pub path: PathBuf,
    pub mime: &'static str,
    /// Checked when the asset was resolved; never cached
    pub available: bool,
}

impl StaticAsset {
    /// "AWS dengan ZOM"
    pub fn map_label(&self) -> String {
        format!("{} dengan {}", self.instrument, self.basemap)
    }

    pub fn prompt(&self) -> String {
        format!("Silakan download peta {} berikut:", self.map_label())
    }

    pub fn button_label(&self) -> String {
        format!("Download Peta {}", self.instrument)
    }

    pub fn notice(&self) -> Option<Notice> {
        if self.available {
            None
        } else {
            Some(Notice::warning(format!(
                "Peta statis untuk {} belum tersedia.",
                self.map_label()
            )))
        }
    }
}

pub struct StaticAssetResolver {
    image_dir: PathBuf,
}

impl StaticAssetResolver {
    pub fn new(image_dir: impl Into<PathBuf>) -> Self {
        Self {
            image_dir: image_dir.into(),
        }
    }

    pub fn resolve(&self, basemap: BasemapType, instrument: InstrumentType) -> StaticAsset {
        let file_name = static_image_filename(basemap, instrument);
        let path = self.image_dir.join(&file_name);
        let available = path.is_file();

        StaticAsset {
            instrument,
            basemap,
            file_name,
            path,
            mime: IMAGE_MIME,
            available,
        }
    }
}

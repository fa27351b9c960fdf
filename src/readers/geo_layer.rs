use crate::error::Result;
use geojson::GeoJson;
use serde::Serialize;
use std::collections::HashMap;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock};
use tracing::debug;

/// A polygon boundary collection read from a GeoJSON file.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GeoLayer {
    pub path: PathBuf,
    pub feature_count: usize,
    #[serde(rename = "data")]
    pub geojson: GeoJson,
}

impl GeoLayer {
    pub fn read(path: &Path) -> Result<Self> {
        let file = File::open(path)?;
        let geojson =
            GeoJson::from_reader(BufReader::new(file)).map_err(geojson::Error::from)?;

        let feature_count = match &geojson {
            GeoJson::FeatureCollection(collection) => collection.features.len(),
            GeoJson::Feature(_) | GeoJson::Geometry(_) => 1,
        };

        Ok(Self {
            path: path.to_path_buf(),
            feature_count,
            geojson,
        })
    }
}

/// Process-wide cache of loaded layers, keyed by path.
///
/// Each path is read at most once successfully; entries are never replaced
/// or evicted. Failed reads are not cached, so a later call retries.
#[derive(Debug, Default)]
pub struct GeoLayerCache {
    layers: RwLock<HashMap<PathBuf, Arc<GeoLayer>>>,
}

impl GeoLayerCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get_or_load(&self, path: &Path) -> Result<Arc<GeoLayer>> {
        if let Some(layer) = self.cached(path) {
            debug!(path = %path.display(), "Geo layer cache hit");
            return Ok(layer);
        }

        let mut layers = match self.layers.write() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };

        // Another caller may have finished loading while we waited for the lock
        if let Some(layer) = layers.get(path) {
            return Ok(Arc::clone(layer));
        }

        let layer = Arc::new(GeoLayer::read(path)?);
        debug!(
            path = %path.display(),
            features = layer.feature_count,
            "Loaded geo layer"
        );
        layers.insert(path.to_path_buf(), Arc::clone(&layer));

        Ok(layer)
    }

    pub fn cached(&self, path: &Path) -> Option<Arc<GeoLayer>> {
        let layers = match self.layers.read() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        layers.get(path).cloned()
    }

    pub fn len(&self) -> usize {
        match self.layers.read() {
            Ok(guard) => guard.len(),
            Err(poisoned) => poisoned.into_inner().len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

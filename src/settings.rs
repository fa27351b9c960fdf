use crate::error::Result;
use crate::utils::constants::{
    CONFIG_FILE, DATA_DIR, DEFAULT_HOST, DEFAULT_PORT, GEOJSON_PATH, IMAGE_DIR,
};
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use validator::Validate;

/// Deployment settings. Paths other than `root` are resolved against `root`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct Settings {
    pub root: PathBuf,
    pub data_dir: PathBuf,
    pub image_dir: PathBuf,
    pub geojson_path: PathBuf,

    #[validate(nested)]
    pub server: ServerSettings,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct ServerSettings {
    pub host: String,

    #[validate(range(min = 1))]
    pub port: u16,

    #[validate(range(min = 1, max = 256))]
    pub workers: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            root: PathBuf::from("."),
            data_dir: PathBuf::from(DATA_DIR),
            image_dir: PathBuf::from(IMAGE_DIR),
            geojson_path: PathBuf::from(GEOJSON_PATH),
            server: ServerSettings::default(),
        }
    }
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            workers: num_cpus::get().clamp(1, 256),
        }
    }
}

impl Settings {
    /// Layer defaults, an optional TOML file and `STATION_MAP__*` environment
    /// variables, then validate the result.
    ///
    /// Without an explicit `config_file`, `station-map.toml` in the working
    /// directory is used when present.
    pub fn load(config_file: Option<&Path>) -> Result<Self> {
        let defaults = Settings::default();

        let mut builder = Config::builder()
            .set_default("root", path_value(&defaults.root))?
            .set_default("data_dir", path_value(&defaults.data_dir))?
            .set_default("image_dir", path_value(&defaults.image_dir))?
            .set_default("geojson_path", path_value(&defaults.geojson_path))?
            .set_default("server.host", defaults.server.host.clone())?
            .set_default("server.port", i64::from(defaults.server.port))?
            .set_default("server.workers", defaults.server.workers as i64)?;

        builder = match config_file {
            Some(path) => builder.add_source(File::from(path).required(true)),
            None => builder.add_source(File::with_name(CONFIG_FILE).required(false)),
        };

        let settings: Settings = builder
            .add_source(
                Environment::with_prefix("STATION_MAP")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()?;

        settings.validate()?;
        Ok(settings)
    }

    pub fn with_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.root = root.into();
        self
    }

    pub fn data_path(&self) -> PathBuf {
        self.root.join(&self.data_dir)
    }

    pub fn image_path(&self) -> PathBuf {
        self.root.join(&self.image_dir)
    }

    pub fn geojson_file(&self) -> PathBuf {
        self.root.join(&self.geojson_path)
    }
}

fn path_value(path: &Path) -> String {
    path.to_string_lossy().into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DashboardError;
    use std::io::Write;
    use std::sync::Mutex;
    use tempfile::NamedTempFile;

    // Every load reads the process environment
    static ENV_LOCK: Mutex<()> = Mutex::new(());

    fn env_guard() -> std::sync::MutexGuard<'static, ()> {
        ENV_LOCK.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    #[test]
    fn test_default_paths() {
        let settings = Settings::default().with_root("/srv/peta");

        assert_eq!(settings.data_path(), PathBuf::from("/srv/peta/data"));
        assert_eq!(settings.image_path(), PathBuf::from("/srv/peta/image"));
        assert_eq!(
            settings.geojson_file(),
            PathBuf::from("/srv/peta/shapefile/zom_s_simplified.geojson")
        );
        assert_eq!(settings.server.port, 8501);
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_load_from_file() -> Result<()> {
        let _env = env_guard();
        let mut file = NamedTempFile::with_suffix(".toml")?;
        writeln!(file, "root = \"/opt/dashboard\"")?;
        writeln!(file, "image_dir = \"/var/maps\"")?;
        writeln!(file, "[server]")?;
        writeln!(file, "port = 9000")?;
        writeln!(file, "workers = 2")?;

        let settings = Settings::load(Some(file.path()))?;

        assert_eq!(settings.root, PathBuf::from("/opt/dashboard"));
        assert_eq!(settings.image_path(), PathBuf::from("/var/maps"));
        assert_eq!(settings.data_path(), PathBuf::from("/opt/dashboard/data"));
        assert_eq!(settings.server.port, 9000);
        assert_eq!(settings.server.workers, 2);
        assert_eq!(settings.server.host, "127.0.0.1");

        Ok(())
    }

    #[test]
    fn test_invalid_settings_are_rejected() -> Result<()> {
        let _env = env_guard();
        let mut file = NamedTempFile::with_suffix(".toml")?;
        writeln!(file, "[server]")?;
        writeln!(file, "port = 0")?;

        let result = Settings::load(Some(file.path()));
        assert!(matches!(result, Err(DashboardError::Validation(_))));

        Ok(())
    }

    #[test]
    fn test_environment_overrides_file() -> Result<()> {
        let _env = env_guard();
        let mut file = NamedTempFile::with_suffix(".toml")?;
        writeln!(file, "data_dir = \"data\"")?;
        writeln!(file, "[server]")?;
        writeln!(file, "port = 9000")?;

        std::env::set_var("STATION_MAP__SERVER__PORT", "9123");
        std::env::set_var("STATION_MAP__DATA_DIR", "csvs");
        let result = Settings::load(Some(file.path()));
        std::env::remove_var("STATION_MAP__SERVER__PORT");
        std::env::remove_var("STATION_MAP__DATA_DIR");

        let settings = result?;
        assert_eq!(settings.server.port, 9123);
        assert_eq!(settings.data_dir, PathBuf::from("csvs"));
        assert_eq!(settings.data_path(), PathBuf::from("./csvs"));

        Ok(())
    }
}

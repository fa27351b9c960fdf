use thiserror::Error;

pub type Result<T> = std::result::Result<T, DashboardError>;

#[derive(Error, Debug)]
pub enum DashboardError {
    #[error("File I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV parsing error: {0}")]
    Csv(#[from] csv::Error),

    #[error("GeoJSON parsing error: {0}")]
    GeoJson(#[from] geojson::Error),

    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("Validation error: {0}")]
    Validation(#[from] validator::ValidationErrors),

    #[error("No columns to parse from file {0}")]
    NoColumns(String),

    #[error("Invalid selection: {0}")]
    InvalidSelection(String),

    #[error("Invalid coordinate value: '{0}'")]
    InvalidCoordinate(String),

    #[error("Blocking task error: {0}")]
    Blocking(#[from] actix_web::error::BlockingError),
}

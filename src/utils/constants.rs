/// Directory and file names, relative to the dashboard root
pub const DATA_DIR: &str = "data";
pub const IMAGE_DIR: &str = "image";
pub const GEOJSON_PATH: &str = "shapefile/zom_s_simplified.geojson";
pub const CONFIG_FILE: &str = "station-map.toml";

/// Dataset file format
pub const DATASET_EXTENSION: &str = "csv";
pub const DATASET_DELIMITER: u8 = b';';

/// Dataset column names
pub const COLUMN_LATITUDE: &str = "latt_station";
pub const COLUMN_LONGITUDE: &str = "long_station";
pub const COLUMN_NAME: &str = "name_station";
pub const COLUMN_PROVINCE: &str = "nama_propinsi";
pub const REQUIRED_COLUMNS: [&str; 3] = [COLUMN_LATITUDE, COLUMN_LONGITUDE, COLUMN_NAME];

/// Map defaults
pub const MAP_CENTER_LAT: f64 = -2.5;
pub const MAP_CENTER_LON: f64 = 118.0;
pub const MAP_ZOOM: u8 = 5;
pub const MAP_WIDTH_PX: u32 = 1200;
pub const MAP_HEIGHT_PX: u32 = 700;
pub const TILE_NAME: &str = "CartoDB positron";
pub const TILE_URL: &str = "https://{s}.basemaps.cartocdn.com/light_all/{z}/{x}/{y}{r}.png";
pub const TILE_ATTRIBUTION: &str = "&copy; <a href=\"https://www.openstreetmap.org/copyright\">OpenStreetMap</a> contributors &copy; <a href=\"https://carto.com/attributions\">CARTO</a>";

/// Overlay and marker layers
pub const OVERLAY_LAYER_NAME: &str = "ZOM";
pub const MARKER_LAYER_NAME: &str = "Stasiun";
pub const MARKER_COLOR: &str = "blue";
pub const MARKER_ICON: &str = "info-sign";

/// Labels shown to the user
pub const PAGE_TITLE: &str = "Peta Sebaran Alat Pemantauan Indonesia";
pub const PROVINCE_ALL: &str = "Semua";
pub const PROVINCE_UNKNOWN: &str = "Tidak Diketahui";

/// Static image naming
pub const IMAGE_PREFIX_ZOM: &str = "zom";
pub const IMAGE_PREFIX_PLAIN: &str = "shp";
pub const IMAGE_EXTENSION: &str = "png";
pub const IMAGE_MIME: &str = "image/png";

/// Server defaults
pub const DEFAULT_HOST: &str = "127.0.0.1";
pub const DEFAULT_PORT: u16 = 8501;

use crate::error::{DashboardError, Result};
use crate::utils::constants::{
    DATASET_EXTENSION, IMAGE_PREFIX_PLAIN, IMAGE_PREFIX_ZOM, PROVINCE_ALL,
};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Class of monitoring station; selects which dataset file is loaded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum InstrumentType {
    #[serde(rename = "AAWS")]
    Aaws,
    #[serde(rename = "ARG")]
    Arg,
    #[serde(rename = "ASRS")]
    Asrs,
    #[serde(rename = "AWS")]
    Aws,
    #[serde(rename = "IKRO")]
    Ikro,
    #[serde(rename = "SM")]
    Sm,
}

impl InstrumentType {
    /// All instrument types in dropdown order
    pub const ALL: [InstrumentType; 6] = [
        InstrumentType::Aaws,
        InstrumentType::Arg,
        InstrumentType::Asrs,
        InstrumentType::Aws,
        InstrumentType::Ikro,
        InstrumentType::Sm,
    ];

    pub fn code(&self) -> &'static str {
        match self {
            InstrumentType::Aaws => "AAWS",
            InstrumentType::Arg => "ARG",
            InstrumentType::Asrs => "ASRS",
            InstrumentType::Aws => "AWS",
            InstrumentType::Ikro => "IKRO",
            InstrumentType::Sm => "SM",
        }
    }

    /// Dataset file name: lower-cased code plus the dataset extension (`aws.csv`)
    pub fn dataset_file_name(&self) -> String {
        format!("{}.{}", self.code().to_lowercase(), DATASET_EXTENSION)
    }
}

impl Default for InstrumentType {
    fn default() -> Self {
        InstrumentType::ALL[0]
    }
}

impl fmt::Display for InstrumentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for InstrumentType {
    type Err = DashboardError;

    fn from_str(s: &str) -> Result<Self> {
        let trimmed = s.trim();
        InstrumentType::ALL
            .into_iter()
            .find(|instrument| instrument.code().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| {
                DashboardError::InvalidSelection(format!("Unknown instrument type: '{}'", s))
            })
    }
}

/// Background layer choice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BasemapType {
    /// Climate-zone polygons drawn over the tiles
    #[serde(rename = "ZOM")]
    Zom,
    /// Tiles only
    #[serde(rename = "Provinsi")]
    Provinsi,
}

impl BasemapType {
    pub const ALL: [BasemapType; 2] = [BasemapType::Zom, BasemapType::Provinsi];

    pub fn code(&self) -> &'static str {
        match self {
            BasemapType::Zom => "ZOM",
            BasemapType::Provinsi => "Provinsi",
        }
    }

    pub fn is_overlay(&self) -> bool {
        matches!(self, BasemapType::Zom)
    }

    /// Prefix of the pre-rendered image file for this basemap
    pub fn image_prefix(&self) -> &'static str {
        if self.is_overlay() {
            IMAGE_PREFIX_ZOM
        } else {
            IMAGE_PREFIX_PLAIN
        }
    }
}

impl Default for BasemapType {
    fn default() -> Self {
        BasemapType::Zom
    }
}

impl fmt::Display for BasemapType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for BasemapType {
    type Err = DashboardError;

    fn from_str(s: &str) -> Result<Self> {
        let trimmed = s.trim();
        BasemapType::ALL
            .into_iter()
            .find(|basemap| basemap.code().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| DashboardError::InvalidSelection(format!("Unknown basemap: '{}'", s)))
    }
}

/// Province dropdown value: the "all" sentinel or one exact province name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(into = "String", from = "String")]
pub enum ProvinceFilter {
    #[default]
    All,
    Province(String),
}

impl ProvinceFilter {
    pub fn label(&self) -> &str {
        match self {
            ProvinceFilter::All => PROVINCE_ALL,
            ProvinceFilter::Province(name) => name,
        }
    }

    pub fn is_all(&self) -> bool {
        matches!(self, ProvinceFilter::All)
    }
}

impl From<String> for ProvinceFilter {
    fn from(value: String) -> Self {
        if value.is_empty() || value == PROVINCE_ALL {
            ProvinceFilter::All
        } else {
            ProvinceFilter::Province(value)
        }
    }
}

impl From<&str> for ProvinceFilter {
    fn from(value: &str) -> Self {
        ProvinceFilter::from(value.to_string())
    }
}

impl From<ProvinceFilter> for String {
    fn from(value: ProvinceFilter) -> Self {
        value.label().to_string()
    }
}

/// Raw selector values as they arrive from a request.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SelectionQuery {
    pub instrument: Option<String>,
    pub basemap: Option<String>,
    pub province: Option<String>,
}

/// The values the three selectors hold for one render pass.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct Selection {
    pub instrument: InstrumentType,
    pub basemap: BasemapType,
    pub province: ProvinceFilter,
}

impl Selection {
    pub fn new(instrument: InstrumentType, basemap: BasemapType, province: ProvinceFilter) -> Self {
        Self {
            instrument,
            basemap,
            province,
        }
    }

    /// Resolve raw query values, falling back to the first option of each
    /// dropdown for anything missing or unrecognised.
    pub fn from_query(query: &SelectionQuery) -> Self {
        let instrument = query
            .instrument
            .as_deref()
            .and_then(|code| code.parse().ok())
            .unwrap_or_default();
        let basemap = query
            .basemap
            .as_deref()
            .and_then(|code| code.parse().ok())
            .unwrap_or_default();
        let province = query
            .province
            .as_deref()
            .map(ProvinceFilter::from)
            .unwrap_or_default();

        Self {
            instrument,
            basemap,
            province,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_instrument_codes() {
        let codes: Vec<&str> = InstrumentType::ALL.iter().map(|i| i.code()).collect();
        assert_eq!(codes, vec!["AAWS", "ARG", "ASRS", "AWS", "IKRO", "SM"]);
        assert_eq!(InstrumentType::Ikro.dataset_file_name(), "ikro.csv");
    }

    #[test]
    fn test_parse_is_case_insensitive() {
        assert_eq!("aws".parse::<InstrumentType>().unwrap(), InstrumentType::Aws);
        assert_eq!(" SM ".parse::<InstrumentType>().unwrap(), InstrumentType::Sm);
        assert_eq!("provinsi".parse::<BasemapType>().unwrap(), BasemapType::Provinsi);
        assert!("XYZ".parse::<InstrumentType>().is_err());
        assert!("Kabupaten".parse::<BasemapType>().is_err());
    }

    #[test]
    fn test_image_prefix() {
        assert_eq!(BasemapType::Zom.image_prefix(), "zom");
        assert_eq!(BasemapType::Provinsi.image_prefix(), "shp");
    }

    #[test]
    fn test_province_sentinel() {
        assert_eq!(ProvinceFilter::from("Semua"), ProvinceFilter::All);
        assert_eq!(ProvinceFilter::from(""), ProvinceFilter::All);
        assert_eq!(
            ProvinceFilter::from("Jawa Barat"),
            ProvinceFilter::Province("Jawa Barat".to_string())
        );
        assert_eq!(ProvinceFilter::All.label(), "Semua");
    }

    #[test]
    fn test_selection_falls_back_to_defaults() {
        let query = SelectionQuery {
            instrument: Some("bogus".to_string()),
            basemap: None,
            province: None,
        };
        let selection = Selection::from_query(&query);

        assert_eq!(selection.instrument, InstrumentType::Aaws);
        assert_eq!(selection.basemap, BasemapType::Zom);
        assert!(selection.province.is_all());
    }
}

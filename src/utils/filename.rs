use crate::models::{BasemapType, InstrumentType};
use crate::utils::constants::IMAGE_EXTENSION;

/// Name of the pre-rendered map image: `{zom|shp}_{INSTRUMENT}.png`
pub fn static_image_filename(basemap: BasemapType, instrument: InstrumentType) -> String {
    format!(
        "{}_{}.{}",
        basemap.image_prefix(),
        instrument.code(),
        IMAGE_EXTENSION
    )
}

/// Default output file for an exported page: `{zom|shp}_{INSTRUMENT}.html`
pub fn default_render_filename(basemap: BasemapType, instrument: InstrumentType) -> String {
    format!("{}_{}.html", basemap.image_prefix(), instrument.code())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_static_image_filename() {
        assert_eq!(
            static_image_filename(BasemapType::Zom, InstrumentType::Aws),
            "zom_AWS.png"
        );
        assert_eq!(
            static_image_filename(BasemapType::Provinsi, InstrumentType::Arg),
            "shp_ARG.png"
        );
    }

    #[test]
    fn test_default_render_filename() {
        assert_eq!(
            default_render_filename(BasemapType::Provinsi, InstrumentType::Ikro),
            "shp_IKRO.html"
        );
    }
}

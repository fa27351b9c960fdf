use crate::error::{DashboardError, Result};

/// Parse a decimal-degree coordinate cell.
///
/// Surrounding whitespace is ignored. NaN and infinities are rejected since
/// they cannot be placed on a map.
///
/// # Examples
/// ```
/// use station_map::utils::parse_coordinate;
///
/// let latitude = parse_coordinate(" -6.2 ").unwrap();
/// assert!((latitude - -6.2).abs() < 1e-9);
/// assert!(parse_coordinate("bad").is_err());
/// ```
pub fn parse_coordinate(coord_str: &str) -> Result<f64> {
    let value = coord_str
        .trim()
        .parse::<f64>()
        .map_err(|_| DashboardError::InvalidCoordinate(coord_str.to_string()))?;

    if value.is_finite() {
        Ok(value)
    } else {
        Err(DashboardError::InvalidCoordinate(coord_str.to_string()))
    }
}

/// Parse a latitude/longitude pair, `None` if either cell is null or invalid
pub fn parse_position(latitude: Option<&str>, longitude: Option<&str>) -> Option<(f64, f64)> {
    let lat = parse_coordinate(latitude?).ok()?;
    let lon = parse_coordinate(longitude?).ok()?;
    Some((lat, lon))
}

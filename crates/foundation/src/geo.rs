use std::fmt;

/// A point on the globe in decimal degrees (WGS84).
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct LatLon {
    pub lat_deg: f64,
    pub lon_deg: f64,
}

impl LatLon {
    pub fn new(lat_deg: f64, lon_deg: f64) -> Self {
        Self { lat_deg, lon_deg }
    }

    /// Parse a coordinate pair from the backend's string encoding.
    pub fn parse(lat: &str, lon: &str) -> Result<Self, CoordParseError> {
        Ok(Self {
            lat_deg: parse_coord(lat)?,
            lon_deg: parse_coord(lon)?,
        })
    }
}

/// A coordinate string that could not be read as a decimal degree value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoordParseError {
    pub raw: String,
}

impl fmt::Display for CoordParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "not a decimal coordinate: {:?}", self.raw)
    }
}

impl std::error::Error for CoordParseError {}

/// Parse one string-encoded decimal degree value.
///
/// The wire carries latitude/longitude as strings; anything that is not a
/// finite decimal number is rejected. Range is deliberately not checked.
pub fn parse_coord(raw: &str) -> Result<f64, CoordParseError> {
    let trimmed = raw.trim();
    let err = || CoordParseError {
        raw: raw.to_string(),
    };
    if trimmed.is_empty() {
        return Err(err());
    }
    let value: f64 = trimmed.parse().map_err(|_| err())?;
    if !value.is_finite() {
        return Err(err());
    }
    Ok(value)
}

/// Render a degree value back into the string form the backend expects.
pub fn format_coord(value: f64) -> String {
    let mut s = format!("{value}");
    // `{}` prints integral floats without a fraction; keep one so the
    // round-trip stays recognizably a decimal coordinate.
    if !s.contains('.') && !s.contains('e') && !s.contains("inf") && !s.contains("NaN") {
        s.push_str(".0");
    }
    s
}

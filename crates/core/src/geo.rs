#![forbid(unsafe_code)]

/// WGS84 point. Stored and returned as a (longitude, latitude) pair.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GeoPoint {
    lat: f64,
    lng: f64,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GeoPointError {
    NotFinite,
    LatitudeOutOfRange,
    LongitudeOutOfRange,
}

impl GeoPointError {
    pub fn message(&self) -> &'static str {
        match self {
            Self::NotFinite => "location coordinates must be finite numbers",
            Self::LatitudeOutOfRange => "location.lat must be within [-90, 90]",
            Self::LongitudeOutOfRange => "location.lng must be within [-180, 180]",
        }
    }
}

impl GeoPoint {
    pub fn try_new(lat: f64, lng: f64) -> Result<Self, GeoPointError> {
        if !lat.is_finite() || !lng.is_finite() {
            return Err(GeoPointError::NotFinite);
        }
        if !(-90.0..=90.0).contains(&lat) {
            return Err(GeoPointError::LatitudeOutOfRange);
        }
        if !(-180.0..=180.0).contains(&lng) {
            return Err(GeoPointError::LongitudeOutOfRange);
        }
        Ok(Self { lat, lng })
    }

    pub fn lat(&self) -> f64 {
        self.lat
    }

    pub fn lng(&self) -> f64 {
        self.lng
    }

    pub fn coordinates(&self) -> [f64; 2] {
        [self.lng, self.lat]
    }
}

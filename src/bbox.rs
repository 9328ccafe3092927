use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::{Error, Result};

pub const DEFAULT_MAX_AREA: f64 = 2000.0;

/// Bounding box in degrees, written `minLon,minLat,maxLon,maxLat`. Serialized as a
/// four-element array, read from either that array or the comma-separated string.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
#[serde(try_from = "BBoxRepr", into = "[f64; 4]")]
pub struct BBox {
    pub min_lon: f64,
    pub min_lat: f64,
    pub max_lon: f64,
    pub max_lat: f64,
}

impl BBox {
    pub fn area(&self) -> f64 {
        (self.max_lon - self.min_lon) * (self.max_lat - self.min_lat)
    }

    pub fn as_array(&self) -> [f64; 4] {
        [self.min_lon, self.min_lat, self.max_lon, self.max_lat]
    }

    /// Rejects boxes outside the globe, inverted boxes and boxes larger than `max_area`
    /// square degrees.
    pub fn check(&self, max_area: f64) -> Result<()> {
        let in_range = |value: f64, limit: f64| (-limit..=limit).contains(&value);
        if !(in_range(self.min_lon, 180.0) && in_range(self.max_lon, 180.0)) {
            return Err(invalid("Longitude must be between -180 and 180"));
        }
        if !(in_range(self.min_lat, 90.0) && in_range(self.max_lat, 90.0)) {
            return Err(invalid("Latitude must be between -90 and 90"));
        }
        if self.min_lon >= self.max_lon || self.min_lat >= self.max_lat {
            return Err(invalid("min values must be less than max values"));
        }
        let area = self.area();
        if area > max_area {
            return Err(invalid(&format!(
                "Bounding box too large ({area:.3} sq degrees). \
                 Maximum allowed is {max_area} sq degrees. Please zoom in."
            )));
        }
        Ok(())
    }
}

fn invalid(reason: &str) -> Error {
    Error::input(format!(
        "Invalid bbox format: {reason}. Expected: minLon,minLat,maxLon,maxLat"
    ))
}

impl FromStr for BBox {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let parts = s
            .split(',')
            .map(|part| part.trim().parse::<f64>())
            .collect::<std::result::Result<Vec<f64>, _>>()
            .map_err(|err| invalid(&err.to_string()))?;
        let [min_lon, min_lat, max_lon, max_lat] = parts[..] else {
            return Err(invalid("bbox must have 4 values"));
        };
        Ok(BBox {
            min_lon,
            min_lat,
            max_lon,
            max_lat,
        })
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum BBoxRepr {
    Text(String),
    Values([f64; 4]),
}

impl TryFrom<BBoxRepr> for BBox {
    type Error = Error;

    fn try_from(value: BBoxRepr) -> Result<Self> {
        match value {
            BBoxRepr::Text(text) => text.parse(),
            BBoxRepr::Values([min_lon, min_lat, max_lon, max_lat]) => Ok(BBox {
                min_lon,
                min_lat,
                max_lon,
                max_lat,
            }),
        }
    }
}

impl From<BBox> for [f64; 4] {
    fn from(value: BBox) -> Self {
        value.as_array()
    }
}

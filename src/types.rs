use geo::Point;
use serde::ser::{Serialize, SerializeSeq, Serializer};
use std::collections::HashMap;

/// One input row, field name to raw string value.
pub type RawRecord = HashMap<String, String>;

#[derive(Debug, Clone)]
pub struct CameraRecord {
    pub fields: RawRecord,
    // x = longitude, y = latitude
    pub point: Point<f64>,
}

impl CameraRecord {
    pub fn lat(&self) -> f64 {
        self.point.y()
    }

    pub fn lon(&self) -> f64 {
        self.point.x()
    }

    /// Trimmed field value, empty when the field is absent.
    pub fn field(&self, name: &str) -> &str {
        self.fields.get(name).map(|v| v.trim()).unwrap_or("")
    }

    /// Untrimmed field value, `None` when the field is absent.
    pub fn raw_field(&self, name: &str) -> Option<&str> {
        self.fields.get(name).map(String::as_str)
    }
}

/// A single marker handed to the client-side callback.
///
/// Serializes to `[lat, lon, color, popup]` or
/// `[lat, lon, color, popup, direction]`; the callback indexes into it.
#[derive(Debug, Clone, PartialEq)]
pub struct MapRow {
    pub lat: f64,
    pub lon: f64,
    pub color: &'static str,
    pub popup: String,
    pub direction: Option<&'static str>,
}

impl Serialize for MapRow {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let len = if self.direction.is_some() { 5 } else { 4 };
        let mut seq = serializer.serialize_seq(Some(len))?;
        seq.serialize_element(&self.lat)?;
        seq.serialize_element(&self.lon)?;
        seq.serialize_element(self.color)?;
        seq.serialize_element(&self.popup)?;
        if let Some(direction) = self.direction {
            seq.serialize_element(direction)?;
        }
        seq.end()
    }
}

use crate::types::{CameraRecord, RawRecord};
use geo::{coord, Point, Rect};
use tracing::debug;

pub const DEFAULT_COLOR: &str = "gray";

/// Strips leading `'0'`s from a code; an all-zero code is kept as is.
pub fn normalize_code(raw: &str) -> &str {
    let stripped = raw.trim_start_matches('0');
    if stripped.is_empty() {
        raw
    } else {
        stripped
    }
}

/// Names of the fields holding a record's coordinates.
#[derive(Debug, Clone, Copy)]
pub struct CoordinateFields {
    pub lat: &'static str,
    pub lon: &'static str,
}

/// Inclusive lat/lon bounds a record must fall within.
#[derive(Debug, Clone, Copy)]
pub struct BoundingBox(Rect<f64>);

impl BoundingBox {
    pub fn new(min_lat: f64, max_lat: f64, min_lon: f64, max_lon: f64) -> Self {
        Self(Rect::new(
            coord! { x: min_lon, y: min_lat },
            coord! { x: max_lon, y: max_lat },
        ))
    }

    pub fn contains(&self, point: &Point<f64>) -> bool {
        let (min, max) = (self.0.min(), self.0.max());
        (min.x..=max.x).contains(&point.x()) && (min.y..=max.y).contains(&point.y())
    }
}

fn parse_coordinate(record: &RawRecord, field: &str) -> Option<f64> {
    record
        .get(field)?
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
}

/// Keeps records with parseable coordinates inside `bbox` (if any), in input order.
pub fn filter_records(
    records: Vec<RawRecord>,
    fields: &CoordinateFields,
    bbox: Option<&BoundingBox>,
) -> Vec<CameraRecord> {
    let total = records.len();

    let kept: Vec<CameraRecord> = records
        .into_iter()
        .filter_map(|fields_map| {
            let lat = parse_coordinate(&fields_map, fields.lat)?;
            let lon = parse_coordinate(&fields_map, fields.lon)?;
            let point = Point::new(lon, lat);
            if let Some(bbox) = bbox {
                if !bbox.contains(&point) {
                    return None;
                }
            }
            Some(CameraRecord {
                fields: fields_map,
                point,
            })
        })
        .collect();

    debug!("Kept {} of {} records ({} skipped)", kept.len(), total, total - kept.len());
    kept
}

/// Static code lookup table.
pub struct CodeTable<V: 'static> {
    pub entries: &'static [(&'static str, V)],
    /// Whether codes go through [`normalize_code`] before lookup.
    pub normalize: bool,
}

impl<V: Copy + 'static> CodeTable<V> {
    pub fn get(&self, code: &str) -> Option<V> {
        let key = if self.normalize { normalize_code(code) } else { code };
        self.entries
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, v)| *v)
    }
}

/// `<br>`-joined popup lines, built in a fixed order.
#[derive(Debug, Default)]
pub struct Popup {
    lines: Vec<String>,
}

impl Popup {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn line(mut self, label: &str, value: impl AsRef<str>) -> Self {
        self.lines.push(format!("<b>{}:</b> {}", label, value.as_ref()));
        self
    }

    /// Adds the line only when `value` is non-blank.
    pub fn optional(self, label: &str, value: &str) -> Self {
        let value = value.trim();
        if value.is_empty() {
            self
        } else {
            self.line(label, value)
        }
    }

    /// Adds `{value} {unit}` unless the value is blank or numerically zero.
    pub fn measurement(self, label: &str, value: &str, unit: &str) -> Self {
        let value = value.trim();
        if value.is_empty() || value.parse::<f64>().map_or(false, |v| v == 0.0) {
            self
        } else {
            self.line(label, format!("{} {}", value, unit))
        }
    }

    pub fn finish(self) -> String {
        self.lines.join("<br>")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(pairs: &[(&str, &str)]) -> RawRecord {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    const FIELDS: CoordinateFields = CoordinateFields {
        lat: "lat",
        lon: "lon",
    };

    #[test]
    fn normalize_strips_leading_zeros() {
        assert_eq!(normalize_code("02"), "2");
        assert_eq!(normalize_code("0010"), "10");
        assert_eq!(normalize_code("0"), "0");
        assert_eq!(normalize_code("000"), "000");
        assert_eq!(normalize_code(""), "");
        assert_eq!(normalize_code("7"), "7");
    }

    #[test]
    fn unparseable_or_missing_coordinates_are_skipped() {
        let records = vec![
            raw(&[("lat", "37.1"), ("lon", "127.2")]),
            raw(&[("lat", "abc"), ("lon", "127.2")]),
            raw(&[("lon", "127.2")]),
            raw(&[("lat", ""), ("lon", "127.2")]),
            raw(&[("lat", "NaN"), ("lon", "127.2")]),
            raw(&[("lat", " 36.0 "), ("lon", "128")]),
        ];
        let kept = filter_records(records, &FIELDS, None);
        assert_eq!(kept.len(), 2);
        assert_eq!(kept[0].lat(), 37.1);
        assert_eq!(kept[1].lon(), 128.0);
    }

    #[test]
    fn bounding_box_is_inclusive() {
        let bbox = BoundingBox::new(33.0, 39.0, 124.0, 132.0);
        let records = vec![
            raw(&[("lat", "33"), ("lon", "124")]),
            raw(&[("lat", "39"), ("lon", "132")]),
            raw(&[("lat", "40.0"), ("lon", "127")]),
            raw(&[("lat", "36"), ("lon", "123.9")]),
        ];
        let kept = filter_records(records, &FIELDS, Some(&bbox));
        assert_eq!(kept.len(), 2);
        assert_eq!(kept[1].lat(), 39.0);
    }

    #[test]
    fn code_table_lookup() {
        const TABLE: CodeTable<&str> = CodeTable {
            entries: &[("1", "red"), ("0xA5", "blue")],
            normalize: true,
        };
        assert_eq!(TABLE.get("01"), Some("red"));
        assert_eq!(TABLE.get("9"), None);

        const VERBATIM: CodeTable<&str> = CodeTable {
            entries: &[("0xA5", "blue")],
            normalize: false,
        };
        assert_eq!(VERBATIM.get("0xA5"), Some("blue"));
        assert_eq!(TABLE.get("0xA5"), None);
    }

    #[test]
    fn popup_skips_blank_and_zero_values() {
        let html = Popup::new()
            .measurement("Speed", "0", "km/h")
            .measurement("Speed", " ", "km/h")
            .optional("Place", "  ")
            .line("Type", "alpr")
            .finish();
        assert_eq!(html, "<b>Type:</b> alpr");

        let html = Popup::new()
            .measurement("Speed", "60", "km/h")
            .optional("Place", " gate ")
            .finish();
        assert_eq!(html, "<b>Speed:</b> 60 km/h<br><b>Place:</b> gate");
    }
}

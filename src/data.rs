use crate::types::RawRecord;
use anyhow::{anyhow, Context, Result};
use csv::ReaderBuilder;
use serde_json::Value;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use tracing::info;

const UTF8_BOM: char = '\u{feff}';

/// Loads a dataset, picking the parser from the file extension.
pub fn load_records(path: &Path) -> Result<Vec<RawRecord>> {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|s: &str| s.to_lowercase())
        .ok_or_else(|| anyhow!("Input file has no extension: {:?}", path))?;

    let records = match extension.as_str() {
        "csv" => load_csv(path)?,
        "json" => load_json(path)?,
        _ => return Err(anyhow!("Unsupported input format: {}", extension)),
    };

    info!("Loaded {} records from {:?}", records.len(), path);
    Ok(records)
}

/// Reads a UTF-8 CSV file whose first row holds the field names.
pub fn load_csv(path: &Path) -> Result<Vec<RawRecord>> {
    let file = File::open(path).with_context(|| format!("Failed to open CSV file: {:?}", path))?;
    let mut rdr = ReaderBuilder::new().flexible(true).from_reader(file);

    let headers: Vec<String> = rdr
        .headers()
        .with_context(|| format!("Failed to read CSV header: {:?}", path))?
        .iter()
        .enumerate()
        .map(|(i, h)| {
            let name = if i == 0 { h.trim_start_matches(UTF8_BOM) } else { h };
            name.to_string()
        })
        .collect();

    let mut records = Vec::new();
    for result in rdr.records() {
        let record = result.with_context(|| format!("Malformed CSV in {:?}", path))?;
        // Short rows simply lack the trailing fields.
        let row: RawRecord = headers
            .iter()
            .zip(record.iter())
            .map(|(h, v)| (h.clone(), v.to_string()))
            .collect();
        records.push(row);
    }

    Ok(records)
}

/// Reads a JSON array of flat objects. Values are stringified, nulls dropped.
pub fn load_json(path: &Path) -> Result<Vec<RawRecord>> {
    let file = File::open(path).with_context(|| format!("Failed to open JSON file: {:?}", path))?;
    let reader = BufReader::new(file);
    let value: Value = serde_json::from_reader(reader)
        .with_context(|| format!("Failed to parse JSON file: {:?}", path))?;

    let items = match value {
        Value::Array(items) => items,
        _ => return Err(anyhow!("JSON input must be an array of objects: {:?}", path)),
    };

    items
        .into_iter()
        .enumerate()
        .map(|(i, item)| match item {
            Value::Object(map) => Ok(map
                .into_iter()
                .filter_map(|(k, v)| json_to_string(v).map(|s| (k, s)))
                .collect()),
            _ => Err(anyhow!("Element {} of {:?} is not an object", i, path)),
        })
        .collect()
}

fn json_to_string(value: Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s),
        Value::Bool(b) => Some(b.to_string()),
        Value::Number(n) => Some(n.to_string()),
        other => Some(other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn csv_header_bom_is_stripped() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bom.csv");
        fs::write(&path, "\u{feff}위도,경도\n37.5,127.0\n").unwrap();

        let records = load_csv(&path).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0]["위도"], "37.5");
        assert_eq!(records[0]["경도"], "127.0");
    }

    #[test]
    fn short_csv_rows_lack_trailing_fields() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("short.csv");
        fs::write(&path, "latitude,longitude,poi_type\n55.1\n").unwrap();

        let records = load_csv(&path).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].get("latitude").map(String::as_str), Some("55.1"));
        assert!(!records[0].contains_key("longitude"));
    }

    #[test]
    fn json_values_are_stringified() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cams.json");
        fs::write(
            &path,
            r#"[{"latitude": 41.3, "longitude": 69, "speed_limit": null, "camera_type": "alpr", "active": true}]"#,
        )
        .unwrap();

        let records = load_json(&path).unwrap();
        assert_eq!(records[0]["latitude"], "41.3");
        assert_eq!(records[0]["longitude"], "69");
        assert_eq!(records[0]["camera_type"], "alpr");
        assert_eq!(records[0]["active"], "true");
        assert!(!records[0].contains_key("speed_limit"));
    }

    #[test]
    fn json_object_at_top_level_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cams.json");
        fs::write(&path, r#"{"latitude": 41.3}"#).unwrap();
        assert!(load_json(&path).is_err());
    }

    #[test]
    fn missing_file_and_unknown_extension_fail() {
        let dir = tempfile::tempdir().unwrap();
        assert!(load_records(&dir.path().join("missing.csv")).is_err());

        let path = dir.path().join("cams.xml");
        fs::write(&path, "<cams/>").unwrap();
        assert!(load_records(&path).is_err());
    }
}

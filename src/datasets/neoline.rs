//! POI dump decoded from a Neoline X-COP 7500s GPS base.

use crate::processing::{CodeTable, CoordinateFields, Popup, DEFAULT_COLOR};
use crate::render::DIRECTIONAL_CALLBACK;
use crate::types::{CameraRecord, MapRow};

pub const COORDINATES: CoordinateFields = CoordinateFields {
    lat: "latitude",
    lon: "longitude",
};

// Hex POI codes; leading zeros are significant here.
pub const POI_TYPE_COLORS: CodeTable<&str> = CodeTable {
    entries: &[
        ("0xA5", "red"),
        ("0xE0", "blue"),
        ("0xE7", "green"),
        ("0xE8", "orange"),
        ("0x97", "purple"),
        ("0xA8", "cyan"),
        ("0xE6", "brown"),
        ("0xE9", "pink"),
    ],
    normalize: false,
};

const RAW_PREVIEW_CHARS: usize = 24;

pub fn color(record: &CameraRecord) -> &'static str {
    POI_TYPE_COLORS
        .get(record.field("poi_type"))
        .unwrap_or(DEFAULT_COLOR)
}

fn is_reverse(record: &CameraRecord) -> bool {
    record.raw_field("direction") == Some("1")
}

pub fn direction(record: &CameraRecord) -> &'static str {
    if is_reverse(record) {
        "reverse"
    } else {
        "forward"
    }
}

pub fn build_popup(record: &CameraRecord) -> String {
    let or_empty = |name: &str| record.raw_field(name).unwrap_or("");
    let raw: String = or_empty("raw_hex").chars().take(RAW_PREVIEW_CHARS).collect();

    let popup = Popup::new()
        .line("POI Type", record.raw_field("poi_type").unwrap_or("unknown"))
        .line("Direction", if is_reverse(record) { "Reverse" } else { "Forward" })
        .line("Category", record.raw_field("category").unwrap_or("unknown"))
        .line("Byte10", or_empty("byte10"))
        .line(
            "Byte21/22/23",
            format!("{} / {} / {}", or_empty("byte21"), or_empty("byte22"), or_empty("byte23")),
        );

    let popup = if raw.is_empty() {
        popup
    } else {
        popup.line("Raw", format!("<code>{}...</code>", raw))
    };

    popup
        .line("Coords", format!("{:.6}, {:.6}", record.lat(), record.lon()))
        .finish()
}

pub fn to_row(record: &CameraRecord) -> MapRow {
    MapRow {
        lat: record.lat(),
        lon: record.lon(),
        color: color(record),
        popup: build_popup(record),
        direction: Some(direction(record)),
    }
}

pub fn callback() -> String {
    DIRECTIONAL_CALLBACK.to_string()
}

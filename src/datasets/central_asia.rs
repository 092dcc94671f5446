use crate::processing::{CodeTable, CoordinateFields, Popup, DEFAULT_COLOR};
use crate::render::circle_callback;
use crate::types::{CameraRecord, MapRow};

pub const COORDINATES: CoordinateFields = CoordinateFields {
    lat: "latitude",
    lon: "longitude",
};

pub const TYPE_COLORS: CodeTable<&str> = CodeTable {
    entries: &[
        ("speed_camera", "red"),
        ("alpr", "blue"),
        ("traffic_camera", "orange"),
    ],
    normalize: false,
};

const MARKER_RADIUS: u32 = 6;
const POPUP_MAX_WIDTH: u32 = 250;

pub fn color(record: &CameraRecord) -> &'static str {
    record
        .raw_field("camera_type")
        .and_then(|t| TYPE_COLORS.get(t))
        .unwrap_or(DEFAULT_COLOR)
}

pub fn build_popup(record: &CameraRecord) -> String {
    Popup::new()
        .measurement("Speed limit", record.field("speed_limit"), "km/h")
        .line("Type", record.raw_field("camera_type").unwrap_or("unknown"))
        .optional("Direction", record.field("compass_direction"))
        .optional("Road", record.field("road_direction"))
        .finish()
}

pub fn to_row(record: &CameraRecord) -> MapRow {
    MapRow {
        lat: record.lat(),
        lon: record.lon(),
        color: color(record),
        popup: build_popup(record),
        direction: None,
    }
}

pub fn callback() -> String {
    circle_callback(MARKER_RADIUS, POPUP_MAX_WIDTH)
}

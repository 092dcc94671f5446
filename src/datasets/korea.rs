use crate::processing::{BoundingBox, CodeTable, CoordinateFields, Popup, DEFAULT_COLOR};
use crate::render::DIRECTIONAL_CALLBACK;
use crate::types::{CameraRecord, MapRow};

pub const COORDINATES: CoordinateFields = CoordinateFields {
    lat: "위도",
    lon: "경도",
};

pub const ENFORCEMENT_FIELD: &str = "단속구분";
pub const DIRECTION_FIELD: &str = "도로노선방향";

pub const ENFORCEMENT_COLORS: CodeTable<&str> = CodeTable {
    entries: &[
        ("1", "red"),    // speed
        ("2", "blue"),   // signal
        ("3", "green"),  // bus lane
        ("4", "orange"), // school zone
    ],
    normalize: true,
};

pub const ENFORCEMENT_LABELS: CodeTable<&str> = CodeTable {
    entries: &[
        ("1", "속도위반 (Speed)"),
        ("2", "신호위반 (Signal)"),
        ("3", "버스전용차로 (Bus lane)"),
        ("4", "보호구역 (School zone)"),
    ],
    normalize: true,
};

// 상행 / 하행 / 양방향
pub const DIRECTIONS: CodeTable<&str> = CodeTable {
    entries: &[("1", "up"), ("2", "down"), ("3", "both")],
    normalize: true,
};

pub const DEFAULT_DIRECTION: &str = "both";

/// Mainland South Korea plus Jeju.
pub fn bounding_box() -> BoundingBox {
    BoundingBox::new(33.0, 39.0, 124.0, 132.0)
}

pub fn color(record: &CameraRecord) -> &'static str {
    ENFORCEMENT_COLORS
        .get(record.field(ENFORCEMENT_FIELD))
        .unwrap_or(DEFAULT_COLOR)
}

/// Enforcement label, or the raw code when it is not in the table.
pub fn label(code: &str) -> String {
    ENFORCEMENT_LABELS
        .get(code)
        .map(str::to_string)
        .unwrap_or_else(|| code.to_string())
}

pub fn direction(record: &CameraRecord) -> &'static str {
    DIRECTIONS
        .get(record.field(DIRECTION_FIELD))
        .unwrap_or(DEFAULT_DIRECTION)
}

pub fn build_popup(record: &CameraRecord) -> String {
    let region = record.field("시도명");
    let district = record.field("시군구명");

    let popup = Popup::new()
        .measurement("제한속도", record.field("제한속도"), "km/h")
        .line("단속구분", label(record.field(ENFORCEMENT_FIELD)))
        .optional("주소", record.field("소재지도로명주소"))
        .optional("설치장소", record.field("설치장소"))
        .optional("설치연도", record.field("설치연도"));

    if region.is_empty() {
        popup.finish()
    } else {
        popup.line("지역", format!("{} {}", region, district)).finish()
    }
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

#[cfg(test)]
mod tests {
    use super::*;
    use geo::Point;

    fn camera(pairs: &[(&str, &str)]) -> CameraRecord {
        CameraRecord {
            fields: pairs
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
            point: Point::new(127.0, 37.5),
        }
    }

    #[test]
    fn zero_speed_limit_is_omitted() {
        let popup = build_popup(&camera(&[("제한속도", "0"), ("단속구분", "01")]));
        assert!(!popup.contains("제한속도"));
        assert_eq!(popup, "<b>단속구분:</b> 속도위반 (Speed)");
    }

    #[test]
    fn speed_limit_is_shown_in_km_h() {
        let popup = build_popup(&camera(&[("제한속도", "60"), ("단속구분", "1")]));
        assert!(popup.starts_with("<b>제한속도:</b> 60 km/h<br>"));
    }

    #[test]
    fn unknown_enforcement_code_falls_back() {
        let record = camera(&[("단속구분", "9")]);
        assert_eq!(color(&record), "gray");
        assert_eq!(label("9"), "9");
        assert!(build_popup(&record).contains("<b>단속구분:</b> 9"));
    }

    #[test]
    fn padded_codes_are_normalized() {
        let record = camera(&[("단속구분", "02"), ("도로노선방향", "01")]);
        assert_eq!(color(&record), "blue");
        assert_eq!(direction(&record), "up");
        assert_eq!(direction(&camera(&[("도로노선방향", "2")])), "down");
        assert_eq!(direction(&camera(&[])), "both");
        assert_eq!(direction(&camera(&[("도로노선방향", "x")])), "both");
    }

    #[test]
    fn popup_field_order() {
        let popup = build_popup(&camera(&[
            ("제한속도", "50"),
            ("단속구분", "4"),
            ("소재지도로명주소", "서울특별시 종로구 세종대로 1"),
            ("설치장소", "초등학교 앞"),
            ("설치연도", "2019"),
            ("시도명", "서울특별시"),
            ("시군구명", "종로구"),
        ]));
        assert_eq!(
            popup,
            "<b>제한속도:</b> 50 km/h<br>\
             <b>단속구분:</b> 보호구역 (School zone)<br>\
             <b>주소:</b> 서울특별시 종로구 세종대로 1<br>\
             <b>설치장소:</b> 초등학교 앞<br>\
             <b>설치연도:</b> 2019<br>\
             <b>지역:</b> 서울특별시 종로구"
        );
    }

    #[test]
    fn region_requires_province() {
        let popup = build_popup(&camera(&[("단속구분", "1"), ("시군구명", "종로구")]));
        assert!(!popup.contains("지역"));
    }

    #[test]
    fn row_carries_direction() {
        let row = to_row(&camera(&[("단속구분", "3"), ("도로노선방향", "2")]));
        assert_eq!(row.color, "green");
        assert_eq!(row.direction, Some("down"));
        assert_eq!((row.lat, row.lon), (37.5, 127.0));
    }
}

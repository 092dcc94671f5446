use crate::config::MapView;
use crate::types::MapRow;
use anyhow::{Context, Result};
use std::fs;
use std::path::Path;
use tracing::info;

const LEAFLET_CSS: &str = "https://unpkg.com/leaflet@1.9.4/dist/leaflet.css";
const LEAFLET_JS: &str = "https://unpkg.com/leaflet@1.9.4/dist/leaflet.js";
const CLUSTER_CSS: &str = "https://unpkg.com/leaflet.markercluster@1.5.3/dist/MarkerCluster.css";
const CLUSTER_DEFAULT_CSS: &str =
    "https://unpkg.com/leaflet.markercluster@1.5.3/dist/MarkerCluster.Default.css";
const CLUSTER_JS: &str = "https://unpkg.com/leaflet.markercluster@1.5.3/dist/leaflet.markercluster.js";

const TILE_URL: &str = "https://{s}.tile.openstreetmap.org/{z}/{x}/{y}.png";
const TILE_ATTRIBUTION: &str =
    "&copy; <a href=\"https://www.openstreetmap.org/copyright\">OpenStreetMap</a> contributors";

/// Plain circle marker; `{radius}` and `{max_width}` are substituted.
pub const CIRCLE_CALLBACK_TEMPLATE: &str = r#"function (row) {
    var marker = L.circleMarker(new L.LatLng(row[0], row[1]), {
        radius: {radius},
        color: row[2],
        fillColor: row[2],
        fillOpacity: 0.7,
        weight: 1
    });
    marker.bindPopup(row[3], {maxWidth: {max_width}});
    return marker;
}"#;

/// Circle for `both`/`forward` rows, a 12x18 triangle pointing up for `up`,
/// and pointing down for anything else (`down`, `reverse`).
pub const DIRECTIONAL_CALLBACK: &str = r##"function (row) {
    var color = row[2];
    var dir = row[4];
    var marker;
    if (dir === 'both' || dir === 'forward') {
        marker = L.circleMarker(new L.LatLng(row[0], row[1]), {
            radius: 5,
            color: color,
            fillColor: color,
            fillOpacity: 0.7,
            weight: 1
        });
    } else {
        var up = dir === 'up';
        var points = up ? '6,0 12,18 0,18' : '0,0 12,0 6,18';
        var svg = '<svg width="12" height="18" viewBox="0 0 12 18">' +
            '<polygon points="' + points + '" fill="' + color + '" stroke="#333" stroke-width="1"/>' +
            '</svg>';
        var icon = L.divIcon({
            html: svg,
            className: '',
            iconSize: [12, 18],
            iconAnchor: up ? [6, 18] : [6, 0]
        });
        marker = L.marker(new L.LatLng(row[0], row[1]), {icon: icon});
    }
    marker.bindPopup(row[3], {maxWidth: 300});
    return marker;
}"##;

pub fn circle_callback(radius: u32, max_width: u32) -> String {
    CIRCLE_CALLBACK_TEMPLATE
        .replace("{radius}", &radius.to_string())
        .replace("{max_width}", &max_width.to_string())
}

/// Cluster layer fed with all rows at once; each row becomes a marker
/// through `callback` on the client.
#[derive(Debug, Clone)]
pub struct MarkerCluster {
    rows: Vec<MapRow>,
    callback: String,
}

impl MarkerCluster {
    pub fn new(rows: Vec<MapRow>, callback: impl Into<String>) -> Self {
        Self {
            rows,
            callback: callback.into(),
        }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    fn to_script(&self, map_var: &str, index: usize) -> Result<String> {
        let data = script_safe_json(&self.rows)?;
        Ok(format!(
            r#"
    (function () {{
        var callback = {callback};
        var data = {data};
        var cluster = L.markerClusterGroup();
        for (var i = 0; i < data.length; i++) {{
            callback(data[i]).addTo(cluster);
        }}
        cluster.addTo({map_var});
        window.cluster_{index} = cluster;
    }})();
"#,
            callback = self.callback,
            data = data,
            map_var = map_var,
            index = index,
        ))
    }
}

/// A standalone Leaflet page: basemap plus any number of cluster layers.
#[derive(Debug, Clone)]
pub struct MapDocument {
    view: MapView,
    title: String,
    clusters: Vec<MarkerCluster>,
}

impl MapDocument {
    pub fn new(view: MapView) -> Self {
        Self {
            view,
            title: "Camera map".to_string(),
            clusters: Vec::new(),
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn add_cluster(&mut self, cluster: MarkerCluster) -> &mut Self {
        self.clusters.push(cluster);
        self
    }

    pub fn to_html(&self) -> Result<String> {
        let mut layers = String::new();
        for (i, cluster) in self.clusters.iter().enumerate() {
            layers.push_str(&cluster.to_script("map", i)?);
        }

        let [lat, lon] = self.view.center;

        Ok(format!(
            r#"<!DOCTYPE html>
<html>
<head>
    <meta charset="utf-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{title}</title>
    <link rel="stylesheet" href="{leaflet_css}">
    <link rel="stylesheet" href="{cluster_css}">
    <link rel="stylesheet" href="{cluster_default_css}">
    <script src="{leaflet_js}"></script>
    <script src="{cluster_js}"></script>
    <style>
        html, body {{ width: 100%; height: 100%; margin: 0; padding: 0; }}
        #map {{ position: absolute; top: 0; bottom: 0; left: 0; right: 0; }}
    </style>
</head>
<body>
    <div id="map"></div>
    <script>
    var map = L.map('map', {{ center: [{lat}, {lon}], zoom: {zoom} }});
    L.tileLayer('{tile_url}', {{
        maxZoom: 19,
        attribution: '{attribution}'
    }}).addTo(map);
{layers}    </script>
</body>
</html>
"#,
            title = html_escape(&self.title),
            leaflet_css = LEAFLET_CSS,
            cluster_css = CLUSTER_CSS,
            cluster_default_css = CLUSTER_DEFAULT_CSS,
            leaflet_js = LEAFLET_JS,
            cluster_js = CLUSTER_JS,
            lat = lat,
            lon = lon,
            zoom = self.view.zoom,
            tile_url = TILE_URL,
            attribution = TILE_ATTRIBUTION,
            layers = layers,
        ))
    }

    /// Writes the page to `path`, replacing any previous output.
    pub fn save(&self, path: &Path) -> Result<()> {
        let html = self.to_html()?;
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create output directory: {:?}", parent))?;
        }
        fs::write(path, html).with_context(|| format!("Failed to write map: {:?}", path))?;
        info!("Wrote {:?}", path);
        Ok(())
    }
}

// JSON embedded in a <script> element must not contain "</".
fn script_safe_json(rows: &[MapRow]) -> Result<String> {
    let json = serde_json::to_string(rows).context("Failed to serialize marker rows")?;
    Ok(json.replace("</", "<\\/"))
}

fn html_escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

use crate::datasets::Dataset;

#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub korea: DatasetConfig,
    pub central_asia: DatasetConfig,
    pub neoline: DatasetConfig,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DatasetConfig {
    pub input: PathBuf,
    pub output: PathBuf,
    pub view: MapView,
}

/// Initial viewport of a rendered map.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MapView {
    pub center: [f64; 2], // [lat, lon]
    pub zoom: u8,
}

// Partial dataset table as written in config.toml; missing keys keep the defaults.
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct DatasetOverrides {
    input: Option<PathBuf>,
    output: Option<PathBuf>,
    center: Option<[f64; 2]>,
    zoom: Option<u8>,
}

#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct ConfigFile {
    korea: DatasetOverrides,
    central_asia: DatasetOverrides,
    neoline: DatasetOverrides,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            korea: DatasetConfig::defaults_for(Dataset::Korea),
            central_asia: DatasetConfig::defaults_for(Dataset::CentralAsia),
            neoline: DatasetConfig::defaults_for(Dataset::Neoline),
        }
    }
}

impl DatasetConfig {
    pub fn defaults_for(dataset: Dataset) -> Self {
        let (input, output, center, zoom) = match dataset {
            Dataset::Korea => ("data/korea_cameras.csv", "korea.html", [36.5, 127.5], 7),
            Dataset::CentralAsia => ("data/cameras.json", "index.html", [41.3, 64.5], 6),
            Dataset::Neoline => (
                "data/X-COP_7500s_Baza_GPS_decoded.csv",
                "neoline.html",
                [55.0, 60.0],
                4,
            ),
        };
        Self {
            input: PathBuf::from(input),
            output: PathBuf::from(output),
            view: MapView { center, zoom },
        }
    }

    fn apply(mut self, overrides: DatasetOverrides) -> Self {
        if let Some(input) = overrides.input {
            self.input = input;
        }
        if let Some(output) = overrides.output {
            self.output = output;
        }
        if let Some(center) = overrides.center {
            self.view.center = center;
        }
        if let Some(zoom) = overrides.zoom {
            self.view.zoom = zoom;
        }
        self
    }
}

impl AppConfig {
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {:?}", path))?;
        Self::from_toml_str(&content)
    }

    /// Loads `path` if it exists, otherwise falls back to the built-in defaults.
    pub fn load_or_default(path: &Path) -> Result<Self> {
        if path.exists() {
            Self::load_from_file(path)
        } else {
            info!("No config file at {:?}, using defaults", path);
            Ok(Self::default())
        }
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let file: ConfigFile =
            toml::from_str(content).with_context(|| "Failed to parse TOML configuration")?;
        let defaults = Self::default();
        Ok(Self {
            korea: defaults.korea.apply(file.korea),
            central_asia: defaults.central_asia.apply(file.central_asia),
            neoline: defaults.neoline.apply(file.neoline),
        })
    }

    pub fn dataset(&self, dataset: Dataset) -> &DatasetConfig {
        match dataset {
            Dataset::Korea => &self.korea,
            Dataset::CentralAsia => &self.central_asia,
            Dataset::Neoline => &self.neoline,
        }
    }
}

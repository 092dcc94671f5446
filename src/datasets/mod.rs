//! Per-dataset field names, lookup tables and popup layouts.
//!
//! Each submodule exposes the same small surface (`COORDINATES`,
//! `bounding_box`, `color`, `to_row`, `callback`) and [`Dataset`] dispatches
//! to it, so the pipeline itself stays dataset-agnostic.

pub mod central_asia;
pub mod korea;
pub mod neoline;

use crate::processing::{BoundingBox, CoordinateFields};
use crate::types::{CameraRecord, MapRow};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dataset {
    Korea,
    CentralAsia,
    Neoline,
}

impl Dataset {
    pub const ALL: [Dataset; 3] = [Dataset::Korea, Dataset::CentralAsia, Dataset::Neoline];

    pub fn name(self) -> &'static str {
        match self {
            Dataset::Korea => "korea",
            Dataset::CentralAsia => "central-asia",
            Dataset::Neoline => "neoline",
        }
    }

    pub fn coordinates(self) -> CoordinateFields {
        match self {
            Dataset::Korea => korea::COORDINATES,
            Dataset::CentralAsia => central_asia::COORDINATES,
            Dataset::Neoline => neoline::COORDINATES,
        }
    }

    pub fn bounding_box(self) -> Option<BoundingBox> {
        match self {
            Dataset::Korea => Some(korea::bounding_box()),
            Dataset::CentralAsia | Dataset::Neoline => None,
        }
    }

    pub fn color(self, record: &CameraRecord) -> &'static str {
        match self {
            Dataset::Korea => korea::color(record),
            Dataset::CentralAsia => central_asia::color(record),
            Dataset::Neoline => neoline::color(record),
        }
    }

    pub fn to_row(self, record: &CameraRecord) -> MapRow {
        match self {
            Dataset::Korea => korea::to_row(record),
            Dataset::CentralAsia => central_asia::to_row(record),
            Dataset::Neoline => neoline::to_row(record),
        }
    }

    /// Client-side marker factory handed to the cluster layer.
    pub fn callback(self) -> String {
        match self {
            Dataset::Korea => korea::callback(),
            Dataset::CentralAsia => central_asia::callback(),
            Dataset::Neoline => neoline::callback(),
        }
    }
}

impl fmt::Display for Dataset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

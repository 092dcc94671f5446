use crate::config::DatasetConfig;
use crate::data;
use crate::datasets::Dataset;
use crate::processing::filter_records;
use crate::render::{MapDocument, MarkerCluster};
use crate::types::{CameraRecord, MapRow};
use anyhow::Result;
use std::collections::BTreeMap;
use std::path::PathBuf;
use tracing::info;

#[derive(Debug, Clone, PartialEq)]
pub struct RunSummary {
    pub output: PathBuf,
    pub rendered: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Inspection {
    pub loaded: usize,
    pub kept: usize,
    pub by_color: BTreeMap<&'static str, usize>,
}

fn load(dataset: Dataset, config: &DatasetConfig) -> Result<(usize, Vec<CameraRecord>)> {
    let records = data::load_records(&config.input)?;
    let loaded = records.len();
    let bbox = dataset.bounding_box();
    let cameras = filter_records(records, &dataset.coordinates(), bbox.as_ref());
    Ok((loaded, cameras))
}

/// Load, filter, classify and render one dataset to its output file.
pub fn generate(dataset: Dataset, config: &DatasetConfig) -> Result<RunSummary> {
    info!("Generating {} map from {:?}", dataset, config.input);
    let (_, cameras) = load(dataset, config)?;

    let rows: Vec<MapRow> = cameras.iter().map(|cam| dataset.to_row(cam)).collect();
    let cluster = MarkerCluster::new(rows, dataset.callback());
    let rendered = cluster.len();

    let mut map = MapDocument::new(config.view).with_title(format!("{} cameras", dataset));
    map.add_cluster(cluster);
    map.save(&config.output)?;

    Ok(RunSummary {
        output: config.output.clone(),
        rendered,
    })
}

/// Load and filter one dataset, counting records per marker color.
pub fn inspect(dataset: Dataset, config: &DatasetConfig) -> Result<Inspection> {
    let (loaded, cameras) = load(dataset, config)?;

    let mut by_color = BTreeMap::new();
    for cam in &cameras {
        *by_color.entry(dataset.color(cam)).or_insert(0) += 1;
    }

    Ok(Inspection {
        loaded,
        kept: cameras.len(),
        by_color,
    })
}

pub mod config;
pub mod data;
pub mod datasets;
pub mod pipeline;
pub mod processing;
pub mod render;
pub mod types;

pub mod adapters;
pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use adapters::storage::LocalStorage;
pub use config::IngestConfig;
pub use crate::core::{
    ingester::{IngestReport, Ingester},
    reader::ServiceSourceReader,
    render::{render, RenderSettings},
    slug::slugify,
    store::ContentStore,
};
pub use utils::error::{IngestError, Result};

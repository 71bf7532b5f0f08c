pub mod toml_config;

pub use toml_config::IngestConfig;

#[cfg(feature = "cli")]
use crate::utils::error::Result;
#[cfg(feature = "cli")]
use clap::Parser;

/// Command-line flags. All optional; they override the TOML file, which overrides defaults.
#[cfg(feature = "cli")]
#[derive(Debug, Clone, Parser)]
#[command(name = "mspro-ingest")]
#[command(about = "Convert legacy service pages into MDX content files")]
pub struct CliConfig {
    /// Path to a TOML configuration file
    #[arg(short, long)]
    pub config: Option<String>,

    /// Directory scanned for *.html / *.htm pages
    #[arg(long)]
    pub input_dir: Option<String>,

    /// Directory the .mdx files are written to
    #[arg(long)]
    pub output_dir: Option<String>,

    /// Skip the built-in service catalog
    #[arg(long)]
    pub no_catalog: bool,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,
}

#[cfg(feature = "cli")]
impl CliConfig {
    pub fn resolve(&self) -> Result<IngestConfig> {
        let mut config = match &self.config {
            Some(path) => {
                tracing::info!("📁 Loading configuration from: {}", path);
                IngestConfig::from_file(path)?
            }
            None => IngestConfig::default(),
        };

        if let Some(input_dir) = &self.input_dir {
            config.ingest.input_dir = input_dir.clone();
        }
        if let Some(output_dir) = &self.output_dir {
            config.ingest.output_dir = output_dir.clone();
        }
        if self.no_catalog {
            config.ingest.include_catalog = false;
        }
        Ok(config)
    }
}

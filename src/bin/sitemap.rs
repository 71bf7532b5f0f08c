use clap::Parser;
use mspro_ingest::app::write_site_files;
use mspro_ingest::utils::{logger, validation::Validate};
use mspro_ingest::{ContentStore, IngestConfig};

#[derive(Parser)]
#[command(name = "mspro-sitemap")]
#[command(about = "Generate sitemap.xml and robots.txt for the catalog")]
struct Args {
    /// Path to TOML configuration file
    #[arg(short, long)]
    config: Option<String>,

    /// Override the output directory for the generated files
    #[arg(long)]
    public_dir: Option<String>,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    logger::init_cli_logger(args.verbose);

    let mut config = match &args.config {
        Some(path) => IngestConfig::from_file(path)?,
        None => IngestConfig::default(),
    };
    if let Some(public_dir) = args.public_dir {
        config.site.public_dir = public_dir;
    }
    config.validate()?;

    let today = chrono::Local::now().date_naive();
    let store = ContentStore::with_catalog(today);

    for name in write_site_files(&config, &store, today).await? {
        println!("✅ {}/{} generated", config.site.public_dir, name);
    }

    Ok(())
}

use clap::Parser;
use mspro_ingest::app::run_ingestion;
use mspro_ingest::utils::{logger, validation::Validate};
use mspro_ingest::CliConfig;

#[tokio::main]
async fn main() {
    let cli = CliConfig::parse();

    logger::init_cli_logger(cli.verbose);

    tracing::info!("Starting mspro-ingest");
    if cli.verbose {
        tracing::debug!("CLI config: {:?}", cli);
    }

    let config = match cli.resolve() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 {}", e.recovery_suggestion());
            std::process::exit(1);
        }
    };

    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        eprintln!("❌ {}", e.user_friendly_message());
        eprintln!("💡 {}", e.recovery_suggestion());
        std::process::exit(1);
    }

    let today = chrono::Local::now().date_naive();

    match run_ingestion(&config, today).await {
        Ok(report) => {
            for slug in &report.written {
                println!("📝 Created: {}/{}.mdx", config.ingest.output_dir, slug);
            }
            for failure in &report.failed {
                eprintln!("⚠️  {}: {}", failure.source_id, failure.error);
            }
            println!(
                "✅ Ingested {} of {} services ({} failed)",
                report.written.len(),
                report.total(),
                report.failed.len()
            );
        }
        Err(e) => {
            tracing::error!("❌ Ingestion failed: {}", e);
            tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());
            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 {}", e.recovery_suggestion());
            std::process::exit(1);
        }
    }
}

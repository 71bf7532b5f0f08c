use clap::{Parser, Subcommand};
use mspro_ingest::adapters::generator::ServiceBrief;
use mspro_ingest::app::{draft_service, run_agent_task, write_site_files};
use mspro_ingest::core::agent::AgentTask;
use mspro_ingest::utils::{logger, validation::Validate};
use mspro_ingest::{ContentStore, IngestConfig};

#[derive(Parser)]
#[command(name = "mspro-agent")]
#[command(about = "Apply agent tasks and draft service pages")]
struct Args {
    /// Path to TOML configuration file
    #[arg(short, long, global = true)]
    config: Option<String>,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Apply a JSON task file (`{"type": "new_service", "payload": {...}}`) to the catalog
    Task {
        #[arg(long)]
        file: String,

        /// Must match `agent.token` from the configuration
        #[arg(long)]
        token: String,
    },
    /// Generate a new service page with the configured model
    Draft {
        #[arg(long)]
        title: String,

        #[arg(long, default_value = "")]
        category: String,

        #[arg(long)]
        description: Option<String>,

        #[arg(long = "keyword")]
        keywords: Vec<String>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    logger::init_cli_logger(args.verbose);

    let config = match &args.config {
        Some(path) => IngestConfig::from_file(path)?,
        None => IngestConfig::default(),
    };
    config.validate()?;

    let today = chrono::Local::now().date_naive();

    match args.command {
        Command::Task { file, token } => {
            let task: AgentTask = serde_json::from_str(&std::fs::read_to_string(&file)?)?;
            let mut store = ContentStore::with_catalog(today);

            let response = run_agent_task(&config, &mut store, task, &token, today).await?;
            if !response.ok {
                anyhow::bail!(response.message);
            }
            println!("✅ {}", response.message);
            write_site_files(&config, &store, today).await?;
        }
        Command::Draft {
            title,
            category,
            description,
            keywords,
        } => {
            let brief = ServiceBrief {
                title,
                category,
                description,
                keywords,
            };
            let document = draft_service(&config, &brief, today).await?;
            println!("📝 Created: {}/{}", config.ingest.output_dir, document.file_name());
        }
    }

    Ok(())
}

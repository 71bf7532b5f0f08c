// Application layer: wires configuration, storage and the core together for the binaries.

use crate::adapters::generator::{
    generate_meta_description, generate_service_content, OpenAiClient, ServiceBrief,
};
use crate::adapters::storage::LocalStorage;
use crate::config::IngestConfig;
use crate::core::agent::{process_agent_task, AgentResponse, AgentTask};
use crate::core::catalog::builtin_services;
use crate::core::ingester::{markup_files, IngestReport, Ingester};
use crate::core::reader::ServiceSourceReader;
use crate::core::render::render;
use crate::core::sitemap::{generate_robots, generate_sitemap};
use crate::core::store::ContentStore;
use crate::domain::model::{Document, Source};
use crate::domain::ports::Storage;
use crate::utils::error::Result;
use crate::utils::validation::validate_required_field;
use chrono::NaiveDate;
use std::path::Path;

/// Built-in catalog first (when enabled), then the markup files of the input directory.
pub fn collect_sources(config: &IngestConfig, today: NaiveDate) -> Result<Vec<Source>> {
    let mut sources = Vec::new();
    if config.ingest.include_catalog {
        sources.extend(builtin_services(today).into_iter().map(Source::Literal));
    }
    sources.extend(markup_files(Path::new(&config.ingest.input_dir))?);
    Ok(sources)
}

pub async fn run_ingestion(config: &IngestConfig, today: NaiveDate) -> Result<IngestReport> {
    let sources = collect_sources(config, today)?;
    let reader = ServiceSourceReader::new(&config.ingest.default_category, today)?;
    let ingester = Ingester::new(
        LocalStorage::new("."),
        LocalStorage::new(&config.ingest.output_dir),
        reader,
        config.render.clone(),
    );
    ingester.ingest_all(sources).await
}

/// Writes `sitemap.xml` and `robots.txt` into the public directory and returns their names.
pub async fn write_site_files(
    config: &IngestConfig,
    store: &ContentStore,
    today: NaiveDate,
) -> Result<Vec<String>> {
    let storage = LocalStorage::new(&config.site.public_dir);
    storage.prepare().await?;

    let (services, cases) = store.sitemap_entries();
    let sitemap = generate_sitemap(&config.site.base_url, today, &services, &cases);
    storage.write_file("sitemap.xml", sitemap.as_bytes()).await?;
    tracing::info!("✅ Sitemap generated with {} service and {} case pages", services.len(), cases.len());

    storage
        .write_file("robots.txt", generate_robots(&config.site.base_url).as_bytes())
        .await?;
    tracing::info!("✅ robots.txt generated");

    Ok(vec!["sitemap.xml".to_string(), "robots.txt".to_string()])
}

async fn save_document(config: &IngestConfig, document: &Document) -> Result<()> {
    let storage = LocalStorage::new(&config.ingest.output_dir);
    storage.prepare().await?;
    storage
        .write_file(&document.file_name(), document.text.as_bytes())
        .await?;
    tracing::info!("📝 Saved: {}/{}", config.ingest.output_dir, document.file_name());
    Ok(())
}

/// Checks `token` against `agent.token`, applies the task and saves the
/// rendered service document, if the task produced one.
pub async fn run_agent_task(
    config: &IngestConfig,
    store: &mut ContentStore,
    task: AgentTask,
    token: &str,
    today: NaiveDate,
) -> Result<AgentResponse> {
    let expected = validate_required_field("agent.token", &config.agent.token)?;
    let response = process_agent_task(store, task, token, expected, &config.render, today);
    if let Some(document) = &response.document {
        save_document(config, document).await?;
    }
    Ok(response)
}

/// Drafts a service page with the configured model and saves it with the ingested pages.
pub async fn draft_service(
    config: &IngestConfig,
    brief: &ServiceBrief,
    today: NaiveDate,
) -> Result<Document> {
    let client = OpenAiClient::new(config.generator.clone())?;
    let generated = generate_service_content(&client, brief).await?;

    let category = match brief.category.trim() {
        "" => config.ingest.default_category.as_str(),
        c => c,
    };
    let mut record = generated.into_record(category, today);
    if record.excerpt.is_empty() {
        record.excerpt = generate_meta_description(&client, &record.title, &record.content).await?;
    }

    let document = render(&record, &config.render);
    save_document(config, &document).await?;
    Ok(document)
}

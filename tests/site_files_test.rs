use anyhow::Result;
use chrono::NaiveDate;
use mspro_ingest::app::{run_ingestion, write_site_files};
use mspro_ingest::core::agent::{process_agent_task, AgentPayload, AgentTask};
use mspro_ingest::{ContentStore, IngestConfig, RenderSettings};
use tempfile::TempDir;

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 10, 1).unwrap()
}

#[tokio::test]
async fn test_site_files_include_agent_created_service() -> Result<()> {
    let public = TempDir::new()?;
    let mut config = IngestConfig::default();
    config.site.public_dir = public.path().join("public").to_string_lossy().to_string();
    config.site.base_url = "https://example.org/".to_string();

    let mut store = ContentStore::with_catalog(today());
    let task = AgentTask::NewService(AgentPayload {
        title: "Огнезащитная обработка".to_string(),
        slug: "ognezashchita".to_string(),
        category: "Высотные работы".to_string(),
        content: "## Этапы".to_string(),
        ..AgentPayload::default()
    });
    let response = process_agent_task(&mut store, task, "t", "t", &RenderSettings::default(), today());
    assert!(response.ok, "{}", response.message);

    let written = write_site_files(&config, &store, today()).await?;
    assert_eq!(written, vec!["sitemap.xml", "robots.txt"]);

    let sitemap = std::fs::read_to_string(public.path().join("public/sitemap.xml"))?;
    assert_eq!(sitemap.matches("<url>").count(), 5 + 4 + 2);
    assert!(sitemap.contains("<loc>https://example.org/services/ognezashchita</loc>\n    <lastmod>2025-10-01</lastmod>"));
    assert!(sitemap.contains("<loc>https://example.org/cases/business-center-moscow</loc>\n    <lastmod>2025-09-10</lastmod>"));

    let robots = std::fs::read_to_string(public.path().join("public/robots.txt"))?;
    assert!(robots.contains("Sitemap: https://example.org/sitemap.xml"));
    Ok(())
}

#[tokio::test]
async fn test_sitemap_services_match_ingested_files() -> Result<()> {
    let dir = TempDir::new()?;
    let mut config = IngestConfig::default();
    config.ingest.input_dir = dir.path().join("no-pages").to_string_lossy().to_string();
    config.ingest.output_dir = dir.path().join("services").to_string_lossy().to_string();
    config.site.public_dir = dir.path().join("public").to_string_lossy().to_string();

    let report = run_ingestion(&config, today()).await?;
    assert!(report.failed.is_empty());

    let mut stems: Vec<String> = std::fs::read_dir(dir.path().join("services"))?
        .filter_map(|entry| entry.ok())
        .filter_map(|entry| {
            entry
                .path()
                .file_stem()
                .map(|stem| stem.to_string_lossy().to_string())
        })
        .collect();
    stems.sort();

    let store = ContentStore::with_catalog(today());
    write_site_files(&config, &store, today()).await?;
    let sitemap = std::fs::read_to_string(dir.path().join("public/sitemap.xml"))?;

    let (services, _) = store.sitemap_entries();
    let mut slugs: Vec<String> = services.into_iter().map(|(slug, _)| slug).collect();
    slugs.sort();
    assert_eq!(stems, slugs);
    for slug in &slugs {
        assert!(sitemap.contains(&format!("https://mspro.ru/services/{}</loc>", slug)));
    }
    Ok(())
}

use crate::core::render::{render, RenderSettings};
use crate::domain::model::Source;
use crate::domain::ports::{SourceReader, Storage};
use crate::utils::error::{IngestError, Result};
use std::collections::HashSet;
use std::path::{Path, PathBuf};

const MARKUP_EXTENSIONS: [&str; 2] = ["html", "htm"];

#[derive(Debug)]
pub struct IngestFailure {
    pub source_id: String,
    pub error: IngestError,
}

/// Outcome of one batch: slugs written, in input order, and per-source failures.
#[derive(Debug, Default)]
pub struct IngestReport {
    pub written: Vec<String>,
    pub failed: Vec<IngestFailure>,
}

impl IngestReport {
    pub fn total(&self) -> usize {
        self.written.len() + self.failed.len()
    }
}

/// Runs sources through read → render → write, one at a time.
pub struct Ingester<S: Storage, R: SourceReader> {
    input: S,
    output: S,
    reader: R,
    settings: RenderSettings,
}

impl<S: Storage, R: SourceReader> Ingester<S, R> {
    pub fn new(input: S, output: S, reader: R, settings: RenderSettings) -> Self {
        Self {
            input,
            output,
            reader,
            settings,
        }
    }

    /// Processes every source in order. Only a failure to prepare the output
    /// destination aborts the batch; everything else lands in the report.
    pub async fn ingest_all(&self, sources: Vec<Source>) -> Result<IngestReport> {
        tracing::info!("🚀 Starting service ingestion ({} sources)", sources.len());
        self.output.prepare().await?;

        let mut report = IngestReport::default();
        let mut seen = HashSet::new();
        for source in &sources {
            let source_id = source.id();
            match self.ingest_one(source, &mut seen).await {
                Ok(slug) => {
                    tracing::info!("📝 Created: {}.mdx (from {})", slug, source_id);
                    report.written.push(slug);
                }
                Err(error) => {
                    if error.is_per_item() {
                        tracing::warn!("❌ Skipping {}: {}", source_id, error);
                    } else {
                        tracing::error!("❌ Unexpected failure for {}: {}", source_id, error);
                    }
                    report.failed.push(IngestFailure { source_id, error });
                }
            }
        }

        tracing::info!(
            "✅ Ingestion finished: {} written, {} failed",
            report.written.len(),
            report.failed.len()
        );
        Ok(report)
    }

    async fn ingest_one(&self, source: &Source, seen: &mut HashSet<String>) -> Result<String> {
        let loaded;
        let source = match source {
            Source::File(path) => {
                loaded = self.load(path).await?;
                &loaded
            }
            other => other,
        };

        let record = self.reader.read(source)?;
        // One document per slug within a batch; later duplicates are reported, not written.
        if !seen.insert(record.slug.clone()) {
            return Err(IngestError::DuplicateSlug {
                kind: "service",
                slug: record.slug,
            });
        }

        let document = render(&record, &self.settings);
        let file_name = document.file_name();

        self.output
            .write_file(&file_name, document.text.as_bytes())
            .await
            .map_err(|e| IngestError::WriteFailure {
                path: file_name.clone(),
                reason: e.to_string(),
            })?;

        Ok(document.slug)
    }

    async fn load(&self, path: &Path) -> Result<Source> {
        let id = path.display().to_string();
        let bytes = self
            .input
            .read_file(&path.to_string_lossy())
            .await
            .map_err(|e| IngestError::SourceUnreadable {
                source_id: id.clone(),
                reason: e.to_string(),
            })?;
        let html = String::from_utf8(bytes).map_err(|e| IngestError::SourceUnreadable {
            source_id: id.clone(),
            reason: format!("invalid UTF-8: {}", e),
        })?;
        Ok(Source::Markup { id, html })
    }
}

/// Lists the markup files directly inside `dir`, sorted by file name.
/// A missing directory yields no sources.
pub fn markup_files(dir: &Path) -> Result<Vec<Source>> {
    if !dir.is_dir() {
        tracing::warn!("Input directory {} not found, no HTML sources", dir.display());
        return Ok(Vec::new());
    }

    let mut paths: Vec<PathBuf> = std::fs::read_dir(dir)?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|path| path.is_file())
        .filter(|path| {
            path.extension()
                .and_then(|ext| ext.to_str())
                .is_some_and(|ext| MARKUP_EXTENSIONS.contains(&ext.to_ascii_lowercase().as_str()))
        })
        .collect();
    paths.sort();

    tracing::debug!("Found {} markup files in {}", paths.len(), dir.display());
    Ok(paths.into_iter().map(Source::File).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::reader::ServiceSourceReader;
    use crate::domain::model::ServiceRecord;
    use chrono::NaiveDate;
    use std::collections::HashMap;
    use std::sync::Arc;
    use tokio::sync::Mutex;

    #[derive(Clone, Default)]
    struct MockStorage {
        files: Arc<Mutex<HashMap<String, Vec<u8>>>>,
        prepared: Arc<Mutex<bool>>,
        read_only: bool,
    }

    impl MockStorage {
        fn new() -> Self {
            Self::default()
        }

        fn read_only() -> Self {
            Self {
                read_only: true,
                ..Self::default()
            }
        }

        async fn put(&self, path: &str, data: &[u8]) {
            self.files.lock().await.insert(path.to_string(), data.to_vec());
        }

        async fn get_file(&self, path: &str) -> Option<Vec<u8>> {
            self.files.lock().await.get(path).cloned()
        }
    }

    impl Storage for MockStorage {
        async fn prepare(&self) -> Result<()> {
            *self.prepared.lock().await = true;
            Ok(())
        }

        async fn read_file(&self, path: &str) -> Result<Vec<u8>> {
            let files = self.files.lock().await;
            files.get(path).cloned().ok_or_else(|| {
                IngestError::IoError(std::io::Error::new(
                    std::io::ErrorKind::NotFound,
                    format!("File not found: {}", path),
                ))
            })
        }

        async fn write_file(&self, path: &str, data: &[u8]) -> Result<()> {
            if self.read_only || !*self.prepared.lock().await {
                return Err(IngestError::IoError(std::io::Error::new(
                    std::io::ErrorKind::PermissionDenied,
                    "read-only storage",
                )));
            }
            self.files.lock().await.insert(path.to_string(), data.to_vec());
            Ok(())
        }
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 9, 13).unwrap()
    }

    fn ingester(input: MockStorage, output: MockStorage) -> Ingester<MockStorage, ServiceSourceReader> {
        let reader = ServiceSourceReader::new("Услуги", today()).unwrap();
        Ingester::new(input, output, reader, RenderSettings::default())
    }

    fn literal(title: &str, slug: &str) -> Source {
        Source::Literal(ServiceRecord {
            title: title.to_string(),
            slug: slug.to_string(),
            category: "Антикор".to_string(),
            excerpt: "Краткое описание".to_string(),
            content: "## Гарантии".to_string(),
            images: vec!["/images/a.webp".to_string()],
            price: None,
            updated_at: today(),
        })
    }

    #[tokio::test]
    async fn test_one_malformed_source_does_not_stop_batch() {
        let input = MockStorage::new();
        input.put("pages/good.html", b"<h1>Good</h1><div class=\"content\"><p>ok</p></div>").await;
        input.put("pages/bad.html", &[0xff, 0xfe, 0x00, 0x41]).await;
        let output = MockStorage::new();

        let sources = vec![
            literal("Антикоррозийная защита", "antikorroziya"),
            Source::File("pages/bad.html".into()),
            Source::File("pages/good.html".into()),
        ];
        let report = ingester(input, output.clone()).ingest_all(sources).await.unwrap();

        assert_eq!(report.written, vec!["antikorroziya", "good"]);
        assert_eq!(report.failed.len(), 1);
        assert_eq!(report.failed[0].source_id, "pages/bad.html");
        assert!(matches!(report.failed[0].error, IngestError::SourceUnreadable { .. }));
        assert_eq!(report.total(), 3);

        let written = output.get_file("good.mdx").await.unwrap();
        assert!(String::from_utf8(written).unwrap().starts_with("---\ntitle: \"Good\""));
    }

    #[tokio::test]
    async fn test_slugless_titles_and_repeated_slugs() {
        let input = MockStorage::new();
        input.put("pages/a.html", "<h1>!!!</h1>".as_bytes()).await;
        input.put("pages/b.html", "<h1>服务</h1>".as_bytes()).await;
        input.put("pages/c.html", "<h1>A</h1>".as_bytes()).await;
        let output = MockStorage::new();

        let sources = ["pages/a.html", "pages/b.html", "pages/c.html"]
            .into_iter()
            .map(|p| Source::File(p.into()))
            .collect();
        let report = ingester(input, output.clone()).ingest_all(sources).await.unwrap();

        assert_eq!(report.written, vec!["a", "b"]);
        assert_eq!(report.failed.len(), 1);
        assert_eq!(report.failed[0].source_id, "pages/c.html");
        assert!(matches!(
            report.failed[0].error,
            IngestError::DuplicateSlug { ref slug, .. } if slug == "a"
        ));

        let first = String::from_utf8(output.get_file("a.mdx").await.unwrap()).unwrap();
        assert!(first.contains("title: \"!!!\""));
        assert!(output.get_file(".mdx").await.is_none());
    }

    #[tokio::test]
    async fn test_missing_file_is_unreadable() {
        let report = ingester(MockStorage::new(), MockStorage::new())
            .ingest_all(vec![Source::File("nope.html".into())])
            .await
            .unwrap();

        assert!(report.written.is_empty());
        assert_eq!(report.failed[0].source_id, "nope.html");
        assert!(matches!(report.failed[0].error, IngestError::SourceUnreadable { .. }));
    }

    #[tokio::test]
    async fn test_write_failures_are_recorded_per_item() {
        let report = ingester(MockStorage::new(), MockStorage::read_only())
            .ingest_all(vec![literal("Один", "odin"), literal("Два", "dva")])
            .await
            .unwrap();

        assert!(report.written.is_empty());
        assert_eq!(report.failed.len(), 2);
        for failure in &report.failed {
            assert!(matches!(failure.error, IngestError::WriteFailure { .. }));
        }
    }

    #[tokio::test]
    async fn test_empty_batch_still_prepares_output() {
        let output = MockStorage::new();
        let report = ingester(MockStorage::new(), output.clone())
            .ingest_all(Vec::new())
            .await
            .unwrap();

        assert_eq!(report.total(), 0);
        assert!(*output.prepared.lock().await);
    }

    #[test]
    fn test_markup_files_sorted_and_filtered() {
        let dir = tempfile::TempDir::new().unwrap();
        for name in ["b.html", "a.HTM", "notes.txt", "c.htm"] {
            std::fs::write(dir.path().join(name), "<p>x</p>").unwrap();
        }
        std::fs::create_dir(dir.path().join("nested.html")).unwrap();

        let sources = markup_files(dir.path()).unwrap();
        let names: Vec<String> = sources
            .iter()
            .map(|s| match s {
                Source::File(p) => p.file_name().unwrap().to_string_lossy().to_string(),
                other => panic!("unexpected source {:?}", other),
            })
            .collect();
        assert_eq!(names, vec!["a.HTM", "b.html", "c.htm"]);

        assert!(markup_files(&dir.path().join("missing")).unwrap().is_empty());
    }
}

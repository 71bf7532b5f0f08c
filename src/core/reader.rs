use crate::core::extract::{is_inline_data, truncate_excerpt, MarkupParser, MAX_IMAGES};
use crate::core::slug::{choose_slug, slugify};
use crate::domain::model::{ServiceRecord, Source, DEFAULT_TITLE};
use crate::domain::ports::SourceReader;
use crate::utils::error::{IngestError, Result};
use chrono::NaiveDate;

/// Reads both literal records and markup documents into the same record shape.
pub struct ServiceSourceReader {
    markup: MarkupParser,
    today: NaiveDate,
}

impl ServiceSourceReader {
    pub fn new(default_category: &str, today: NaiveDate) -> Result<Self> {
        Ok(Self {
            markup: MarkupParser::new(default_category)?,
            today,
        })
    }

    fn normalize_literal(&self, record: &ServiceRecord) -> ServiceRecord {
        let title = match record.title.trim() {
            "" => DEFAULT_TITLE.to_string(),
            t => t.to_string(),
        };
        // Literal records may carry a transliterated slug; keep it when it is already clean.
        let slug = choose_slug(&record.slug, [title.as_str(), DEFAULT_TITLE])
            .unwrap_or_else(|| slugify(DEFAULT_TITLE));
        let category = match record.category.trim() {
            "" => self.markup.default_category().to_string(),
            c => c.to_string(),
        };
        let images = record
            .images
            .iter()
            .filter(|src| !is_inline_data(src))
            .take(MAX_IMAGES)
            .cloned()
            .collect();

        ServiceRecord {
            title,
            slug,
            category,
            excerpt: truncate_excerpt(&record.excerpt),
            content: record.content.clone(),
            images,
            price: record.price.clone().filter(|p| !p.trim().is_empty()),
            updated_at: self.today,
        }
    }
}

impl SourceReader for ServiceSourceReader {
    fn read(&self, source: &Source) -> Result<ServiceRecord> {
        match source {
            Source::Literal(record) => Ok(self.normalize_literal(record)),
            Source::Markup { id, html } => self.markup.parse(id, html, self.today),
            Source::File(path) => Err(IngestError::SourceUnreadable {
                source_id: path.display().to_string(),
                reason: "file sources must be loaded before reading".to_string(),
            }),
        }
    }
}

use crate::domain::model::{Document, FaqEntry, ServiceRecord};
use serde::{Deserialize, Serialize};
use std::fmt::Write as _;

pub const DEFAULT_COVER: &str = "/images/services/default.webp";
pub const DEFAULT_SCHEMA_TYPE: &str = "Service";

pub fn default_city_targets() -> Vec<String> {
    ["Москва", "СПб", "Екатеринбург", "Новосибирск"]
        .into_iter()
        .map(String::from)
        .collect()
}

/// The four boilerplate questions every service page carries.
pub fn default_faq() -> Vec<FaqEntry> {
    vec![
        FaqEntry::new(
            "Какие материалы используете?",
            "Работаем только с сертифицированными материалами ведущих производителей с гарантией качества.",
        ),
        FaqEntry::new(
            "Есть ли гарантия на работы?",
            "Предоставляем гарантию на выполненные работы от 2 до 10 лет в зависимости от вида услуг.",
        ),
        FaqEntry::new(
            "Работаете ли в выходные дни?",
            "Да, при необходимости можем организовать работы в выходные и праздничные дни.",
        ),
        FaqEntry::new(
            "Какие документы предоставляете?",
            "Полный пакет документов: акты выполненных работ, гарантийные обязательства, сертификаты материалов.",
        ),
    ]
}

/// Static parts of the front matter that do not come from the record.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderSettings {
    pub city_targets: Vec<String>,
    pub default_cover: String,
    pub faq: Vec<FaqEntry>,
    pub schema_type: String,
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self {
            city_targets: default_city_targets(),
            default_cover: DEFAULT_COVER.to_string(),
            faq: default_faq(),
            schema_type: DEFAULT_SCHEMA_TYPE.to_string(),
        }
    }
}

/// Double-quoted scalar with JSON escaping, which YAML reads back verbatim.
fn quote(value: &str) -> String {
    serde_json::Value::String(value.to_string()).to_string()
}

fn quote_list(values: &[String]) -> String {
    let items: Vec<String> = values.iter().map(|v| quote(v)).collect();
    format!("[{}]", items.join(", "))
}

/// Renders a record as an MDX document: front matter followed by the raw body.
pub fn render(record: &ServiceRecord, settings: &RenderSettings) -> Document {
    let cover = record.cover().unwrap_or(&settings.default_cover);

    let mut text = String::from("---\n");
    // Writing into a String cannot fail.
    let _ = writeln!(text, "title: {}", quote(&record.title));
    let _ = writeln!(text, "slug: {}", quote(&record.slug));
    let _ = writeln!(text, "excerpt: {}", quote(&record.excerpt));
    let _ = writeln!(text, "category: {}", quote(&record.category));
    let _ = writeln!(text, "city_targets: {}", quote_list(&settings.city_targets));
    let _ = writeln!(text, "cover: {}", quote(cover));
    let _ = writeln!(text, "gallery: {}", quote_list(&record.images));
    if settings.faq.is_empty() {
        text.push_str("faq: []\n");
    } else {
        text.push_str("faq:\n");
        for entry in &settings.faq {
            let _ = writeln!(text, "  - q: {}", quote(&entry.q));
            let _ = writeln!(text, "    a: {}", quote(&entry.a));
        }
    }
    if let Some(price) = &record.price {
        let _ = writeln!(text, "price_note: {}", quote(price));
    }
    text.push_str("schema:\n");
    let _ = writeln!(text, "  type: {}", quote(&settings.schema_type));
    let _ = writeln!(text, "updatedAt: {}", quote(&record.updated_at.format("%Y-%m-%d").to_string()));
    text.push_str("---\n\n");
    text.push_str(&record.content);
    text.push('\n');

    Document {
        slug: record.slug.clone(),
        text,
    }
}

use chrono::NaiveDate;
use mspro_ingest::domain::model::{Source, ServiceRecord};
use mspro_ingest::domain::ports::SourceReader;
use mspro_ingest::{render, RenderSettings, ServiceSourceReader};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
struct FrontMatter {
    title: String,
    slug: String,
    excerpt: String,
    category: String,
    cover: String,
    gallery: Vec<String>,
}

fn front_matter(text: &str) -> FrontMatter {
    let rest = text.strip_prefix("---\n").unwrap();
    let end = rest.find("\n---\n").unwrap();
    serde_yaml::from_str(&rest[..end]).unwrap()
}

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 9, 13).unwrap()
}

#[test]
fn test_literal_record_survives_render() {
    let record = ServiceRecord {
        title: "Покраска \"под ключ\": фасады #1".to_string(),
        slug: "pokraska-pod-klyuch".to_string(),
        category: "Высотные работы".to_string(),
        excerpt: "Цена: от 280 ₽, без лесов\nи люлек".to_string(),
        content: "## Этапы\n\n1. Подготовка".to_string(),
        images: vec!["/img/a.webp".to_string(), "/img/b.webp".to_string()],
        price: Some("От 280 ₽/м²".to_string()),
        updated_at: NaiveDate::from_ymd_opt(2020, 1, 1).unwrap(),
    };

    let reader = ServiceSourceReader::new("Услуги", today()).unwrap();
    let normalized = reader.read(&Source::Literal(record.clone())).unwrap();
    let document = render(&normalized, &RenderSettings::default());
    let front = front_matter(&document.text);

    assert_eq!(document.file_name(), "pokraska-pod-klyuch.mdx");
    assert_eq!(front.title, record.title);
    assert_eq!(front.slug, record.slug);
    assert_eq!(front.excerpt, record.excerpt);
    assert_eq!(front.category, record.category);
    assert_eq!(front.cover, "/img/a.webp");
    assert_eq!(front.gallery, record.images);
    assert!(document.text.ends_with("---\n\n## Этапы\n\n1. Подготовка\n"));
}

#[test]
fn test_markup_and_render_agree_on_slug() {
    let reader = ServiceSourceReader::new("Услуги", today()).unwrap();
    let source = Source::Markup {
        id: "inline".to_string(),
        html: "<title>Мойка окон</title><article><p>Чистые окна</p></article>".to_string(),
    };
    let record = reader.read(&source).unwrap();
    let document = render(&record, &RenderSettings::default());
    let front = front_matter(&document.text);

    assert_eq!(front.title, "Мойка окон");
    assert_eq!(front.slug, "мойка-окон");
    assert_eq!(document.slug, front.slug);
    assert_eq!(front.excerpt, "Чистые окна");
    assert!(front.gallery.is_empty());
}

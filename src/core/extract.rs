//! Field extraction from service pages of the legacy site.
//!
//! Everything here is synchronous: the parsed tree is dropped before the
//! caller awaits anything.

use crate::core::slug::{choose_slug, slugify};
use crate::domain::model::{ServiceRecord, DEFAULT_TITLE, EXCERPT_MAX_CHARS};
use crate::utils::error::{IngestError, Result};
use chrono::NaiveDate;
use regex::Regex;
use scraper::{ElementRef, Html, Selector};
use std::path::Path;
use std::sync::LazyLock;

/// Candidate content containers, tried in this order.
pub const CONTENT_CONTAINERS: [&str; 4] = [".content", ".main", "article", ".service-content"];

/// Maximum number of images kept per record.
pub const MAX_IMAGES: usize = 3;

/// Body used when a page has no h2/h3 sections to extract.
pub const EMPTY_CONTENT_PLACEHOLDER: &str = "Контент услуги";

static PRICE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(?:от\s+)?\d+(?:\s?\d+)*\s*(?:₽|руб|р\.)").expect("price pattern is valid")
});
static MARKUP_TAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<\s*[A-Za-z!]").expect("tag pattern is valid"));

struct Selectors {
    h1: Selector,
    title: Selector,
    sections: Selector,
    paragraph: Selector,
    image: Selector,
    list_item: Selector,
    containers: Vec<Selector>,
}

impl Selectors {
    fn new() -> Result<Self> {
        Ok(Self {
            h1: selector("h1")?,
            title: selector("title")?,
            sections: selector("h2, h3")?,
            paragraph: selector("p")?,
            image: selector("img")?,
            list_item: selector("li")?,
            containers: CONTENT_CONTAINERS
                .iter()
                .map(|css| selector(css))
                .collect::<Result<Vec<_>>>()?,
        })
    }
}

fn selector(css: &str) -> Result<Selector> {
    Selector::parse(css).map_err(|e| IngestError::ConfigError {
        message: format!("invalid selector '{}': {}", css, e),
    })
}

/// Extracts service records from HTML pages.
pub struct MarkupParser {
    selectors: Selectors,
    default_category: String,
}

impl MarkupParser {
    pub fn new(default_category: impl Into<String>) -> Result<Self> {
        Ok(Self {
            selectors: Selectors::new()?,
            default_category: default_category.into(),
        })
    }

    pub fn default_category(&self) -> &str {
        &self.default_category
    }

    /// Parses one page into a record stamped with `today`.
    pub fn parse(&self, source_id: &str, html: &str, today: NaiveDate) -> Result<ServiceRecord> {
        ensure_markup(source_id, html)?;

        let document = Html::parse_document(html);
        let title = self.extract_title(&document);
        let container = self.find_container(&document);

        let content = container
            .map(|c| self.extract_content(c))
            .filter(|body| !body.is_empty())
            .unwrap_or_else(|| EMPTY_CONTENT_PLACEHOLDER.to_string());
        let excerpt = container
            .and_then(|c| c.select(&self.selectors.paragraph).next())
            .map(|p| truncate_excerpt(&element_text(p)))
            .unwrap_or_default();
        let images = self.extract_images(&document);
        let price = extract_price(&document.root_element().text().collect::<String>());

        tracing::debug!(
            "Parsed '{}': title={:?}, {} images, price={:?}",
            source_id,
            title,
            images.len(),
            price
        );

        // Titles such as "!!!" have no slug characters; fall back to the file name.
        let stem = source_stem(source_id);
        let slug = choose_slug("", [title.as_str(), stem.as_str(), DEFAULT_TITLE])
            .unwrap_or_else(|| slugify(DEFAULT_TITLE));

        Ok(ServiceRecord {
            slug,
            title,
            category: self.default_category.clone(),
            excerpt,
            content,
            images,
            price,
            updated_at: today,
        })
    }

    fn extract_title(&self, document: &Html) -> String {
        [&self.selectors.h1, &self.selectors.title]
            .into_iter()
            .filter_map(|s| document.select(s).next())
            .map(element_text)
            .find(|text| !text.is_empty())
            .unwrap_or_else(|| DEFAULT_TITLE.to_string())
    }

    fn find_container<'a>(&self, document: &'a Html) -> Option<ElementRef<'a>> {
        self.selectors
            .containers
            .iter()
            .find_map(|s| document.select(s).next())
    }

    fn extract_content(&self, container: ElementRef<'_>) -> String {
        let mut content = String::new();

        for heading in container.select(&self.selectors.sections) {
            let Some(rank) = heading_rank(heading.value().name()) else {
                continue;
            };
            content.push_str(&"#".repeat(rank as usize));
            content.push(' ');
            content.push_str(&element_text(heading));
            content.push_str("\n\n");

            for sibling in heading.next_siblings().filter_map(ElementRef::wrap) {
                let name = sibling.value().name();
                if heading_rank(name).is_some_and(|r| r <= rank) {
                    break;
                }
                let block = match name {
                    "p" => element_text(sibling),
                    "ul" => self.list_text(sibling, false),
                    "ol" => self.list_text(sibling, true),
                    _ => continue,
                };
                if !block.is_empty() {
                    content.push_str(&block);
                    content.push_str("\n\n");
                }
            }
        }

        content.trim_end().to_string()
    }

    fn list_text(&self, list: ElementRef<'_>, numbered: bool) -> String {
        let items: Vec<String> = list
            .select(&self.selectors.list_item)
            .map(element_text)
            .filter(|text| !text.is_empty())
            .collect();
        if items.is_empty() {
            return element_text(list);
        }
        items
            .iter()
            .enumerate()
            .map(|(i, item)| {
                if numbered {
                    format!("{}. {}", i + 1, item)
                } else {
                    format!("- {}", item)
                }
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn extract_images(&self, document: &Html) -> Vec<String> {
        document
            .select(&self.selectors.image)
            .filter_map(|img| img.value().attr("src"))
            .map(str::trim)
            .filter(|src| !src.is_empty() && !is_inline_data(src))
            .take(MAX_IMAGES)
            .map(str::to_string)
            .collect()
    }
}

/// Rejects input that is not markup at all: empty text, binary data, plain prose.
fn ensure_markup(source_id: &str, html: &str) -> Result<()> {
    let reason = if html.trim().is_empty() {
        "document is empty"
    } else if html.contains('\0') {
        "document contains binary data"
    } else if !MARKUP_TAG.is_match(html) {
        "document contains no markup elements"
    } else {
        return Ok(());
    };
    Err(IngestError::SourceUnreadable {
        source_id: source_id.to_string(),
        reason: reason.to_string(),
    })
}

fn source_stem(source_id: &str) -> String {
    Path::new(source_id)
        .file_stem()
        .and_then(|stem| stem.to_str())
        .unwrap_or_default()
        .replace(['-', '_', '.'], " ")
}

fn heading_rank(tag: &str) -> Option<u8> {
    match tag {
        "h1" => Some(1),
        "h2" => Some(2),
        "h3" => Some(3),
        "h4" => Some(4),
        "h5" => Some(5),
        "h6" => Some(6),
        _ => None,
    }
}

/// Text content with whitespace runs collapsed, as a browser would display it.
fn element_text(element: ElementRef<'_>) -> String {
    element
        .text()
        .flat_map(str::split_whitespace)
        .collect::<Vec<_>>()
        .join(" ")
}

pub fn is_inline_data(src: &str) -> bool {
    src.get(..5)
        .is_some_and(|scheme| scheme.eq_ignore_ascii_case("data:"))
}

/// Cuts text to [`EXCERPT_MAX_CHARS`] characters, without looking for word boundaries.
pub fn truncate_excerpt(text: &str) -> String {
    text.trim().chars().take(EXCERPT_MAX_CHARS).collect()
}

/// Finds the first price-looking token such as `от 350 руб` or `1 200 ₽`.
pub fn extract_price(text: &str) -> Option<String> {
    PRICE.find(text).map(|m| m.as_str().to_string())
}

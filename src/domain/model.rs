use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Maximum excerpt length, counted in characters.
pub const EXCERPT_MAX_CHARS: usize = 160;

pub const DEFAULT_TITLE: &str = "Untitled Service";
pub const DEFAULT_CATEGORY: &str = "Услуги";

/// One service page of the catalog.
///
/// The slug is always a function of the title (see [`crate::core::slug::slugify`]),
/// except for literal records that carry a hand-picked transliterated slug.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceRecord {
    pub title: String,
    pub slug: String,
    pub category: String,
    pub excerpt: String,
    pub content: String,
    pub images: Vec<String>,
    pub price: Option<String>,
    pub updated_at: NaiveDate,
}

impl ServiceRecord {
    pub fn cover(&self) -> Option<&str> {
        self.images.first().map(String::as_str)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FaqEntry {
    pub q: String,
    pub a: String,
}

impl FaqEntry {
    pub fn new(q: &str, a: &str) -> Self {
        Self {
            q: q.to_string(),
            a: a.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CaseStudy {
    pub title: String,
    pub slug: String,
    pub excerpt: String,
    pub content: String,
    pub category: String,
    pub cover: Option<String>,
    pub gallery: Vec<String>,
    pub location: Option<String>,
    pub team_size: Option<u32>,
    pub duration: Option<String>,
    pub technologies: Vec<String>,
    pub client: Option<String>,
    pub updated_at: NaiveDate,
}

/// Partial update for a [`ServiceRecord`]. `None` leaves the field as is.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ServicePatch {
    pub title: Option<String>,
    pub category: Option<String>,
    pub excerpt: Option<String>,
    pub content: Option<String>,
    pub images: Option<Vec<String>>,
    pub price: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CasePatch {
    pub title: Option<String>,
    pub excerpt: Option<String>,
    pub content: Option<String>,
    pub category: Option<String>,
    pub cover: Option<String>,
    pub location: Option<String>,
    pub client: Option<String>,
}

/// Rendered front-matter document, ready to be written as `<slug>.mdx`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    pub slug: String,
    pub text: String,
}

impl Document {
    pub fn file_name(&self) -> String {
        format!("{}.mdx", self.slug)
    }
}

/// An input to the ingester.
#[derive(Debug, Clone)]
pub enum Source {
    /// A record defined in code.
    Literal(ServiceRecord),
    /// Markup already held in memory, with an identifier used in reports.
    Markup { id: String, html: String },
    /// A markup file, loaded through the input storage.
    File(PathBuf),
}

impl Source {
    pub fn id(&self) -> String {
        match self {
            Source::Literal(record) => format!("literal:{}", record.slug),
            Source::Markup { id, .. } => id.clone(),
            Source::File(path) => path.display().to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    System,
    User,
    Assistant,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: ChatRole,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::System,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::User,
            content: content.into(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct GenerationRequest {
    pub messages: Vec<ChatMessage>,
    pub temperature: Option<f32>,
    pub max_tokens: Option<u32>,
}

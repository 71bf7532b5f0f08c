//! Chat-completion client used to draft service pages.
//!
//! Nothing in the ingestion path depends on this module. A missing API key
//! fails fast with [`IngestError::ConfigurationMissing`]; there are no retries.

use crate::core::extract::truncate_excerpt;
use crate::core::slug::{choose_slug, slugify};
use crate::domain::model::{ChatMessage, FaqEntry, GenerationRequest, ServiceRecord, DEFAULT_TITLE};
use crate::domain::ports::TextGenerator;
use crate::utils::error::{IngestError, Result};
use crate::utils::validation::validate_required_field;
use async_trait::async_trait;
use chrono::NaiveDate;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";
pub const DEFAULT_MODEL: &str = "gpt-4o-mini";
const DEFAULT_MAX_TOKENS: u32 = 2000;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorSettings {
    pub api_key: Option<String>,
    pub base_url: String,
    pub model: String,
    /// Used when a request does not set its own temperature.
    pub temperature: f32,
    pub timeout_seconds: u64,
}

impl Default for GeneratorSettings {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: DEFAULT_BASE_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
            temperature: 0.7,
            timeout_seconds: 60,
        }
    }
}

#[derive(Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: &'a [ChatMessage],
    temperature: f32,
    max_tokens: u32,
}

#[derive(Deserialize)]
struct ChatCompletionResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: Option<ChoiceMessage>,
}

#[derive(Deserialize)]
struct ChoiceMessage {
    content: Option<String>,
}

pub struct OpenAiClient {
    settings: GeneratorSettings,
    client: Client,
}

impl OpenAiClient {
    pub fn new(settings: GeneratorSettings) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(settings.timeout_seconds))
            .build()?;
        Ok(Self { settings, client })
    }
}

#[async_trait]
impl TextGenerator for OpenAiClient {
    async fn generate_text(&self, request: GenerationRequest) -> Result<String> {
        let api_key = validate_required_field("generator.api_key", &self.settings.api_key)?;
        let url = format!("{}/chat/completions", self.settings.base_url.trim_end_matches('/'));

        let body = ChatCompletionRequest {
            model: &self.settings.model,
            messages: &request.messages,
            temperature: request.temperature.unwrap_or(self.settings.temperature),
            max_tokens: request.max_tokens.unwrap_or(DEFAULT_MAX_TOKENS),
        };

        tracing::debug!("Requesting completion from {} ({} messages)", url, request.messages.len());
        let response = self
            .client
            .post(&url)
            .bearer_auth(api_key)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            tracing::error!("Completion request failed with {}", status);
            return Err(IngestError::ApiStatus {
                status: status.as_u16(),
                message,
            });
        }

        let parsed: ChatCompletionResponse = response.json().await?;
        Ok(parsed
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message)
            .and_then(|m| m.content)
            .unwrap_or_default())
    }
}

/// Input for drafting a new service page.
#[derive(Debug, Clone, Default)]
pub struct ServiceBrief {
    pub title: String,
    pub category: String,
    pub description: Option<String>,
    pub keywords: Vec<String>,
}

/// Draft returned by the model.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct GeneratedService {
    pub title: String,
    pub excerpt: String,
    pub content: String,
    #[serde(default)]
    pub faq: Vec<FaqEntry>,
}

impl GeneratedService {
    pub fn into_record(self, category: &str, today: NaiveDate) -> ServiceRecord {
        let title = self.title.trim().to_string();
        ServiceRecord {
            slug: choose_slug("", [title.as_str(), DEFAULT_TITLE]).unwrap_or_else(|| slugify(DEFAULT_TITLE)),
            title,
            category: category.to_string(),
            excerpt: truncate_excerpt(&self.excerpt),
            content: self.content,
            images: Vec::new(),
            price: None,
            updated_at: today,
        }
    }
}

/// Models like to wrap JSON answers in a fenced code block.
fn strip_code_fence(reply: &str) -> &str {
    let trimmed = reply.trim();
    match trimmed.strip_prefix("```") {
        Some(rest) => {
            let rest = rest.strip_prefix("json").unwrap_or(rest);
            rest.strip_suffix("```").unwrap_or(rest).trim()
        }
        None => trimmed,
    }
}

pub async fn generate_service_content(
    generator: &dyn TextGenerator,
    brief: &ServiceBrief,
) -> Result<GeneratedService> {
    let system = "Ты эксперт по промышленному альпинизму и антикоррозийной защите. \
                  Пиши в деловом B2B-стиле для технических руководителей.";
    let keywords = if brief.keywords.is_empty() {
        "не указаны".to_string()
    } else {
        brief.keywords.join(", ")
    };
    let user = format!(
        "Подготовь страницу услуги.\nНазвание: {}\nКатегория: {}\nОписание: {}\nКлючевые слова: {}\n\n\
         Ответь JSON-объектом с полями title (до 60 символов), excerpt (до 160 символов), \
         content (markdown с разделами ## Преимущества, ## Технология работ, ## Этапы, ## Гарантии) \
         и faq (5 объектов вида {{\"q\": ..., \"a\": ...}}).",
        brief.title,
        brief.category,
        brief.description.as_deref().unwrap_or("не указано"),
        keywords
    );

    let reply = generator
        .generate_text(GenerationRequest {
            messages: vec![ChatMessage::system(system), ChatMessage::user(user)],
            temperature: Some(0.7),
            max_tokens: Some(3000),
        })
        .await?;

    Ok(serde_json::from_str(strip_code_fence(&reply))?)
}

pub async fn generate_meta_description(
    generator: &dyn TextGenerator,
    title: &str,
    content: &str,
) -> Result<String> {
    let snippet: String = content.chars().take(500).collect();
    let reply = generator
        .generate_text(GenerationRequest {
            messages: vec![
                ChatMessage::system("Создай SEO-описание до 160 символов для страницы услуги"),
                ChatMessage::user(format!("Название: {}\nКонтент: {}", title, snippet)),
            ],
            temperature: Some(0.3),
            max_tokens: Some(100),
        })
        .await?;
    Ok(truncate_excerpt(&reply))
}

use crate::core::extract::truncate_excerpt;
use crate::core::render::{render, RenderSettings};
use crate::core::slug::choose_slug;
use crate::core::store::ContentStore;
use crate::domain::model::{CaseStudy, Document, ServicePatch, ServiceRecord, DEFAULT_CATEGORY};
use crate::utils::error::{IngestError, Result};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Fields an agent may send. Unused fields are ignored per task type.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AgentPayload {
    pub title: String,
    pub slug: String,
    pub category: String,
    pub content: String,
    pub excerpt: Option<String>,
    pub images: Vec<String>,
    pub price: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload", rename_all = "snake_case")]
pub enum AgentTask {
    NewService(AgentPayload),
    UpdateService(AgentPayload),
    NewCase(AgentPayload),
}

impl AgentTask {
    pub fn kind(&self) -> &'static str {
        match self {
            AgentTask::NewService(_) => "new_service",
            AgentTask::UpdateService(_) => "update_service",
            AgentTask::NewCase(_) => "new_case",
        }
    }
}

#[derive(Debug, Clone)]
pub struct AgentResponse {
    pub ok: bool,
    pub message: String,
    pub slug: Option<String>,
    pub document: Option<Document>,
}

impl AgentResponse {
    fn failed(message: String) -> Self {
        Self {
            ok: false,
            message,
            slug: None,
            document: None,
        }
    }
}

/// Executes one agent task against the store.
///
/// Token mismatches and task failures come back as `ok: false` responses;
/// the store is left untouched in both cases.
pub fn process_agent_task(
    store: &mut ContentStore,
    task: AgentTask,
    token: &str,
    expected_token: &str,
    settings: &RenderSettings,
    today: NaiveDate,
) -> AgentResponse {
    let kind = task.kind();
    if expected_token.is_empty() || token != expected_token {
        tracing::warn!("Rejected agent task {}: invalid token", kind);
        return AgentResponse::failed(
            IngestError::Unauthorized {
                message: "invalid agent token".to_string(),
            }
            .to_string(),
        );
    }

    tracing::info!("Agent task {} started", kind);
    match apply(store, task, settings, today) {
        Ok((slug, document)) => AgentResponse {
            ok: true,
            message: format!("Task {} completed successfully", kind),
            slug: Some(slug),
            document,
        },
        Err(e) => {
            tracing::error!("Agent task {} failed: {}", kind, e);
            AgentResponse::failed(format!("Task {} failed: {}", kind, e))
        }
    }
}

/// A clean payload slug is kept, anything else is derived from the title.
fn payload_slug(payload: &AgentPayload) -> Result<String> {
    choose_slug(&payload.slug, [payload.title.as_str()]).ok_or_else(|| IngestError::InvalidPayload {
        message: "a title or slug with letters or digits is required".to_string(),
    })
}

fn require_title(payload: &AgentPayload) -> Result<String> {
    match payload.title.trim() {
        "" => Err(IngestError::InvalidPayload {
            message: "title must not be empty".to_string(),
        }),
        title => Ok(title.to_string()),
    }
}

fn apply(
    store: &mut ContentStore,
    task: AgentTask,
    settings: &RenderSettings,
    today: NaiveDate,
) -> Result<(String, Option<Document>)> {
    match task {
        AgentTask::NewService(payload) => {
            let record = ServiceRecord {
                slug: payload_slug(&payload)?,
                title: require_title(&payload)?,
                category: match payload.category.trim() {
                    "" => DEFAULT_CATEGORY.to_string(),
                    c => c.to_string(),
                },
                excerpt: truncate_excerpt(payload.excerpt.as_deref().unwrap_or_default()),
                content: payload.content,
                images: payload.images,
                price: payload.price,
                updated_at: today,
            };
            let created = store.create_service(record, today)?;
            Ok((created.slug.clone(), Some(render(&created, settings))))
        }
        AgentTask::UpdateService(payload) => {
            let slug = payload_slug(&payload)?;
            let non_empty = |s: String| if s.trim().is_empty() { None } else { Some(s) };
            let patch = ServicePatch {
                title: non_empty(payload.title),
                category: non_empty(payload.category),
                excerpt: payload.excerpt,
                content: non_empty(payload.content),
                images: (!payload.images.is_empty()).then_some(payload.images),
                price: payload.price,
            };
            let updated = store.update_service(&slug, patch, today)?;
            Ok((updated.slug.clone(), Some(render(&updated, settings))))
        }
        AgentTask::NewCase(payload) => {
            let case = CaseStudy {
                slug: payload_slug(&payload)?,
                title: require_title(&payload)?,
                excerpt: truncate_excerpt(payload.excerpt.as_deref().unwrap_or_default()),
                content: payload.content,
                category: payload.category,
                cover: payload.images.first().cloned(),
                gallery: payload.images.iter().skip(1).cloned().collect(),
                location: None,
                team_size: None,
                duration: None,
                technologies: Vec::new(),
                client: None,
                updated_at: today,
            };
            let created = store.create_case(case, today)?;
            Ok((created.slug, None))
        }
    }
}

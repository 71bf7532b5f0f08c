use crate::core::catalog::{builtin_cases, builtin_services};
use crate::core::extract::truncate_excerpt;
use crate::domain::model::{CasePatch, CaseStudy, ServicePatch, ServiceRecord};
use crate::utils::error::{IngestError, Result};
use chrono::NaiveDate;

const SERVICE: &str = "service";
const CASE: &str = "case";

/// In-memory catalog of services and case studies.
///
/// Owned by whoever constructs it; reads hand out clones and writes take and
/// return whole values, so callers never hold references into the store.
#[derive(Debug, Clone, Default)]
pub struct ContentStore {
    services: Vec<ServiceRecord>,
    cases: Vec<CaseStudy>,
}

impl ContentStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_catalog(today: NaiveDate) -> Self {
        Self {
            services: builtin_services(today),
            cases: builtin_cases(),
        }
    }

    pub fn services(&self) -> Vec<ServiceRecord> {
        self.services.clone()
    }

    pub fn service(&self, slug: &str) -> Option<ServiceRecord> {
        self.services.iter().find(|s| s.slug == slug).cloned()
    }

    pub fn create_service(&mut self, mut record: ServiceRecord, today: NaiveDate) -> Result<ServiceRecord> {
        if self.services.iter().any(|s| s.slug == record.slug) {
            return Err(IngestError::DuplicateSlug {
                kind: SERVICE,
                slug: record.slug,
            });
        }
        record.updated_at = today;
        self.services.push(record.clone());
        tracing::debug!("Created service '{}'", record.slug);
        Ok(record)
    }

    pub fn update_service(
        &mut self,
        slug: &str,
        patch: ServicePatch,
        today: NaiveDate,
    ) -> Result<ServiceRecord> {
        let current = self
            .services
            .iter_mut()
            .find(|s| s.slug == slug)
            .ok_or_else(|| IngestError::NotFound {
                kind: SERVICE,
                slug: slug.to_string(),
            })?;

        let updated = ServiceRecord {
            title: patch.title.unwrap_or_else(|| current.title.clone()),
            slug: current.slug.clone(),
            category: patch.category.unwrap_or_else(|| current.category.clone()),
            excerpt: patch
                .excerpt
                .map(|e| truncate_excerpt(&e))
                .unwrap_or_else(|| current.excerpt.clone()),
            content: patch.content.unwrap_or_else(|| current.content.clone()),
            images: patch.images.unwrap_or_else(|| current.images.clone()),
            price: patch.price.or_else(|| current.price.clone()),
            updated_at: today,
        };
        *current = updated.clone();
        Ok(updated)
    }

    /// Distinct service categories in first-seen order.
    pub fn categories(&self) -> Vec<String> {
        let mut categories: Vec<String> = Vec::new();
        for service in &self.services {
            if !categories.contains(&service.category) {
                categories.push(service.category.clone());
            }
        }
        categories
    }

    pub fn cases(&self) -> Vec<CaseStudy> {
        self.cases.clone()
    }

    pub fn case(&self, slug: &str) -> Option<CaseStudy> {
        self.cases.iter().find(|c| c.slug == slug).cloned()
    }

    pub fn create_case(&mut self, mut case: CaseStudy, today: NaiveDate) -> Result<CaseStudy> {
        if self.cases.iter().any(|c| c.slug == case.slug) {
            return Err(IngestError::DuplicateSlug {
                kind: CASE,
                slug: case.slug,
            });
        }
        case.updated_at = today;
        self.cases.push(case.clone());
        Ok(case)
    }

    pub fn update_case(&mut self, slug: &str, patch: CasePatch, today: NaiveDate) -> Result<CaseStudy> {
        let current = self
            .cases
            .iter_mut()
            .find(|c| c.slug == slug)
            .ok_or_else(|| IngestError::NotFound {
                kind: CASE,
                slug: slug.to_string(),
            })?;

        let mut updated = current.clone();
        if let Some(title) = patch.title {
            updated.title = title;
        }
        if let Some(excerpt) = patch.excerpt {
            updated.excerpt = truncate_excerpt(&excerpt);
        }
        if let Some(content) = patch.content {
            updated.content = content;
        }
        if let Some(category) = patch.category {
            updated.category = category;
        }
        updated.cover = patch.cover.or(updated.cover);
        updated.location = patch.location.or(updated.location);
        updated.client = patch.client.or(updated.client);
        updated.updated_at = today;

        *current = updated.clone();
        Ok(updated)
    }

    /// `(slug, updated_at)` pairs for services and cases, in catalog order.
    pub fn sitemap_entries(&self) -> (Vec<(String, NaiveDate)>, Vec<(String, NaiveDate)>) {
        let services = self
            .services
            .iter()
            .map(|s| (s.slug.clone(), s.updated_at))
            .collect();
        let cases = self
            .cases
            .iter()
            .map(|c| (c.slug.clone(), c.updated_at))
            .collect();
        (services, cases)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 9, day).unwrap()
    }

    #[test]
    fn test_catalog_lookup_and_categories() {
        let store = ContentStore::with_catalog(date(13));

        assert_eq!(store.services().len(), 3);
        assert_eq!(
            store.service("germetizatsiya-shvov").unwrap().title,
            "Герметизация межпанельных швов"
        );
        assert!(store.service("unknown").is_none());
        assert_eq!(store.categories(), vec!["Высотные работы", "Клининг"]);
        assert_eq!(store.case("bridge-spb").unwrap().team_size, Some(12));
    }

    #[test]
    fn test_create_rejects_duplicate_slug() {
        let mut store = ContentStore::with_catalog(date(13));
        let existing = store.service("moyka-fasadov-ostekleniya").unwrap();

        let err = store.create_service(existing, date(14)).unwrap_err();
        assert!(matches!(err, IngestError::DuplicateSlug { kind: "service", .. }));
        assert_eq!(store.services().len(), 3);
    }

    #[test]
    fn test_update_returns_new_value_and_leaves_old_copies_alone() {
        let mut store = ContentStore::with_catalog(date(13));
        let before = store.service("vysotniaya-pokraska-fasadov").unwrap();

        let after = store
            .update_service(
                "vysotniaya-pokraska-fasadov",
                ServicePatch {
                    price: Some("От 300 ₽/м²".to_string()),
                    excerpt: Some("э".repeat(300)),
                    ..ServicePatch::default()
                },
                date(20),
            )
            .unwrap();

        assert_eq!(after.price.as_deref(), Some("От 300 ₽/м²"));
        assert_eq!(after.excerpt.chars().count(), 160);
        assert_eq!(after.title, before.title);
        assert_eq!(after.updated_at, date(20));
        assert_eq!(before.price.as_deref(), Some("От 280 ₽/м²"));
        assert_eq!(store.service("vysotniaya-pokraska-fasadov").unwrap(), after);
    }

    #[test]
    fn test_update_unknown_slug() {
        let mut store = ContentStore::new();
        let err = store
            .update_service("missing", ServicePatch::default(), date(1))
            .unwrap_err();
        assert!(matches!(err, IngestError::NotFound { kind: "service", .. }));

        let err = store.update_case("missing", CasePatch::default(), date(1)).unwrap_err();
        assert!(matches!(err, IngestError::NotFound { kind: "case", .. }));
    }

    #[test]
    fn test_case_create_and_update() {
        let mut store = ContentStore::new();
        let mut case = builtin_cases().remove(0);
        case.slug = "new-case".to_string();

        let created = store.create_case(case.clone(), date(2)).unwrap();
        assert_eq!(created.updated_at, date(2));
        assert!(store.create_case(case, date(3)).is_err());

        let updated = store
            .update_case(
                "new-case",
                CasePatch {
                    client: Some("ООО «Мост»".to_string()),
                    ..CasePatch::default()
                },
                date(5),
            )
            .unwrap();
        assert_eq!(updated.client.as_deref(), Some("ООО «Мост»"));
        assert_eq!(updated.location, created.location);
        assert_eq!(store.cases().len(), 1);
    }

    #[test]
    fn test_sitemap_entries() {
        let store = ContentStore::with_catalog(date(13));
        let (services, cases) = store.sitemap_entries();
        assert_eq!(services[0], ("vysotniaya-pokraska-fasadov".to_string(), date(13)));
        assert_eq!(cases.len(), 2);
        assert_eq!(cases[1].1, NaiveDate::from_ymd_opt(2025, 8, 15).unwrap());
    }
}

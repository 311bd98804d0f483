use serde::Serialize;

use super::categories::{CategoryDef, CategoryId};
use super::locations::ClusteredLocation;
use super::personality::PersonalityProfile;
use super::report::GrimReport;

/// One successfully normalized input URL.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Tab {
    pub url: String,
    pub domain: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    pub category: CategoryId,
}

/// All tabs of one category. Sessions carry one group per category, in
/// canonical order, empty groups included.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryGroup {
    pub category: &'static CategoryDef,
    pub tabs: Vec<Tab>,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DomainCount {
    pub domain: String,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryCount {
    pub id: CategoryId,
    pub label: &'static str,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExhumeStats {
    pub total_tabs: usize,
    pub unique_domains: usize,
    pub repeat_domains: usize,
    pub unresolved_searches: usize,
    pub homepage_only: usize,
    pub top_domain: Option<DomainCount>,
    pub top_categories: Vec<CategoryCount>,
    pub mapped_locations: usize,
    pub mapped_domains: usize,
}

/// Everything one analysis run produces. Built once, never mutated.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExhumeSession {
    pub tabs: Vec<Tab>,
    pub category_groups: Vec<CategoryGroup>,
    pub locations: Vec<ClusteredLocation>,
    pub stats: ExhumeStats,
    pub personality: PersonalityProfile,
    pub grim_report: GrimReport,
}

impl ExhumeSession {
    pub fn group(&self, id: CategoryId) -> &CategoryGroup {
        &self.category_groups[id.index()]
    }

    pub fn category_count(&self, id: CategoryId) -> usize {
        self.group(id).count
    }
}

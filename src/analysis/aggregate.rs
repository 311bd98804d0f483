use std::collections::HashMap;

use url::Url;

use super::categories::{CATEGORIES, CategoryCounts, CategoryId};
use super::session::{CategoryCount, CategoryGroup, DomainCount, Tab};

/// Domains visited this many times or more count as repeat domains.
pub const REPEAT_DOMAIN_MIN: usize = 3;

/// Registrable domain -> tab count, iterated in first-seen order.
///
/// Rankings built from it use a stable sort, so equal counts keep the order
/// in which the domains first appeared.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DomainCounts {
    order: Vec<String>,
    counts: HashMap<String, usize>,
}

impl DomainCounts {
    pub fn increment(&mut self, domain: &str) {
        match self.counts.get_mut(domain) {
            Some(count) => *count += 1,
            None => {
                self.order.push(domain.to_string());
                self.counts.insert(domain.to_string(), 1);
            }
        }
    }

    pub fn get(&self, domain: &str) -> usize {
        self.counts.get(domain).copied().unwrap_or(0)
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, usize)> + '_ {
        self.order
            .iter()
            .map(|domain| (domain.as_str(), self.get(domain)))
    }

    /// Domains with at least `min` tabs, highest count first.
    pub fn ranked_at_least(&self, min: usize) -> Vec<DomainCount> {
        let mut entries = self
            .iter()
            .filter(|(_, count)| *count >= min)
            .map(|(domain, count)| DomainCount {
                domain: domain.to_string(),
                count,
            })
            .collect::<Vec<_>>();
        entries.sort_by(|a, b| b.count.cmp(&a.count));
        entries
    }

    pub fn top(&self, limit: usize) -> Vec<DomainCount> {
        let mut ranked = self.ranked_at_least(0);
        ranked.truncate(limit);
        ranked
    }

    pub fn count_where(&self, predicate: impl Fn(usize) -> bool) -> usize {
        self.counts.values().filter(|count| predicate(**count)).count()
    }
}

impl<'a> FromIterator<&'a str> for DomainCounts {
    fn from_iter<I: IntoIterator<Item = &'a str>>(iter: I) -> Self {
        let mut counts = DomainCounts::default();
        for domain in iter {
            counts.increment(domain);
        }
        counts
    }
}

/// Running totals gathered while walking the normalized URLs.
#[derive(Debug, Clone, Default)]
pub struct Aggregate {
    pub domain_counts: DomainCounts,
    pub category_counts: CategoryCounts,
    pub homepage_only: usize,
    pub unresolved_searches: usize,
}

impl Aggregate {
    pub fn record_visit(&mut self, url: &Url, domain: &str) {
        self.domain_counts.increment(domain);
        if is_homepage(url) {
            self.homepage_only += 1;
        }
        if is_unresolved_search(url, domain) {
            self.unresolved_searches += 1;
        }
    }

    pub fn record_category(&mut self, category: CategoryId) {
        self.category_counts.increment(category);
    }

    pub fn unique_domains(&self) -> usize {
        self.domain_counts.len()
    }

    pub fn repeat_domains(&self) -> usize {
        self.domain_counts.count_where(|count| count >= REPEAT_DOMAIN_MIN)
    }

    pub fn top_domain(&self) -> Option<DomainCount> {
        self.domain_counts.top(1).into_iter().next()
    }
}

/// A bare root with no query string.
pub fn is_homepage(url: &Url) -> bool {
    let path = url.path().trim_end_matches('/');
    path.is_empty() && url.query().is_none_or(str::is_empty)
}

/// A Google results page, i.e. a question that was asked and left open.
pub fn is_unresolved_search(url: &Url, domain: &str) -> bool {
    domain.starts_with("google.")
        && url.path() == "/search"
        && url.query_pairs().any(|(key, _)| key == "q")
}

/// The three busiest categories, `other` excluded.
pub fn top_categories(counts: &CategoryCounts) -> Vec<CategoryCount> {
    let mut entries = CATEGORIES
        .iter()
        .filter(|def| def.id != CategoryId::Other)
        .map(|def| CategoryCount {
            id: def.id,
            label: def.label,
            count: counts.get(def.id),
        })
        .collect::<Vec<_>>();
    entries.sort_by(|a, b| b.count.cmp(&a.count));
    entries.truncate(3);
    entries
}

pub fn build_category_groups(tabs: &[Tab]) -> Vec<CategoryGroup> {
    CATEGORIES
        .iter()
        .map(|def| {
            let tabs = tabs
                .iter()
                .filter(|tab| tab.category == def.id)
                .cloned()
                .collect::<Vec<_>>();
            CategoryGroup {
                category: def,
                count: tabs.len(),
                tabs,
            }
        })
        .collect()
}

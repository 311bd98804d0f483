//! Behavioural scoring: eight dimensions in `[0, 1]`, folded into three
//! bipolar axes.

use std::collections::{HashMap, HashSet};

use serde::Serialize;
use url::Url;

use super::aggregate::{DomainCounts, REPEAT_DOMAIN_MIN};
use super::categories::{CategoryCounts, CategoryId};
use super::session::Tab;

const REPEAT_DOMAIN_SATURATION: f64 = 10.0;
const RABBIT_HOLE_SATURATION: f64 = 8.0;
const SERIES_READ_SATURATION: f64 = 5.0;
const MIN_SLUG_LEN: usize = 4;

/// Weight of a homepage-only tab relative to an open search.
const HOMEPAGE_UNRESOLVED_WEIGHT: f64 = 0.3;

const ACTION_CATEGORIES: [CategoryId; 6] = [
    CategoryId::Tools,
    CategoryId::Portfolios,
    CategoryId::Shopping,
    CategoryId::Jobs,
    CategoryId::Events,
    CategoryId::Design,
];

const READING_CATEGORIES: [CategoryId; 2] = [CategoryId::Reading, CategoryId::News];

const SCOUT_CATEGORIES: [CategoryId; 4] = [
    CategoryId::Portfolios,
    CategoryId::Jobs,
    CategoryId::Events,
    CategoryId::Design,
];

/// Everything the scorer reads.
#[derive(Debug, Clone, Copy)]
pub struct ScoringInput<'a> {
    pub total_tabs: usize,
    pub unique_domains: usize,
    pub domain_counts: &'a DomainCounts,
    pub category_counts: &'a CategoryCounts,
    pub unresolved_searches: usize,
    pub homepage_only: usize,
    pub tabs: &'a [Tab],
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DimensionScores {
    pub depth: f64,
    pub reading_mass: f64,
    pub action_mass: f64,
    pub social_pull: f64,
    pub unresolved_curiosity: f64,
    pub rabbit_hole_depth: f64,
    pub scout_activity: f64,
    /// Needs visit dates, which bare URLs do not carry; always 0.
    pub evergreen_retention: f64,
}

/// Above 0.5: deep, action, unresolved. Below: broad, consumption, resolved.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AxisScores {
    pub depth_breadth: f64,
    pub consumption_action: f64,
    pub resolved_unresolved: f64,
}

fn clamp01(value: f64) -> f64 {
    value.clamp(0.0, 1.0)
}

fn ratio(numerator: f64, denominator: f64) -> f64 {
    clamp01(numerator / denominator)
}

pub fn score_dimensions(input: &ScoringInput<'_>) -> DimensionScores {
    let counts = input.category_counts;
    let total = input.total_tabs.max(1) as f64;
    // `other` tabs would only dilute the category-driven dimensions.
    let classified_total = (input.total_tabs.max(1))
        .saturating_sub(counts.get(CategoryId::Other))
        .max(1) as f64;

    let inverted_breadth = 1.0 - input.unique_domains as f64 / total;
    let repeat_domains = input
        .domain_counts
        .count_where(|count| count >= REPEAT_DOMAIN_MIN);
    let repeat_weight = (repeat_domains as f64 / REPEAT_DOMAIN_SATURATION).min(1.0);
    let rabbit_hole_weight =
        (count_rabbit_holes(input.tabs) as f64 / RABBIT_HOLE_SATURATION).min(1.0);
    let depth = clamp01(inverted_breadth * 0.5 + repeat_weight * 0.3 + rabbit_hole_weight * 0.2);

    let reading_mass = ratio(counts.sum(&READING_CATEGORIES) as f64, classified_total);
    let action_mass = ratio(counts.sum(&ACTION_CATEGORIES) as f64, classified_total);
    let social_pull = ratio(counts.get(CategoryId::Social) as f64, total);

    let unresolved_signals =
        input.unresolved_searches as f64 + input.homepage_only as f64 * HOMEPAGE_UNRESOLVED_WEIGHT;
    let unresolved_curiosity = ratio(unresolved_signals, total);

    let series_weight = (count_series_reads(input.tabs) as f64 / SERIES_READ_SATURATION).min(1.0);
    let rabbit_hole_depth = clamp01(rabbit_hole_weight * 0.5 + series_weight * 0.5);

    let scout_raw = counts.sum(&SCOUT_CATEGORIES) + count_distinct_news_outlets(input.tabs);
    let scout_activity = ratio(scout_raw as f64, classified_total);

    DimensionScores {
        depth,
        reading_mass,
        action_mass,
        social_pull,
        unresolved_curiosity,
        rabbit_hole_depth,
        scout_activity,
        evergreen_retention: 0.0,
    }
}

pub fn map_to_axes(dims: &DimensionScores) -> AxisScores {
    let depth_breadth = clamp01(dims.depth * 0.7 + dims.rabbit_hole_depth * 0.3);

    let action_signal = dims.action_mass + dims.scout_activity * 0.5;
    let consumption_signal = dims.reading_mass + dims.social_pull * 0.5;
    let total_mass = action_signal + consumption_signal;
    let consumption_action = if total_mass > 0.0 {
        ratio(action_signal, total_mass)
    } else {
        0.5
    };

    let resolve_total = dims.unresolved_curiosity + dims.scout_activity;
    let resolved_unresolved = if resolve_total > 0.0 {
        ratio(dims.unresolved_curiosity, resolve_total)
    } else {
        0.5
    };

    AxisScores {
        depth_breadth,
        consumption_action,
        resolved_unresolved,
    }
}

/// Topic slugs that show up on two or more different domains: the same
/// author, book or subject followed across sites.
pub fn count_rabbit_holes(tabs: &[Tab]) -> usize {
    let mut slugs_by_domain: HashMap<&str, HashSet<String>> = HashMap::new();
    for tab in tabs {
        let Ok(url) = Url::parse(&tab.url) else {
            continue;
        };
        let slugs = url
            .path()
            .split('/')
            .filter(|segment| {
                segment.len() >= MIN_SLUG_LEN && !segment.bytes().all(|b| b.is_ascii_digit())
            })
            .map(|segment| segment.to_lowercase().replace(['-', '_'], ""))
            .collect::<Vec<_>>();
        if slugs.is_empty() {
            continue;
        }
        slugs_by_domain
            .entry(tab.domain.as_str())
            .or_default()
            .extend(slugs);
    }

    let mut domains_per_slug: HashMap<&str, usize> = HashMap::new();
    for slugs in slugs_by_domain.values() {
        for slug in slugs {
            *domains_per_slug.entry(slug.as_str()).or_insert(0) += 1;
        }
    }
    domains_per_slug.values().filter(|count| **count >= 2).count()
}

/// Medium authors and Substack publications read two or more times.
pub fn count_series_reads(tabs: &[Tab]) -> usize {
    let mut publications: HashMap<String, usize> = HashMap::new();
    for tab in tabs {
        let Ok(url) = Url::parse(&tab.url) else {
            continue;
        };
        let host = url.host_str().unwrap_or_default().to_ascii_lowercase();

        if tab.domain == "medium.com"
            && let Some(author) = medium_author(url.path())
        {
            *publications.entry(format!("medium:{author}")).or_insert(0) += 1;
        }
        if host.ends_with(".substack.com") {
            let publication = host.replacen(".substack.com", "", 1);
            *publications
                .entry(format!("substack:{publication}"))
                .or_insert(0) += 1;
        }
    }
    publications.values().filter(|count| **count >= 2).count()
}

fn medium_author(path: &str) -> Option<&str> {
    let rest = path.strip_prefix("/@")?;
    let author = rest.split('/').next().unwrap_or_default();
    if author.is_empty() { None } else { Some(author) }
}

pub fn count_distinct_news_outlets(tabs: &[Tab]) -> usize {
    tabs.iter()
        .filter(|tab| tab.category == CategoryId::News)
        .map(|tab| tab.domain.as_str())
        .collect::<HashSet<_>>()
        .len()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tab(url: &str, domain: &str, category: CategoryId) -> Tab {
        Tab {
            url: url.to_string(),
            domain: domain.to_string(),
            title: None,
            category,
        }
    }

    fn input<'a>(
        tabs: &'a [Tab],
        domain_counts: &'a DomainCounts,
        category_counts: &'a CategoryCounts,
    ) -> ScoringInput<'a> {
        ScoringInput {
            total_tabs: tabs.len(),
            unique_domains: domain_counts.len(),
            domain_counts,
            category_counts,
            unresolved_searches: 0,
            homepage_only: 0,
            tabs,
        }
    }

    #[test]
    fn rabbit_holes_need_the_same_slug_on_two_domains() {
        let tabs = vec![
            tab(
                "https://en.wikipedia.org/wiki/Octavia_Butler",
                "wikipedia.org",
                CategoryId::Reading,
            ),
            tab(
                "https://www.goodreads.com/author/octavia-butler",
                "goodreads.com",
                CategoryId::Reading,
            ),
            tab("https://www.goodreads.com/author/1234", "goodreads.com", CategoryId::Reading),
        ];
        // "octaviabutler" on two domains; "wiki"/"author" on one each.
        assert_eq!(count_rabbit_holes(&tabs), 1);
    }

    #[test]
    fn series_reads_count_repeat_publications() {
        let tabs = vec![
            tab("https://medium.com/@x/a", "medium.com", CategoryId::Reading),
            tab("https://medium.com/@x/b", "medium.com", CategoryId::Reading),
            tab("https://medium.com/@y/c", "medium.com", CategoryId::Reading),
            tab("https://acx.substack.com/p/1", "substack.com", CategoryId::Reading),
            tab("https://acx.substack.com/p/2", "substack.com", CategoryId::Reading),
        ];
        assert_eq!(count_series_reads(&tabs), 2);
    }

    #[test]
    fn news_outlets_are_distinct_domains() {
        let tabs = vec![
            tab("https://bbc.com/a", "bbc.com", CategoryId::News),
            tab("https://bbc.com/b", "bbc.com", CategoryId::News),
            tab("https://ft.com/c", "ft.com", CategoryId::News),
            tab("https://x.com/d", "x.com", CategoryId::Social),
        ];
        assert_eq!(count_distinct_news_outlets(&tabs), 2);
    }

    #[test]
    fn reading_heavy_input_scores_reading_mass() {
        let tabs = vec![
            tab("https://medium.com/@x/a", "medium.com", CategoryId::Reading),
            tab("https://medium.com/@x/b", "medium.com", CategoryId::Reading),
            tab("https://github.com/foo", "github.com", CategoryId::Tools),
            tab(
                "https://verylongcompanyname.com/x/y",
                "verylongcompanyname.com",
                CategoryId::Other,
            ),
        ];
        let domains = tabs.iter().map(|t| t.domain.as_str()).collect::<DomainCounts>();
        let mut categories = CategoryCounts::default();
        for t in &tabs {
            categories.increment(t.category);
        }
        let dims = score_dimensions(&input(&tabs, &domains, &categories));

        assert!((dims.reading_mass - 2.0 / 3.0).abs() < 1e-9);
        assert!((dims.action_mass - 1.0 / 3.0).abs() < 1e-9);
        assert_eq!(dims.social_pull, 0.0);
        assert_eq!(dims.evergreen_retention, 0.0);
        // 1 - 3/4 unique, no repeats at >= 3, no cross-domain slugs.
        assert!((dims.depth - 0.125).abs() < 1e-9);
        assert!((dims.rabbit_hole_depth - 0.1).abs() < 1e-9);
    }

    #[test]
    fn empty_input_does_not_divide_by_zero() {
        let domains = DomainCounts::default();
        let categories = CategoryCounts::default();
        let dims = score_dimensions(&input(&[], &domains, &categories));
        assert_eq!(dims.depth, 0.5);
        assert_eq!(dims.reading_mass, 0.0);

        let axes = map_to_axes(&dims);
        assert_eq!(axes.consumption_action, 0.5);
        assert_eq!(axes.resolved_unresolved, 0.5);
    }

    #[test]
    fn axes_weigh_action_against_consumption() {
        let dims = DimensionScores {
            depth: 0.4,
            reading_mass: 0.2,
            action_mass: 0.6,
            social_pull: 0.2,
            unresolved_curiosity: 0.1,
            rabbit_hole_depth: 0.5,
            scout_activity: 0.3,
            evergreen_retention: 0.0,
        };
        let axes = map_to_axes(&dims);
        assert!((axes.depth_breadth - 0.43).abs() < 1e-9);
        assert!((axes.consumption_action - 0.75 / 1.05).abs() < 1e-9);
        assert!((axes.resolved_unresolved - 0.25).abs() < 1e-9);
    }
}

use serde::Serialize;

use super::aggregate::DomainCounts;
use super::categories::{CategoryCounts, CategoryId};
use super::personality::{ArchetypeId, PersonalityProfile};
use super::session::DomainCount;

/// A domain with this many tabs is a spiral.
pub const SPIRAL_MIN: usize = 5;

const CONSUMPTION_CATEGORIES: [CategoryId; 4] = [
    CategoryId::Reading,
    CategoryId::News,
    CategoryId::Video,
    CategoryId::Social,
];

const CREATION_CATEGORIES: [CategoryId; 3] =
    [CategoryId::Tools, CategoryId::Design, CategoryId::Portfolios];

/// Categories whose tabs go stale on their own.
const STALE_CATEGORIES: [CategoryId; 3] =
    [CategoryId::News, CategoryId::Social, CategoryId::Shopping];

/// Above this share of never-revisited domains the verdict calls out the drift.
const DRIFT_PCT: u32 = 50;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GrimReport {
    pub spirals: Vec<DomainCount>,
    pub deepest_spiral: Option<DomainCount>,
    pub consumption_count: usize,
    pub creation_count: usize,
    pub ratio: String,
    pub is_consumer: bool,
    pub stale_count: usize,
    pub stale_pct: u32,
    pub unfinished_shopping: usize,
    pub unfinished_jobs: usize,
    pub one_and_done_count: usize,
    pub one_and_done_pct: u32,
    pub verdict: String,
}

#[derive(Debug, Clone, Copy)]
pub struct ReportInput<'a> {
    pub domain_counts: &'a DomainCounts,
    pub category_counts: &'a CategoryCounts,
    pub total_tabs: usize,
    pub unique_domains: usize,
    pub personality: &'a PersonalityProfile,
}

fn percent(part: usize, whole: usize) -> u32 {
    if whole == 0 {
        return 0;
    }
    (part as f64 / whole as f64 * 100.0).round() as u32
}

/// `"{high/low}:1"`, with both sides floored at one.
pub fn format_ratio(a: usize, b: usize) -> String {
    let high = a.max(b).max(1);
    let low = a.min(b).max(1);
    let rounded = (high as f64 / low as f64).round() as u64;
    if rounded <= 1 {
        "1:1".to_string()
    } else {
        format!("{rounded}:1")
    }
}

pub fn compute_grim_report(input: &ReportInput<'_>) -> GrimReport {
    let counts = input.category_counts;

    let spirals = input.domain_counts.ranked_at_least(SPIRAL_MIN);
    let deepest_spiral = spirals.first().cloned();

    let consumption_count = counts.sum(&CONSUMPTION_CATEGORIES);
    let creation_count = counts.sum(&CREATION_CATEGORIES);

    let stale_count = counts.sum(&STALE_CATEGORIES);
    let one_and_done_count = input.domain_counts.count_where(|count| count == 1);

    let mut report = GrimReport {
        spirals,
        deepest_spiral,
        consumption_count,
        creation_count,
        ratio: format_ratio(consumption_count, creation_count),
        is_consumer: consumption_count >= creation_count,
        stale_count,
        stale_pct: percent(stale_count, input.total_tabs),
        unfinished_shopping: counts.get(CategoryId::Shopping),
        unfinished_jobs: counts.get(CategoryId::Jobs),
        one_and_done_count,
        one_and_done_pct: percent(one_and_done_count, input.unique_domains),
        verdict: String::new(),
    };
    report.verdict = compose_verdict(&report, input.total_tabs, input.personality);
    report
}

fn compose_verdict(
    report: &GrimReport,
    total_tabs: usize,
    personality: &PersonalityProfile,
) -> String {
    let title = &personality.title;
    let mut parts: Vec<String> = Vec::new();

    match personality.archetype {
        ArchetypeId::Unburdened => {
            let graves = if total_tabs == 1 { "grave" } else { "graves" };
            parts.push(format!("You opened {total_tabs} {graves}."));
            if report.one_and_done_pct > 0 {
                parts.push(format!(
                    "{}% of your tabs were laid to rest the same day.",
                    report.one_and_done_pct
                ));
            }
            parts.push(format!("You are {title} — and nothing is holding you here."));
        }
        ArchetypeId::Mortab => {
            parts.push("Time failed somewhere past tab 600.".to_string());
            parts.push("Nothing you opened was ever closed. It was fuel.".to_string());
            parts.push("Fuel for your insatiable hunger.".to_string());
            parts.push("Now you've ascended to your now true form,".to_string());
            parts.push(format!("We bow in your presence, O great {title}."));
        }
        _ => {
            parts.push(format!("You opened {total_tabs} graves."));

            if let Some(spiral) = &report.deepest_spiral {
                parts.push(format!(
                    "You spiraled {} tabs deep into {}.",
                    spiral.count, spiral.domain
                ));
            }

            if report.stale_pct > 0 {
                parts.push(format!(
                    "{}% of your tabs are probably already dead.",
                    report.stale_pct
                ));
            }

            let shopping = report.unfinished_shopping;
            let jobs = report.unfinished_jobs;
            match (shopping > 0, jobs > 0) {
                (true, true) => parts.push(format!(
                    "You saved {shopping} things you'll never buy and browsed {jobs} jobs you'll never apply to."
                )),
                (true, false) => {
                    parts.push(format!("You saved {shopping} things you'll never buy."))
                }
                (false, true) => {
                    parts.push(format!("You browsed {jobs} jobs you'll never apply to."))
                }
                (false, false) => {}
            }

            if report.one_and_done_pct > DRIFT_PCT {
                parts.push(format!(
                    "{}% of the domains you touched, you never returned to.",
                    report.one_and_done_pct
                ));
            }

            parts.push(format!("You are {title} — and you have unfinished business."));
        }
    }

    parts.join(" ")
}

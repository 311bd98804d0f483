use std::fmt::Write as _;

use crate::analysis::aggregate::DomainCounts;
use crate::analysis::session::DomainCount;
use crate::analysis::{CategoryId, ExhumeSession, PersonalityBreakdown};

const SAMPLE_URLS_PER_DOMAIN: usize = 2;
const SAMPLE_URL_MAX_CHARS: usize = 100;

#[derive(Debug, Clone, Copy, Default)]
pub struct SummaryOptions {
    pub top_domains: usize,
    pub show_other: usize,
}

fn domain_count_label(entry: Option<&DomainCount>) -> String {
    match entry {
        Some(entry) => format!("{} ({})", entry.domain, entry.count),
        None => "-".to_string(),
    }
}

fn truncate_chars(value: &str, max: usize) -> &str {
    match value.char_indices().nth(max) {
        Some((idx, _)) => &value[..idx],
        None => value,
    }
}

pub fn render_summary(session: &ExhumeSession, options: SummaryOptions) -> String {
    let stats = &session.stats;
    let mut out = String::new();

    let _ = writeln!(out, "=== Exhumed ===");
    let _ = writeln!(out, "Total tabs:          {}", stats.total_tabs);
    let _ = writeln!(out, "Unique domains:      {}", stats.unique_domains);
    let _ = writeln!(out, "Repeat domains:      {}", stats.repeat_domains);
    let _ = writeln!(out, "Unresolved searches: {}", stats.unresolved_searches);
    let _ = writeln!(out, "Homepage-only:       {}", stats.homepage_only);
    let _ = writeln!(
        out,
        "Mapped locations:    {} ({} domains)",
        stats.mapped_locations, stats.mapped_domains
    );
    let _ = writeln!(
        out,
        "Top domain:          {}",
        domain_count_label(stats.top_domain.as_ref())
    );
    let top_categories = stats
        .top_categories
        .iter()
        .map(|c| format!("{}: {}", c.label, c.count))
        .collect::<Vec<_>>();
    let _ = writeln!(out, "Top categories:      {}", top_categories.join(", "));

    let mut groups = session
        .category_groups
        .iter()
        .filter(|g| g.count > 0)
        .collect::<Vec<_>>();
    groups.sort_by(|a, b| b.count.cmp(&a.count));
    let all_categories = groups
        .iter()
        .map(|g| format!("{} {}: {}", g.category.icon, g.category.label, g.count))
        .collect::<Vec<_>>();
    let _ = writeln!(out, "All categories:      {}", all_categories.join(", "));

    if options.top_domains > 0 {
        out.push('\n');
        out.push_str(&render_top_domains(session, options.top_domains));
    }

    let personality = &session.personality;
    let _ = writeln!(out);
    let _ = writeln!(out, "{}", personality.title);
    let _ = writeln!(out, "{}", personality.description);

    let report = &session.grim_report;
    let _ = writeln!(out);
    let _ = writeln!(out, "--- Grim Report ---");
    let _ = writeln!(
        out,
        "Consumption vs creation: {} ({} / {}){}",
        report.ratio,
        report.consumption_count,
        report.creation_count,
        if report.is_consumer { ", consumer" } else { ", creator" }
    );
    let _ = writeln!(
        out,
        "Deepest spiral:          {}",
        domain_count_label(report.deepest_spiral.as_ref())
    );
    let _ = writeln!(
        out,
        "Stale tabs:              {} ({}%)",
        report.stale_count, report.stale_pct
    );
    let _ = writeln!(
        out,
        "One-and-done domains:    {} ({}%)",
        report.one_and_done_count, report.one_and_done_pct
    );
    let _ = writeln!(out);
    let _ = writeln!(out, "{}", report.verdict);

    if options.show_other > 0 {
        out.push('\n');
        out.push_str(&render_other(session, options.show_other));
    }

    out
}

pub fn render_top_domains(session: &ExhumeSession, limit: usize) -> String {
    let counts = session
        .tabs
        .iter()
        .map(|tab| tab.domain.as_str())
        .collect::<DomainCounts>();
    let mut out = String::from("--- Top domains ---\n");
    if counts.is_empty() {
        out.push_str("   (none)\n");
        return out;
    }
    for entry in counts.top(limit) {
        let _ = writeln!(out, "{:>4}  {}", entry.count, entry.domain);
    }
    out
}

/// Uncategorized tabs grouped by domain, largest group first.
pub fn other_by_domain(session: &ExhumeSession) -> Vec<(&str, Vec<&str>)> {
    let mut groups: Vec<(&str, Vec<&str>)> = Vec::new();
    for tab in &session.group(CategoryId::Other).tabs {
        match groups.iter_mut().find(|(domain, _)| *domain == tab.domain) {
            Some((_, urls)) => urls.push(tab.url.as_str()),
            None => groups.push((tab.domain.as_str(), vec![tab.url.as_str()])),
        }
    }
    groups.sort_by(|a, b| b.1.len().cmp(&a.1.len()));
    groups
}

pub fn render_other(session: &ExhumeSession, limit: usize) -> String {
    let groups = other_by_domain(session);
    let mut out = String::new();
    let _ = writeln!(
        out,
        "--- Uncategorized: {} tabs across {} domains ---",
        session.category_count(CategoryId::Other),
        groups.len()
    );
    for (domain, urls) in groups.iter().take(limit) {
        let _ = writeln!(out, "{:>4}  {domain}", urls.len());
        for url in urls.iter().take(SAMPLE_URLS_PER_DOMAIN) {
            let _ = writeln!(out, "        {}", truncate_chars(url, SAMPLE_URL_MAX_CHARS));
        }
    }
    out
}

pub fn render_explain(breakdown: &PersonalityBreakdown) -> String {
    let d = &breakdown.dimensions;
    let a = &breakdown.axes;
    let mut out = String::from("--- Dimensions ---\n");
    for (name, value) in [
        ("depth", d.depth),
        ("reading mass", d.reading_mass),
        ("action mass", d.action_mass),
        ("social pull", d.social_pull),
        ("unresolved curiosity", d.unresolved_curiosity),
        ("rabbit-hole depth", d.rabbit_hole_depth),
        ("scout activity", d.scout_activity),
        ("evergreen retention", d.evergreen_retention),
    ] {
        let _ = writeln!(out, "{name:<22}{value:.3}");
    }
    out.push_str("--- Axes (0 = broad / consumption / resolved) ---\n");
    for (name, value) in [
        ("depth-breadth", a.depth_breadth),
        ("consumption-action", a.consumption_action),
        ("resolved-unresolved", a.resolved_unresolved),
    ] {
        let _ = writeln!(out, "{name:<22}{value:.3}");
    }
    let _ = writeln!(out, "{:<22}{}", "archetype", breakdown.archetype.base_title());
    out
}

//! The analysis pipeline: raw text in, one immutable [`ExhumeSession`] out.
//!
//! Work is split into seven steps so callers can show progress. The paced
//! variant only adds a timer between steps; every entry point produces the
//! same session for the same text.

use std::time::Duration;

use log::{debug, info};
use url::Url;

use super::aggregate::{Aggregate, DomainCounts, build_category_groups, top_categories};
use super::categories::CategoryCounts;
use super::classify::classify_category;
use super::domain::registrable_domain;
use super::locations::{ClusteredLocation, cluster_locations};
use super::personality::{
    PersonalityBreakdown, PersonalityProfile, explain_personality, score_personality,
};
use super::report::{ReportInput, compute_grim_report};
use super::scoring::ScoringInput;
use super::session::{ExhumeSession, ExhumeStats, Tab};
use super::urls::{extract_urls, normalize_url};
use crate::error::AnalysisError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AnalysisStep {
    Reading,
    Extracting,
    Normalizing,
    CountingDomains,
    Classifying,
    Mapping,
    Scoring,
}

impl AnalysisStep {
    pub const ALL: [AnalysisStep; 7] = [
        AnalysisStep::Reading,
        AnalysisStep::Extracting,
        AnalysisStep::Normalizing,
        AnalysisStep::CountingDomains,
        AnalysisStep::Classifying,
        AnalysisStep::Mapping,
        AnalysisStep::Scoring,
    ];

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn label(self) -> &'static str {
        match self {
            AnalysisStep::Reading => "Gathering the bones…",
            AnalysisStep::Extracting => "Listening for links…",
            AnalysisStep::Normalizing => "Scraping rust from URLs…",
            AnalysisStep::CountingDomains => "Counting the haunts…",
            AnalysisStep::Classifying => "Sorting remains into plots…",
            AnalysisStep::Mapping => "Pinning souls to the globe…",
            AnalysisStep::Scoring => "Consulting the archetypes…",
        }
    }
}

/// Pause inserted after each step by [`analyze_paced`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepDelay {
    Fixed(Duration),
    /// Chosen from the number of extracted URLs once extraction is done.
    Adaptive,
}

impl StepDelay {
    pub const DEFAULT: Duration = Duration::from_millis(280);

    /// Bigger piles get a slower cadence.
    pub fn for_url_count(count: usize) -> Duration {
        let ms = match count {
            2001.. => 420,
            801.. => 320,
            _ => 260,
        };
        Duration::from_millis(ms)
    }

    fn resolve(self, url_count: usize) -> Duration {
        match self {
            StepDelay::Fixed(delay) => delay,
            StepDelay::Adaptive => StepDelay::for_url_count(url_count),
        }
    }
}

impl Default for StepDelay {
    fn default() -> Self {
        StepDelay::Fixed(StepDelay::DEFAULT)
    }
}

pub type StepCallback = Box<dyn FnMut(AnalysisStep) + Send>;

#[derive(Default)]
pub struct AnalyzeOptions {
    pub on_step: Option<StepCallback>,
    pub step_delay: StepDelay,
}

impl AnalyzeOptions {
    pub fn immediate() -> Self {
        AnalyzeOptions {
            on_step: None,
            step_delay: StepDelay::Fixed(Duration::ZERO),
        }
    }

    pub fn with_step_delay(mut self, step_delay: StepDelay) -> Self {
        self.step_delay = step_delay;
        self
    }

    pub fn on_step(mut self, callback: impl FnMut(AnalysisStep) + Send + 'static) -> Self {
        self.on_step = Some(Box::new(callback));
        self
    }
}

impl std::fmt::Debug for AnalyzeOptions {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AnalyzeOptions")
            .field("on_step", &self.on_step.is_some())
            .field("step_delay", &self.step_delay)
            .finish()
    }
}

/// Intermediate state between steps.
struct Run {
    extracted: Vec<String>,
    urls: Vec<Url>,
    domains: Vec<String>,
    aggregate: Aggregate,
    tabs: Vec<Tab>,
    locations: Vec<ClusteredLocation>,
    mapped_domains: usize,
    personality: Option<PersonalityProfile>,
}

impl Run {
    fn start(text: &str) -> Result<Self, AnalysisError> {
        let extracted = extract_urls(text);
        if extracted.is_empty() {
            return Err(AnalysisError::NoUrls);
        }
        debug!("extracted {} candidate urls", extracted.len());

        Ok(Run {
            extracted,
            urls: Vec::new(),
            domains: Vec::new(),
            aggregate: Aggregate::default(),
            tabs: Vec::new(),
            locations: Vec::new(),
            mapped_domains: 0,
            personality: None,
        })
    }

    fn perform(&mut self, step: AnalysisStep) {
        match step {
            AnalysisStep::Reading | AnalysisStep::Extracting => {}
            AnalysisStep::Normalizing => {
                self.urls = self
                    .extracted
                    .iter()
                    .filter_map(|raw| normalize_url(raw))
                    .collect();
                debug!(
                    "normalized {} of {} urls",
                    self.urls.len(),
                    self.extracted.len()
                );
            }
            AnalysisStep::CountingDomains => {
                for url in &self.urls {
                    let domain = registrable_domain(url.host_str().unwrap_or_default());
                    self.aggregate.record_visit(url, &domain);
                    self.domains.push(domain);
                }
                debug!("counted {} unique domains", self.aggregate.unique_domains());
            }
            AnalysisStep::Classifying => {
                for (url, domain) in self.urls.iter().zip(&self.domains) {
                    let category = classify_category(url, domain);
                    self.aggregate.record_category(category);
                    self.tabs.push(Tab {
                        url: url.to_string(),
                        domain: domain.clone(),
                        title: None,
                        category,
                    });
                }
            }
            AnalysisStep::Mapping => {
                let (locations, mapped_domains) = cluster_locations(&self.aggregate.domain_counts);
                debug!(
                    "placed {mapped_domains} domains in {} cities",
                    locations.len()
                );
                self.locations = locations;
                self.mapped_domains = mapped_domains;
            }
            AnalysisStep::Scoring => {
                self.personality = Some(self.score());
            }
        }
    }

    fn scoring_input(&self) -> ScoringInput<'_> {
        ScoringInput {
            total_tabs: self.tabs.len(),
            unique_domains: self.aggregate.unique_domains(),
            domain_counts: &self.aggregate.domain_counts,
            category_counts: &self.aggregate.category_counts,
            unresolved_searches: self.aggregate.unresolved_searches,
            homepage_only: self.aggregate.homepage_only,
            tabs: &self.tabs,
        }
    }

    fn score(&self) -> PersonalityProfile {
        score_personality(&self.scoring_input())
    }

    fn finish(mut self) -> ExhumeSession {
        let personality = match self.personality.take() {
            Some(personality) => personality,
            None => self.score(),
        };
        info!(
            "{} tabs across {} domains: {}",
            self.tabs.len(),
            self.aggregate.unique_domains(),
            personality.title
        );

        let stats = ExhumeStats {
            total_tabs: self.tabs.len(),
            unique_domains: self.aggregate.unique_domains(),
            repeat_domains: self.aggregate.repeat_domains(),
            unresolved_searches: self.aggregate.unresolved_searches,
            homepage_only: self.aggregate.homepage_only,
            top_domain: self.aggregate.top_domain(),
            top_categories: top_categories(&self.aggregate.category_counts),
            mapped_locations: self.locations.len(),
            mapped_domains: self.mapped_domains,
        };

        let grim_report = compute_grim_report(&ReportInput {
            domain_counts: &self.aggregate.domain_counts,
            category_counts: &self.aggregate.category_counts,
            total_tabs: stats.total_tabs,
            unique_domains: stats.unique_domains,
            personality: &personality,
        });

        ExhumeSession {
            category_groups: build_category_groups(&self.tabs),
            tabs: self.tabs,
            locations: self.locations,
            stats,
            personality,
            grim_report,
        }
    }
}

pub fn analyze(text: &str) -> Result<ExhumeSession, AnalysisError> {
    analyze_with_progress(text, |_| {})
}

/// Runs every step synchronously, reporting each one before it runs.
pub fn analyze_with_progress(
    text: &str,
    mut on_step: impl FnMut(AnalysisStep),
) -> Result<ExhumeSession, AnalysisError> {
    let mut run = Run::start(text)?;
    for step in AnalysisStep::ALL {
        on_step(step);
        run.perform(step);
    }
    Ok(run.finish())
}

/// Same result as [`analyze`], with a pause after every step.
pub async fn analyze_paced(
    text: &str,
    mut options: AnalyzeOptions,
) -> Result<ExhumeSession, AnalysisError> {
    let mut run = Run::start(text)?;
    let delay = options.step_delay.resolve(run.extracted.len());
    debug!("pacing analysis at {delay:?} per step");

    for step in AnalysisStep::ALL {
        if let Some(on_step) = options.on_step.as_mut() {
            on_step(step);
        }
        run.perform(step);
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
    }
    Ok(run.finish())
}

/// Recompute the dimension and axis scores behind a finished session.
pub fn explain_session(session: &ExhumeSession) -> PersonalityBreakdown {
    let domain_counts = session
        .tabs
        .iter()
        .map(|tab| tab.domain.as_str())
        .collect::<DomainCounts>();
    let mut category_counts = CategoryCounts::default();
    for tab in &session.tabs {
        category_counts.increment(tab.category);
    }

    explain_personality(&ScoringInput {
        total_tabs: session.tabs.len(),
        unique_domains: domain_counts.len(),
        domain_counts: &domain_counts,
        category_counts: &category_counts,
        unresolved_searches: session.stats.unresolved_searches,
        homepage_only: session.stats.homepage_only,
        tabs: &session.tabs,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::categories::CategoryId;

    #[test]
    fn step_indices_follow_declaration_order() {
        let indices = AnalysisStep::ALL.iter().map(|s| s.index()).collect::<Vec<_>>();
        assert_eq!(indices, (0..7).collect::<Vec<_>>());
        assert_eq!(AnalysisStep::Mapping.label(), "Pinning souls to the globe…");
    }

    #[test]
    fn adaptive_delay_tiers() {
        assert_eq!(StepDelay::for_url_count(10), Duration::from_millis(260));
        assert_eq!(StepDelay::for_url_count(800), Duration::from_millis(260));
        assert_eq!(StepDelay::for_url_count(801), Duration::from_millis(320));
        assert_eq!(StepDelay::for_url_count(2001), Duration::from_millis(420));
        assert_eq!(StepDelay::default(), StepDelay::Fixed(Duration::from_millis(280)));
    }

    #[test]
    fn empty_text_fails_before_any_step() {
        let mut seen = Vec::new();
        let result = analyze_with_progress("nothing here", |step| seen.push(step));
        assert_eq!(result.unwrap_err(), AnalysisError::NoUrls);
        assert!(seen.is_empty());
    }

    #[test]
    fn unparseable_candidates_leave_an_empty_session() {
        let session = analyze("http://[broken").unwrap();
        assert!(session.tabs.is_empty());
        assert_eq!(session.stats.total_tabs, 0);
        assert_eq!(session.personality.title, "The Unburdened");
        assert_eq!(session.category_groups.len(), 12);
    }

    #[test]
    fn tabs_keep_input_order_and_normalized_urls() {
        let session = analyze(
            "https://github.com/rust-lang/rust?utm_source=x#readme\n\
             https://news.ycombinator.com/item?id=1",
        )
        .unwrap();
        let urls = session.tabs.iter().map(|t| t.url.as_str()).collect::<Vec<_>>();
        assert_eq!(
            urls,
            vec![
                "https://github.com/rust-lang/rust",
                "https://news.ycombinator.com/item?id=1"
            ]
        );
        assert_eq!(session.tabs[0].category, CategoryId::Tools);
        assert_eq!(session.tabs[1].domain, "ycombinator.com");
    }

    #[test]
    fn explain_session_matches_the_scored_archetype() {
        let text = (0..12)
            .map(|i| format!("https://medium.com/@writer/essay-number-{i}"))
            .collect::<Vec<_>>()
            .join("\n");
        let session = analyze(&text).unwrap();
        let breakdown = explain_session(&session);
        assert_eq!(breakdown.archetype, session.personality.archetype);
    }
}

//! Tab-pile analysis: URL extraction and cleanup, categorization, behavioural
//! scoring and the grim report.

pub mod aggregate;
pub mod categories;
pub mod classify;
pub mod domain;
pub mod locations;
pub mod personality;
pub mod pipeline;
pub mod report;
pub mod scoring;
pub mod session;
pub mod urls;

pub use categories::{CATEGORIES, CategoryDef, CategoryId};
pub use classify::classify_category;
pub use domain::registrable_domain;
pub use personality::{
    ArchetypeId, PersonalityBreakdown, PersonalityProfile, explain_personality,
    score_personality, select_archetype,
};
pub use pipeline::{
    AnalysisStep, AnalyzeOptions, StepDelay, analyze, analyze_paced, analyze_with_progress,
    explain_session,
};
pub use report::{GrimReport, compute_grim_report};
pub use scoring::{AxisScores, DimensionScores, ScoringInput, map_to_axes, score_dimensions};
pub use session::{CategoryGroup, ExhumeSession, ExhumeStats, Tab};
pub use urls::{extract_urls, normalize_url};

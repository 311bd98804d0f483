pub mod analysis;
pub mod app;
pub mod error;

pub use analysis::{AnalysisStep, AnalyzeOptions, ExhumeSession, analyze, analyze_paced};
pub use error::{AnalysisError, Error, Result};

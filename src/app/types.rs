use clap::{Parser, ValueEnum};

use crate::analysis::{AnalysisStep, ExhumeSession};
use crate::error::AnalysisError;

#[derive(Debug, Parser, Clone)]
#[command(
    name = "exhume",
    version,
    about = "Dig through a pile of open tabs and find out what kind of hoarder you are"
)]
pub struct Cli {
    /// Files to read URLs from; `-` reads stdin. Reads stdin when empty.
    #[arg(value_name = "FILE")]
    pub inputs: Vec<String>,

    /// Inline text to analyze, placed before any files. Ignored when blank.
    #[arg(long, value_name = "TEXT")]
    pub text: Option<String>,

    #[arg(long, value_enum, default_value_t = OutputFormat::Summary)]
    pub format: OutputFormat,

    #[arg(short, long, value_name = "FILE")]
    pub output: Option<String>,

    /// Write json/csv output to a timestamped file in the working directory.
    #[arg(long, default_value_t = false, conflicts_with = "output")]
    pub save: bool,

    /// Walk the steps at a readable cadence, reporting progress on stderr.
    #[arg(long, default_value_t = false)]
    pub pace: bool,

    /// Append the dimension and axis scores behind the archetype.
    #[arg(long, default_value_t = false)]
    pub explain: bool,

    #[arg(long, value_name = "N", default_value_t = 5)]
    pub top_domains: usize,

    /// List up to N domains left uncategorized, with sample URLs.
    #[arg(long, value_name = "N", default_value_t = 0)]
    pub show_other: usize,
}

#[derive(Debug, Copy, Clone, ValueEnum, PartialEq, Eq)]
pub enum OutputFormat {
    Summary,
    Json,
    Csv,
}

impl OutputFormat {
    pub fn extension(self) -> &'static str {
        match self {
            OutputFormat::Summary => "txt",
            OutputFormat::Json => "json",
            OutputFormat::Csv => "csv",
        }
    }

    /// `None` for the human summary.
    pub fn data_format(self) -> Option<DataFormat> {
        match self {
            OutputFormat::Summary => None,
            OutputFormat::Json => Some(DataFormat::Json),
            OutputFormat::Csv => Some(DataFormat::Csv),
        }
    }
}

/// Machine-readable export formats.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum DataFormat {
    Json,
    Csv,
}

/// Progress from the analysis task to the printing loop.
#[derive(Debug)]
pub enum AnalysisEvent {
    Step(AnalysisStep),
    Finished(Box<Result<ExhumeSession, AnalysisError>>),
}

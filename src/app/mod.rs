//! The `exhume` command line: input loading, export sinks and text rendering.

pub mod data_io;
pub mod render;
mod runtime;
pub mod types;

pub use runtime::run;

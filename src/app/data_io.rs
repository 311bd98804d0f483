use std::fs::{self, File};
use std::io::{self, BufWriter, Read, Write};

use chrono::{SecondsFormat, Utc};
use serde::Serialize;

use super::types::{DataFormat, OutputFormat};
use crate::analysis::{ExhumeSession, Tab};
use crate::error::Result;

const CSV_HEADERS: [&str; 5] = ["url", "domain", "category", "category_label", "title"];

const STDIN_MARKER: &str = "-";

/// Gather every input into one blob of text, separated by blank lines.
///
/// Inline text comes first and is skipped when blank. Bytes that are not
/// valid UTF-8 are replaced rather than rejected.
pub fn read_inputs(inputs: &[String], inline_text: Option<&str>) -> io::Result<String> {
    let mut parts = Vec::with_capacity(inputs.len() + 1);
    if let Some(text) = inline_text
        && !text.trim().is_empty()
    {
        parts.push(text.to_string());
    }
    for input in inputs {
        if input == STDIN_MARKER {
            parts.push(read_stdin()?);
        } else {
            parts.push(decode_lossy(fs::read(input)?));
        }
    }
    if inputs.is_empty() && inline_text.is_none() {
        parts.push(read_stdin()?);
    }
    Ok(parts.join("\n\n"))
}

fn read_stdin() -> io::Result<String> {
    let mut buffer = Vec::new();
    io::stdin().read_to_end(&mut buffer)?;
    Ok(decode_lossy(buffer))
}

fn decode_lossy(bytes: Vec<u8>) -> String {
    match String::from_utf8(bytes) {
        Ok(text) => text,
        Err(err) => String::from_utf8_lossy(err.as_bytes()).into_owned(),
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct JsonExport<'a> {
    exported_at: String,
    #[serde(flatten)]
    session: &'a ExhumeSession,
}

pub struct CsvSink<W: Write> {
    writer: csv::Writer<W>,
}

impl<W: Write> CsvSink<W> {
    pub fn new(inner: W) -> Result<Self> {
        let mut writer = csv::Writer::from_writer(inner);
        writer.write_record(CSV_HEADERS)?;
        Ok(Self { writer })
    }

    pub fn write_tab(&mut self, tab: &Tab) -> Result<()> {
        self.writer.write_record([
            tab.url.as_str(),
            tab.domain.as_str(),
            tab.category.key(),
            tab.category.label(),
            tab.title.as_deref().unwrap_or_default(),
        ])?;
        Ok(())
    }

    pub fn finish(mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }
}

pub fn write_json<W: Write>(mut out: W, session: &ExhumeSession) -> Result<()> {
    let export = JsonExport {
        exported_at: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
        session,
    };
    serde_json::to_writer_pretty(&mut out, &export)?;
    out.write_all(b"\n")?;
    out.flush()?;
    Ok(())
}

pub fn write_csv<W: Write>(out: W, tabs: &[Tab]) -> Result<()> {
    let mut sink = CsvSink::new(out)?;
    for tab in tabs {
        sink.write_tab(tab)?;
    }
    sink.finish()
}

pub fn export_session<W: Write>(
    out: W,
    session: &ExhumeSession,
    format: DataFormat,
) -> Result<()> {
    match format {
        DataFormat::Csv => write_csv(out, &session.tabs),
        DataFormat::Json => write_json(out, session),
    }
}

pub fn export_to_file(path: &str, session: &ExhumeSession, format: DataFormat) -> Result<()> {
    let file = BufWriter::new(File::create(path)?);
    export_session(file, session, format)
}

pub fn detect_data_format(path: &str, fallback: OutputFormat) -> OutputFormat {
    let lower = path.to_ascii_lowercase();
    if lower.ends_with(".json") {
        OutputFormat::Json
    } else if lower.ends_with(".csv") {
        OutputFormat::Csv
    } else {
        fallback
    }
}

pub fn default_output_path(format: OutputFormat) -> String {
    let ts = Utc::now().format("%Y%m%d_%H%M%S");
    format!("exhume_{ts}.{}", format.extension())
}

use std::io::{self, Write};

use clap::Parser;
use log::warn;
use tokio::sync::mpsc::{self, UnboundedReceiver};

use super::data_io::{
    default_output_path, detect_data_format, export_session, export_to_file, read_inputs,
};
use super::render::{SummaryOptions, render_explain, render_summary};
use super::types::{AnalysisEvent, Cli};
use crate::analysis::{
    AnalysisStep, AnalyzeOptions, ExhumeSession, StepDelay, analyze, analyze_paced,
    explain_session,
};
use crate::error::{AnalysisError, Result};

pub async fn run() -> Result<()> {
    let cli = Cli::parse();
    let text = read_inputs(&cli.inputs, cli.text.as_deref())?;

    let session = if cli.pace {
        run_paced(text).await?
    } else {
        analyze(&text)?
    };

    let format = cli
        .output
        .as_deref()
        .map(|path| detect_data_format(path, cli.format))
        .unwrap_or(cli.format);
    let output_path = match (&cli.output, cli.save) {
        (Some(path), _) => Some(path.clone()),
        (None, true) => Some(default_output_path(format)),
        (None, false) => None,
    };

    match (format.data_format(), output_path) {
        (None, None) => {
            let mut stdout = io::stdout().lock();
            stdout.write_all(summary_text(&cli, &session).as_bytes())?;
            stdout.flush()?;
        }
        (None, Some(path)) => {
            std::fs::write(&path, summary_text(&cli, &session))?;
            eprintln!("wrote summary: {path}");
        }
        (Some(data_format), None) => export_session(io::stdout().lock(), &session, data_format)?,
        (Some(data_format), Some(path)) => {
            export_to_file(&path, &session, data_format)?;
            eprintln!(
                "wrote {} tabs: archetype={} output={path}",
                session.stats.total_tabs, session.personality.title
            );
        }
    }

    Ok(())
}

fn summary_text(cli: &Cli, session: &ExhumeSession) -> String {
    let mut text = render_summary(
        session,
        SummaryOptions {
            top_domains: cli.top_domains,
            show_other: cli.show_other,
        },
    );
    if cli.explain {
        text.push('\n');
        text.push_str(&render_explain(&explain_session(session)));
    }
    text
}

/// Runs the paced pipeline on its own task and reports its steps on stderr.
async fn run_paced(text: String) -> Result<ExhumeSession> {
    let (tx, mut rx) = mpsc::unbounded_channel::<AnalysisEvent>();
    let step_tx = tx.clone();
    let options = AnalyzeOptions::default()
        .with_step_delay(StepDelay::Adaptive)
        .on_step(move |step| {
            let _ = step_tx.send(AnalysisEvent::Step(step));
        });

    let analysis_handle = tokio::spawn(async move {
        let result = analyze_paced(&text, options).await;
        let _ = tx.send(AnalysisEvent::Finished(Box::new(result)));
    });

    let outcome = report_progress(&mut rx).await;

    if let Err(e) = analysis_handle.await {
        warn!("analysis task join error: {e}");
    }

    match outcome {
        Some(result) => Ok(result?),
        None => Err(io::Error::other("analysis task ended without a result").into()),
    }
}

async fn report_progress(
    rx: &mut UnboundedReceiver<AnalysisEvent>,
) -> Option<std::result::Result<ExhumeSession, AnalysisError>> {
    let total = AnalysisStep::ALL.len();
    while let Some(event) = rx.recv().await {
        match event {
            AnalysisEvent::Step(step) => {
                eprintln!("[{}/{total}] {}", step.index() + 1, step.label());
            }
            AnalysisEvent::Finished(result) => return Some(*result),
        }
    }
    None
}

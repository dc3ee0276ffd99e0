use anyhow::Context;
use chrono::Local;
use reachr_common::config::Config;
use reachr_common::input::{Entry, InputSource};
use reachr_core::orchestrator::ConnectivityOrchestrator;
use reachr_core::report::ReportWriter;
use tokio::sync::mpsc;
use tracing::{Instrument, error};

use crate::terminal::{report, spinner};

pub async fn check(source: InputSource, cfg: &Config) -> anyhow::Result<()> {
    let entries: Vec<Entry> = source.load().context("loading targets")?;
    let mut writer = ReportWriter::create(&cfg.output)?;

    report::run_header(entries.len(), Local::now(), cfg);

    let (events_tx, events_rx) = mpsc::unbounded_channel();
    let orchestrator = ConnectivityOrchestrator::from_config(cfg)?.with_events(events_tx);

    let span = spinner::progress_span(entries.len(), cfg.quiet);
    let spinner_handle = tokio::spawn(spinner::follow(span.clone(), events_rx));

    let mut write_error: Option<anyhow::Error> = None;
    let summary = orchestrator
        .run(entries, |host| {
            report::host(host, cfg);
            if let Err(e) = writer.record(host) {
                error!("{e:#}");
                write_error.get_or_insert(e);
            }
        })
        .instrument(span)
        .await;

    drop(orchestrator);
    let _ = spinner_handle.await;

    let written: usize = writer.finish()?;
    if let Some(e) = write_error {
        return Err(e);
    }

    report::summary(&summary, &cfg.output, written, cfg);
    Ok(())
}

use colored::*;
use indicatif::ProgressStyle;
use reachr_core::orchestrator::ProbeEvent;
use tokio::sync::mpsc::UnboundedReceiver;
use tracing::{Span, info_span, trace};
use tracing_indicatif::span_ext::IndicatifSpanExt;

const TICK_STRINGS: &[&str] = &[
    "▁▁▁▁▁",
    "▁▂▂▂▁",
    "▁▄▂▄▁",
    "▂▄▆▄▂",
    "▄▆█▆▄",
    "▂▄▆▄▂",
    "▁▄▂▄▁",
    "▁▂▂▂▁",
];

/// Span that owns the progress spinner. Quiet runs get a span without one.
pub fn progress_span(total: usize, q_level: u8) -> Span {
    if q_level > 0 {
        return info_span!("probing");
    }

    let span = info_span!("probing", indicatif.pb_show = true);
    let style = ProgressStyle::with_template("{spinner:.blue} {msg} {pos}/{len}")
        .unwrap_or_else(|_| ProgressStyle::default_spinner())
        .tick_strings(TICK_STRINGS);

    span.pb_set_style(&style);
    span.pb_set_length(total as u64);
    span
}

/// Drives the spinner from orchestrator events until the sender goes away.
pub async fn follow(span: Span, mut events: UnboundedReceiver<ProbeEvent>) {
    while let Some(event) = events.recv().await {
        match event {
            ProbeEvent::HostStarted { target, .. } => {
                span.pb_set_message(&format!("Checking {}", target.bold()));
            }
            ProbeEvent::CheckFinished { index, kind, ok } => {
                trace!(index, %kind, ok, "check finished");
            }
            ProbeEvent::HostFinished { .. } => span.pb_inc(1),
        }
    }
}

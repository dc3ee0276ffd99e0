//! The persisted error report.
//!
//! JSON Lines, one object per unreachable host:
//!
//! ```text
//! {"host":"example.com","url":"https://example.com/","dns":{"status":"success"},"http":{"status":"failure","reason":"timed out"},"ping":{"status":"success"}}
//! ```
//!
//! The file is truncated when the writer is created and every record is flushed as
//! soon as it is written, so an interrupted run still leaves the hosts seen so far.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use anyhow::Context;
use reachr_common::report::HostReport;

pub struct ReportWriter {
    path: PathBuf,
    out: BufWriter<File>,
    written: usize,
}

impl ReportWriter {
    pub fn create(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref().to_path_buf();
        let file = File::create(&path).with_context(|| format!("creating report file '{}'", path.display()))?;
        Ok(Self {
            path,
            out: BufWriter::new(file),
            written: 0,
        })
    }

    /// Appends `report` if the host is unreachable. Returns whether a line was written.
    pub fn record(&mut self, report: &HostReport) -> anyhow::Result<bool> {
        if report.overall {
            return Ok(false);
        }

        serde_json::to_writer(&mut self.out, &report.record()).context("serializing report record")?;
        self.out.write_all(b"\n")?;
        self.out
            .flush()
            .with_context(|| format!("writing report file '{}'", self.path.display()))?;
        self.written += 1;
        Ok(true)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn written(&self) -> usize {
        self.written
    }

    /// Flushes and closes the report, returning the number of records.
    pub fn finish(mut self) -> anyhow::Result<usize> {
        self.out
            .flush()
            .with_context(|| format!("writing report file '{}'", self.path.display()))?;
        Ok(self.written)
    }
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝

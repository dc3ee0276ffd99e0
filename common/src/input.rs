//! Loading probe targets from the command line or a list file.
//!
//! List files hold one host or URL per line. Surrounding whitespace is trimmed,
//! blank lines and lines starting with `#` are ignored, and file order is kept.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::{debug, warn};

use crate::config::DEFAULT_LIST_FILE;
use crate::network::target::{HostTarget, TargetError};

const LIST_FILE_EXTENSION: &str = "txt";

#[derive(Debug, Error)]
pub enum InputError {
    #[error("could not find server list file '{}'", .0.display())]
    Missing(PathBuf),
    #[error("could not read server list file '{}': {source}", path.display())]
    Unreadable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("no servers listed in '{}'", .0.display())]
    Empty(PathBuf),
}

/// An input entry that does not describe a probe target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RejectedEntry {
    pub entry: String,
    pub error: TargetError,
}

/// One input entry, in input order.
pub type Entry = Result<HostTarget, RejectedEntry>;

/// Where the targets of a run come from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputSource {
    Arguments(Vec<String>),
    File(PathBuf),
}

impl InputSource {
    /// Picks the source for a run.
    ///
    /// An explicit list file always wins. Without any input the default list is used.
    pub fn select(args: Vec<String>, file: Option<PathBuf>) -> Self {
        if let Some(path) = file {
            return InputSource::File(path);
        }

        match args.is_empty() {
            true => InputSource::File(PathBuf::from(DEFAULT_LIST_FILE)),
            false => InputSource::Arguments(args),
        }
    }

    /// Loads every entry. Arguments ending in `.txt` are replaced by the contents of
    /// that list, in place.
    ///
    /// Only unusable list files fail the load. An entry that does not parse is kept
    /// as a [`RejectedEntry`] so it can be reported like any other unreachable host.
    pub fn load(&self) -> Result<Vec<Entry>, InputError> {
        match self {
            InputSource::File(path) => load_list(path),
            InputSource::Arguments(args) => {
                let mut entries: Vec<Entry> = Vec::with_capacity(args.len());
                for arg in args {
                    match is_list_file(arg) {
                        true => entries.extend(load_list(Path::new(arg))?),
                        false => entries.push(parse_entry(arg)),
                    }
                }
                Ok(entries)
            }
        }
    }
}

fn is_list_file(arg: &str) -> bool {
    Path::new(arg)
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case(LIST_FILE_EXTENSION))
}

fn load_list(path: &Path) -> Result<Vec<Entry>, InputError> {
    let lines = read_list(path)?;
    if lines.is_empty() {
        return Err(InputError::Empty(path.to_path_buf()));
    }
    Ok(lines.iter().map(|line| parse_entry(line)).collect())
}

/// Reads the non-comment entries of a list file.
pub fn read_list(path: &Path) -> Result<Vec<String>, InputError> {
    let contents = fs::read_to_string(path).map_err(|source| match source.kind() {
        io::ErrorKind::NotFound => InputError::Missing(path.to_path_buf()),
        _ => InputError::Unreadable {
            path: path.to_path_buf(),
            source,
        },
    })?;

    let entries: Vec<String> = parse_list(&contents).map(str::to_string).collect();
    debug!(path = %path.display(), entries = entries.len(), "loaded server list");
    Ok(entries)
}

/// Yields the meaningful lines of a list, in order.
pub fn parse_list(contents: &str) -> impl Iterator<Item = &str> {
    contents
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
}

pub fn parse_entry(entry: &str) -> Entry {
    HostTarget::parse(entry).map_err(|error| {
        warn!(entry, %error, "unusable entry");
        RejectedEntry {
            entry: entry.trim().to_string(),
            error,
        }
    })
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝

//! End-to-end run: guard → backup → parse → normalize → overwrite.

use std::io::Write;
use std::path::{Path, PathBuf};

use atomic_write_file::AtomicWriteFile;
use serde::Serialize;
use serde_json::Value;
use serde_json::ser::PrettyFormatter;

use crate::backup::create_backup;
use crate::error::{NormalizeError, Result};
use crate::rewrite::{NormalizeStats, normalize_tree};

/// Configuration for a single run. Flags from the CLI land here; nothing is
/// read from the environment.
#[derive(Debug, Clone)]
pub struct NormalizeOptions {
    /// The beat description file to rewrite in place.
    pub path: PathBuf,
    /// Copy the file to `<path>.bak` before rewriting it.
    pub backup: bool,
}

/// What a successful run did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunReport {
    /// Where the backup landed, if one was requested.
    pub backup_path: Option<PathBuf>,
    pub stats: NormalizeStats,
}

/// Runs the whole pipeline against `options.path`.
///
/// The existence guard is the only validated precondition; every later
/// failure (I/O, parse, shape) propagates unrecovered. Mutation happens fully
/// in memory and the overwrite is atomic, so any failure leaves the on-disk
/// file as the original; the backup, if created, is the explicit restore
/// point.
pub fn run(options: &NormalizeOptions) -> Result<RunReport> {
    if !options.path.exists() {
        return Err(NormalizeError::MissingFile {
            path: options.path.clone(),
        });
    }

    let backup_path = if options.backup {
        Some(create_backup(&options.path)?)
    } else {
        None
    };

    let text = fs_err::read_to_string(&options.path)?;
    let mut doc: Value =
        serde_json::from_str(&text).map_err(|source| NormalizeError::Parse {
            path: options.path.clone(),
            source,
        })?;

    let stats = normalize_tree(&mut doc)?;
    write_document(&options.path, &doc)?;

    tracing::info!(
        path = %options.path.display(),
        sequences = stats.sequences,
        notes = stats.notes,
        "rewrote beat file"
    );
    Ok(RunReport { backup_path, stats })
}

/// Serializes `doc` with one tab per nesting level and atomically replaces
/// `path`. No trailing newline, matching the conventional pretty-printer
/// output for these files.
fn write_document(path: &Path, doc: &Value) -> Result<()> {
    let mut buf = Vec::new();
    let mut serializer =
        serde_json::Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(b"\t"));
    doc.serialize(&mut serializer)?;

    let mut atomic = AtomicWriteFile::open(path)?;
    atomic.as_file_mut().write_all(&buf)?;
    atomic.commit()?;
    Ok(())
}

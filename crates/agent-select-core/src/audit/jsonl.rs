//! File-backed audit sink writing one JSON round per line.

use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

use super::round::SelectionRound;
use super::sink::{tail, AuditSink};
use crate::error::SelectionResult;

/// Append-only JSON Lines audit log.
///
/// Each round is written with a single `write_all` of the JSON text plus its
/// newline. If that write fails part way, `append` returns the error, the round
/// is not counted, and the file may end in a torn, unterminated line.
/// [`read_rounds`] ignores such a tail and [`JsonlAuditSink::open`] truncates
/// it, so a log that was interrupted can always be resumed.
#[derive(Debug)]
pub struct JsonlAuditSink {
    path: PathBuf,
    count: usize,
}

impl JsonlAuditSink {
    /// Open (creating if needed) the log at `path`.
    pub fn open(path: impl AsRef<Path>) -> SelectionResult<Self> {
        let path = path.as_ref().to_path_buf();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        OpenOptions::new().create(true).append(true).open(&path)?;

        let scan = scan_log(&path)?;
        match scan.tail {
            Tail::Clean => {}
            Tail::Torn { valid_len } => {
                tracing::warn!(
                    path = %path.display(),
                    valid_len,
                    "truncating partially written audit round"
                );
                OpenOptions::new().write(true).open(&path)?.set_len(valid_len)?;
            }
            Tail::Unterminated => {
                OpenOptions::new().append(true).open(&path)?.write_all(b"\n")?;
            }
        }

        Ok(Self {
            path,
            count: scan.rounds.len(),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl AuditSink for JsonlAuditSink {
    fn append(&mut self, round: &SelectionRound) -> SelectionResult<()> {
        let mut line = serde_json::to_string(round)?;
        line.push('\n');
        let mut file = OpenOptions::new().append(true).open(&self.path)?;
        file.write_all(line.as_bytes())?;
        file.flush()?;
        self.count += 1;
        Ok(())
    }

    fn len(&self) -> usize {
        self.count
    }

    fn last_rounds(&self, limit: Option<usize>) -> SelectionResult<Vec<SelectionRound>> {
        Ok(tail(read_rounds(&self.path)?, limit))
    }
}

/// How the file ends after its last newline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Tail {
    Clean,
    /// A complete round without its newline.
    Unterminated,
    /// Bytes after the last newline that do not parse; `valid_len` is where they start.
    Torn { valid_len: u64 },
}

struct LogScan {
    rounds: Vec<SelectionRound>,
    tail: Tail,
}

fn scan_log(path: &Path) -> SelectionResult<LogScan> {
    let contents = std::fs::read_to_string(path)?;
    let (complete, rest) = match contents.rfind('\n') {
        Some(idx) => contents.split_at(idx + 1),
        None => ("", contents.as_str()),
    };

    let mut rounds = Vec::new();
    for line in complete.lines() {
        if line.trim().is_empty() {
            continue;
        }
        rounds.push(serde_json::from_str(line)?);
    }

    let tail = if rest.trim().is_empty() {
        Tail::Clean
    } else {
        match serde_json::from_str::<SelectionRound>(rest) {
            Ok(round) => {
                rounds.push(round);
                Tail::Unterminated
            }
            Err(e) => {
                tracing::warn!(
                    path = %path.display(),
                    error = %e,
                    bytes = rest.len(),
                    "ignoring partially written audit round"
                );
                Tail::Torn {
                    valid_len: complete.len() as u64,
                }
            }
        }
    };

    Ok(LogScan { rounds, tail })
}

/// Read every round from a JSONL audit file.
///
/// Blank lines are skipped. A trailing line without a newline that fails to
/// parse is treated as an interrupted write and ignored; a malformed line
/// anywhere else is an error.
pub fn read_rounds(path: &Path) -> SelectionResult<Vec<SelectionRound>> {
    Ok(scan_log(path)?.rounds)
}

//! Results file
//!
//! Plain text, one `name,score` record per line, appended at the end of each
//! round and read back for the results listing.

use std::fmt;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Name used when the player confirms an empty name
pub const ANONYMOUS: &str = "anonymous";

/// One finished round
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreRecord {
    pub name: String,
    pub score: u32,
}

impl ScoreRecord {
    /// Build a record, stripping characters the line format cannot carry
    pub fn new(name: &str, score: u32) -> Self {
        let name: String = name
            .chars()
            .filter(|c| !c.is_control() && *c != ',')
            .collect();
        let name = name.trim();
        Self {
            name: if name.is_empty() {
                ANONYMOUS.to_string()
            } else {
                name.to_string()
            },
            score,
        }
    }
}

impl fmt::Display for ScoreRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.name, self.score)
    }
}

impl FromStr for ScoreRecord {
    type Err = ();

    /// Split on the last comma so the score is always the final field
    fn from_str(line: &str) -> std::result::Result<Self, ()> {
        let (name, score) = line.rsplit_once(',').ok_or(())?;
        let score = score.trim().parse::<u32>().map_err(|_| ())?;
        let name = name.trim();
        if name.is_empty() {
            return Err(());
        }
        Ok(Self {
            name: name.to_string(),
            score,
        })
    }
}

/// Parse a whole results file body. Blank lines are skipped.
pub fn parse_records(text: &str) -> Result<Vec<ScoreRecord>> {
    text.lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(i, line)| {
            line.parse().map_err(|()| Error::MalformedRecord {
                line: i + 1,
                content: line.to_string(),
            })
        })
        .collect()
}

/// Append-only results store on disk
#[derive(Debug, Clone)]
pub struct ResultsFile {
    path: PathBuf,
}

impl ResultsFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append one newline-terminated record, creating the file if needed
    pub fn append(&self, record: &ScoreRecord) -> Result<()> {
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(|e| Error::io(&self.path, e))?;
        writeln!(file, "{record}").map_err(|e| Error::io(&self.path, e))?;
        log::info!("Saved result {record} to {}", self.path.display());
        Ok(())
    }

    /// Every stored record in file order. A missing file holds no records.
    pub fn load(&self) -> Result<Vec<ScoreRecord>> {
        let text = match std::fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                log::info!("No results at {}, starting fresh", self.path.display());
                return Ok(Vec::new());
            }
            Err(e) => return Err(Error::io(&self.path, e)),
        };
        let records = parse_records(&text)?;
        log::info!("Loaded {} results", records.len());
        Ok(records)
    }
}

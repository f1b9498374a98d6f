use serde::{Deserialize, Serialize};

use crate::bets::BetType;
use crate::cards::Card;
use crate::errors::SinkError;
use crate::ledger::Units;

/// Outcome of one wager in a settled round.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct BetSummary {
    /// Bet spot key
    pub key: String,
    pub bet_type: BetType,
    /// Chips staked, in placement order
    pub chips: Vec<Units>,
    pub units: Units,
    /// Ladder hits (number bets only)
    pub hits: u32,
    /// Total credited this round
    pub paid: Units,
}

/// Complete record of one settled round, written to the run log as one JSONL line.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct RoundRecord {
    /// Unique identifier (format: YYYYMMDD-NNNNNN)
    pub round_id: String,
    /// Paytable the number bets were paid from
    pub paytable: String,
    /// The card that ended the draw
    pub stopper: Card,
    /// Cards drawn including the stopper
    pub total_cards: u32,
    pub non_stopper_count: u32,
    pub bets: Vec<BetSummary>,
    pub total_wagered: Units,
    pub total_paid: Units,
    /// `total_paid - total_wagered`
    pub net_result: i64,
    /// Bankroll once the round closed
    pub bankroll_after: Units,
    /// Timestamp (RFC3339), filled in by the writer when missing
    #[serde(default)]
    pub ts: Option<String>,
}

pub fn format_round_id(yyyymmdd: &str, seq: u32) -> String {
    format!("{}-{:06}", yyyymmdd, seq)
}

/// Append-only destination for settled rounds.
pub trait RunLogSink {
    fn record(&mut self, record: &RoundRecord) -> Result<(), SinkError>;
}

/// Discards every record.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSink;

impl RunLogSink for NullSink {
    fn record(&mut self, _record: &RoundRecord) -> Result<(), SinkError> {
        Ok(())
    }
}

use chrono::{SecondsFormat, Utc};
use std::fs::{create_dir_all, File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::Path;

/// JSONL run log. One record per line, LF only.
pub struct JsonlRunLog {
    writer: Option<BufWriter<File>>,
}

impl JsonlRunLog {
    pub fn create<P: AsRef<Path>>(path: P) -> std::io::Result<Self> {
        ensure_parent(path.as_ref());
        let f = File::create(path)?;
        Ok(Self {
            writer: Some(BufWriter::new(f)),
        })
    }

    /// Opens for appending, creating the file if needed.
    pub fn append<P: AsRef<Path>>(path: P) -> std::io::Result<Self> {
        ensure_parent(path.as_ref());
        let f = OpenOptions::new().create(true).append(true).open(path)?;
        Ok(Self {
            writer: Some(BufWriter::new(f)),
        })
    }

    pub fn write(&mut self, record: &RoundRecord) -> Result<(), SinkError> {
        // inject timestamp if missing
        let mut rec = record.clone();
        if rec.ts.is_none() {
            rec.ts = Some(Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true));
        }
        let line = serde_json::to_string(&rec)?;
        if let Some(w) = &mut self.writer {
            w.write_all(line.as_bytes())?;
            w.write_all(b"\n")?;
            w.flush()?;
        }
        Ok(())
    }
}

impl RunLogSink for JsonlRunLog {
    fn record(&mut self, record: &RoundRecord) -> Result<(), SinkError> {
        self.write(record)
    }
}

fn ensure_parent(path: &Path) {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            let _ = create_dir_all(parent);
        }
    }
}

/// Today's date as used in round ids.
pub fn today() -> String {
    Utc::now().format("%Y%m%d").to_string()
}

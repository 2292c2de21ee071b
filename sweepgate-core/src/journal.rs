//! Signal journal — append-only CSV log of evaluated signals.
//!
//! One flat row per signal. The header is written only when the file is
//! new (absent or empty); parent directories are created on demand.

use std::fs::{self, OpenOptions};
use std::io;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::domain::{
    Bias, Direction, EvaluationResult, MarketSnapshot, Session, SweepType, VwapSide, VwapSlope,
};

#[derive(Debug, Error)]
pub enum JournalError {
    #[error("journal I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("journal CSV error: {0}")]
    Csv(#[from] csv::Error),
}

/// One journaled signal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SignalRecord {
    pub timestamp: DateTime<Utc>,
    pub session: Session,
    pub model: String,
    pub sweep_type: Option<SweepType>,
    pub direction: Direction,
    pub grade: u8,
    pub entry_ready: bool,
    pub adx_now: f64,
    /// Rounded to 2 decimals.
    pub adx_slope: f64,
    pub vwap_side: VwapSide,
    pub vwap_slope: VwapSlope,
    pub htf_bias: Bias,
    pub mid_bias: Bias,
    pub low_bias: Bias,
}

impl SignalRecord {
    /// Record stamped with the current UTC time.
    pub fn from_evaluation(
        direction: Direction,
        snapshot: &MarketSnapshot,
        result: &EvaluationResult,
    ) -> Self {
        Self::at(Utc::now(), direction, snapshot, result)
    }

    pub fn at(
        timestamp: DateTime<Utc>,
        direction: Direction,
        snapshot: &MarketSnapshot,
        result: &EvaluationResult,
    ) -> Self {
        Self {
            timestamp,
            session: snapshot.session,
            model: result.model_used.clone(),
            sweep_type: snapshot.sweep_type,
            direction,
            grade: result.grade,
            entry_ready: result.entry_ready,
            adx_now: snapshot.adx_now,
            adx_slope: (result.gate_results.adx_slope * 100.0).round() / 100.0,
            vwap_side: snapshot.vwap_side,
            vwap_slope: snapshot.vwap_slope,
            htf_bias: snapshot.htf_bias,
            mid_bias: snapshot.mid_bias,
            low_bias: snapshot.low_bias,
        }
    }
}

/// CSV journal file.
#[derive(Debug, Clone)]
pub struct SignalJournal {
    path: PathBuf,
}

impl SignalJournal {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn append(&self, record: &SignalRecord) -> Result<(), JournalError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let is_new = match fs::metadata(&self.path) {
            Ok(meta) => meta.len() == 0,
            Err(e) if e.kind() == io::ErrorKind::NotFound => true,
            Err(e) => return Err(e.into()),
        };

        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        let mut writer = csv::WriterBuilder::new()
            .has_headers(is_new)
            .from_writer(file);
        writer.serialize(record)?;
        writer.flush()?;

        debug!(path = %self.path.display(), model = %record.model, "signal journaled");
        Ok(())
    }

    /// All records in file order. A missing file reads as empty.
    pub fn read_all(&self) -> Result<Vec<SignalRecord>, JournalError> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }
        let mut reader = csv::Reader::from_path(&self.path)?;
        let mut records = Vec::new();
        for row in reader.deserialize() {
            records.push(row?);
        }
        Ok(records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::evaluate;
    use crate::gates::test_support::passing_pair;
    use crate::profiles::ProfileStore;
    use chrono::TimeZone;

    fn record() -> SignalRecord {
        let (mut snap, _) = passing_pair();
        snap.sweep_type = Some(SweepType::AsiaLow);
        snap.adx_sma3 = 30.456;
        snap.adx_sma6 = 28.8;
        let result = evaluate(Direction::Long, &snap, &ProfileStore::new());
        let ts = Utc.with_ymd_and_hms(2024, 3, 1, 14, 35, 0).unwrap();
        SignalRecord::at(ts, Direction::Long, &snap, &result)
    }

    #[test]
    fn slope_is_rounded_to_cents() {
        assert_eq!(record().adx_slope, 1.66);
    }

    #[test]
    fn header_written_once() {
        let dir = tempfile::tempdir().unwrap();
        let journal = SignalJournal::new(dir.path().join("logs").join("signal_log.csv"));
        journal.append(&record()).unwrap();
        journal.append(&record()).unwrap();

        let text = fs::read_to_string(journal.path()).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("timestamp,session,model,sweep_type,direction"));
        assert_eq!(text.matches("timestamp").count(), 1);
        assert!(lines[1].contains("Asia_Low"));
        assert!(lines[1].contains("LONG"));
    }

    #[test]
    fn read_back_matches() {
        let dir = tempfile::tempdir().unwrap();
        let journal = SignalJournal::new(dir.path().join("signal_log.csv"));
        assert!(journal.read_all().unwrap().is_empty());

        let rec = record();
        journal.append(&rec).unwrap();
        let back = journal.read_all().unwrap();
        assert_eq!(back, vec![rec]);
    }
}

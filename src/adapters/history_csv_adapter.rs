//! Prompt history stored as a CSV file: `timestamp,symbol,persona,prompt`.

use crate::domain::error::OllieError;
use crate::domain::history::{PromptRecord, TIMESTAMP_FORMAT};
use crate::ports::history_port::HistoryPort;
use chrono::NaiveDateTime;
use std::fs::{self, OpenOptions};
use std::path::PathBuf;

const HEADER: [&str; 4] = ["timestamp", "symbol", "persona", "prompt"];

pub struct CsvHistoryAdapter {
    path: PathBuf,
}

impl CsvHistoryAdapter {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    fn parse_err(&self, reason: impl Into<String>) -> OllieError {
        OllieError::response(&self.path.display().to_string(), reason)
    }
}

impl HistoryPort for CsvHistoryAdapter {
    fn append(&self, record: &PromptRecord) -> Result<(), OllieError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        let is_new = fs::metadata(&self.path).map(|m| m.len() == 0).unwrap_or(true);

        let file = OpenOptions::new().create(true).append(true).open(&self.path)?;
        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(file);

        let timestamp = record.created_at.format(TIMESTAMP_FORMAT).to_string();
        let write = |w: &mut csv::Writer<fs::File>, fields: [&str; 4]| {
            w.write_record(fields).map_err(|e| self.parse_err(e.to_string()))
        };
        if is_new {
            write(&mut writer, HEADER)?;
        }
        write(
            &mut writer,
            [
                timestamp.as_str(),
                record.symbol.as_str(),
                record.persona.as_str(),
                record.prompt.as_str(),
            ],
        )?;
        writer.flush()?;
        log::debug!("appended {} to {}", record.symbol, self.path.display());
        Ok(())
    }

    fn recent(&self, limit: usize) -> Result<Vec<PromptRecord>, OllieError> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }
        let mut rdr = csv::Reader::from_path(&self.path).map_err(|e| self.parse_err(e.to_string()))?;

        let mut records = Vec::new();
        for (row, result) in rdr.records().enumerate() {
            let record = result.map_err(|e| self.parse_err(e.to_string()))?;
            if record.len() < HEADER.len() {
                return Err(self.parse_err(format!("row {}: expected 4 columns", row + 1)));
            }
            let created_at = NaiveDateTime::parse_from_str(&record[0], TIMESTAMP_FORMAT)
                .map_err(|e| self.parse_err(format!("row {}: invalid timestamp: {}", row + 1, e)))?;
            records.push(PromptRecord {
                created_at,
                symbol: record[1].to_string(),
                persona: record[2].to_string(),
                prompt: record[3].to_string(),
            });
        }

        records.reverse();
        records.truncate(limit);
        Ok(records)
    }

    fn clear(&self) -> Result<(), OllieError> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use tempfile::TempDir;

    fn record(symbol: &str, minute: u32) -> PromptRecord {
        PromptRecord {
            created_at: NaiveDate::from_ymd_opt(2024, 5, 2)
                .unwrap()
                .and_hms_opt(9, minute, 0)
                .unwrap(),
            symbol: symbol.into(),
            persona: "Warren Buffett".into(),
            prompt: format!("Analyze {},\nwith \"care\".", symbol),
        }
    }

    #[test]
    fn append_then_recent_newest_first() {
        let dir = TempDir::new().unwrap();
        let adapter = CsvHistoryAdapter::new(dir.path().join("nested/history.csv"));

        adapter.append(&record("AAPL", 1)).unwrap();
        adapter.append(&record("TSLA", 2)).unwrap();
        adapter.append(&record("NVDA", 3)).unwrap();

        let recent = adapter.recent(2).unwrap();
        assert_eq!(recent, vec![record("NVDA", 3), record("TSLA", 2)]);
    }

    #[test]
    fn header_written_once() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("history.csv");
        let adapter = CsvHistoryAdapter::new(path.clone());

        adapter.append(&record("AAPL", 1)).unwrap();
        adapter.append(&record("AAPL", 2)).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        assert_eq!(content.matches("timestamp,symbol,persona,prompt").count(), 1);
    }

    #[test]
    fn missing_file_is_empty_and_clear_is_idempotent() {
        let dir = TempDir::new().unwrap();
        let adapter = CsvHistoryAdapter::new(dir.path().join("history.csv"));

        assert!(adapter.recent(5).unwrap().is_empty());
        adapter.clear().unwrap();

        adapter.append(&record("AAPL", 1)).unwrap();
        adapter.clear().unwrap();
        assert!(adapter.recent(5).unwrap().is_empty());
    }

    #[test]
    fn corrupt_timestamp_reported() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("history.csv");
        fs::write(&path, "timestamp,symbol,persona,prompt\nyesterday,AAPL,1,hi\n").unwrap();

        let err = CsvHistoryAdapter::new(path).recent(5).unwrap_err();
        assert!(err.to_string().contains("row 1: invalid timestamp"));
    }
}

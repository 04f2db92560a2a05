//! CSV loading for `id,name,email,age` user files.

use std::io::Read;
use std::path::Path;
use std::str::FromStr;

use csv::{ReaderBuilder, StringRecord, Trim};
use prodev::models::UserRecord;
use rust_decimal::Decimal;
use thiserror::Error;
use tracing::{info, warn};
use uuid::Uuid;

/// Columns expected per row: id, name, email, age.
const FIELD_COUNT: usize = 4;

#[derive(Debug, Error)]
pub enum CsvError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("CSV parse error: {0}")]
    Parse(#[from] csv::Error),
}

/// A row that was skipped, with its 1-based line number.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RejectedRow {
    pub line: u64,
    pub reason: String,
}

/// Result of reading a CSV file.
#[derive(Debug, Default)]
pub struct CsvLoad {
    pub records: Vec<UserRecord>,
    pub rejected: Vec<RejectedRow>,
}

/// Loads user records from CSV files.
///
/// The first row is treated as a header and skipped. Malformed rows are
/// collected in [`CsvLoad::rejected`] and loading carries on.
pub struct CsvLoader;

impl CsvLoader {
    /// Loads records from a CSV file on disk.
    pub fn load_file(path: impl AsRef<Path>) -> Result<CsvLoad, CsvError> {
        let path = path.as_ref();
        let file = std::fs::File::open(path)?;
        let load = Self::load_reader(file)?;

        info!(
            "Loaded {} records from {} ({} rejected)",
            load.records.len(),
            path.display(),
            load.rejected.len()
        );
        Ok(load)
    }

    /// Loads records from any reader.
    pub fn load_reader(reader: impl Read) -> Result<CsvLoad, CsvError> {
        let mut rdr = ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .trim(Trim::All)
            .from_reader(reader);

        let mut load = CsvLoad::default();

        for result in rdr.records() {
            let record = match result {
                Ok(record) => record,
                Err(e) if e.is_io_error() => return Err(e.into()),
                Err(e) => {
                    let line = e.position().map(|p| p.line()).unwrap_or_default();
                    load.reject(line, e.to_string());
                    continue;
                }
            };

            let line = record.position().map(|p| p.line()).unwrap_or_default();
            match parse_record(&record) {
                Ok(user) => load.records.push(user),
                Err(reason) => load.reject(line, reason),
            }
        }

        Ok(load)
    }
}

impl CsvLoad {
    fn reject(&mut self, line: u64, reason: String) {
        warn!("Skipping CSV line {line}: {reason}");
        self.rejected.push(RejectedRow { line, reason });
    }
}

fn parse_record(record: &StringRecord) -> Result<UserRecord, String> {
    if record.len() != FIELD_COUNT {
        return Err(format!(
            "expected {FIELD_COUNT} fields, found {}",
            record.len()
        ));
    }

    let (id, name, email, age) = (&record[0], &record[1], &record[2], &record[3]);

    let id = Uuid::parse_str(id).map_err(|e| format!("invalid id {id:?}: {e}"))?;
    if name.is_empty() {
        return Err("name is empty".to_string());
    }
    if email.is_empty() {
        return Err("email is empty".to_string());
    }
    let age = Decimal::from_str(age).map_err(|e| format!("invalid age {age:?}: {e}"))?;

    UserRecord::new(id, name.to_string(), email.to_string(), age).map_err(|e| e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    const HEADER: &str = "id,name,email,age\n";

    fn load(body: &str) -> CsvLoad {
        CsvLoader::load_reader(format!("{HEADER}{body}").as_bytes()).unwrap()
    }

    #[test]
    fn test_load_valid_rows() {
        let load = load(
            "00234e50-34eb-4ce2-94ec-26e3fa749796,Dan Altenwerth Jr.,Molly59@gmail.com,67\n\
             006bfede-724d-4cdd-a2a6-59700f40d0da,Glenda Wisozk,Miriam21@gmail.com,119.5\n",
        );

        assert!(load.rejected.is_empty());
        assert_eq!(load.records.len(), 2);
        assert_eq!(load.records[0].name, "Dan Altenwerth Jr.");
        assert_eq!(load.records[0].age.to_string(), "67.00");
        assert_eq!(load.records[1].email, "Miriam21@gmail.com");
        assert_eq!(load.records[1].age.to_string(), "119.50");
    }

    #[test]
    fn test_header_only_is_empty() {
        let load = load("");
        assert!(load.records.is_empty());
        assert!(load.rejected.is_empty());
    }

    #[test]
    fn test_empty_input_is_empty() {
        let load = CsvLoader::load_reader("".as_bytes()).unwrap();
        assert!(load.records.is_empty());
        assert!(load.rejected.is_empty());
    }

    #[test]
    fn test_trims_fields() {
        let load = load(" 00234e50-34eb-4ce2-94ec-26e3fa749796 , Dan , dan@example.com , 30 \n");
        assert_eq!(load.records.len(), 1);
        assert_eq!(load.records[0].name, "Dan");
        assert_eq!(load.records[0].email, "dan@example.com");
    }

    #[test]
    fn test_quoted_fields_keep_commas() {
        let load = load(
            "00234e50-34eb-4ce2-94ec-26e3fa749796,\"Altenwerth, Dan\",dan@example.com,30\n",
        );
        assert_eq!(load.records.len(), 1);
        assert_eq!(load.records[0].name, "Altenwerth, Dan");
    }

    #[test]
    fn test_rejects_malformed_rows_and_continues() {
        let load = load(
            "00234e50-34eb-4ce2-94ec-26e3fa749796,Short Row,short@example.com\n\
             not-a-uuid,Bad Id,bad@example.com,20\n\
             006bfede-724d-4cdd-a2a6-59700f40d0da,Bad Age,age@example.com,twenty\n\
             0076c9d4-3d4f-4f0b-8fd6-3b3d5a0d0b11,Too Old,old@example.com,1000\n\
             00a5b1c2-0000-4000-8000-000000000001,,noname@example.com,20\n\
             00cc08cc-62f4-4da1-b8e4-f5d9ef5dbbd4,Good Row,good@example.com,45.25\n",
        );

        assert_eq!(load.records.len(), 1);
        assert_eq!(load.records[0].name, "Good Row");

        let lines: Vec<u64> = load.rejected.iter().map(|r| r.line).collect();
        assert_eq!(lines, vec![2, 3, 4, 5, 6]);
        assert!(load.rejected[0].reason.contains("expected 4 fields"));
        assert!(load.rejected[1].reason.contains("invalid id"));
        assert!(load.rejected[2].reason.contains("invalid age"));
        assert!(load.rejected[4].reason.contains("name is empty"));
    }

    #[test]
    fn test_rejects_overlong_text_and_continues() {
        let long_name = "x".repeat(300);
        let long_email = format!("{}@example.com", "y".repeat(250));
        let load = load(&format!(
            "00234e50-34eb-4ce2-94ec-26e3fa749796,{long_name},long@example.com,30\n\
             006bfede-724d-4cdd-a2a6-59700f40d0da,Long Email,{long_email},30\n\
             00cc08cc-62f4-4da1-b8e4-f5d9ef5dbbd4,Good Row,good@example.com,45\n"
        ));

        assert_eq!(load.records.len(), 1);
        assert_eq!(load.records[0].name, "Good Row");

        let lines: Vec<u64> = load.rejected.iter().map(|r| r.line).collect();
        assert_eq!(lines, vec![2, 3]);
        assert!(load.rejected[0].reason.contains("name has 300 characters"));
        assert!(load.rejected[1].reason.contains("email"));
    }

    #[test]
    fn test_accepts_negative_age() {
        let load = load("00234e50-34eb-4ce2-94ec-26e3fa749796,Dan,dan@example.com,-5\n");
        assert!(load.rejected.is_empty());
        assert_eq!(load.records[0].age.to_string(), "-5.00");
    }

    #[test]
    fn test_rejects_extra_columns() {
        let load = load("00234e50-34eb-4ce2-94ec-26e3fa749796,Dan,dan@example.com,30,extra\n");
        assert!(load.records.is_empty());
        assert_eq!(load.rejected.len(), 1);
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let result = CsvLoader::load_file("/nonexistent/dir/user_data.csv");
        assert!(matches!(result, Err(CsvError::Io(_))));
    }
}

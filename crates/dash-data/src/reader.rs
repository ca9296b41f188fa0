//! CSV loading for the healthcare dataset.
//!
//! Columns are located by header name, so column order and extra columns do
//! not matter.  Cells that fail to coerce become missing values; the row is
//! always kept.

use std::io::Read;
use std::path::Path;

use dash_core::data_processors::{DateProcessor, NumericProcessor};
use dash_core::error::{DashError, Result};
use dash_core::models::{Record, YearMonth};
use tracing::{debug, info};

use crate::dataset::Dataset;

pub const COL_GENDER: &str = "Gender";
pub const COL_AGE: &str = "Age";
pub const COL_CONDITION: &str = "Medical Condition";
pub const COL_PROVIDER: &str = "Insurance Provider";
pub const COL_BILLING: &str = "Billing Amount";
pub const COL_ADMISSION: &str = "Date of Admission";

// ── Public API ────────────────────────────────────────────────────────────────

/// Open `path` and build the immutable [`Dataset`].
///
/// Fails if the file cannot be opened, a required column is missing, or the
/// CSV structure itself is malformed.  No partial dataset is ever returned.
pub fn load_dataset(path: &Path) -> Result<Dataset> {
    let file = std::fs::File::open(path).map_err(|source| DashError::FileRead {
        path: path.to_path_buf(),
        source,
    })?;
    let records = read_records(std::io::BufReader::new(file))?;
    info!(
        "Loaded {} records from {}",
        records.len(),
        path.display()
    );
    Ok(Dataset::new(records))
}

/// Parse every row of a CSV document into [`Record`]s.
pub fn read_records<R: Read>(reader: R) -> Result<Vec<Record>> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);

    let columns = ColumnIndex::resolve(rdr.headers()?)?;
    let mut coercions = CoercionCounts::default();
    let mut records = Vec::new();

    for (line, result) in rdr.records().enumerate() {
        let row = result?;
        let cell = |i: usize| row.get(i).unwrap_or("").trim();

        let age = NumericProcessor::parse_age(cell(columns.age));
        if age.is_none() {
            coercions.age += 1;
            debug!(row = line + 1, value = cell(columns.age), "age coerced to missing");
        }

        let billing_amount = NumericProcessor::parse_amount(cell(columns.billing));
        if billing_amount.is_none() {
            coercions.billing += 1;
            debug!(
                row = line + 1,
                value = cell(columns.billing),
                "billing amount coerced to missing"
            );
        }

        let admission_date = DateProcessor::parse(cell(columns.admission));
        if admission_date.is_none() {
            coercions.admission += 1;
        }

        records.push(Record {
            gender: cell(columns.gender).to_string(),
            age,
            medical_condition: cell(columns.condition).to_string(),
            insurance_provider: cell(columns.provider).to_string(),
            billing_amount,
            admission_date,
            year_month: admission_date.map(YearMonth::from_date),
        });
    }

    info!(
        rows = records.len(),
        missing_age = coercions.age,
        missing_billing = coercions.billing,
        missing_admission = coercions.admission,
        "parsed healthcare records"
    );

    Ok(records)
}

// ── Internal helpers ──────────────────────────────────────────────────────────

/// Positions of the required columns in the header row.
#[derive(Debug, Clone, Copy)]
struct ColumnIndex {
    gender: usize,
    age: usize,
    condition: usize,
    provider: usize,
    billing: usize,
    admission: usize,
}

impl ColumnIndex {
    fn resolve(headers: &csv::StringRecord) -> Result<Self> {
        let find = |name: &str| {
            headers
                .iter()
                .position(|h| h.trim() == name)
                .ok_or_else(|| DashError::MissingColumn(name.to_string()))
        };
        Ok(Self {
            gender: find(COL_GENDER)?,
            age: find(COL_AGE)?,
            condition: find(COL_CONDITION)?,
            provider: find(COL_PROVIDER)?,
            billing: find(COL_BILLING)?,
            admission: find(COL_ADMISSION)?,
        })
    }
}

#[derive(Debug, Default)]
struct CoercionCounts {
    age: usize,
    billing: usize,
    admission: usize,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use std::path::PathBuf;
    use tempfile::TempDir;

    const HEADER: &str =
        "Name,Age,Gender,Medical Condition,Date of Admission,Insurance Provider,Billing Amount";

    fn write_csv(dir: &Path, name: &str, lines: &[&str]) -> PathBuf {
        let path = dir.join(name);
        std::fs::write(&path, lines.join("\n")).expect("write csv");
        path
    }

    #[test]
    fn test_load_dataset_basic() {
        let tmp = TempDir::new().unwrap();
        let path = write_csv(
            tmp.path(),
            "healthcare.csv",
            &[
                HEADER,
                "Bobby Jackson,30,Male,Cancer,2024-01-31,Blue Cross,18856.28",
                "Leslie Terry,62,Female,Obesity,2019-08-20,Medicare,33643.33",
            ],
        );

        let ds = load_dataset(&path).expect("load");
        assert_eq!(ds.len(), 2);
        let first = &ds.records()[0];
        assert_eq!(first.gender, "Male");
        assert_eq!(first.age, Some(30));
        assert_eq!(first.medical_condition, "Cancer");
        assert_eq!(first.insurance_provider, "Blue Cross");
        assert_eq!(first.billing_amount, Some(18856.28));
        assert_eq!(first.admission_date, NaiveDate::from_ymd_opt(2024, 1, 31));
        assert_eq!(first.year_month, Some(YearMonth { year: 2024, month: 1 }));
        assert_eq!(ds.summary().record_count, 2);
    }

    #[test]
    fn test_load_dataset_missing_file() {
        let tmp = TempDir::new().unwrap();
        let err = load_dataset(&tmp.path().join("absent.csv")).unwrap_err();
        match err {
            DashError::FileRead { path, .. } => assert!(path.ends_with("absent.csv")),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_missing_required_column() {
        let csv = "Age,Gender,Medical Condition,Insurance Provider,Billing Amount\n30,Male,Flu,Aetna,1\n";
        let err = read_records(csv.as_bytes()).unwrap_err();
        match err {
            DashError::MissingColumn(name) => assert_eq!(name, COL_ADMISSION),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_header_whitespace_and_column_order() {
        let csv = " Billing Amount , Gender,Age,Date of Admission ,Insurance Provider,Medical Condition\n\
                   250.5,Female,41,2020-05-02,Cigna,Asthma\n";
        let records = read_records(csv.as_bytes()).expect("parse");
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].billing_amount, Some(250.5));
        assert_eq!(records[0].medical_condition, "Asthma");
        assert_eq!(records[0].age, Some(41));
    }

    #[test]
    fn test_unparseable_cells_become_missing() {
        let csv = format!(
            "{HEADER}\n\
             A,abc,Male,Flu,not-a-date,Aetna,n/a\n\
             B,,Female,Flu,,Aetna,\n\
             C,45,Female,Flu,2021-02-30,Aetna,NaN\n"
        );
        let records = read_records(csv.as_bytes()).expect("parse");
        assert_eq!(records.len(), 3, "rows are kept");
        for r in &records {
            assert!(r.billing_amount.is_none());
            assert!(r.admission_date.is_none());
            assert!(r.year_month.is_none());
        }
        assert!(records[0].age.is_none());
        assert!(records[1].age.is_none());
        assert_eq!(records[2].age, Some(45));
    }

    #[test]
    fn test_short_rows_tolerated() {
        let csv = format!("{HEADER}\nA,30,Male\n");
        let records = read_records(csv.as_bytes()).expect("parse");
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].gender, "Male");
        assert_eq!(records[0].medical_condition, "");
        assert!(records[0].billing_amount.is_none());
    }

    #[test]
    fn test_quoted_fields() {
        let csv = format!("{HEADER}\n\"Smith, Jane\",50,Female,Diabetes,2022/11/03,\"UnitedHealthcare\",\"1200.00\"\n");
        let records = read_records(csv.as_bytes()).expect("parse");
        assert_eq!(records[0].insurance_provider, "UnitedHealthcare");
        assert_eq!(records[0].billing_amount, Some(1200.0));
        assert_eq!(records[0].year_month, Some(YearMonth { year: 2022, month: 11 }));
    }

    #[test]
    fn test_header_only_file_is_empty_dataset() {
        let tmp = TempDir::new().unwrap();
        let path = write_csv(tmp.path(), "empty.csv", &[HEADER]);
        let ds = load_dataset(&path).expect("load");
        assert!(ds.is_empty());
        assert_eq!(ds.summary().average_billing, 0.0);
    }

    #[test]
    fn test_invalid_utf8_is_csv_error() {
        let mut bytes = format!("{HEADER}\n").into_bytes();
        bytes.extend_from_slice(b"A,30,\xff\xfe,Flu,2020-01-01,Aetna,1\n");
        let err = read_records(bytes.as_slice()).unwrap_err();
        assert!(matches!(err, DashError::Csv(_)));
    }
}

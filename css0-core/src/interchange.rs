//! CSV interchange for scenario rows.
//!
//! Columns: `index,filename,name,company_value,winner`. Files exported by
//! `write_rows_csv` hold archive values (already internal units); hand-made
//! files often hold display currency, hence the scale factor on import.

use crate::error::Result;
use crate::model::{ScenarioRow, ScoreRecord, to_score_records};
use serde::{Deserialize, Serialize};
use std::io::{Read, Write};
use tracing::warn;

#[derive(Serialize)]
struct CsvRowOut<'a> {
    index: usize,
    filename: &'a str,
    name: &'a str,
    company_value: Option<i32>,
    winner: &'a str,
}

#[derive(Deserialize)]
struct CsvRowIn {
    #[serde(default)]
    index: Option<usize>,
    #[serde(default)]
    filename: String,
    #[serde(default)]
    name: String,
    #[serde(default)]
    company_value: String,
    #[serde(default)]
    winner: String,
}

pub fn write_rows_csv(w: impl Write, rows: &[ScenarioRow]) -> Result<()> {
    let mut wtr = csv::Writer::from_writer(w);
    for r in rows {
        wtr.serialize(CsvRowOut {
            index: r.index,
            filename: &r.file_name,
            name: &r.scenario_name,
            company_value: r.company_value,
            winner: &r.winner_name,
        })?;
    }
    wtr.flush()?;
    Ok(())
}

/// Integers or decimals; decimals truncate toward zero. Anything else is absent.
fn parse_value(cell: &str) -> Option<i64> {
    let s = cell.trim();
    if s.is_empty() {
        return None;
    }
    if let Ok(v) = s.parse::<i64>() {
        return Some(v);
    }
    match s.parse::<f64>() {
        Ok(f) if f.is_finite() => Some(f.trunc() as i64),
        _ => None,
    }
}

pub fn read_rows_csv(r: impl Read) -> Result<Vec<ScenarioRow>> {
    let mut rdr = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(r);
    let mut rows = Vec::new();
    for (line, rec) in rdr.deserialize::<CsvRowIn>().enumerate() {
        let rec = rec?;
        let company_value =
            parse_value(&rec.company_value).and_then(|v| match i32::try_from(v) {
                Ok(v) => Some(v),
                Err(_) => {
                    warn!(row = line, value = v, "csv: company value out of range, dropped");
                    None
                }
            });
        rows.push(ScenarioRow {
            index: rec.index.unwrap_or(line),
            file_name: rec.filename,
            scenario_name: rec.name,
            company_value,
            winner_name: rec.winner,
        });
    }
    Ok(rows)
}

/// Read rows and convert them to records, multiplying each value by `scale_factor`.
pub fn read_records_csv(r: impl Read, scale_factor: i64) -> Result<Vec<ScoreRecord>> {
    let rows = read_rows_csv(r)?;
    let mut records = to_score_records(&rows);
    for rec in &mut records {
        rec.value = rec.value.saturating_mul(scale_factor);
    }
    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CssError;
    use crate::model::Timestamp;

    fn rows() -> Vec<ScenarioRow> {
        vec![
            ScenarioRow {
                index: 0,
                file_name: "SC0.SC4".into(),
                scenario_name: "Forest Frontiers".into(),
                company_value: Some(800_000),
                winner_name: "Alice".into(),
            },
            ScenarioRow {
                index: 1,
                file_name: "SC1.SC4".into(),
                scenario_name: "Dynamite Dunes, Desert".into(),
                company_value: None,
                winner_name: "".into(),
            },
        ]
    }

    #[test]
    fn export_format() {
        let mut out = Vec::new();
        write_rows_csv(&mut out, &rows()).unwrap();
        let text = String::from_utf8(out).unwrap();
        let lines: Vec<_> = text.lines().collect();
        assert_eq!(lines[0], "index,filename,name,company_value,winner");
        assert_eq!(lines[1], "0,SC0.SC4,Forest Frontiers,800000,Alice");
        assert_eq!(lines[2], "1,SC1.SC4,\"Dynamite Dunes, Desert\",,");
    }

    #[test]
    fn export_then_import_preserves_rows() {
        let mut out = Vec::new();
        write_rows_csv(&mut out, &rows()).unwrap();
        assert_eq!(read_rows_csv(&out[..]).unwrap(), rows());
    }

    #[test]
    fn hand_written_file_without_index() {
        let text = "filename,name,company_value,winner\n\
                    sc0.sc4,Forest Frontiers,80000,Alice\n\
                    sc1.sc4,Leafy Lake,12345.9,Bob\n\
                    sc2.sc4,Dunes,abc,Carol\n";
        let rows = read_rows_csv(text.as_bytes()).unwrap();
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[1].index, 1);
        assert_eq!(rows[1].company_value, Some(12345));
        assert_eq!(rows[2].company_value, None);
    }

    #[test]
    fn records_are_scaled() {
        let text = "filename,name,company_value,winner\n\
                    sc0.sc4,Forest Frontiers,80000,Alice\n\
                    sc1.sc4,Leafy Lake,-5,Bob\n\
                    sc2.sc4,Dunes,100,\n";
        let recs = read_records_csv(text.as_bytes(), 10).unwrap();
        assert_eq!(recs.len(), 2);
        assert_eq!(recs[0].value, 800_000);
        assert_eq!(recs[1].value, -50);
        assert_eq!(recs[1].timestamp, Timestamp::Legacy);
    }

    #[test]
    fn short_row_does_not_sink_the_file() {
        let text = "filename,name,company_value,winner\n\
                    sc0.sc4,Forest Frontiers,80000\n\
                    sc1.sc4,Leafy Lake,5,Bob\n";
        let rows = read_rows_csv(text.as_bytes()).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].winner_name, "");
        assert_eq!(rows[1].file_name, "sc1.sc4");
        assert_eq!(rows[1].winner_name, "Bob");

        let recs = read_records_csv(text.as_bytes(), 1).unwrap();
        assert_eq!(recs.len(), 1);
        assert_eq!(recs[0].winner_name, "Bob");
        assert_eq!(recs[0].value, 5);
    }

    #[test]
    fn csv_errors_are_reported_once() {
        let err = read_rows_csv(&b"filename,winner\n\xFFsc0,Alice\n"[..]).unwrap_err();
        match &err {
            CssError::Csv(inner) => assert_eq!(err.to_string(), inner.to_string()),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn out_of_range_value_is_absent() {
        let text = "filename,company_value,winner\nsc0.sc4,99999999999,Alice\n";
        let rows = read_rows_csv(text.as_bytes()).unwrap();
        assert_eq!(rows[0].company_value, None);
    }
}

/// One slot of the archive's scenario tables.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ScenarioRow {
    /// Slot number, 0..128. Only used for diagnostics and CSV export.
    pub index: usize,
    pub file_name: String,
    /// Display name; never used for matching.
    pub scenario_name: String,
    /// `None` when the slot carries the "no recorded score" marker.
    pub company_value: Option<i32>,
    /// Empty when nobody has completed the scenario.
    pub winner_name: String,
}

/// Completion time of a highscore entry.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Timestamp {
    /// No real completion time is known.
    #[default]
    Legacy,
    /// Opaque value owned by the program that reads the highscores file.
    At(i64),
}

impl Timestamp {
    pub fn from_raw(raw: i64, legacy: i64) -> Self {
        if raw == legacy {
            Timestamp::Legacy
        } else {
            Timestamp::At(raw)
        }
    }

    pub fn to_raw(self, legacy: i64) -> i64 {
        match self {
            Timestamp::Legacy => legacy,
            Timestamp::At(t) => t,
        }
    }
}

/// A single highscores entry, as written to the target file.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ScoreRecord {
    /// Scenario file name only, e.g. `sc0.sc4`.
    pub file_name: String,
    pub winner_name: String,
    /// Internal units: display currency x 10.
    pub value: i64,
    pub timestamp: Timestamp,
}

impl ScoreRecord {
    /// Scenario key: file name compared case-insensitively.
    pub fn key(&self) -> String {
        self.file_name.to_lowercase()
    }
}

/// Reduce a stored path to its final component.
fn scenario_file_name(raw: &str) -> &str {
    let trimmed = raw.trim();
    trimmed
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or(trimmed)
        .trim()
}

/// Turn parsed rows into highscore records, dropping slots without a winner or a value.
pub fn to_score_records(rows: &[ScenarioRow]) -> Vec<ScoreRecord> {
    rows.iter()
        .filter_map(|row| {
            let file_name = scenario_file_name(&row.file_name);
            let winner = row.winner_name.trim();
            if file_name.is_empty() || winner.is_empty() {
                return None;
            }
            let value = row.company_value?;
            Some(ScoreRecord {
                file_name: file_name.to_string(),
                winner_name: winner.to_string(),
                value: i64::from(value),
                timestamp: Timestamp::Legacy,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(index: usize, file: &str, value: Option<i32>, winner: &str) -> ScenarioRow {
        ScenarioRow {
            index,
            file_name: file.into(),
            scenario_name: format!("Scenario {index}"),
            company_value: value,
            winner_name: winner.into(),
        }
    }

    #[test]
    fn filters_rows_without_winner_or_value() {
        let rows = vec![
            row(0, "SC0.SC4", Some(800_000), "Alice"),
            row(1, "SC1.SC4", Some(10), ""),
            row(2, "SC2.SC4", None, "Bob"),
            row(3, "", Some(5), "Carol"),
            row(4, "SC4.SC4", Some(-20), "  Dave "),
        ];
        let recs = to_score_records(&rows);
        assert_eq!(recs.len(), 2);
        assert_eq!(recs[0].file_name, "SC0.SC4");
        assert_eq!(recs[0].value, 800_000);
        assert_eq!(recs[0].timestamp, Timestamp::Legacy);
        assert_eq!(recs[1].winner_name, "Dave");
        assert_eq!(recs[1].value, -20);
    }

    #[test]
    fn strips_directories_from_file_names() {
        let rows = vec![
            row(0, r"C:\RCT\Scenarios\sc7.sc4", Some(1), "A"),
            row(1, "data/sc8.sc4", Some(1), "B"),
        ];
        let recs = to_score_records(&rows);
        assert_eq!(recs[0].file_name, "sc7.sc4");
        assert_eq!(recs[1].file_name, "sc8.sc4");
    }

    #[test]
    fn timestamp_sentinel_maps_to_legacy() {
        assert_eq!(Timestamp::from_raw(i64::MIN, i64::MIN), Timestamp::Legacy);
        assert_eq!(Timestamp::from_raw(42, i64::MIN), Timestamp::At(42));
        assert_eq!(Timestamp::Legacy.to_raw(i64::MIN), i64::MIN);
        assert_eq!(Timestamp::At(7).to_raw(i64::MIN), 7);
    }

    #[test]
    fn key_ignores_case() {
        let a = ScoreRecord {
            file_name: "SC0.SC4".into(),
            winner_name: "x".into(),
            value: 0,
            timestamp: Timestamp::Legacy,
        };
        assert_eq!(a.key(), "sc0.sc4");
    }
}

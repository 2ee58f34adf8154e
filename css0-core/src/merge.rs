use crate::model::{ScoreRecord, Timestamp};
use std::collections::HashMap;

/// Fold `challenger` into the record already held for the same scenario key.
///
/// A strictly greater value wins outright and brings its winner name along.
/// On a tie the held value stays and the challenger's name is only adopted
/// when the held record has none. File name and timestamp never change.
fn fold(held: &mut ScoreRecord, challenger: &ScoreRecord) {
    if challenger.value > held.value {
        held.value = challenger.value;
        held.winner_name = challenger.winner_name.clone();
    } else if challenger.value == held.value && held.winner_name.is_empty() {
        held.winner_name = challenger.winner_name.clone();
    }
}

/// Combine an existing highscores set with freshly decoded records.
///
/// One record survives per case-insensitive file name. Existing keys keep
/// their position and timestamp; keys first seen in `incoming` follow in
/// incoming order with a legacy timestamp.
pub fn merge(existing: &[ScoreRecord], incoming: &[ScoreRecord]) -> Vec<ScoreRecord> {
    let mut out: Vec<ScoreRecord> = Vec::with_capacity(existing.len() + incoming.len());
    let mut by_key: HashMap<String, usize> = HashMap::new();

    for rec in existing {
        match by_key.get(&rec.key()) {
            Some(&i) => fold(&mut out[i], rec),
            None => {
                by_key.insert(rec.key(), out.len());
                out.push(rec.clone());
            }
        }
    }

    for rec in incoming {
        match by_key.get(&rec.key()) {
            Some(&i) => fold(&mut out[i], rec),
            None => {
                by_key.insert(rec.key(), out.len());
                out.push(ScoreRecord {
                    timestamp: Timestamp::Legacy,
                    ..rec.clone()
                });
            }
        }
    }

    out
}

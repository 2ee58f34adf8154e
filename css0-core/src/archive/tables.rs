use crate::error::{CssError, Result, Stage};
use crate::model::ScenarioRow;

pub const SLOT_COUNT: usize = 128;

/// Base offset and per-slot stride of one table inside the decoded buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TableRegion {
    pub offset: usize,
    pub stride: usize,
}

impl TableRegion {
    pub const fn end(&self) -> usize {
        self.offset + self.stride * SLOT_COUNT
    }

    fn slot<'a>(&self, buf: &'a [u8], i: usize) -> &'a [u8] {
        let start = self.offset + i * self.stride;
        &buf[start..start + self.stride]
    }
}

pub const FILE_NAMES: TableRegion = TableRegion {
    offset: 0x0000,
    stride: 16,
};
pub const SCENARIO_NAMES: TableRegion = TableRegion {
    offset: 0x0800,
    stride: 64,
};
pub const COMPANY_VALUES: TableRegion = TableRegion {
    offset: 0x2800,
    stride: 4,
};
pub const WINNER_NAMES: TableRegion = TableRegion {
    offset: 0x2A00,
    stride: 32,
};

/// Combined footprint of the four tables.
pub const TABLES_LEN: usize = WINNER_NAMES.end();

/// Raw company values at or above this mark mean "no recorded score".
const NO_SCORE: u32 = 0x8000_0000;

/// NUL-terminated legacy text; every byte maps to the code point of the same value.
fn latin1_cstr(field: &[u8]) -> String {
    field
        .iter()
        .take_while(|&&b| b != 0)
        .map(|&b| char::from(b))
        .collect()
}

fn company_value(field: &[u8]) -> Option<i32> {
    let raw = u32::from_le_bytes([field[0], field[1], field[2], field[3]]);
    if raw >= NO_SCORE {
        None
    } else {
        Some(raw as i32)
    }
}

/// Split the decoded buffer into its 128 scenario slots.
pub fn parse(buf: &[u8]) -> Result<Vec<ScenarioRow>> {
    if buf.len() < TABLES_LEN {
        return Err(CssError::TruncatedInput {
            stage: Stage::Tables,
            offset: buf.len(),
            needed: TABLES_LEN,
            available: buf.len(),
        });
    }

    let rows = (0..SLOT_COUNT)
        .map(|i| ScenarioRow {
            index: i,
            file_name: latin1_cstr(FILE_NAMES.slot(buf, i)),
            scenario_name: latin1_cstr(SCENARIO_NAMES.slot(buf, i)),
            company_value: company_value(COMPANY_VALUES.slot(buf, i)),
            winner_name: latin1_cstr(WINNER_NAMES.slot(buf, i)),
        })
        .collect();
    Ok(rows)
}

//! Phase_Summary: revenue rolled up per phase

use serde::Serialize;

use super::{Phase, Records, SheetTable};
use crate::error::LoadResult;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PhaseTotal {
    pub recommended_phase: Phase,
    pub total_revenue: f64,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct PhaseSummary {
    pub rows: Vec<PhaseTotal>,
}

impl SheetTable for PhaseSummary {
    const SHEET_NAME: &'static str = "Phase_Summary";

    fn from_records(records: &Records) -> LoadResult<Self> {
        let phase = records.column("recommended_phase")?;
        let revenue = records.column("total_revenue")?;

        let rows = (0..records.rows.len())
            .map(|row| {
                Ok(PhaseTotal {
                    recommended_phase: records.phase(row, phase)?,
                    total_revenue: records.number(row, revenue)?,
                })
            })
            .collect::<LoadResult<Vec<_>>>()?;

        Ok(Self { rows })
    }
}

//! Executive_Overview: headline KPIs

use serde::Serialize;

use super::{Records, SheetTable};
use crate::error::{DataLoadError, LoadResult};
use crate::reader::CellValue;

/// Row positions of the KPIs the executive summary reads.
///
/// The source sheet has no stable key column, so KPIs are addressed by position.
/// Reordering rows in the workbook silently changes which KPI is shown.
pub const ACTIVE_ACCOUNTS_ROW: usize = 0;
pub const PORTFOLIO_VALUE_ROW: usize = 1;
pub const TARGET_OPPS_ROW: usize = 2;

const MIN_ROWS: usize = 3;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OverviewRow {
    /// Text of the first non-`Value` column, when the sheet has one
    pub label: Option<String>,
    pub value: CellValue,
}

#[derive(Debug, Clone, Serialize)]
pub struct Overview {
    pub rows: Vec<OverviewRow>,
}

impl Overview {
    pub fn active_accounts(&self) -> &CellValue {
        &self.rows[ACTIVE_ACCOUNTS_ROW].value
    }

    pub fn total_portfolio_value(&self) -> &CellValue {
        &self.rows[PORTFOLIO_VALUE_ROW].value
    }

    pub fn target_opportunities(&self) -> &CellValue {
        &self.rows[TARGET_OPPS_ROW].value
    }
}

impl SheetTable for Overview {
    const SHEET_NAME: &'static str = "Executive_Overview";

    fn from_records(records: &Records) -> LoadResult<Self> {
        let value_col = records.column("Value")?;
        let label_col = (0..records.headers.len()).find(|&c| c != value_col);

        if records.rows.len() < MIN_ROWS {
            return Err(DataLoadError::TooFewRows {
                sheet: records.sheet.clone(),
                expected: MIN_ROWS,
                found: records.rows.len(),
            });
        }

        let rows = records
            .rows
            .iter()
            .map(|row| OverviewRow {
                label: label_col
                    .map(|c| row[c].to_string())
                    .filter(|s| !s.is_empty()),
                value: row[value_col].clone(),
            })
            .collect();

        Ok(Self { rows })
    }
}

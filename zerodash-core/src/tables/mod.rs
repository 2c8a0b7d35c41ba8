//! Typed views over the four dashboard sheets
//!
//! Each sheet is validated once, when it is turned into its record type. After that
//! every lookup is a named field instead of a column search.

pub mod actions;
pub mod logic;
pub mod overview;
pub mod phase;
pub mod summary;

pub use actions::{Account, ActionList, Column};
pub use logic::LogicTable;
pub use overview::{Overview, OverviewRow};
pub use phase::Phase;
pub use summary::{PhaseSummary, PhaseTotal};

use crate::error::{DataLoadError, LoadResult};
use crate::reader::{CellValue, Sheet, Workbook};

/// A table that is built from one named sheet
pub trait SheetTable: Sized {
    /// Name of the sheet in the source workbook
    const SHEET_NAME: &'static str;

    /// Validate the header and rows and build the table
    fn from_records(records: &Records) -> LoadResult<Self>;
}

/// Find the table's sheet in the workbook and build it
pub fn load_table<T: SheetTable>(workbook: &Workbook) -> LoadResult<T> {
    let sheet = workbook
        .get_sheet(T::SHEET_NAME)
        .ok_or_else(|| DataLoadError::MissingSheet {
            sheet: T::SHEET_NAME.to_string(),
        })?;
    let records = Records::from_sheet(sheet)?;
    T::from_records(&records)
}

/// Header plus data rows of a sheet, all rows padded to the header width
#[derive(Debug, Clone)]
pub struct Records {
    pub sheet: String,
    pub headers: Vec<String>,
    pub rows: Vec<Vec<CellValue>>,
}

impl Records {
    /// First populated row is the header, the rest is data
    pub fn from_sheet(sheet: &Sheet) -> LoadResult<Self> {
        if let Some(reason) = &sheet.parse_error {
            return Err(DataLoadError::MalformedSheet {
                sheet: sheet.name.clone(),
                reason: reason.clone(),
            });
        }

        let mut rows = sheet.rows().into_iter();
        let header_row = rows.next().ok_or_else(|| DataLoadError::MalformedSheet {
            sheet: sheet.name.clone(),
            reason: "sheet is empty, expected a header row".to_string(),
        })?;
        let headers = header_row.iter().map(|v| v.to_string().trim().to_string()).collect();

        Self::new(sheet.name.clone(), headers, rows.collect())
    }

    pub fn new(
        sheet: impl Into<String>,
        headers: Vec<String>,
        rows: Vec<Vec<CellValue>>,
    ) -> LoadResult<Self> {
        let sheet = sheet.into();
        let width = headers.len();

        let mut padded = Vec::with_capacity(rows.len());
        for (i, mut row) in rows.into_iter().enumerate() {
            if row.len() > width && row[width..].iter().any(|v| !v.is_empty()) {
                return Err(DataLoadError::MalformedSheet {
                    sheet,
                    reason: format!("row {} has values outside the header columns", i + 1),
                });
            }
            row.resize(width, CellValue::Empty);
            padded.push(row);
        }

        Ok(Self {
            sheet,
            headers,
            rows: padded,
        })
    }

    /// Index of a required column
    pub fn column(&self, name: &str) -> LoadResult<usize> {
        self.headers
            .iter()
            .position(|h| h == name)
            .ok_or_else(|| DataLoadError::MissingColumn {
                sheet: self.sheet.clone(),
                column: name.to_string(),
            })
    }

    /// Cell rendered as text; empty cells give an empty string
    pub fn text(&self, row: usize, col: usize) -> String {
        self.rows[row][col].to_string()
    }

    /// Cell that must hold a finite number
    pub fn number(&self, row: usize, col: usize) -> LoadResult<f64> {
        match &self.rows[row][col] {
            CellValue::Number(n) if n.is_finite() => Ok(*n),
            // Numbers stored as text are common in exported sheets
            CellValue::Text(s) => s
                .trim()
                .parse::<f64>()
                .ok()
                .filter(|n| n.is_finite())
                .ok_or_else(|| self.invalid(row, col, format!("expected a number, found '{s}'"))),
            other => Err(self.invalid(row, col, format!("expected a number, found {other:?}"))),
        }
    }

    /// Cell that must hold one of the phase labels, spelled exactly
    pub fn phase(&self, row: usize, col: usize) -> LoadResult<Phase> {
        let value = self.text(row, col);
        Phase::from_label(&value).ok_or_else(|| self.invalid(row, col, phase::unknown_phase(&value)))
    }

    fn invalid(&self, row: usize, col: usize, reason: String) -> DataLoadError {
        DataLoadError::InvalidValue {
            sheet: self.sheet.clone(),
            row: row + 1,
            column: self.headers[col].clone(),
            reason,
        }
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    //! Sheets shaped like the production workbook

    use super::*;

    pub fn text(s: &str) -> CellValue {
        CellValue::Text(s.to_string())
    }

    pub fn num(n: f64) -> CellValue {
        CellValue::Number(n)
    }

    pub const ACTION_HEADERS: [&str; 8] = [
        "account_name",
        "roi_speed_score",
        "recommended_phase",
        "recommended_action",
        "primary_reason",
        "account_status",
        "assigned_rep",
        "priority_label",
    ];

    pub fn action_row(name: &str, score: f64, phase: &str) -> Vec<CellValue> {
        vec![
            text(name),
            num(score),
            text(phase),
            text(&format!("Call {name}")),
            text("Renewal window"),
            text("Active"),
            text("Dana"),
            text("High"),
        ]
    }

    pub fn actions_sheet(rows: &[(&str, f64, &str)]) -> Sheet {
        let mut data = vec![ACTION_HEADERS.iter().map(|h| text(h)).collect::<Vec<_>>()];
        data.extend(rows.iter().map(|(n, s, p)| action_row(n, *s, p)));
        Sheet::from_rows(actions::ActionList::SHEET_NAME, data)
    }

    pub fn overview_sheet() -> Sheet {
        Sheet::from_rows(
            overview::Overview::SHEET_NAME,
            vec![
                vec![text("Metric"), text("Value")],
                vec![text("Active Accounts"), num(42.0)],
                vec![text("Total Portfolio Value"), text("$4.2M")],
                vec![text("Target Opps"), num(17.0)],
            ],
        )
    }

    pub fn logic_sheet() -> Sheet {
        Sheet::from_rows(
            logic::LogicTable::SHEET_NAME,
            vec![
                vec![text("Factor"), text("Weight"), text("Why")],
                vec![text("Revenue at risk"), num(0.5), text("Bigger accounts first")],
                vec![text("Days to renewal"), num(0.3), text("Urgency")],
            ],
        )
    }

    pub fn summary_sheet() -> Sheet {
        Sheet::from_rows(
            summary::PhaseSummary::SHEET_NAME,
            vec![
                vec![text("recommended_phase"), text("total_revenue")],
                vec![text("Phase 1A"), num(1_200_000.0)],
                vec![text("Phase 2"), num(800_000.0)],
            ],
        )
    }

    pub fn workbook() -> Workbook {
        Workbook {
            path: "fixture.xlsx".into(),
            sheets: vec![
                overview_sheet(),
                actions_sheet(&[
                    ("A", 90.0, "Phase 1A"),
                    ("B", 95.0, "Phase 2"),
                    ("C", 80.0, "Phase 1A"),
                ]),
                logic_sheet(),
                summary_sheet(),
            ],
        }
    }
}

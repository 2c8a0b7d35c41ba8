//! Account_Action_List: one row per sales account

use serde::Serialize;

use super::{Phase, Records, SheetTable};
use crate::error::LoadResult;
use crate::reader::workbook::format_number;

pub const ACCOUNT_NAME: &str = "account_name";
pub const ROI_SPEED_SCORE: &str = "roi_speed_score";
pub const RECOMMENDED_PHASE: &str = "recommended_phase";
pub const RECOMMENDED_ACTION: &str = "recommended_action";
pub const PRIMARY_REASON: &str = "primary_reason";
pub const ACCOUNT_STATUS: &str = "account_status";
pub const ASSIGNED_REP: &str = "assigned_rep";
pub const PRIORITY_LABEL: &str = "priority_label";

const REQUIRED_COLUMNS: [&str; 8] = [
    ACCOUNT_NAME,
    ROI_SPEED_SCORE,
    RECOMMENDED_PHASE,
    RECOMMENDED_ACTION,
    PRIMARY_REASON,
    ACCOUNT_STATUS,
    ASSIGNED_REP,
    PRIORITY_LABEL,
];

/// Where the values of one sheet column live on an [`Account`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Column {
    AccountName,
    RoiSpeedScore,
    RecommendedPhase,
    RecommendedAction,
    PrimaryReason,
    AccountStatus,
    AssignedRep,
    PriorityLabel,
    /// Index into [`Account::extra`]
    Extra(usize),
}

// Same order as REQUIRED_COLUMNS
const SCHEMA: [Column; 8] = [
    Column::AccountName,
    Column::RoiSpeedScore,
    Column::RecommendedPhase,
    Column::RecommendedAction,
    Column::PrimaryReason,
    Column::AccountStatus,
    Column::AssignedRep,
    Column::PriorityLabel,
];

/// A sales account with its precomputed score and recommendation
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Account {
    pub account_name: String,
    pub roi_speed_score: f64,
    pub recommended_phase: Phase,
    pub recommended_action: String,
    pub primary_reason: String,
    pub account_status: String,
    pub assigned_rep: String,
    pub priority_label: String,
    /// Cells of the columns outside the fixed schema, in sheet order, as displayed text
    #[serde(skip)]
    pub extra: Vec<String>,
}

impl Account {
    /// Text of one column, as written to a CSV download
    pub fn cell(&self, column: Column) -> String {
        match column {
            Column::AccountName => self.account_name.clone(),
            Column::RoiSpeedScore => format_number(self.roi_speed_score),
            Column::RecommendedPhase => self.recommended_phase.label().to_string(),
            Column::RecommendedAction => self.recommended_action.clone(),
            Column::PrimaryReason => self.primary_reason.clone(),
            Column::AccountStatus => self.account_status.clone(),
            Column::AssignedRep => self.assigned_rep.clone(),
            Column::PriorityLabel => self.priority_label.clone(),
            Column::Extra(i) => self.extra.get(i).cloned().unwrap_or_default(),
        }
    }
}

/// All accounts in sheet order, plus the sheet's column order
#[derive(Debug, Clone, Default, Serialize)]
pub struct ActionList {
    pub columns: Vec<String>,
    /// Value source of each entry of `columns`. Headers may be blank or repeated, so
    /// cells are found by position, never by name.
    #[serde(skip)]
    pub layout: Vec<Column>,
    pub accounts: Vec<Account>,
}

impl ActionList {
    /// Cells of `account` in sheet column order
    pub fn row(&self, account: &Account) -> Vec<String> {
        self.layout.iter().map(|&c| account.cell(c)).collect()
    }
}

impl SheetTable for ActionList {
    const SHEET_NAME: &'static str = "Account_Action_List";

    fn from_records(records: &Records) -> LoadResult<Self> {
        let indices = required_columns(records, REQUIRED_COLUMNS)?;
        let [name, score, phase, action, reason, status, rep, priority] = indices;

        // A repeated schema header binds to its first occurrence; later copies are extras
        let mut layout = Vec::with_capacity(records.headers.len());
        let mut extra_cols = Vec::new();
        for col in 0..records.headers.len() {
            match indices.iter().position(|&i| i == col) {
                Some(k) => layout.push(SCHEMA[k]),
                None => {
                    layout.push(Column::Extra(extra_cols.len()));
                    extra_cols.push(col);
                }
            }
        }

        let mut accounts = Vec::with_capacity(records.rows.len());
        for row in 0..records.rows.len() {
            accounts.push(Account {
                account_name: records.text(row, name),
                roi_speed_score: records.number(row, score)?,
                recommended_phase: records.phase(row, phase)?,
                recommended_action: records.text(row, action),
                primary_reason: records.text(row, reason),
                account_status: records.text(row, status),
                assigned_rep: records.text(row, rep),
                priority_label: records.text(row, priority),
                extra: extra_cols.iter().map(|&c| records.text(row, c)).collect(),
            });
        }

        Ok(Self {
            columns: records.headers.clone(),
            layout,
            accounts,
        })
    }
}

fn required_columns<const N: usize>(records: &Records, names: [&str; N]) -> LoadResult<[usize; N]> {
    let mut indices = [0; N];
    for (slot, name) in indices.iter_mut().zip(names) {
        *slot = records.column(name)?;
    }
    Ok(indices)
}

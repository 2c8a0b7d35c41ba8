//! ROI_Logic_Explained: free-form methodology table

use serde::Serialize;

use super::{Records, SheetTable};
use crate::error::LoadResult;
use crate::reader::CellValue;

/// Reference table shown verbatim; columns are whatever the sheet defines
#[derive(Debug, Clone, Default, Serialize)]
pub struct LogicTable {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<CellValue>>,
}

impl SheetTable for LogicTable {
    const SHEET_NAME: &'static str = "ROI_Logic_Explained";

    fn from_records(records: &Records) -> LoadResult<Self> {
        Ok(Self {
            columns: records.headers.clone(),
            rows: records.rows.clone(),
        })
    }
}

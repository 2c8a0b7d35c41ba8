//! zerodash-core: data contract behind the Product Zero sales dashboard
//!
//! Loads the four dashboard sheets from a workbook into typed, immutable tables and
//! exposes the queries and view models the dashboard pages are built from.

pub mod config;
pub mod error;
pub mod export;
pub mod query;
pub mod reader;
pub mod tables;
pub mod view;

use std::path::{Path, PathBuf};

pub use config::DashboardConfig;
pub use error::DataLoadError;
pub use tables::{Account, ActionList, LogicTable, Overview, Phase, PhaseSummary};
pub use view::{Page, Selection, ViewModel, ViewSettings};

use error::LoadResult;
use reader::Workbook;
use tables::load_table;

/// All four tables, loaded once and read-only afterwards.
///
/// Holds only owned data, so it can be shared across threads behind an `Arc`.
#[derive(Debug, Clone)]
pub struct DataContext {
    pub source: PathBuf,
    pub overview: Overview,
    pub actions: ActionList,
    pub logic: LogicTable,
    pub summary: PhaseSummary,
}

impl DataContext {
    /// Read and validate the workbook at `path`
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, DataLoadError> {
        let workbook = reader::read_workbook(path)?;
        Self::from_workbook(&workbook)
    }

    /// Validate an already-read workbook. Fails on the first missing or malformed sheet.
    pub fn from_workbook(workbook: &Workbook) -> LoadResult<Self> {
        log::debug!(
            "workbook {} has sheets: {}",
            workbook.path.display(),
            workbook.sheet_names().join(", ")
        );

        let context = Self {
            source: workbook.path.clone(),
            overview: load_table(workbook)?,
            actions: load_table(workbook)?,
            logic: load_table(workbook)?,
            summary: load_table(workbook)?,
        };

        log::info!(
            "loaded {}: {} accounts, {} overview rows, {} logic rows, {} phase totals",
            context.source.display(),
            context.actions.accounts.len(),
            context.overview.rows.len(),
            context.logic.rows.len(),
            context.summary.rows.len()
        );

        Ok(context)
    }
}

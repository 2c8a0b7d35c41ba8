//! Page selection and view models
//!
//! A view is a pure function of the loaded data and the two selector values. Models
//! borrow from the [`DataContext`] and serialize directly for JSON front ends.

use anyhow::Result;
use serde::Serialize;
use std::fmt;

use crate::DataContext;
use crate::export::{accounts_to_csv, export_file_name};
use crate::query::{self, ClusterPoint, PhaseCount, PhaseRevenue};
use crate::reader::CellValue;
use crate::tables::{Account, ActionList, LogicTable, Phase};

pub const NOT_AVAILABLE: &str = "N/A";

/// The four navigation targets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Page {
    #[serde(rename = "Executive Summary")]
    ExecutiveSummary,
    #[serde(rename = "Top 10 Hit List")]
    HitList,
    #[serde(rename = "Phase Deep-Dives")]
    PhaseDeepDive,
    #[serde(rename = "Strategy & ROI Logic")]
    StrategyLogic,
}

impl Page {
    /// Navigation order
    pub const ALL: [Page; 4] = [
        Page::ExecutiveSummary,
        Page::HitList,
        Page::PhaseDeepDive,
        Page::StrategyLogic,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Page::ExecutiveSummary => "Executive Summary",
            Page::HitList => "Top 10 Hit List",
            Page::PhaseDeepDive => "Phase Deep-Dives",
            Page::StrategyLogic => "Strategy & ROI Logic",
        }
    }

    /// Whether the phase selector applies to this page
    pub fn uses_phase(&self) -> bool {
        matches!(self, Page::PhaseDeepDive)
    }
}

impl fmt::Display for Page {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Current value of both selectors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Selection {
    pub page: Page,
    /// Only read on [`Page::PhaseDeepDive`]
    pub phase: Phase,
}

/// Knobs that shape views without changing the data
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ViewSettings {
    pub hit_list_size: usize,
}

impl Default for ViewSettings {
    fn default() -> Self {
        Self { hit_list_size: 10 }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Kpi {
    pub label: &'static str,
    pub value: CellValue,
}

#[derive(Debug, Clone, Serialize)]
pub struct ExecutiveSummary {
    pub kpis: Vec<Kpi>,
    pub revenue_by_phase: Vec<PhaseRevenue>,
    pub account_distribution: Vec<PhaseCount>,
}

#[derive(Debug, Clone, Serialize)]
pub struct HitList<'a> {
    pub size: usize,
    pub accounts: Vec<&'a Account>,
}

#[derive(Debug, Clone, Serialize)]
pub struct PhaseDeepDive<'a> {
    pub phase: Phase,
    pub accounts: Vec<&'a Account>,
    pub account_count: usize,
    /// First account's recommended action, or "N/A" when the phase is empty
    pub strategy: String,
    pub export_file_name: String,
    #[serde(skip)]
    source: &'a ActionList,
}

impl PhaseDeepDive<'_> {
    /// CSV download for this phase, every source column included
    pub fn export_csv(&self) -> Result<String> {
        accounts_to_csv(self.source, &self.accounts)
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct StrategyLogic<'a> {
    pub logic: &'a LogicTable,
    pub priority_clusters: Vec<ClusterPoint<'a>>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "page", content = "view")]
pub enum ViewModel<'a> {
    #[serde(rename = "Executive Summary")]
    ExecutiveSummary(ExecutiveSummary),
    #[serde(rename = "Top 10 Hit List")]
    HitList(HitList<'a>),
    #[serde(rename = "Phase Deep-Dives")]
    PhaseDeepDive(PhaseDeepDive<'a>),
    #[serde(rename = "Strategy & ROI Logic")]
    StrategyLogic(StrategyLogic<'a>),
}

impl ViewModel<'_> {
    pub fn page(&self) -> Page {
        match self {
            ViewModel::ExecutiveSummary(_) => Page::ExecutiveSummary,
            ViewModel::HitList(_) => Page::HitList,
            ViewModel::PhaseDeepDive(_) => Page::PhaseDeepDive,
            ViewModel::StrategyLogic(_) => Page::StrategyLogic,
        }
    }
}

/// Build the model for the selected page
pub fn render<'a>(
    ctx: &'a DataContext,
    selection: &Selection,
    settings: &ViewSettings,
) -> ViewModel<'a> {
    log::debug!("rendering {}", selection.page);
    match selection.page {
        Page::ExecutiveSummary => ViewModel::ExecutiveSummary(executive_summary(ctx)),
        Page::HitList => ViewModel::HitList(hit_list(ctx, settings.hit_list_size)),
        Page::PhaseDeepDive => ViewModel::PhaseDeepDive(phase_deep_dive(ctx, selection.phase)),
        Page::StrategyLogic => ViewModel::StrategyLogic(strategy_logic(ctx)),
    }
}

pub fn executive_summary(ctx: &DataContext) -> ExecutiveSummary {
    let accounts = &ctx.actions.accounts;
    let avg = query::mean_score(accounts)
        .map(CellValue::Number)
        .unwrap_or_else(|| CellValue::Text(NOT_AVAILABLE.to_string()));

    ExecutiveSummary {
        kpis: vec![
            Kpi {
                label: "Total Portfolio Value",
                value: ctx.overview.total_portfolio_value().clone(),
            },
            Kpi {
                label: "Target Opps",
                value: ctx.overview.target_opportunities().clone(),
            },
            Kpi {
                label: "Avg ROI Score",
                value: avg,
            },
            Kpi {
                label: "Active Accounts",
                value: ctx.overview.active_accounts().clone(),
            },
        ],
        revenue_by_phase: query::revenue_by_phase(&ctx.summary),
        account_distribution: query::phase_distribution(accounts),
    }
}

pub fn hit_list(ctx: &DataContext, size: usize) -> HitList<'_> {
    HitList {
        size,
        accounts: query::top_n(&ctx.actions.accounts, size),
    }
}

pub fn phase_deep_dive(ctx: &DataContext, phase: Phase) -> PhaseDeepDive<'_> {
    let accounts = query::filter_by_phase(&ctx.actions.accounts, phase);
    let strategy = accounts
        .first()
        .map(|a| a.recommended_action.clone())
        .unwrap_or_else(|| NOT_AVAILABLE.to_string());

    PhaseDeepDive {
        phase,
        account_count: accounts.len(),
        accounts,
        strategy,
        export_file_name: export_file_name(phase),
        source: &ctx.actions,
    }
}

pub fn strategy_logic(ctx: &DataContext) -> StrategyLogic<'_> {
    StrategyLogic {
        logic: &ctx.logic,
        priority_clusters: query::priority_clusters(&ctx.actions.accounts),
    }
}

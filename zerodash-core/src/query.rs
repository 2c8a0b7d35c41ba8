//! Read-only queries over loaded tables
//!
//! Every function here borrows its input and returns references or small derived
//! values; nothing can fail.

use serde::Serialize;

use crate::tables::{Account, Phase, PhaseSummary};

/// Stable descending sort by score: equal scores keep their sheet order
fn by_score_desc<'a>(accounts: impl Iterator<Item = &'a Account>) -> Vec<&'a Account> {
    let mut ranked: Vec<&Account> = accounts.collect();
    ranked.sort_by(|a, b| b.roi_speed_score.total_cmp(&a.roi_speed_score));
    ranked
}

/// The `n` highest-scoring accounts
pub fn top_n(accounts: &[Account], n: usize) -> Vec<&Account> {
    let mut ranked = by_score_desc(accounts.iter());
    ranked.truncate(n);
    log::debug!("top_n: {} of {} accounts", ranked.len(), accounts.len());
    ranked
}

/// Accounts recommended for `phase`, highest score first
pub fn filter_by_phase(accounts: &[Account], phase: Phase) -> Vec<&Account> {
    let matching = by_score_desc(accounts.iter().filter(|a| a.recommended_phase == phase));
    log::debug!("filter_by_phase: {} accounts in {}", matching.len(), phase);
    matching
}

/// Mean score rounded to one decimal, `None` for an empty list
pub fn mean_score(accounts: &[Account]) -> Option<f64> {
    if accounts.is_empty() {
        return None;
    }
    let sum: f64 = accounts.iter().map(|a| a.roi_speed_score).sum();
    Some(round1(sum / accounts.len() as f64))
}

fn round1(x: f64) -> f64 {
    (x * 10.0).round() / 10.0
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PhaseCount {
    pub phase: Phase,
    pub accounts: usize,
}

/// Number of accounts per phase, every phase listed in canonical order
pub fn phase_distribution(accounts: &[Account]) -> Vec<PhaseCount> {
    Phase::ALL
        .iter()
        .map(|&phase| PhaseCount {
            phase,
            accounts: accounts
                .iter()
                .filter(|a| a.recommended_phase == phase)
                .count(),
        })
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PhaseRevenue {
    pub phase: Phase,
    pub total_revenue: f64,
}

/// Revenue per phase from the summary sheet, canonical order.
///
/// Phases without a summary row are left out; repeated rows are added up.
pub fn revenue_by_phase(summary: &PhaseSummary) -> Vec<PhaseRevenue> {
    Phase::ALL
        .iter()
        .filter_map(|&phase| {
            let mut rows = summary
                .rows
                .iter()
                .filter(|r| r.recommended_phase == phase)
                .peekable();
            rows.peek()?;
            Some(PhaseRevenue {
                phase,
                total_revenue: rows.map(|r| r.total_revenue).sum(),
            })
        })
        .collect()
}

/// One point of the priority-clustering chart
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClusterPoint<'a> {
    pub account_name: &'a str,
    pub roi_speed_score: f64,
    pub priority_label: &'a str,
    pub phase: Phase,
}

/// Score against priority label for every account, in sheet order
pub fn priority_clusters(accounts: &[Account]) -> Vec<ClusterPoint<'_>> {
    accounts
        .iter()
        .map(|a| ClusterPoint {
            account_name: &a.account_name,
            roi_speed_score: a.roi_speed_score,
            priority_label: &a.priority_label,
            phase: a.recommended_phase,
        })
        .collect()
}

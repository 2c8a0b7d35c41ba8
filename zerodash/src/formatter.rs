//! Output formatters for dashboard views

use anyhow::{Context, Result};
use colored::*;
use std::fs;
use std::path::{Path, PathBuf};
use zerodash_core::reader::CellValue;
use zerodash_core::reader::workbook::format_number;
use zerodash_core::view::{
    ExecutiveSummary, HitList, NOT_AVAILABLE, PhaseDeepDive, StrategyLogic, ViewModel,
};

const BAR_WIDTH: usize = 40;
const FOOTER: &str = "Product Zero Dashboard v1.0 | Built for Sales Excellence";

/// Print a view in human-readable format with colors
pub fn print_human(model: &ViewModel) {
    match model {
        ViewModel::ExecutiveSummary(view) => print_executive_summary(view),
        ViewModel::HitList(view) => print_hit_list(view),
        ViewModel::PhaseDeepDive(view) => print_phase_deep_dive(view),
        ViewModel::StrategyLogic(view) => print_strategy(view),
    }

    println!();
    println!("{}", "-".repeat(BAR_WIDTH).bright_black());
    println!("{}", FOOTER.bright_black());
}

fn print_executive_summary(view: &ExecutiveSummary) {
    println!("{}", "Product Zero: Revenue Recovery".bold());
    println!("{}", "Data-Driven Sales Prioritization Engine".italic());
    println!();

    for kpi in &view.kpis {
        println!("  {:<24} {}", format!("{}:", kpi.label).bold(), cell(&kpi.value));
    }
    println!();

    println!("{}", "Revenue Potential by Phase".bold().underline());
    let max = view
        .revenue_by_phase
        .iter()
        .map(|r| r.total_revenue)
        .fold(0.0, f64::max);
    for row in &view.revenue_by_phase {
        println!(
            "  {:<9} {} {}",
            row.phase.label(),
            bar(row.total_revenue, max).cyan(),
            compact(row.total_revenue)
        );
    }
    println!();

    println!("{}", "Account Distribution".bold().underline());
    let total: usize = view.account_distribution.iter().map(|c| c.accounts).sum();
    for count in &view.account_distribution {
        let share = if total > 0 {
            count.accounts as f64 / total as f64 * 100.0
        } else {
            0.0
        };
        println!(
            "  {:<9} {:>4} ({:.1}%)",
            count.phase.label(),
            count.accounts,
            share
        );
    }
}

fn print_hit_list(view: &HitList) {
    println!("{}", format!("High-Velocity Top {}", view.size).bold());
    println!(
        "{}",
        "These accounts represent the highest recovery potential. Focus resources here for immediate impact."
            .blue()
    );
    println!();

    if view.accounts.is_empty() {
        println!("{}", "No accounts to show.".yellow());
        return;
    }

    let rows: Vec<Vec<String>> = view
        .accounts
        .iter()
        .map(|a| {
            vec![
                a.account_name.clone(),
                format_number(a.roi_speed_score),
                a.recommended_phase.to_string(),
                a.recommended_action.clone(),
                a.primary_reason.clone(),
            ]
        })
        .collect();
    print_table(
        &[
            "account_name",
            "roi_speed_score",
            "recommended_phase",
            "recommended_action",
            "primary_reason",
        ],
        &rows,
    );

    println!();
    println!("{}", "Top Speed Scores (0-100)".bold().underline());
    let name_width = view
        .accounts
        .iter()
        .map(|a| a.account_name.chars().count())
        .max()
        .unwrap_or(0);
    for account in &view.accounts {
        println!(
            "  {:<width$} {} {}",
            account.account_name,
            bar(account.roi_speed_score, 100.0).green(),
            format_number(account.roi_speed_score),
            width = name_width
        );
    }
}

fn print_phase_deep_dive(view: &PhaseDeepDive) {
    println!("{}", "Execution Lists by Phase".bold());
    println!();
    println!("{} {}", "Target Accounts:".bold(), view.phase.label().cyan().bold());

    if view.accounts.is_empty() {
        println!("  {}", "No accounts in this phase.".yellow());
    } else {
        let rows: Vec<Vec<String>> = view
            .accounts
            .iter()
            .map(|a| {
                vec![
                    a.account_name.clone(),
                    a.account_status.clone(),
                    format_number(a.roi_speed_score),
                    a.assigned_rep.clone(),
                ]
            })
            .collect();
        print_table(
            &["account_name", "account_status", "roi_speed_score", "assigned_rep"],
            &rows,
        );
    }

    println!();
    println!("  {} {}", "Phase Account Count:".bold(), view.account_count);
    let strategy = if view.strategy == NOT_AVAILABLE {
        view.strategy.bright_black()
    } else {
        view.strategy.normal()
    };
    println!("  {} {}", "Strategy:".bold(), strategy);
    println!(
        "  {} {}",
        "Export file:".bold(),
        view.export_file_name.bright_black()
    );
}

fn print_strategy(view: &StrategyLogic) {
    println!("{}", "The 'How' and 'Why'".bold());
    println!();

    println!("{}", "Scoring Weights (The How)".bold().underline());
    let rows: Vec<Vec<String>> = view
        .logic
        .rows
        .iter()
        .map(|row| row.iter().map(|v| v.to_string()).collect())
        .collect();
    let headers: Vec<&str> = view.logic.columns.iter().map(String::as_str).collect();
    print_table(&headers, &rows);
    println!();

    println!("{}", "Priority Clustering (The Why)".bold().underline());
    println!("We map ROI Scores against Priority Labels to identify 'Low Hanging Fruit'.");
    let mut points: Vec<_> = view.priority_clusters.iter().collect();
    points.sort_by(|a, b| {
        a.priority_label
            .cmp(b.priority_label)
            .then_with(|| b.roi_speed_score.total_cmp(&a.roi_speed_score))
    });
    let mut current_label = None;
    for point in points {
        if current_label != Some(point.priority_label) {
            current_label = Some(point.priority_label);
            println!("  {}", point.priority_label.yellow().bold());
        }
        println!(
            "    {:>6}  {} ({})",
            format_number(point.roi_speed_score),
            point.account_name,
            point.phase.label().bright_black()
        );
    }
}

fn print_table(headers: &[&str], rows: &[Vec<String>]) {
    let mut widths: Vec<usize> = headers.iter().map(|h| h.chars().count()).collect();
    for row in rows {
        for (width, value) in widths.iter_mut().zip(row) {
            *width = (*width).max(value.chars().count());
        }
    }

    let header_line: Vec<String> = headers
        .iter()
        .zip(&widths)
        .map(|(h, w)| format!("{:<w$}", h, w = *w))
        .collect();
    println!("  {}", header_line.join("  ").bold());

    for row in rows {
        let line: Vec<String> = row
            .iter()
            .zip(&widths)
            .map(|(v, w)| format!("{:<w$}", v, w = *w))
            .collect();
        println!("  {}", line.join("  "));
    }
}

fn cell(value: &CellValue) -> ColoredString {
    if value.is_error() {
        value.to_string().red()
    } else if value.as_number().is_some() {
        value.to_string().green().bold()
    } else {
        value.to_string().normal()
    }
}

fn bar(value: f64, max: f64) -> String {
    if max <= 0.0 || value <= 0.0 {
        return String::new();
    }
    let len = ((value / max) * BAR_WIDTH as f64).round() as usize;
    "█".repeat(len.clamp(1, BAR_WIDTH))
}

/// One decimal place with a magnitude suffix, e.g. 1.2M or 45.0k
fn compact(value: f64) -> String {
    const UNITS: [(f64, &str); 3] = [(1e9, "G"), (1e6, "M"), (1e3, "k")];
    for (scale, suffix) in UNITS {
        if value.abs() >= scale {
            return format!("{:.1}{}", value / scale, suffix);
        }
    }
    format_number(value)
}

/// Print a view in JSON format
pub fn print_json(model: &ViewModel) -> Result<()> {
    println!("{}", to_json(model)?);
    Ok(())
}

// The model is already tagged with its page
fn to_json(model: &ViewModel) -> Result<String> {
    Ok(serde_json::to_string_pretty(model)?)
}

/// Write the deep-dive CSV into `dir` under its download name
pub fn write_export(view: &PhaseDeepDive, dir: &Path) -> Result<PathBuf> {
    let csv = view.export_csv()?;
    fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create export directory {}", dir.display()))?;
    let path = dir.join(&view.export_file_name);
    fs::write(&path, csv).with_context(|| format!("Failed to write {}", path.display()))?;
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bar_scales_to_width() {
        assert_eq!(bar(100.0, 100.0).chars().count(), BAR_WIDTH);
        assert_eq!(bar(50.0, 100.0).chars().count(), BAR_WIDTH / 2);
        assert_eq!(bar(0.1, 100.0).chars().count(), 1);
        assert!(bar(0.0, 100.0).is_empty());
        assert!(bar(10.0, 0.0).is_empty());
    }

    #[test]
    fn test_compact() {
        assert_eq!(compact(1_200_000.0), "1.2M");
        assert_eq!(compact(950.0), "950");
        assert_eq!(compact(45_000.0), "45.0k");
    }

    #[test]
    fn test_json_names_the_page_once() {
        let model = ViewModel::ExecutiveSummary(ExecutiveSummary {
            kpis: Vec::new(),
            revenue_by_phase: Vec::new(),
            account_distribution: Vec::new(),
        });
        let value: serde_json::Value = serde_json::from_str(&to_json(&model).unwrap()).unwrap();

        let object = value.as_object().unwrap();
        assert_eq!(object.len(), 2);
        assert_eq!(value["page"], "Executive Summary");
        assert!(value["view"].get("page").is_none());
        assert!(value["view"]["kpis"].as_array().unwrap().is_empty());
    }
}

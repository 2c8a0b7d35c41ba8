use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use std::path::{Path, PathBuf};
use zerodash_core::config::DEFAULT_CONFIG_FILE;
use zerodash_core::view::{self, ViewModel};
use zerodash_core::{DashboardConfig, DataContext, Page, Phase, Selection};

mod formatter;

#[derive(Parser)]
#[command(name = "zerodash")]
#[command(about = "Product Zero sales prioritisation dashboard", long_about = None)]
#[command(version)]
struct Cli {
    /// Workbook with the dashboard sheets (overrides the config file)
    #[arg(value_name = "FILE")]
    file: Option<PathBuf>,

    /// Path to configuration file (TOML)
    #[arg(short, long, value_name = "CONFIG")]
    config: Option<PathBuf>,

    /// Page to show
    #[arg(short, long, value_enum, default_value = "executive-summary")]
    page: PageArg,

    /// Phase shown on the phase deep-dive page, e.g. "Phase 1A" or "1A"
    #[arg(long, value_parser = parse_phase)]
    phase: Option<Phase>,

    /// Number of accounts on the hit list
    #[arg(short, long, value_name = "N")]
    top: Option<usize>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "human")]
    format: OutputFormat,

    /// Write the selected phase list to `<phase>_list.csv` (phase deep-dive page only)
    #[arg(short, long)]
    export: bool,

    /// Directory for exported CSV files (overrides the config file)
    #[arg(long, value_name = "DIR")]
    output_dir: Option<PathBuf>,
}

#[derive(Clone, Copy, ValueEnum)]
enum PageArg {
    /// KPIs, revenue by phase and account distribution
    ExecutiveSummary,
    /// Highest-scoring accounts
    HitList,
    /// Accounts of one phase, with CSV export
    PhaseDeepDive,
    /// Scoring methodology and priority clustering
    Strategy,
}

impl From<PageArg> for Page {
    fn from(arg: PageArg) -> Self {
        match arg {
            PageArg::ExecutiveSummary => Page::ExecutiveSummary,
            PageArg::HitList => Page::HitList,
            PageArg::PhaseDeepDive => Page::PhaseDeepDive,
            PageArg::Strategy => Page::StrategyLogic,
        }
    }
}

#[derive(Clone, ValueEnum)]
enum OutputFormat {
    /// Human-readable colored output
    Human,
    /// JSON output for other front ends
    Json,
}

fn parse_phase(s: &str) -> Result<Phase, String> {
    s.parse()
}

fn load_config(path: Option<&Path>) -> Result<DashboardConfig> {
    if let Some(config_path) = path {
        return DashboardConfig::from_file(config_path)
            .with_context(|| format!("Failed to load config from {}", config_path.display()));
    }

    // Try to load default config from current directory if it exists
    let default_config_path = PathBuf::from(DEFAULT_CONFIG_FILE);
    if default_config_path.exists() {
        DashboardConfig::from_file(&default_config_path).with_context(|| {
            format!(
                "Failed to load config from {}",
                default_config_path.display()
            )
        })
    } else {
        Ok(DashboardConfig::default())
    }
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let mut config = load_config(cli.config.as_deref())?;
    if let Some(file) = cli.file {
        config.workbook = file;
    }
    if let Some(top) = cli.top {
        config.display.hit_list_size = top;
    }
    if let Some(dir) = cli.output_dir {
        config.export.directory = dir;
    }
    config.validate().context("Invalid configuration")?;

    let selection = Selection {
        page: cli.page.into(),
        phase: match cli.phase {
            Some(phase) => phase,
            None => config.default_phase()?,
        },
    };
    if cli.export && !selection.page.uses_phase() {
        anyhow::bail!("--export is only available on the phase-deep-dive page");
    }

    // Nothing is rendered unless all four tables load
    let ctx = DataContext::load(&config.workbook).context("Error loading Excel file")?;

    let model = view::render(&ctx, &selection, &config.view_settings());

    match cli.format {
        OutputFormat::Human => formatter::print_human(&model),
        OutputFormat::Json => formatter::print_json(&model)?,
    }

    if cli.export {
        if let ViewModel::PhaseDeepDive(deep_dive) = &model {
            let path = formatter::write_export(deep_dive, &config.export.directory)?;
            log::info!("exported {} accounts to {}", deep_dive.account_count, path.display());
            if matches!(cli.format, OutputFormat::Human) {
                println!("Exported list to {}", path.display());
            }
        }
    }

    Ok(())
}

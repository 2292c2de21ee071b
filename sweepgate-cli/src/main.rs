//! Sweepgate CLI — evaluate snapshots and tune liquidity-model profiles.
//!
//! Commands:
//! - `evaluate` — grade a TOML market snapshot for a direction, optionally journal it
//! - `profiles list` — one line per archetype
//! - `profiles show` — full profile as JSON
//! - `profiles reset` — restore one archetype (or all) to defaults
//! - `profiles adapt` — retune from a CSV export of the model summary sheet
//! - `profiles export` — write the profile document to a path

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use std::fs::File;
use std::path::{Path, PathBuf};
use sweepgate_core::domain::{Direction, EvaluationResult, MarketSnapshot};
use sweepgate_core::profiles::{ProfileStore, SummaryRow};
use sweepgate_core::{evaluate_with, SignalJournal, SignalRecord, SweepgateConfig};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "sweepgate",
    about = "Sweepgate — entry-readiness grading for liquidity-sweep setups"
)]
struct Cli {
    /// Application config (TOML). Defaults apply when the file is absent.
    #[arg(long, global = true, default_value = "sweepgate.toml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Evaluate a market snapshot for a trade direction.
    Evaluate {
        /// Snapshot file (TOML).
        #[arg(long)]
        snapshot: PathBuf,

        /// LONG or SHORT (case-insensitive).
        #[arg(long)]
        direction: Direction,

        /// Append the signal to the journal when it is entry-ready.
        #[arg(long, default_value_t = false)]
        log: bool,
    },
    /// Profile store commands.
    Profiles {
        #[command(subcommand)]
        action: ProfileAction,
    },
}

#[derive(Subcommand)]
enum ProfileAction {
    /// List archetypes with their key thresholds.
    List,
    /// Print one archetype's profile as JSON.
    Show { name: String },
    /// Reset an archetype to its built-in default.
    Reset {
        /// Archetype to reset.
        #[arg(required_unless_present = "all", conflicts_with = "all")]
        name: Option<String>,

        /// Reset every archetype.
        #[arg(long, default_value_t = false)]
        all: bool,
    },
    /// Retune profiles from a model-summary CSV.
    Adapt { summary: PathBuf },
    /// Write the full profile document to a file.
    Export { path: PathBuf },
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    let config = SweepgateConfig::from_file(&cli.config)
        .with_context(|| format!("loading config {}", cli.config.display()))?;
    let mut store = load_store(&config.paths.profiles);

    match cli.command {
        Commands::Evaluate {
            snapshot,
            direction,
            log,
        } => run_evaluate(&config, &store, &snapshot, direction, log),
        Commands::Profiles { action } => match action {
            ProfileAction::List => {
                print_profiles(&store);
                Ok(())
            }
            ProfileAction::Show { name } => {
                let profile = store.get(&name)?;
                println!("{}", serde_json::to_string_pretty(profile)?);
                Ok(())
            }
            ProfileAction::Reset { name, all } => {
                match name {
                    Some(name) if !all => store.reset_to_default(&name)?,
                    _ => store.reset_all(),
                }
                save_store(&store, &config.paths.profiles)
            }
            ProfileAction::Adapt { summary } => {
                run_adapt(&config, &mut store, &summary)?;
                save_store(&store, &config.paths.profiles)
            }
            ProfileAction::Export { path } => save_store(&store, &path),
        },
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .compact()
        .init();
}

/// Built-in profiles overlaid with the saved document. A bad document is
/// reported and the defaults stay in force.
fn load_store(path: &Path) -> ProfileStore {
    let mut store = ProfileStore::new();
    match store.load(path) {
        Ok(true) => info!(path = %path.display(), "profiles loaded"),
        Ok(false) => {}
        Err(e) => warn!(path = %path.display(), error = %e, "ignoring saved profiles"),
    }
    store
}

fn save_store(store: &ProfileStore, path: &Path) -> Result<()> {
    store
        .save(path)
        .with_context(|| format!("saving profiles to {}", path.display()))?;
    println!("Profiles saved to: {}", path.display());
    Ok(())
}

fn run_evaluate(
    config: &SweepgateConfig,
    store: &ProfileStore,
    snapshot_path: &Path,
    direction: Direction,
    log: bool,
) -> Result<()> {
    let content = std::fs::read_to_string(snapshot_path)
        .with_context(|| format!("reading snapshot {}", snapshot_path.display()))?;
    let snapshot = MarketSnapshot::from_toml(&content)
        .with_context(|| format!("parsing snapshot {}", snapshot_path.display()))?;

    let result = evaluate_with(&config.engine, direction, &snapshot, store);
    print_result(direction, &result);

    if log && result.entry_ready {
        let journal = SignalJournal::new(&config.paths.journal);
        journal
            .append(&SignalRecord::from_evaluation(direction, &snapshot, &result))
            .with_context(|| format!("writing journal {}", journal.path().display()))?;
        println!("Signal logged to: {}", journal.path().display());
    }
    Ok(())
}

fn run_adapt(config: &SweepgateConfig, store: &mut ProfileStore, summary: &Path) -> Result<()> {
    let file =
        File::open(summary).with_context(|| format!("opening summary {}", summary.display()))?;
    let rows = SummaryRow::from_csv_reader(file)
        .with_context(|| format!("reading summary {}", summary.display()))?;
    if rows.is_empty() {
        bail!("summary {} has no data rows", summary.display());
    }

    let report = store.bulk_adapt_with(&rows, &config.adapt);
    println!(
        "Rows: {}  Updated: {}  Skipped fields: {}",
        report.rows_seen,
        report.updated.len(),
        report.skipped.len()
    );
    for name in &report.updated {
        let p = store.get(name)?;
        println!(
            "  {name:<28} adx_min={:<5} expected_vwap={:<10} require_flip={}",
            p.adx_min, p.expected_vwap_relation, p.require_vwap_flip
        );
    }
    for skip in &report.skipped {
        println!(
            "  row {} ({}): {:?} skipped: {}",
            skip.row + 1,
            skip.archetype.as_deref().unwrap_or("-"),
            skip.field,
            skip.reason
        );
    }
    Ok(())
}

fn print_profiles(store: &ProfileStore) {
    println!(
        "{:<28} {:<12} {:>7} {:>5} {:<6} {:<10} {:>6}",
        "Archetype", "Bias", "ADX min", "Delay", "Flip", "VWAP", "Weight"
    );
    println!("{}", "-".repeat(80));
    for (name, p) in store.iter() {
        println!(
            "{:<28} {:<12} {:>7.1} {:>5} {:<6} {:<10} {:>6}",
            name,
            p.bias_mode,
            p.adx_min,
            p.post_sweep_delay_bars,
            p.require_vwap_flip,
            p.expected_vwap_relation,
            p.grade_weights.total()
        );
    }
}

fn print_result(direction: Direction, result: &EvaluationResult) {
    println!();
    println!("=== Signal Evaluation ===");
    println!("Direction:      {direction}");
    println!("Model:          {}", result.model_used);
    println!(
        "Entry:          {}",
        if result.entry_ready { "READY" } else { "NOT READY" }
    );
    println!("Grade:          {}/100", result.grade);
    println!();
    println!("--- Gates ---");
    for (gate, ok) in &result.gate_results.gates {
        println!("{:<18} {}", gate.as_str(), if *ok { "pass" } else { "FAIL" });
    }
    println!(
        "ADX slope:      {:+.2}  (profile ADX min {:.1}, expected VWAP {})",
        result.gate_results.adx_slope,
        result.gate_results.profile_adx_min,
        result.gate_results.expected_vwap
    );
    for banner in &result.banners {
        println!("WARNING: {banner}");
    }
    println!();
}

// Entry point and high-level CLI flow.
//
// - `overview` prints the dashboard headline figures.
// - `generate <kind>` builds one report, previews it and writes JSON.
// - With no subcommand the interactive menu runs: [1] loads the data
//   directory once, [2]-[4] generate reports from what was loaded.
use clap::{Args, Parser, Subcommand};
use contractor_reports::config::AppConfig;
use contractor_reports::error::ReportError;
use contractor_reports::output;
use contractor_reports::reports::ReportKind;
use contractor_reports::store::{CsvStore, MemoryStore, RecordStore};
use contractor_reports::util::{format_amount, format_int};
use contractor_reports::{telemetry, EngineOptions, ReportEngine};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

const PREVIEW_ROWS: usize = 5;

#[derive(Parser, Debug)]
#[command(
    name = "contractor_reports",
    about = "Generate contractor workforce reports from exported records",
    version
)]
struct Cli {
    /// Directory holding contractors.csv, timesheets.csv and baseline.json
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the dashboard headline figures
    Overview,
    /// Build one report and write it as JSON
    Generate(GenerateArgs),
}

#[derive(Args, Debug)]
struct GenerateArgs {
    /// contractor-summary, budget-analysis or performance-metrics
    kind: ReportKind,
    /// JSON destination (defaults to <output dir>/<kind>.json)
    #[arg(long)]
    out: Option<PathBuf>,
    /// Also export the main breakdown table as CSV
    #[arg(long)]
    csv: Option<PathBuf>,
    /// Seed for the synthetic figures
    #[arg(long)]
    seed: Option<u64>,
}

fn main() {
    if let Err(err) = run() {
        eprintln!("application error: {err}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), ReportError> {
    let cli = Cli::parse();
    let mut config = AppConfig::load()?;
    telemetry::init(&config.telemetry)?;

    if let Some(dir) = cli.data_dir {
        config.data_dir = dir;
    }

    match cli.command {
        Some(Command::Overview) => handle_overview(&config),
        Some(Command::Generate(args)) => {
            if args.seed.is_some() {
                config.reports.seed = args.seed;
            }
            handle_generate(&config, args)
        }
        None => {
            interactive(&config);
            Ok(())
        }
    }
}

fn handle_overview(config: &AppConfig) -> Result<(), ReportError> {
    let engine = ReportEngine::new(
        CsvStore::new(config.data_dir.clone()),
        EngineOptions::from(&config.reports),
    );
    let overview = engine.dashboard_overview()?;
    println!("Contractor Dashboard");
    println!("  Total contractors:    {}", format_int(overview.total_contractors));
    println!("  Active departments:   {}", format_int(overview.active_departments));
    println!("  Monthly spend:        ${}", format_amount(overview.monthly_spend));
    println!("  Avg contract length:  {} months", overview.avg_contract_length);
    Ok(())
}

fn handle_generate(config: &AppConfig, args: GenerateArgs) -> Result<(), ReportError> {
    let mut engine = ReportEngine::new(
        CsvStore::new(config.data_dir.clone()),
        EngineOptions::from(&config.reports),
    );
    let out = args
        .out
        .unwrap_or_else(|| default_json_path(&config.output_dir, args.kind));
    generate_and_export(&mut engine, args.kind, &out, args.csv.as_deref())
}

fn generate_and_export<S: RecordStore>(
    engine: &mut ReportEngine<S>,
    kind: ReportKind,
    out: &Path,
    csv: Option<&Path>,
) -> Result<(), ReportError> {
    let report = engine.build(kind)?;
    output::preview_report(&report, PREVIEW_ROWS);
    output::write_json(out, &report)?;
    println!("(Full report exported to {})", out.display());
    if let Some(path) = csv {
        output::write_report_csv(path, &report)?;
        println!("(Breakdown table exported to {})", path.display());
    }
    println!();
    Ok(())
}

fn default_json_path(output_dir: &Path, kind: ReportKind) -> PathBuf {
    output_dir.join(format!("{}.json", kind.as_str()))
}

/// Read a single line of input after printing the common "Enter choice:" prompt.
fn read_choice() -> String {
    print!("Enter choice: ");
    let _ = io::stdout().flush();
    let mut buf = String::new();
    io::stdin().read_line(&mut buf).ok();
    buf.trim().to_string()
}

/// Returns `true` if the user chose `Y`, `false` if they chose `N`.
fn prompt_back_to_menu() -> bool {
    loop {
        print!("Back to Report Selection (Y/N): ");
        let _ = io::stdout().flush();
        let mut buf = String::new();
        if io::stdin().read_line(&mut buf).unwrap_or(0) == 0 {
            return false;
        }
        match buf.trim().to_uppercase().as_str() {
            "Y" => return true,
            "N" => return false,
            _ => println!("Invalid choice. Please enter Y or N."),
        }
    }
}

/// Copy every collection out of the data directory so later reports do
/// not re-read the files.
fn load_snapshot(store: &CsvStore) -> Result<MemoryStore, ReportError> {
    let contractors = store
        .contractors()
        .map_err(|source| ReportError::DataUnavailable {
            collection: "contractors",
            source,
        })?;
    let baseline = store
        .baseline_snapshot()
        .map_err(|source| ReportError::DataUnavailable {
            collection: "baseline snapshot",
            source,
        })?;
    let mut snapshot = MemoryStore::new(contractors).with_baseline(baseline);
    match store.timesheets() {
        Ok(entries) => snapshot = snapshot.with_timesheets(entries),
        Err(err) => warn!(error = %err, "timesheets not loaded"),
    }
    Ok(snapshot)
}

fn handle_load(config: &AppConfig) -> Option<ReportEngine<MemoryStore>> {
    let store = CsvStore::new(config.data_dir.clone());
    match load_snapshot(&store) {
        Ok(snapshot) => {
            let loaded = snapshot.contractors().map(|c| c.len()).unwrap_or(0);
            println!(
                "Processing dataset... ({} contractors loaded from {})\n",
                format_int(loaded as u64),
                config.data_dir.display()
            );
            info!(contractors = loaded, "data directory loaded");
            Some(ReportEngine::new(
                snapshot,
                EngineOptions::from(&config.reports),
            ))
        }
        Err(e) => {
            eprintln!("Failed to load data: {}\n", e);
            None
        }
    }
}

fn interactive(config: &AppConfig) {
    let mut engine: Option<ReportEngine<MemoryStore>> = None;

    loop {
        println!("Select an option:");
        println!("[1] Load the data");
        println!("[2] Generate Contractor Summary");
        println!("[3] Generate Budget Analysis");
        println!("[4] Generate Performance Metrics\n");

        let kind = match read_choice().as_str() {
            "1" => {
                if let Some(loaded) = handle_load(config) {
                    engine = Some(loaded);
                }
                continue;
            }
            "2" => ReportKind::ContractorSummary,
            "3" => ReportKind::BudgetAnalysis,
            "4" => ReportKind::PerformanceMetrics,
            "" => {
                println!("Exiting the program.");
                break;
            }
            _ => {
                println!("Invalid choice. Please enter 1 to 4.\n");
                continue;
            }
        };

        let Some(active) = engine.as_mut() else {
            println!("Error: No data loaded. Please load the data first (option 1).\n");
            continue;
        };

        println!("\nGenerating {}...", kind.title());
        let out = default_json_path(&config.output_dir, kind);
        if let Err(e) = generate_and_export(active, kind, &out, None) {
            eprintln!("Report error: {}\n", e);
        }
        if !prompt_back_to_menu() {
            println!("Exiting the program.");
            break;
        }
    }
}

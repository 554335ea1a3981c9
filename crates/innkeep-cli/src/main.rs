mod registry;

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use std::time::Instant;

use clap::{Args, Parser, Subcommand};
use innkeep_generate::{GenerationEngine, GenerationError, GeneratorConfig};
use innkeep_walk::{ReplaceOutcome, WalkError, WalkOptions, apply_replace, collect_files};
use registry::{
    RunContext, init_run_logging, init_stderr_logging, start_run, write_generation_report,
};
use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error)]
enum CliError {
    #[error("registry error: {0}")]
    Registry(#[from] registry::RegistryError),
    #[error("generation error: {0}")]
    Generation(#[from] GenerationError),
    #[error("walk error: {0}")]
    Walk(#[from] WalkError),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid arguments: {0}")]
    InvalidArgs(String),
}

#[derive(Parser, Debug)]
#[command(name = "innkeep", version, about = "Hotel reservation mock data and file utilities")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Write SQL INSERT statements for a synthetic hotel database.
    Generate(GenerateArgs),
    /// List files under a directory, optionally replacing text in each.
    Walk(WalkArgs),
    /// Print the JSON Schema of the generator config file.
    ConfigSchema,
}

#[derive(Args, Debug)]
struct GenerateArgs {
    /// TOML config file; flags below override its values.
    #[arg(long)]
    config: Option<PathBuf>,
    /// Output SQL file.
    #[arg(long)]
    out: Option<PathBuf>,
    /// Seed for reproducible output.
    #[arg(long)]
    seed: Option<u64>,
    /// Directory for run artifacts (SQL, config, report, logs).
    #[arg(long)]
    run_dir: Option<PathBuf>,
    #[arg(long)]
    chains: Option<u32>,
    #[arg(long)]
    hotels_per_chain: Option<u32>,
    #[arg(long)]
    rooms_per_hotel: Option<u32>,
    #[arg(long)]
    employees_per_hotel: Option<u32>,
    #[arg(long)]
    customers_per_hotel: Option<u32>,
    #[arg(long)]
    bookings_per_customer: Option<u32>,
}

#[derive(Args, Debug)]
struct WalkArgs {
    /// Directory to start from.
    #[arg(long, default_value = ".")]
    root: PathBuf,
    /// Include files of all sub-directories.
    #[arg(short, long, default_value_t = false)]
    recursive: bool,
    /// Replace the first argument with the second in every file.
    #[arg(short, long, num_args = 2, value_names = ["OLD", "NEW"])]
    change: Option<Vec<String>>,
    /// File and directory names to skip.
    #[arg(short, long, num_args = 1..)]
    exclude: Vec<String>,
    /// File listing names to skip, one per line.
    #[arg(long)]
    exclude_file: Option<PathBuf>,
}

fn main() -> Result<(), CliError> {
    let cli = Cli::parse();

    match cli.command {
        Command::Generate(args) => run_generate(args),
        Command::Walk(args) => run_walk(args),
        Command::ConfigSchema => {
            let schema = schemars::schema_for!(GeneratorConfig);
            println!("{}", serde_json::to_string_pretty(&schema)?);
            Ok(())
        }
    }
}

fn run_generate(args: GenerateArgs) -> Result<(), CliError> {
    let mut config = match args.config.as_deref() {
        Some(path) => GeneratorConfig::load(path)?,
        None => GeneratorConfig::default(),
    };
    apply_overrides(&mut config, &args);
    config.validate()?;

    config.seed = Some(config.resolved_seed());
    let engine = GenerationEngine::new(config.clone());

    let timer = Instant::now();
    let result = match args.run_dir {
        Some(run_dir) => {
            let run_ctx = RunContext {
                run_id: Uuid::new_v4().to_string(),
                started_at: chrono::Utc::now(),
                run_dir,
                config,
            };
            let run_paths = start_run(&run_ctx)?;
            init_run_logging(&run_paths.logs_path)?;
            tracing::info!(event = "run_started", run_id = %run_ctx.run_id, path = %run_paths.root.display());

            let result = engine
                .with_run_id(run_ctx.run_id.clone())
                .run_to(&run_paths.sql_path)?;
            write_generation_report(&run_paths, &result.report)?;
            tracing::info!(event = "report_written", path = %run_paths.report_path.display());
            result
        }
        None => {
            init_stderr_logging()?;
            engine.run()?
        }
    };

    tracing::info!(
        event = "run_finished",
        status = "success",
        output = %result.output.display(),
        seed = result.report.seed,
        duration_ms = timer.elapsed().as_millis() as u64
    );
    println!("{}", result.output.display());
    Ok(())
}

fn apply_overrides(config: &mut GeneratorConfig, args: &GenerateArgs) {
    if let Some(out) = &args.out {
        config.output = out.clone();
    }
    if args.seed.is_some() {
        config.seed = args.seed;
    }
    let counts = [
        (args.chains, &mut config.chains),
        (args.hotels_per_chain, &mut config.hotels_per_chain),
        (args.rooms_per_hotel, &mut config.rooms_per_hotel),
        (args.employees_per_hotel, &mut config.employees_per_hotel),
        (args.customers_per_hotel, &mut config.customers_per_hotel),
        (args.bookings_per_customer, &mut config.bookings_per_customer),
    ];
    for (value, slot) in counts {
        if let Some(value) = value {
            *slot = value;
        }
    }
}

fn run_walk(args: WalkArgs) -> Result<(), CliError> {
    init_stderr_logging()?;

    let mut exclude: BTreeSet<String> = args.exclude.into_iter().collect();
    if let Some(path) = args.exclude_file.as_deref() {
        exclude.extend(innkeep_walk::load_exclude_file(path)?);
    }
    exclude.extend(own_executable_names());

    let options = WalkOptions {
        root: args.root,
        recursive: args.recursive,
        exclude,
        ..WalkOptions::default()
    };
    let files = collect_files(&options)?;

    let Some(change) = args.change else {
        for file in &files {
            println!("{}", file.display());
        }
        return Ok(());
    };

    let [old, new] = change.as_slice() else {
        return Err(CliError::InvalidArgs(
            "--change takes exactly two values".to_string(),
        ));
    };

    let mut rewritten = 0_usize;
    for file in &files {
        match apply_replace(file, old, new)? {
            ReplaceOutcome::Replaced { occurrences } => {
                rewritten += 1;
                println!("replaced {occurrences}\t{}", file.display());
            }
            ReplaceOutcome::Unchanged => println!("unchanged\t{}", file.display()),
        }
    }
    tracing::info!(event = "replace_finished", files = files.len(), rewritten);
    Ok(())
}

/// Names under which this binary may appear inside the walked tree.
fn own_executable_names() -> Vec<String> {
    let from_argv = std::env::args_os().next().map(PathBuf::from);
    let from_exe = std::env::current_exe().ok();
    from_argv
        .into_iter()
        .chain(from_exe)
        .filter_map(|path| file_name(&path))
        .collect()
}

fn file_name(path: &Path) -> Option<String> {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
}

use clap::error::ErrorKind;
use clap::{ArgGroup, CommandFactory, Parser, Subcommand};
use daylog_core::generate::{write_activity_file, write_sleep_file, Generator};
use daylog_core::*;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "daylog")]
#[command(about = "Merge sleep and workout logs into per-day health records", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Use this config file instead of the default location
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Reference timezone (IANA name) for day keys, overrides the config
    #[arg(long, global = true)]
    zone: Option<String>,

    /// Log debug output to stderr
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Merge sleep and activity files into one day-keyed snapshot
    #[command(group(
        ArgGroup::new("inputs")
            .required(true)
            .multiple(true)
            .args(["sleep_data", "activity_data"])
    ))]
    Merge {
        /// Path to sleep data file
        #[arg(short, long)]
        sleep_data: Option<PathBuf>,

        /// Path to activity data file
        #[arg(short, long)]
        activity_data: Option<PathBuf>,

        /// Snapshot path (defaults to the configured output, merged.json)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Skip the console summary
        #[arg(long)]
        no_summary: bool,
    },

    /// Generate synthetic sleep and/or activity files
    Generate {
        /// Generate sleep data file
        #[arg(short, long)]
        sleep_data: bool,

        /// Generate activity data file
        #[arg(short, long)]
        activity_data: bool,

        /// Directory to write sleep.json / workouts.json into
        #[arg(long, default_value = ".")]
        out_dir: PathBuf,

        /// Seed for reproducible output
        #[arg(long)]
        seed: Option<u64>,

        /// Entries per generated file
        #[arg(long)]
        count: Option<usize>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    daylog_core::logging::init(cli.verbose);

    let config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };
    let zone = match &cli.zone {
        Some(name) => ReferenceZone::from_name(name)?,
        None => config.reference_zone()?,
    };
    tracing::debug!("Using reference zone {}", zone);

    match cli.command {
        Commands::Merge {
            sleep_data,
            activity_data,
            output,
            no_summary,
        } => cmd_merge(
            &config,
            &zone,
            sleep_data.as_deref(),
            activity_data.as_deref(),
            output,
            no_summary,
        ),
        Commands::Generate {
            sleep_data,
            activity_data,
            out_dir,
            seed,
            count,
        } => {
            if !sleep_data && !activity_data {
                Cli::command()
                    .error(
                        ErrorKind::MissingRequiredArgument,
                        "No generation option provided. Use --sleep-data and/or --activity-data.",
                    )
                    .exit();
            }
            cmd_generate(&config, zone, sleep_data, activity_data, &out_dir, seed, count)
        }
    }
}

fn cmd_merge(
    config: &Config,
    zone: &ReferenceZone,
    sleep_path: Option<&Path>,
    activity_path: Option<&Path>,
    output: Option<PathBuf>,
    no_summary: bool,
) -> Result<()> {
    let sleep = match sleep_path {
        Some(path) => {
            println!("Sleep data file path: {}", path.display());
            let records = load_sleep(path)?;
            println!("Loaded {} sleep entries.", records.len());
            records
        }
        None => Vec::new(),
    };

    let workouts = match activity_path {
        Some(path) => {
            println!("Activity data file path: {}", path.display());
            let records = load_activity(path)?;
            println!("Loaded {} activity entries.", records.len());
            records
        }
        None => Vec::new(),
    };

    let merged = merge_streams(&sleep, &workouts, zone)?;

    let snapshot_path = output.unwrap_or_else(|| config.output.snapshot_path.clone());
    write_snapshot(&merged, &snapshot_path)?;
    println!("✓ Merged {} days into {}", merged.len(), snapshot_path.display());

    if !no_summary {
        print!("{}", Summary::from_map(&merged, &config.health));
    }

    Ok(())
}

fn cmd_generate(
    config: &Config,
    zone: ReferenceZone,
    sleep_data: bool,
    activity_data: bool,
    out_dir: &Path,
    seed: Option<u64>,
    count: Option<usize>,
) -> Result<()> {
    let mut settings = config.generator.clone();
    if seed.is_some() {
        settings.seed = seed;
    }
    if let Some(count) = count {
        settings.sleep_entries = count;
        settings.workout_entries = count;
    }

    let mut generator = Generator::new(&settings, zone)?;

    if sleep_data {
        let records = generator.sleep_records(settings.sleep_entries);
        let path = write_sleep_file(&records, out_dir)?;
        println!("✓ Sleep data file generated: {}", path.display());
    }

    if activity_data {
        let records = generator.workouts(settings.workout_entries);
        let path = write_activity_file(&records, out_dir)?;
        println!("✓ Activity data file generated: {}", path.display());
    }

    Ok(())
}

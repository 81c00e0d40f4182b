use clap::{Args, Parser, Subcommand};
use remdkit::core::coordinates::IncrementMode;
use std::path::PathBuf;

const HELP_TEMPLATE: &str = "\
{before-help}{name} {version}
{author-with-newline}{about-with-newline}
{usage-heading} {usage}

{all-args}{after-help}
";

#[derive(Parser, Debug)]
#[command(
    author = "Tony Kan, Ted Yu, William A. Goddard III, Victor Wai Tak Kam",
    version,
    about = "REMDKit CLI - Generate and validate multi-dimensional replica-exchange (MREMD) run layouts.",
    help_template = HELP_TEMPLATE,
)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Increase verbosity level (-v for INFO, -vv for DEBUG, -vvv for TRACE)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all log output except for errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Write logs to a specified file in addition to the console output
    #[arg(long, global = true, value_name = "PATH")]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Enumerate replicas, resolve their parameters and write the run layout.
    Generate(GenerateArgs),
    /// Show the exchange dimensions of a run and the resulting replica count.
    Info(InfoArgs),
}

/// Arguments for the `generate` subcommand.
#[derive(Args, Debug)]
pub struct GenerateArgs {
    /// Path to the run configuration file in TOML format.
    #[arg(short, long, required = true, value_name = "PATH")]
    pub config: PathBuf,

    /// Directory that receives `replicas.csv` and `exchange_groups.toml`.
    #[arg(short, long, required = true, value_name = "DIR")]
    pub output: PathBuf,

    /// Override the replica increment mode ('normal' or 'diagonal').
    #[arg(short, long, value_name = "MODE")]
    pub mode: Option<IncrementMode>,

    /// Override the default temperature (K) used when no dimension supplies one.
    #[arg(short = 't', long, value_name = "KELVIN")]
    pub temperature: Option<f64>,

    /// Override the default topology used when no topology dimension is present.
    #[arg(short = 'p', long, value_name = "PATH")]
    pub topology: Option<PathBuf>,

    /// Override the maximum number of replicas the run may create.
    #[arg(long, value_name = "INT")]
    pub max_replicas: Option<usize>,

    /// Validate and summarize the run without writing any file.
    #[arg(long)]
    pub dry_run: bool,

    /// Overwrite existing output files.
    #[arg(long)]
    pub force: bool,

    /// Set a specific configuration value, overriding the config file.
    /// Can be used multiple times. Example: -S defaults.ph=7.5
    #[arg(short = 'S', long = "set", value_name = "KEY=VALUE", num_args(0..))]
    pub set_values: Vec<String>,
}

/// Arguments for the `info` subcommand.
#[derive(Args, Debug)]
pub struct InfoArgs {
    /// Path to the run configuration file in TOML format.
    #[arg(short, long, required = true, value_name = "PATH")]
    pub config: PathBuf,
}

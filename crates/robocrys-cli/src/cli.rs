use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

const HELP_TEMPLATE: &str = "\
{before-help}{name} {version}
{author-with-newline}{about-with-newline}
{usage-heading} {usage}

{all-args}{after-help}
";

#[derive(Parser, Debug)]
#[command(
    author = "The robocrys-rs developers",
    version,
    about = "robocrys CLI - Generate human-readable descriptions of crystal structures from condensed structure files.",
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

    /// Set the number of threads used when describing several files.
    /// Defaults to the number of available logical cores.
    #[arg(short = 'j', long, global = true, value_name = "NUM")]
    pub threads: Option<usize>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Describe one or more condensed structure files (JSON or TOML).
    Describe(DescribeArgs),
    /// Print structural features of a condensed structure file.
    Features(FeaturesArgs),
}

/// Arguments for the `describe` subcommand.
#[derive(Args, Debug, Clone, Default)]
pub struct DescribeArgs {
    // --- Core Arguments ---
    /// Condensed structure files to describe.
    #[arg(required = true, value_name = "INPUT")]
    pub inputs: Vec<PathBuf>,

    /// Write descriptions to this file instead of standard output.
    #[arg(short, long, value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Path to a describer configuration file in TOML format.
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// CSV table of ranked mineral matches (structure,tier,mineral,distance).
    /// Rows are keyed by the input file stem and take precedence over the
    /// candidates embedded in each file.
    #[arg(long, value_name = "PATH")]
    pub mineral_table: Option<PathBuf>,

    // --- Describer Overrides ---
    /// Override the geometry likeness below which a site is called distorted.
    #[arg(long, value_name = "FLOAT")]
    pub distorted_tol: Option<f64>,

    /// Omit the mineral and space group sentence.
    #[arg(long)]
    pub no_mineral: bool,

    /// Omit the dimensionality sentence.
    #[arg(long)]
    pub no_dimensionality: bool,

    /// Omit the component and site sentences.
    #[arg(long)]
    pub no_components: bool,

    /// Print element symbols without oxidation states.
    #[arg(long)]
    pub hide_oxidation_states: bool,

    /// Only describe polyhedral connectivity for cation sites.
    #[arg(long)]
    pub cation_polyhedra_only: bool,

    /// Omit bond length sentences.
    #[arg(long)]
    pub no_bond_lengths: bool,

    /// Set a specific configuration value, overriding the config file.
    /// Can be used multiple times. Example: -S describe.bond-lengths=false
    #[arg(short = 'S', long = "set", value_name = "KEY=VALUE", num_args(0..))]
    pub set_values: Vec<String>,
}

/// Arguments for the `features` subcommand.
#[derive(Args, Debug, Clone)]
pub struct FeaturesArgs {
    /// Condensed structure file to analyse.
    #[arg(required = true, value_name = "INPUT")]
    pub input: PathBuf,

    /// Geometry likeness below which a site counts as distorted.
    #[arg(long, value_name = "FLOAT")]
    pub distorted_tol: Option<f64>,
}

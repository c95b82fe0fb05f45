use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "finrisk")]
#[command(about = "Personal-finance risk scoring and Monte Carlo projections")]
pub struct Cli {
    /// Engine configuration file (YAML); defaults apply to omitted fields
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Master seed for the simulation commands (random when omitted)
    #[arg(short, long, global = true)]
    pub seed: Option<u64>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, global = true, default_value = "info")]
    pub log_level: String,

    /// Write logs to `<DIR>/finrisk.log` instead of stderr
    #[arg(long, global = true)]
    pub log_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Score a financial profile and list mitigation strategies
    Assess {
        /// YAML with optional `financial`, `tolerance` and `prior` sections
        input: PathBuf,
    },

    /// Score a profile and recommend an asset allocation
    Allocate {
        /// YAML with `financial` and `tolerance` sections
        input: PathBuf,
    },

    /// Run a Monte Carlo projection
    Simulate {
        /// YAML simulation parameters
        input: PathBuf,

        /// Include every terminal value in the output
        #[arg(long)]
        include_paths: bool,
    },

    /// Measure a projection against a target value
    Goal {
        /// YAML simulation parameters plus `target_value`
        input: PathBuf,

        #[arg(long)]
        include_paths: bool,
    },

    /// Project savings to retirement in today's money
    Retirement {
        /// YAML retirement parameters
        input: PathBuf,

        #[arg(long)]
        include_paths: bool,
    },

    /// Report progress on a savings goal
    GoalProgress {
        /// YAML savings goal
        input: PathBuf,

        /// Evaluation date (YYYY-MM-DD), defaults to today
        #[arg(long)]
        today: Option<jiff::civil::Date>,

        /// Record a contribution before reporting
        #[arg(long)]
        contribute: Option<f64>,
    },
}

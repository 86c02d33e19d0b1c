//! CLI argument definitions using clap
//!
//! Commands:
//! - dbsteward run --config <path> --state-dir <dir> [--role master|slave]
//! - dbsteward plan --config <path> --state-dir <dir> [--role master|slave]
//! - dbsteward schedule --state-dir <dir>
//! - dbsteward state --state-dir <dir>

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use crate::lifecycle::NodeRole;

/// dbsteward - role lifecycle orchestrator for replicated database nodes
#[derive(Parser, Debug)]
#[command(name = "dbsteward")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Execute one full lifecycle pass and persist the resulting state
    Run {
        /// Path to configuration file
        #[arg(long, default_value = "./dbsteward.json")]
        config: PathBuf,

        /// Directory holding the persisted node state
        #[arg(long, default_value = "./state")]
        state_dir: PathBuf,

        /// External role assignment for first registration
        #[arg(long)]
        role: Option<RoleArg>,
    },

    /// Print the action a run would take, without side effects
    Plan {
        /// Path to configuration file
        #[arg(long, default_value = "./dbsteward.json")]
        config: PathBuf,

        /// Directory holding the persisted node state
        #[arg(long, default_value = "./state")]
        state_dir: PathBuf,

        /// External role assignment for first registration
        #[arg(long)]
        role: Option<RoleArg>,
    },

    /// Draw (or show) the node's jittered backup schedule
    Schedule {
        /// Directory holding the persisted node state
        #[arg(long, default_value = "./state")]
        state_dir: PathBuf,
    },

    /// Print the persisted node role state
    State {
        /// Directory holding the persisted node state
        #[arg(long, default_value = "./state")]
        state_dir: PathBuf,
    },
}

/// Role assignment as supplied on the command line.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum RoleArg {
    Master,
    Slave,
}

impl From<RoleArg> for NodeRole {
    fn from(role: RoleArg) -> Self {
        match role {
            RoleArg::Master => NodeRole::Master,
            RoleArg::Slave => NodeRole::Slave,
        }
    }
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}

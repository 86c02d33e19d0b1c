//! CLI command dispatch
//!
//! Each command loads what it needs, runs, and prints a short human
//! summary; structured events go through the logger inside the run itself.

use std::path::{Path, PathBuf};

use crate::config::NodeConfig;
use crate::dns::DigResolver;
use crate::lifecycle::{
    decide, HookCollaborators, Orchestrator, PersistedNode, StateStore,
};
use crate::schedule::{self, BackupSchedule};

use super::args::{Cli, Command, RoleArg};
use super::errors::CliResult;

/// Parse arguments and run the selected command.
pub fn run() -> CliResult<()> {
    let cli = Cli::parse_args();
    match cli.command {
        Command::Run {
            config,
            state_dir,
            role,
        } => cmd_run(&config, &state_dir, role),
        Command::Plan {
            config,
            state_dir,
            role,
        } => cmd_plan(&config, &state_dir, role),
        Command::Schedule { state_dir } => cmd_schedule(&state_dir),
        Command::State { state_dir } => cmd_state(&state_dir),
    }
}

fn cmd_run(config_path: &Path, state_dir: &PathBuf, role: Option<RoleArg>) -> CliResult<()> {
    let config = NodeConfig::load(config_path)?;
    let store = StateStore::new(state_dir);
    let mut node = store.load_or_init()?;

    ensure_schedule(&store, &mut node)?;

    let hooks = HookCollaborators::from_config(&config.hooks)?;
    let resolver = DigResolver;
    let orchestrator = Orchestrator::new(
        &hooks.provider,
        &resolver,
        &hooks.registrar,
        &hooks.tags,
        &hooks.grants,
    );

    let outcome = orchestrator.run(&config, node.state.clone(), role.map(Into::into))?;

    node.state = outcome.state;
    store.save(&node)?;

    println!("action: {}", outcome.action.name());
    println!("state: {}", node.state.state_name());
    if outcome.failed_grants.is_empty() {
        println!("grants: ok");
    } else {
        for failed in &outcome.failed_grants {
            println!(
                "grant failed: {} as {}: {}",
                failed.username, failed.role, failed.error.message
            );
        }
    }
    Ok(())
}

fn cmd_plan(config_path: &Path, state_dir: &PathBuf, role: Option<RoleArg>) -> CliResult<()> {
    let config = NodeConfig::load(config_path)?;
    config.validate_provider()?;

    let store = StateStore::new(state_dir);
    let node = store.load_or_init()?;

    let action = decide(&node.state, role.map(Into::into));
    println!("{}", action.name());
    Ok(())
}

fn cmd_schedule(state_dir: &PathBuf) -> CliResult<()> {
    let store = StateStore::new(state_dir);
    let mut node = store.load_or_init()?;

    let schedule = ensure_schedule(&store, &mut node)?;
    print_slot("primary/master", schedule.primary.master.cron_expression());
    print_slot("primary/slave", schedule.primary.slave.cron_expression());
    print_slot(
        "secondary/master",
        schedule.secondary.master.cron_expression(),
    );
    print_slot("secondary/slave", schedule.secondary.slave.cron_expression());
    Ok(())
}

fn cmd_state(state_dir: &PathBuf) -> CliResult<()> {
    let store = StateStore::new(state_dir);
    match store.load()? {
        Some(node) => {
            println!("state: {}", node.state.state_name());
            if let Some(uuid) = node.state.current_master_uuid {
                println!("current master uuid: {}", uuid);
            }
            if let Some(ip) = &node.state.current_master_ip {
                println!("current master ip: {}", ip);
            }
            println!(
                "schedule drawn: {}",
                if node.backup_schedule.is_some() {
                    "yes"
                } else {
                    "no"
                }
            );
        }
        None => println!("no persisted state at {}", store.state_path().display()),
    }
    Ok(())
}

/// Draw the jitter schedule on first use; reuse the stored one afterwards.
fn ensure_schedule(store: &StateStore, node: &mut PersistedNode) -> CliResult<BackupSchedule> {
    if let Some(schedule) = node.backup_schedule {
        return Ok(schedule);
    }
    let schedule = schedule::generate(schedule::draw_seed());
    node.backup_schedule = Some(schedule);
    store.save(node)?;
    Ok(schedule)
}

fn print_slot(name: &str, expression: Option<String>) {
    match expression {
        Some(expr) => println!("{}: {}", name, expr),
        None => println!("{}: disabled", name),
    }
}

//! vxc CLI - Inspect vxcore configuration and session state.

use clap::Parser;
use std::process;
use tracing_subscriber::EnvFilter;
use vxcore::cli::{Cli, Commands, SessionCommands};
use vxcore::commands::{self, CommandResult};
use vxcore::config::ConfigManager;

/// Environment variable holding the default log filter.
const LOG_ENV: &str = "VXCORE_LOG";

fn main() {
    let cli = Cli::parse();
    let human = cli.human_readable;

    init_logging(cli.log_level.as_deref());

    let mut manager = ConfigManager::new(cli.test_mode);

    let result = run_command(cli.command, &mut manager, human);
    // process::exit skips destructors; release the test sandbox first
    drop(manager);

    if let Err(e) = result {
        if human {
            eprintln!("Error: {}", e);
        } else {
            let error = serde_json::json!({ "error": e.to_string(), "kind": e.kind().as_str() });
            eprintln!("{}", error);
        }
        process::exit(1);
    }
}

/// Logs go to stderr so JSON on stdout stays machine-readable.
fn init_logging(level: Option<&str>) {
    let filter = match level {
        Some(directive) => EnvFilter::new(directive),
        None => EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn")),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn run_command(
    command: Commands,
    manager: &mut ConfigManager,
    human: bool,
) -> Result<(), vxcore::Error> {
    match command {
        Commands::Paths => {
            let result = commands::paths(manager)?;
            output(&result, human);
        }
        Commands::Config => {
            let result = commands::show_config(manager)?;
            output(&result, human);
        }
        Commands::Session { command } => match command {
            SessionCommands::List => {
                let result = commands::session_list(manager)?;
                output(&result, human);
            }
            SessionCommands::Add {
                root,
                notebook_type,
            } => {
                let result = commands::session_add(manager, &root, notebook_type)?;
                output(&result, human);
            }
            SessionCommands::Remove { id } => {
                let result = commands::session_remove(manager, &id)?;
                output(&result, human);
            }
        },
    }
    Ok(())
}

fn output<T: CommandResult>(result: &T, human: bool) {
    if human {
        println!("{}", result.to_human());
    } else {
        println!("{}", result.to_json());
    }
}

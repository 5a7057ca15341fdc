//! tally CLI: arithmetic calculator with undoable, persistent history.
//!
//! Three modes:
//! - **Shell mode**: `tally [flags] COMMAND` runs one command and exits
//! - **REPL mode**: `tally [flags]` opens an interactive prompt (stdin is a TTY)
//! - **Pipe mode**: `echo "add 2 3" | tally` reads commands line by line
//!
//! Settings come from `CALCULATOR_*` environment variables; flags override
//! them.

mod commands;
mod config;
mod format;
mod parse;
mod repl;
mod state;
mod value;

use std::io::IsTerminal;
use std::process;

use tally_engine::init_file_logging;
use tally_executor::{Command, Executor};
use tracing::{info, warn};

use commands::build_cli;
use config::Settings;
use format::{format_error, format_error_message, format_output, OutputMode};
use parse::{matches_to_action, CliAction};

fn main() {
    let cli = build_cli();
    let matches = cli.get_matches();

    // Determine output mode
    let output_mode = if matches.get_flag("json") {
        OutputMode::Json
    } else if matches.get_flag("raw") {
        OutputMode::Raw
    } else {
        OutputMode::Human
    };

    let mut settings = Settings::from_env();
    if let Err(e) = settings.apply_matches(&matches) {
        eprintln!("{}", format_error_message(&e, output_mode));
        process::exit(2);
    }

    if let Err(e) = init_file_logging(&settings.log_file) {
        eprintln!(
            "(warning) logging to {} disabled: {}",
            settings.log_file.display(),
            e
        );
    }

    let config = match settings.calculator_config() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{}", format_error(&e, output_mode));
            process::exit(2);
        }
    };
    info!(
        history_file = %config.history_file().display(),
        max_history_size = config.max_history_size().get(),
        auto_save = config.auto_save(),
        "calculator started"
    );
    let executor = match state::open_executor(config) {
        Ok(executor) => executor,
        Err(e) => {
            warn!(error = %e, "history restore failed");
            eprintln!("{}", format_error(&e, output_mode));
            process::exit(2);
        }
    };

    // Dispatch mode
    let exit_code = if matches.subcommand().is_some() {
        run_shell_mode(&matches, &executor, &settings, output_mode)
    } else if std::io::stdin().is_terminal() {
        repl::run_repl(&executor, output_mode);
        0
    } else {
        repl::run_pipe(&executor, output_mode)
    };
    process::exit(exit_code);
}

fn run_shell_mode(
    matches: &clap::ArgMatches,
    executor: &Executor,
    settings: &Settings,
    mode: OutputMode,
) -> i32 {
    match matches_to_action(matches, settings.max_input_value) {
        Ok(CliAction::Execute(cmd)) => match executor.execute(cmd.clone()) {
            Ok(output) => {
                let formatted = format_output(&cmd, &output, mode);
                if !formatted.is_empty() {
                    println!("{}", formatted);
                }
                if settings.auto_save && state::needs_save(&cmd) {
                    if let Err(e) = executor.execute(Command::Save) {
                        warn!(command = cmd.name(), error = %e, "history save failed");
                        eprintln!("{}", format_error(&e, mode));
                        return 1;
                    }
                }
                0
            }
            Err(e) => {
                warn!(command = cmd.name(), error = %e, "command failed");
                eprintln!("{}", format_error(&e, mode));
                1
            }
        },
        Ok(CliAction::Meta(_)) => {
            eprintln!(
                "{}",
                format_error_message("Meta-commands are only available in REPL mode", mode)
            );
            1
        }
        Err(e) => {
            eprintln!("{}", format_error_message(&e, mode));
            1
        }
    }
}

//! ArgMatches → Command/MetaCommand conversion.
//!
//! Translates clap's parsed arguments into the appropriate action:
//! - Calculator commands → `CliAction::Execute(Command)`
//! - REPL meta-commands → `CliAction::Meta`

use clap::ArgMatches;
use tally_executor::Command;

use crate::value::parse_operands;

/// The result of parsing user input.
#[derive(Debug, PartialEq)]
pub enum CliAction {
    /// A command to run through the executor.
    Execute(Command),
    /// A REPL-only meta-command.
    Meta(MetaCommand),
}

/// REPL meta-commands.
#[derive(Debug, PartialEq)]
pub enum MetaCommand {
    Help,
    Quit,
}

/// Check for REPL meta-commands before delegating to clap.
pub fn check_meta_command(line: &str) -> Option<MetaCommand> {
    let mut parts = line.split_whitespace();
    let cmd = parts.next()?;
    if parts.next().is_some() {
        return None;
    }
    match cmd {
        "quit" | "exit" => Some(MetaCommand::Quit),
        "help" => Some(MetaCommand::Help),
        _ => None,
    }
}

/// Convert clap ArgMatches into a CliAction.
///
/// `limit` is the operand magnitude bound.
pub fn matches_to_action(matches: &ArgMatches, limit: f64) -> Result<CliAction, String> {
    let (sub_name, sub_matches) = matches
        .subcommand()
        .ok_or_else(|| "No command provided".to_string())?;

    let command = match sub_name {
        "undo" => Command::Undo,
        "redo" => Command::Redo,
        "history" => Command::History,
        "clear" => Command::Clear,
        "save" => Command::Save,
        "load" => Command::Load,
        "operations" => Command::Operations,
        "info" => Command::Info,
        operation => parse_calculate(operation, sub_matches, limit)?,
    };
    Ok(CliAction::Execute(command))
}

/// Builtin operations carry `a`/`b` args; anything else arrives as an
/// external subcommand and is left for the registry to accept or reject.
fn parse_calculate(operation: &str, matches: &ArgMatches, limit: f64) -> Result<Command, String> {
    let (a, b) = match matches.try_get_one::<String>("a") {
        Ok(Some(a)) => {
            let b = matches
                .get_one::<String>("b")
                .ok_or_else(|| usage(operation))?;
            (a.clone(), b.clone())
        }
        _ => {
            let args: Vec<&String> = matches
                .get_many::<String>("")
                .map(|values| values.collect())
                .unwrap_or_default();
            match args.as_slice() {
                [a, b] => ((*a).clone(), (*b).clone()),
                _ => return Err(usage(operation)),
            }
        }
    };

    let (a, b) = parse_operands(&a, &b, limit).map_err(|e| e.to_string())?;
    Ok(Command::Calculate {
        operation: operation.to_string(),
        a,
        b,
    })
}

fn usage(operation: &str) -> String {
    format!("usage: {} <a> <b>", operation)
}

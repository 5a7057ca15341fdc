//! clap command tree.
//!
//! The same tree serves shell mode (`tally add 2 3`) and each REPL line
//! (`add 2 3`), so argument-count errors are reported identically in both.

use clap::{value_parser, Arg, ArgAction, Command};
use tally_core::BUILTINS;

/// Build the top-level CLI.
pub fn build_cli() -> Command {
    Command::new("tally")
        .about("Arithmetic calculator with undoable, persistent history")
        .version(env!("CARGO_PKG_VERSION"))
        .disable_help_subcommand(true)
        .allow_external_subcommands(true)
        .external_subcommand_value_parser(value_parser!(String))
        .arg(
            Arg::new("json")
                .long("json")
                .help("Output as JSON")
                .global(true)
                .action(ArgAction::SetTrue)
                .conflicts_with("raw"),
        )
        .arg(
            Arg::new("raw")
                .long("raw")
                .help("Output bare values, no decoration")
                .global(true)
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("history-file")
                .long("history-file")
                .value_name("PATH")
                .help("History CSV file (overrides CALCULATOR_HISTORY_DIR/FILE)"),
        )
        .arg(
            Arg::new("encoding")
                .long("encoding")
                .value_name("LABEL")
                .help("History file encoding (overrides CALCULATOR_DEFAULT_ENCODING)"),
        )
        .arg(
            Arg::new("precision")
                .long("precision")
                .value_name("DIGITS|none")
                .help("Decimal places results are rounded to"),
        )
        .arg(
            Arg::new("max-history")
                .long("max-history")
                .value_name("N")
                .help("Maximum number of history records kept"),
        )
        .arg(
            Arg::new("no-autosave")
                .long("no-autosave")
                .help("Do not write history after each calculation")
                .action(ArgAction::SetTrue),
        )
        .subcommands(BUILTINS.iter().map(|(name, _)| operation_command(*name)))
        .subcommand(Command::new("undo").about("Undo the last history change"))
        .subcommand(Command::new("redo").about("Redo the last undone change"))
        .subcommand(Command::new("history").about("Show recorded calculations"))
        .subcommand(Command::new("clear").about("Clear the history (undoable)"))
        .subcommand(Command::new("save").about("Write history to the history file"))
        .subcommand(Command::new("load").about("Replace history with the history file"))
        .subcommand(Command::new("operations").about("List available operations"))
        .subcommand(Command::new("info").about("Show calculator state and settings"))
}

fn operation_command(name: &'static str) -> Command {
    Command::new(name)
        .about(format!("Compute {} a b", name))
        .arg(
            Arg::new("a")
                .required(true)
                .allow_negative_numbers(true)
                .help("First operand"),
        )
        .arg(
            Arg::new("b")
                .required(true)
                .allow_negative_numbers(true)
                .help("Second operand"),
        )
}

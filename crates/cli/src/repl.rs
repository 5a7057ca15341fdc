//! Interactive and piped line processing.
//!
//! Every line goes through [`handle_line`], which never panics: malformed
//! input, wrong argument counts and calculator failures all come back as an
//! `(error) ...` line.

use std::io::{self, BufRead};

use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;
use tally_executor::Executor;

use crate::commands::build_cli;
use crate::format::{format_error, format_error_message, format_output, OutputMode};
use crate::parse::{check_meta_command, matches_to_action, CliAction, MetaCommand};

const PROMPT: &str = "tally> ";

/// What processing one line produced.
#[derive(Debug, PartialEq)]
pub enum LineResult {
    /// Blank line or nothing to print
    Empty,
    /// User asked to leave
    Quit,
    /// Text for stdout
    Output(String),
    /// Text for stderr
    Error(String),
}

/// Parse and run one line of input.
pub fn handle_line(executor: &Executor, line: &str, mode: OutputMode) -> LineResult {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return LineResult::Empty;
    }

    let action = match check_meta_command(line) {
        Some(meta) => Ok(CliAction::Meta(meta)),
        None => parse_line(executor, line),
    };

    match action {
        Ok(CliAction::Execute(cmd)) => match executor.execute(cmd.clone()) {
            Ok(output) => {
                let formatted = format_output(&cmd, &output, mode);
                if formatted.is_empty() {
                    LineResult::Empty
                } else {
                    LineResult::Output(formatted)
                }
            }
            Err(e) => LineResult::Error(format_error(&e, mode)),
        },
        Ok(CliAction::Meta(MetaCommand::Quit)) => LineResult::Quit,
        Ok(CliAction::Meta(MetaCommand::Help)) => LineResult::Output(help_text(executor)),
        Err(e) => LineResult::Error(format_error_message(&e, mode)),
    }
}

fn parse_line(executor: &Executor, line: &str) -> Result<CliAction, String> {
    let args = shlex::split(line).ok_or_else(|| "unbalanced quotes".to_string())?;
    let matches = build_cli()
        .no_binary_name(true)
        .try_get_matches_from(args)
        .map_err(|e| clap_message(&e))?;
    let limit = executor.with_calculator(|calc| calc.config().max_input_value());
    matches_to_action(&matches, limit)
}

/// Run the interactive prompt until `exit`, `quit` or EOF.
pub fn run_repl(executor: &Executor, mode: OutputMode) {
    let mut rl = match DefaultEditor::new() {
        Ok(rl) => rl,
        Err(e) => {
            eprintln!("(error) Failed to start line editor: {}", e);
            return;
        }
    };

    println!("tally calculator. Type 'help' for commands.");
    loop {
        match rl.readline(PROMPT) {
            Ok(line) => {
                if !line.trim().is_empty() {
                    let _ = rl.add_history_entry(line.as_str());
                }
                match handle_line(executor, &line, mode) {
                    LineResult::Empty => {}
                    LineResult::Quit => break,
                    LineResult::Output(text) => println!("{}", text),
                    LineResult::Error(text) => println!("{}", text),
                }
            }
            Err(ReadlineError::Interrupted) => continue,
            Err(ReadlineError::Eof) => break,
            Err(e) => {
                eprintln!("(error) {}", e);
                break;
            }
        }
    }
    println!("bye!");
}

/// Process stdin line by line. Returns the process exit code: 0 if every
/// line succeeded, 1 otherwise.
pub fn run_pipe(executor: &Executor, mode: OutputMode) -> i32 {
    let stdin = io::stdin();
    let mut exit_code = 0;
    for line in stdin.lock().lines() {
        let line = match line {
            Ok(line) => line,
            Err(e) => {
                eprintln!("(error) {}", e);
                return 1;
            }
        };
        match handle_line(executor, &line, mode) {
            LineResult::Empty => {}
            LineResult::Quit => break,
            LineResult::Output(text) => println!("{}", text),
            LineResult::Error(text) => {
                eprintln!("{}", text);
                exit_code = 1;
            }
        }
    }
    exit_code
}

fn help_text(executor: &Executor) -> String {
    let operations = executor.with_calculator(|calc| {
        calc.registry()
            .names()
            .map(|name| format!("{} a b", name))
            .collect::<Vec<_>>()
    });
    format!(
        "Operations:\n  {}\nCommands:\n  undo | redo | history | clear | save | load | operations | info\n  help | exit",
        operations.join(" | ")
    )
}

/// First line of a clap error, without its `error: ` prefix.
fn clap_message(err: &clap::Error) -> String {
    let rendered = err.to_string();
    let first = rendered.lines().next().unwrap_or_default();
    first.strip_prefix("error: ").unwrap_or(first).to_string()
}

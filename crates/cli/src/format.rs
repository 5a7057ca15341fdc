//! Output formatting for the three output modes.

use tally_executor::{CalculatorInfo, Command, Error, Output};

/// How results are rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    /// Readable text (default)
    Human,
    /// One JSON document per command
    Json,
    /// Bare values for scripting
    Raw,
}

/// Render a command's output. May return an empty string (nothing to print).
pub fn format_output(command: &Command, output: &Output, mode: OutputMode) -> String {
    match mode {
        OutputMode::Json => serde_json::to_string(output)
            .unwrap_or_else(|e| format!("{{\"error\":\"{}\"}}", e)),
        OutputMode::Raw => format_raw(output),
        OutputMode::Human => format_human(command, output),
    }
}

/// Render an error.
pub fn format_error(err: &Error, mode: OutputMode) -> String {
    format_error_message(&err.to_string(), mode)
}

/// Render an error that never reached the executor (parse failures).
pub fn format_error_message(message: &str, mode: OutputMode) -> String {
    match mode {
        OutputMode::Json => serde_json::json!({ "error": message }).to_string(),
        OutputMode::Human | OutputMode::Raw => format!("(error) {}", message),
    }
}

fn format_human(command: &Command, output: &Output) -> String {
    match (command, output) {
        (Command::Calculate { operation, a, b }, Output::Float(result)) => {
            format!("{} {} {} = {}", operation, a, b, result)
        }
        (Command::Undo, Output::Bool(true)) => "undone".to_string(),
        (Command::Undo, Output::Bool(false)) => "(nothing to undo)".to_string(),
        (Command::Redo, Output::Bool(true)) => "redone".to_string(),
        (Command::Redo, Output::Bool(false)) => "(nothing to redo)".to_string(),
        (Command::Clear, Output::Unit) => "history cleared".to_string(),
        (Command::Save, Output::Unit) => "history saved".to_string(),
        (Command::Load, Output::Uint(n)) => {
            format!("loaded {} record{}", n, if *n == 1 { "" } else { "s" })
        }
        (_, Output::Calculations(items)) if items.is_empty() => "(empty history)".to_string(),
        (_, Output::Calculations(items)) => items
            .iter()
            .enumerate()
            .map(|(i, calc)| format!("{}) {}", i + 1, calc))
            .collect::<Vec<_>>()
            .join("\n"),
        (_, Output::Names(names)) => names.join("\n"),
        (_, Output::Info(info)) => format_info(info),
        (_, Output::Unit) => "OK".to_string(),
        (_, Output::Float(v)) => v.to_string(),
        (_, Output::Bool(b)) => format!("({})", b),
        (_, Output::Uint(n)) => n.to_string(),
    }
}

fn format_info(info: &CalculatorInfo) -> String {
    let precision = info
        .precision
        .map(|p| p.to_string())
        .unwrap_or_else(|| "none".to_string());
    [
        format!("history: {}/{}", info.history_len, info.max_history_size),
        format!("undo depth: {}", info.undo_depth),
        format!("redo depth: {}", info.redo_depth),
        format!("precision: {}", precision),
        format!("auto-save: {}", if info.auto_save { "on" } else { "off" }),
        format!("history file: {}", info.history_file),
        format!("encoding: {}", info.encoding),
    ]
    .join("\n")
}

fn format_raw(output: &Output) -> String {
    match output {
        Output::Unit => String::new(),
        Output::Float(v) => v.to_string(),
        Output::Bool(b) => u8::from(*b).to_string(),
        Output::Uint(n) => n.to_string(),
        Output::Calculations(items) => items
            .iter()
            .map(|c| format!("{},{},{},{}", c.operation(), c.a(), c.b(), c.result()))
            .collect::<Vec<_>>()
            .join("\n"),
        Output::Names(names) => names.join("\n"),
        Output::Info(info) => [
            format!("history_len={}", info.history_len),
            format!("max_history_size={}", info.max_history_size),
            format!("undo_depth={}", info.undo_depth),
            format!("redo_depth={}", info.redo_depth),
            format!(
                "precision={}",
                info.precision
                    .map(|p| p.to_string())
                    .unwrap_or_else(|| "none".to_string())
            ),
            format!("auto_save={}", info.auto_save),
            format!("history_file={}", info.history_file),
            format!("encoding={}", info.encoding),
        ]
        .join("\n"),
    }
}

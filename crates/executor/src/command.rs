//! Commands accepted by the [`Executor`](crate::Executor).

/// Every operation a client can ask of a calculator.
///
/// | Command | Output |
/// |---------|--------|
/// | `Calculate` | `Float` |
/// | `Undo` / `Redo` | `Bool` (whether anything changed) |
/// | `History` | `Calculations` |
/// | `Clear` / `Save` | `Unit` |
/// | `Load` | `Uint` (records loaded) |
/// | `Operations` | `Names` |
/// | `Info` | `Info` |
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// Evaluate and record an operation
    Calculate {
        /// Operation name
        operation: String,
        /// First operand
        a: f64,
        /// Second operand
        b: f64,
    },
    /// Undo the last history mutation
    Undo,
    /// Redo the last undone mutation
    Redo,
    /// Read the live history
    History,
    /// Empty the history
    Clear,
    /// Write history to the configured file
    Save,
    /// Replace history with the configured file's contents
    Load,
    /// List registered operation names
    Operations,
    /// Describe calculator state and settings
    Info,
}

impl Command {
    /// Short name, for logs.
    pub fn name(&self) -> &'static str {
        match self {
            Command::Calculate { .. } => "calculate",
            Command::Undo => "undo",
            Command::Redo => "redo",
            Command::History => "history",
            Command::Clear => "clear",
            Command::Save => "save",
            Command::Load => "load",
            Command::Operations => "operations",
            Command::Info => "info",
        }
    }

    /// Check whether the command can change the history.
    pub fn is_mutating(&self) -> bool {
        matches!(
            self,
            Command::Calculate { .. }
                | Command::Undo
                | Command::Redo
                | Command::Clear
                | Command::Load
        )
    }
}

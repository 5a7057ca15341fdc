//! Notification hooks fired after each successful calculation.
//!
//! There are exactly two kinds of hook, so they form a closed enum rather
//! than a trait-object plugin list. Hooks run synchronously, in the order
//! they were registered.

use tally_core::Calculation;

use crate::logging::LogSink;

/// Something that happened in the calculator.
#[derive(Debug, Clone, Copy)]
pub enum Event<'a> {
    /// A calculation was appended to history
    Calculation(&'a Calculation),
}

impl Event<'_> {
    /// Event kind label.
    pub fn kind(&self) -> &'static str {
        match self {
            Event::Calculation(_) => "calculation",
        }
    }
}

/// A registered observer.
#[derive(Debug, Clone)]
pub enum Hook {
    /// Log each calculation to the sink
    Log(LogSink),
    /// Save the whole history after each calculation, when auto-save is on.
    /// Failures are logged and swallowed.
    AutoSave,
}

impl Hook {
    /// The standard hook list: logging first, then auto-save.
    pub fn defaults(sink: LogSink) -> Vec<Hook> {
        vec![Hook::Log(sink), Hook::AutoSave]
    }
}

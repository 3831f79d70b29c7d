//! Instructions forwarded to the external engine.
//!
//! Inside ccom an instruction is a typed verb. It is rendered to the engine's
//! protocol only at the edge, either as the one-line text form (`wire`) or as
//! the argument vector handed to the engine script (`argv`).
//!
//! In `argv`, natural-language text always follows a `natural-language`
//! marker, so free text such as `start` never reaches the script as a verb.

use std::fmt;

/// Default sort key for `list`.
pub const DEFAULT_SORT: &str = "created";

/// Default day count for `archive`.
pub const DEFAULT_ARCHIVE_DAYS: &str = "30";

/// One command for the engine.
///
/// `List::sort` and `Archive::days` are passed through as given; the engine
/// decides what values it accepts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Instruction {
    Start,
    Memory,
    Remember { name: String },
    Clear,
    Stats,
    List { sort: String },
    Archive { days: String },
    Remove { name: String },
    Compact,
    NaturalLanguage { text: String },
}

impl Instruction {
    pub fn verb(&self) -> &'static str {
        match self {
            Instruction::Start => "start",
            Instruction::Memory => "memory",
            Instruction::Remember { .. } => "remember",
            Instruction::Clear => "clear",
            Instruction::Stats => "stats",
            Instruction::List { .. } => "list",
            Instruction::Archive { .. } => "archive",
            Instruction::Remove { .. } => "remove",
            Instruction::Compact => "compact",
            Instruction::NaturalLanguage { .. } => "natural-language",
        }
    }

    /// The single text line the engine understands, e.g. `remember "auth"`.
    pub fn wire(&self) -> String {
        match self {
            Instruction::Remember { name } | Instruction::Remove { name } => {
                format!("{} \"{}\"", self.verb(), name)
            }
            Instruction::List { sort } => format!("list {}", sort),
            Instruction::Archive { days } => format!("archive {}", days),
            Instruction::NaturalLanguage { text } => text.clone(),
            _ => self.verb().to_string(),
        }
    }

    /// Arguments passed to the engine script.
    ///
    /// Traditional verbs match what a shell would make of `wire()`. Natural
    /// language is the marker followed by the whole text as one argument.
    pub fn argv(&self) -> Vec<String> {
        match self {
            Instruction::Remember { name } | Instruction::Remove { name } => {
                vec![self.verb().to_string(), name.clone()]
            }
            Instruction::List { sort } => vec!["list".to_string(), sort.clone()],
            Instruction::Archive { days } => vec!["archive".to_string(), days.clone()],
            Instruction::NaturalLanguage { text } => {
                vec![self.verb().to_string(), text.clone()]
            }
            _ => vec![self.verb().to_string()],
        }
    }
}

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.wire())
    }
}

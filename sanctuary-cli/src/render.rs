//! Plain-text presentation of the session.

use sanctuary_core::{Event, GameState, LogEntry, Severity};

/// Prints narrative output, remembering how much of the log it has shown.
pub struct Renderer {
    quiet: bool,
    shown: usize,
}

impl Renderer {
    pub fn new(quiet: bool) -> Self {
        Self { quiet, shown: 0 }
    }

    /// Print log entries appended since the last call.
    pub fn log(&mut self, state: &GameState) {
        let log = state.log();
        if !self.quiet {
            for entry in &log[self.shown..] {
                println!("{}", format_entry(entry));
            }
        }
        self.shown = log.len();
    }

    pub fn stats(&self, state: &GameState) {
        if self.quiet {
            return;
        }
        println!();
        println!("-- {} | Day {} --", state.role().name(), state.day());
        for stat in state.stats() {
            println!("  {:<22} {:>3} / {}", stat.label, stat.value, stat.max);
        }
        println!();
    }

    pub fn choices(&self, event: &Event) {
        if self.quiet {
            return;
        }
        for (i, choice) in event.choices.iter().enumerate() {
            println!("  [{}] {}", i + 1, choice.label);
        }
    }
}

pub fn format_entry(entry: &LogEntry) -> String {
    match entry.severity {
        Severity::Normal | Severity::Choice => entry.text.clone(),
        Severity::Warning => format!("!! {}", entry.text),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn warnings_are_marked() {
        let entry = LogEntry {
            text: "GAME OVER".to_string(),
            severity: Severity::Warning,
        };
        assert_eq!(format_entry(&entry), "!! GAME OVER");

        let entry = LogEntry {
            text: "> Run".to_string(),
            severity: Severity::Choice,
        };
        assert_eq!(format_entry(&entry), "> Run");
    }
}

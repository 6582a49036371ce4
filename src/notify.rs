//! User-facing notices (the terminal counterpart of toast messages).

use std::io::{IsTerminal, Write};
use std::sync::Mutex;

use colored::{ColoredString, Colorize};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    Success,
    Error,
    Info,
}

impl Level {
    fn symbol(self) -> &'static str {
        match self {
            Level::Success => "✓",
            Level::Error => "✗",
            Level::Info => "i",
        }
    }

    fn styled_symbol(self) -> ColoredString {
        match self {
            Level::Success => self.symbol().green(),
            Level::Error => self.symbol().red(),
            Level::Info => self.symbol().blue(),
        }
    }
}

pub trait Notifier: Send + Sync {
    fn notify(&self, level: Level, message: &str);

    fn success(&self, message: &str) {
        self.notify(Level::Success, message);
    }

    fn error(&self, message: &str) {
        self.notify(Level::Error, message);
    }

    fn info(&self, message: &str) {
        self.notify(Level::Info, message);
    }
}

/// Writes notices to the terminal. Errors go to stderr.
///
/// Symbols are coloured only when the stream they go to is a terminal. `NO_COLOR` and
/// `CLICOLOR_FORCE` are honoured by `colored`.
#[derive(Debug, Default)]
pub struct TerminalNotifier;

impl TerminalNotifier {
    pub fn new() -> Self {
        Self
    }
}

fn render(level: Level, message: &str, styled: bool) -> String {
    if styled {
        format!("{} {}", level.styled_symbol(), message)
    } else {
        format!("{} {}", level.symbol(), message)
    }
}

impl Notifier for TerminalNotifier {
    fn notify(&self, level: Level, message: &str) {
        // Nothing sensible to do if the terminal is gone.
        let _ = match level {
            Level::Error => {
                let mut stderr = std::io::stderr();
                let line = render(level, message, stderr.is_terminal());
                writeln!(stderr, "{}", line)
            }
            Level::Success | Level::Info => {
                let mut stdout = std::io::stdout();
                let line = render(level, message, stdout.is_terminal());
                writeln!(stdout, "{}", line)
            }
        };
    }
}

/// Keeps notices in memory, for embedding and tests.
#[derive(Default)]
pub struct MemoryNotifier {
    notices: Mutex<Vec<(Level, String)>>,
}

impl MemoryNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn notices(&self) -> Vec<(Level, String)> {
        self.notices
            .lock()
            .map(|notices| notices.clone())
            .unwrap_or_default()
    }
}

impl Notifier for MemoryNotifier {
    fn notify(&self, level: Level, message: &str) {
        if let Ok(mut notices) = self.notices.lock() {
            notices.push((level, message.to_string()));
        }
    }
}

//! Console output for pob commands.
//!
//! Status lines go to stderr so that command results written to stdout
//! (HTML, JSON, hashes) can be piped into the site build.

use console::{Style, Term};
use serde::Serialize;

/// Kind of status line, which picks its color.
#[derive(Clone, Copy)]
enum Tone {
    Plain,
    Done,
    Caution,
    Failure,
    Step,
}

impl Tone {
    fn style(self) -> Style {
        match self {
            Self::Plain => Style::new(),
            Self::Done => Style::new().green(),
            Self::Caution => Style::new().yellow(),
            Self::Failure => Style::new().red(),
            Self::Step => Style::new().cyan().bold(),
        }
    }
}

/// Status and result writer.
pub(crate) struct Output {
    status: Term,
    results: Term,
}

impl Output {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self {
            status: Term::stderr(),
            results: Term::stdout(),
        }
    }

    fn status(&self, tone: Tone, msg: &str) {
        let _ = self.status.write_line(&tone.style().apply_to(msg).to_string());
    }

    pub(crate) fn info(&self, msg: &str) {
        self.status(Tone::Plain, msg);
    }

    pub(crate) fn success(&self, msg: &str) {
        self.status(Tone::Done, msg);
    }

    pub(crate) fn warning(&self, msg: &str) {
        self.status(Tone::Caution, msg);
    }

    pub(crate) fn error(&self, msg: &str) {
        self.status(Tone::Failure, msg);
    }

    /// Announce a long-running step, such as walking an output directory.
    pub(crate) fn step(&self, msg: &str) {
        self.status(Tone::Step, msg);
    }

    /// Write a command result to stdout.
    pub(crate) fn data(&self, content: &str) {
        let _ = self.results.write_line(content);
    }

    /// Write `value` to stdout as pretty-printed JSON.
    pub(crate) fn json<T: Serialize + ?Sized>(&self, value: &T) -> Result<(), serde_json::Error> {
        self.data(&serde_json::to_string_pretty(value)?);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_tone_keeps_message_text() {
        for tone in [Tone::Plain, Tone::Done, Tone::Caution, Tone::Failure, Tone::Step] {
            let styled = tone.style().apply_to("Updated public/index.html").to_string();
            assert!(styled.contains("Updated public/index.html"));
        }
    }
}

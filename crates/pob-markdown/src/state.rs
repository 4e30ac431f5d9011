//! Event-processing state for the markdown renderer.

/// State for tracking fenced code block capture.
#[derive(Default)]
pub(crate) struct CodeBlockState {
    /// Whether we're inside a fenced code block.
    active: bool,
    /// Info string of the current block (e.g., "js live").
    info: String,
    /// Buffer for code block content.
    buffer: String,
}

impl CodeBlockState {
    /// Start a new code block with its info string.
    pub(crate) fn start(&mut self, info: &str) {
        self.active = true;
        self.info.clear();
        self.info.push_str(info.trim());
        self.buffer.clear();
    }

    /// End the current code block and return (info, content).
    pub(crate) fn end(&mut self) -> (String, String) {
        self.active = false;
        (
            std::mem::take(&mut self.info),
            std::mem::take(&mut self.buffer),
        )
    }

    /// Check if we're inside a code block.
    pub(crate) fn is_active(&self) -> bool {
        self.active
    }

    /// Append text to the code block buffer.
    pub(crate) fn push_str(&mut self, text: &str) {
        self.buffer.push_str(text);
    }
}

/// Which open links were rewritten, innermost last.
#[derive(Default)]
pub(crate) struct LinkState {
    rewritten: Vec<bool>,
}

impl LinkState {
    /// Record a link start.
    pub(crate) fn open(&mut self, rewritten: bool) {
        self.rewritten.push(rewritten);
    }

    /// Record a link end and report whether its start was rewritten.
    pub(crate) fn close(&mut self) -> bool {
        self.rewritten.pop().unwrap_or(false)
    }
}

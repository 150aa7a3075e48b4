//! Append-only, ordered text log of a clustering run.

use std::io::{self, Write};

/// Ordered sequence of human-readable log entries.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResultLog {
    entries: Vec<String>,
}

impl ResultLog {
    /// Create an empty log.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an entry.
    pub fn push(&mut self, entry: impl Into<String>) {
        self.entries.push(entry.into());
    }

    /// All entries in insertion order.
    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(String::as_str)
    }

    /// Write each entry as one line. Returns the number of lines written.
    pub fn write_lines(&self, sink: &mut dyn Write) -> io::Result<usize> {
        for entry in &self.entries {
            writeln!(sink, "{}", entry)?;
        }
        sink.flush()?;
        Ok(self.entries.len())
    }
}

impl Extend<String> for ResultLog {
    fn extend<I: IntoIterator<Item = String>>(&mut self, iter: I) {
        self.entries.extend(iter);
    }
}

use std::fmt::{self, Display, Write as _};
use std::io::{self, Write};
use std::sync::Arc;

use log::Level;
use parking_lot::Mutex;

/// Where a [`Printer`](crate::Printer) sends text once a message has been
/// admitted and prefixed.
pub trait Sink: Send {
    /// Receives a fully rendered formatted message.
    fn write_formatted(&self, message: &str);

    /// Receives a header token followed by the caller's values, to be
    /// rendered with the sink's own default formatting.
    fn write_line(&self, values: &[&dyn Display]);
}

impl<S: Sink + Sync + ?Sized> Sink for Arc<S> {
    fn write_formatted(&self, message: &str) {
        (**self).write_formatted(message)
    }

    fn write_line(&self, values: &[&dyn Display]) {
        (**self).write_line(values)
    }
}

impl<S: Sink + ?Sized> Sink for Box<S> {
    fn write_formatted(&self, message: &str) {
        (**self).write_formatted(message)
    }

    fn write_line(&self, values: &[&dyn Display]) {
        (**self).write_line(values)
    }
}

/// Default line rendering: operands separated by one space.
pub fn join_values(values: &[&dyn Display]) -> String {
    let mut line = String::new();
    for (i, value) in values.iter().enumerate() {
        if i > 0 {
            line.push(' ');
        }
        // Writing into a String cannot fail.
        let _ = write!(line, "{}", value);
    }
    line
}

/// Writes each message as its own line on stdout.
#[derive(Debug, Default, Clone, Copy)]
pub struct StdoutSink;

impl StdoutSink {
    fn emit(text: &str) {
        let mut out = io::stdout().lock();
        // A closed stdout is the caller's problem, not the printer's.
        let _ = writeln!(out, "{}", text);
    }
}

impl Sink for StdoutSink {
    fn write_formatted(&self, message: &str) {
        Self::emit(message);
    }

    fn write_line(&self, values: &[&dyn Display]) {
        Self::emit(&join_values(values));
    }
}

/// Forwards everything to the `log` facade.
#[derive(Debug, Clone)]
pub struct LogSink {
    level: Level,
    target: String,
}

impl LogSink {
    pub fn new(level: Level, target: impl Into<String>) -> Self {
        Self {
            level,
            target: target.into(),
        }
    }

    pub fn level(&self) -> Level {
        self.level
    }
}

impl Default for LogSink {
    fn default() -> Self {
        Self::new(Level::Info, "printssx")
    }
}

impl Sink for LogSink {
    fn write_formatted(&self, message: &str) {
        log::log!(target: self.target.as_str(), self.level, "{}", message);
    }

    fn write_line(&self, values: &[&dyn Display]) {
        log::log!(target: self.target.as_str(), self.level, "{}", join_values(values));
    }
}

/// A sink built from two closures, one per output channel.
pub struct FnSink<L, F> {
    line: L,
    formatted: F,
}

impl<L, F> FnSink<L, F>
where
    L: Fn(&[&dyn Display]) + Send,
    F: Fn(&str) + Send,
{
    pub fn new(line: L, formatted: F) -> Self {
        Self { line, formatted }
    }
}

impl<L, F> fmt::Debug for FnSink<L, F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FnSink").finish_non_exhaustive()
    }
}

impl<L, F> Sink for FnSink<L, F>
where
    L: Fn(&[&dyn Display]) + Send,
    F: Fn(&str) + Send,
{
    fn write_formatted(&self, message: &str) {
        (self.formatted)(message)
    }

    fn write_line(&self, values: &[&dyn Display]) {
        (self.line)(values)
    }
}

/// One recorded sink invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SinkCall {
    Formatted(String),
    /// Each value rendered with `Display`, in order.
    Line(Vec<String>),
}

/// Recording sink. Clones share the same buffer, so a test can keep one
/// handle while the printer owns another.
#[derive(Debug, Default, Clone)]
pub struct MemorySink {
    calls: Arc<Mutex<Vec<SinkCall>>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn calls(&self) -> Vec<SinkCall> {
        self.calls.lock().clone()
    }

    pub fn len(&self) -> usize {
        self.calls.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.calls.lock().is_empty()
    }

    pub fn formatted(&self) -> Vec<String> {
        self.calls
            .lock()
            .iter()
            .filter_map(|call| match call {
                SinkCall::Formatted(message) => Some(message.clone()),
                SinkCall::Line(_) => None,
            })
            .collect()
    }

    pub fn lines(&self) -> Vec<Vec<String>> {
        self.calls
            .lock()
            .iter()
            .filter_map(|call| match call {
                SinkCall::Line(values) => Some(values.clone()),
                SinkCall::Formatted(_) => None,
            })
            .collect()
    }

    pub fn clear(&self) {
        self.calls.lock().clear();
    }
}

impl Sink for MemorySink {
    fn write_formatted(&self, message: &str) {
        self.calls
            .lock()
            .push(SinkCall::Formatted(message.to_string()));
    }

    fn write_line(&self, values: &[&dyn Display]) {
        let rendered = values.iter().map(|v| v.to_string()).collect();
        self.calls.lock().push(SinkCall::Line(rendered));
    }
}

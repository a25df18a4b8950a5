//! Leveled printing with a stack of contextual headers.
//!
//! A [`Printer`] admits a message only when its [`Noise`] is at or below the
//! configured threshold, prefixes it with every header on the stack
//! (`[outer][inner][F] `) and hands the result to a [`Sink`].
//!
//! ```
//! use printssx::{MemorySink, Noise, Printer, printf};
//!
//! let sink = MemorySink::new();
//! let mut printer = Printer::new("Svc", sink.clone(), Noise::Moderate, Noise::Quiet);
//! printer.push_header("conn");
//! printf!(printer, Noise::Subtle, "accepted {} peers", 3);
//! printf!(printer, Noise::Loud, "not shown");
//! assert_eq!(sink.formatted(), vec!["[Svc][conn][F] accepted 3 peers".to_string()]);
//! ```

use std::fmt::{self, Display};

pub mod config;
pub mod error;
pub mod logger;
pub mod noise;
pub mod scope;
pub mod sink;

pub use config::PrinterConfig;
pub use error::{ConfigError, FormattedError, HeaderStackError};
pub use logger::SimpleLogger;
pub use noise::Noise;
pub use scope::HeaderScope;
pub use sink::{FnSink, LogSink, MemorySink, Sink, SinkCall, StdoutSink};

/// Marks which operation produced a header string.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Tag {
    /// Formatted print.
    F,
    /// Line print.
    L,
    /// Error construction.
    E,
}

impl Tag {
    pub const fn as_str(self) -> &'static str {
        match self {
            Tag::F => "F",
            Tag::L => "L",
            Tag::E => "E",
        }
    }
}

impl Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Printer object for multi-use printing.
///
/// The header stack is never empty: the header given at construction is
/// protected and cannot be popped.
pub struct Printer {
    headers: Vec<String>,
    verbose_level: Noise,
    // Stored for callers; nothing gates on it.
    log_level: Noise,
    sink: Box<dyn Sink>,
}

impl Printer {
    pub fn new(
        header: impl Into<String>,
        sink: impl Sink + 'static,
        verbose_level: Noise,
        log_level: Noise,
    ) -> Self {
        Self {
            headers: vec![header.into()],
            verbose_level,
            log_level,
            sink: Box::new(sink),
        }
    }

    /// Builds a printer around two plain functions: one for line output and
    /// one for already-formatted text.
    pub fn with_fns<L, F>(
        header: impl Into<String>,
        println_fn: L,
        printf_fn: F,
        verbose_level: Noise,
        log_level: Noise,
    ) -> Self
    where
        L: Fn(&[&dyn Display]) + Send + 'static,
        F: Fn(&str) + Send + 'static,
    {
        Self::new(
            header,
            FnSink::new(println_fn, printf_fn),
            verbose_level,
            log_level,
        )
    }

    pub fn can_speak(&self, level: Noise) -> bool {
        level <= self.verbose_level
    }

    /// Renders `[h1][h2]...[hN][tag]`.
    pub fn header_str(&self, tag: Tag) -> String {
        let mut rendered = String::new();
        for header in &self.headers {
            rendered.push('[');
            rendered.push_str(header);
            rendered.push(']');
        }
        rendered.push('[');
        rendered.push_str(tag.as_str());
        rendered.push(']');
        rendered
    }

    /// Sends `[headers][F] <message>` to the sink if `level` is admitted.
    /// Usually called through [`printf!`].
    pub fn printf(&self, level: Noise, args: fmt::Arguments<'_>) {
        if self.can_speak(level) {
            let message = format!("{} {}", self.header_str(Tag::F), args);
            self.sink.write_formatted(&message);
        }
    }

    /// Sends the `[headers][L]` token followed by `values` to the sink if
    /// `level` is admitted. Usually called through [`printline!`].
    pub fn println(&self, level: Noise, values: &[&dyn Display]) {
        if self.can_speak(level) {
            let header = self.header_str(Tag::L);
            let mut line: Vec<&dyn Display> = Vec::with_capacity(values.len() + 1);
            line.push(&header);
            line.extend_from_slice(values);
            self.sink.write_line(&line);
        }
    }

    /// Builds an error carrying `[headers][E] <message>`. Never gated and
    /// never touches the sink.
    pub fn errorf(&self, args: fmt::Arguments<'_>) -> FormattedError {
        FormattedError::new(format!("{} {}", self.header_str(Tag::E), args))
    }

    pub fn set_verbose_level(&mut self, level: Noise) {
        self.verbose_level = level;
    }

    pub fn verbose_level(&self) -> Noise {
        self.verbose_level
    }

    pub fn log_level(&self) -> Noise {
        self.log_level
    }

    pub fn push_header(&mut self, header: impl Into<String>) {
        self.headers.push(header.into());
    }

    /// Removes the innermost header, which must equal `header`.
    ///
    /// # Panics
    ///
    /// Panics when `header` is not the innermost header or when only the
    /// protected header remains. Use [`Printer::try_pop_header`] to get the
    /// violation as a value.
    pub fn pop_header(&mut self, header: &str) {
        if let Err(violation) = self.try_pop_header(header) {
            panic!("{}", violation);
        }
    }

    #[must_use = "a header stack violation means push/pop calls are mismatched"]
    pub fn try_pop_header(&mut self, header: &str) -> Result<(), HeaderStackError> {
        let current = self.header();
        if self.headers.len() <= 1 {
            return Err(HeaderStackError::ProtectedHeader {
                header: current.to_string(),
            });
        }
        if current != header {
            return Err(HeaderStackError::Mismatch {
                requested: header.to_string(),
                current: current.to_string(),
            });
        }
        self.headers.pop();
        Ok(())
    }

    /// Pushes `header` and pops it again when the returned scope drops.
    pub fn scoped_header(&mut self, header: impl Into<String>) -> HeaderScope<'_> {
        HeaderScope::new(self, header.into())
    }

    /// A copy of the header stack, outermost first.
    pub fn headers(&self) -> Vec<String> {
        self.headers.clone()
    }

    /// The innermost header.
    pub fn header(&self) -> &str {
        // The stack always holds the protected header.
        self.headers.last().map(String::as_str).unwrap_or_default()
    }

    pub fn depth(&self) -> usize {
        self.headers.len()
    }
}

impl fmt::Debug for Printer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Printer")
            .field("headers", &self.headers)
            .field("verbose_level", &self.verbose_level)
            .field("log_level", &self.log_level)
            .finish_non_exhaustive()
    }
}

/// `printf!(printer, level, "fmt", args...)`
#[macro_export]
macro_rules! printf {
    ($printer:expr, $level:expr, $($arg:tt)+) => {
        $printer.printf($level, ::std::format_args!($($arg)+))
    };
}

/// `printline!(printer, level, value, value, ...)`
#[macro_export]
macro_rules! printline {
    ($printer:expr, $level:expr $(, $value:expr)* $(,)?) => {
        $printer.println($level, &[$(&$value as &dyn ::std::fmt::Display),*])
    };
}

/// `errorf!(printer, "fmt", args...)`
#[macro_export]
macro_rules! errorf {
    ($printer:expr, $($arg:tt)+) => {
        $printer.errorf(::std::format_args!($($arg)+))
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    fn printer(sink: &MemorySink) -> Printer {
        Printer::new("X", sink.clone(), Noise::Loud, Noise::Quiet)
    }

    #[test]
    fn can_speak_matches_ordering() {
        let sink = MemorySink::new();
        let mut p = printer(&sink);
        for threshold in Noise::ALL {
            p.set_verbose_level(threshold);
            for level in Noise::ALL {
                assert_eq!(p.can_speak(level), level <= threshold);
            }
        }
    }

    #[test]
    fn new_printer_holds_single_header() {
        let p = printer(&MemorySink::new());
        assert_eq!(p.headers(), vec!["X".to_string()]);
        assert_eq!(p.header(), "X");
        assert_eq!(p.depth(), 1);
        assert_eq!(p.verbose_level(), Noise::Loud);
        assert_eq!(p.log_level(), Noise::Quiet);
    }

    #[test]
    fn headers_returns_a_copy() {
        let p = printer(&MemorySink::new());
        let mut copy = p.headers();
        copy.push("tampered".to_string());
        copy[0].push('!');
        assert_eq!(p.headers(), vec!["X".to_string()]);
    }

    #[test]
    fn header_str_brackets_every_header() {
        let mut p = printer(&MemorySink::new());
        assert_eq!(p.header_str(Tag::L), "[X][L]");
        p.push_header("Y");
        p.push_header("Z");
        assert_eq!(p.header_str(Tag::E), "[X][Y][Z][E]");
    }

    #[test]
    fn printf_prefixes_pushed_headers() {
        let sink = MemorySink::new();
        let mut p = printer(&sink);
        p.push_header("Y");
        assert_eq!(p.headers(), vec!["X".to_string(), "Y".to_string()]);

        printf!(p, Noise::Moderate, "n={} s={}", 7, "ok");
        assert_eq!(sink.calls(), vec![SinkCall::Formatted("[X][Y][F] n=7 s=ok".into())]);
    }

    #[test]
    fn printf_above_threshold_is_dropped() {
        let sink = MemorySink::new();
        let mut p = printer(&sink);
        p.set_verbose_level(Noise::Quiet);

        printf!(p, Noise::Loud, "hidden");
        assert!(sink.is_empty());

        printf!(p, Noise::Quiet, "shown");
        assert_eq!(sink.formatted(), vec!["[X][F] shown".to_string()]);
    }

    #[test]
    fn println_puts_header_token_first() {
        let sink = MemorySink::new();
        let mut p = printer(&sink);
        p.push_header("Y");

        printline!(p, Noise::Subtle, "count", 3, 2.5);
        printline!(p, Noise::Subtle);
        assert_eq!(
            sink.lines(),
            vec![
                vec![
                    "[X][Y][L]".to_string(),
                    "count".to_string(),
                    "3".to_string(),
                    "2.5".to_string(),
                ],
                vec!["[X][Y][L]".to_string()],
            ]
        );

        p.set_verbose_level(Noise::Quiet);
        printline!(p, Noise::Subtle, "dropped");
        assert_eq!(sink.len(), 2);
    }

    #[test]
    fn errorf_ignores_threshold_and_sink() {
        let sink = MemorySink::new();
        let mut p = Printer::new("Svc", sink.clone(), Noise::Quiet, Noise::Quiet);

        let err = errorf!(p, "val={}", 5);
        assert_eq!(err.to_string(), "[Svc][E] val=5");
        assert_eq!(err.message(), "[Svc][E] val=5");
        assert!(sink.is_empty());

        p.push_header("db");
        assert_eq!(errorf!(p, "closed").into_message(), "[Svc][db][E] closed");
    }

    #[test]
    fn pop_restores_previous_stack() {
        let mut p = printer(&MemorySink::new());
        p.push_header("Y");
        p.pop_header("Y");
        assert_eq!(p.headers(), vec!["X".to_string()]);
    }

    #[test]
    #[should_panic(expected = "cannot pop protected header 'X'")]
    fn pop_of_protected_header_panics() {
        let mut p = printer(&MemorySink::new());
        p.pop_header("X");
    }

    #[test]
    #[should_panic(expected = "asked to pop 'Z' but innermost header is 'Y'")]
    fn pop_of_wrong_header_panics() {
        let mut p = printer(&MemorySink::new());
        p.push_header("Y");
        p.pop_header("Z");
    }

    #[test]
    fn try_pop_reports_violations_without_mutating() {
        let mut p = printer(&MemorySink::new());
        assert_eq!(
            p.try_pop_header("X"),
            Err(HeaderStackError::ProtectedHeader { header: "X".into() })
        );

        p.push_header("Y");
        assert_eq!(
            p.try_pop_header("Z"),
            Err(HeaderStackError::Mismatch {
                requested: "Z".into(),
                current: "Y".into(),
            })
        );
        assert_eq!(p.depth(), 2);
        assert_eq!(p.try_pop_header("Y"), Ok(()));
    }

    #[test]
    fn headers_are_rendered_literally() {
        let sink = MemorySink::new();
        let p = Printer::new("100%{}", sink.clone(), Noise::Loud, Noise::Quiet);
        printf!(p, Noise::Quiet, "{}", 1);
        assert_eq!(sink.formatted(), vec!["[100%{}][F] 1".to_string()]);
    }

    #[test]
    fn with_fns_forwards_to_closures() {
        use parking_lot::Mutex;
        use std::sync::Arc;

        let seen = Arc::new(Mutex::new(Vec::new()));
        let (lines, formatted) = (Arc::clone(&seen), Arc::clone(&seen));
        let p = Printer::with_fns(
            "fn",
            move |values: &[&dyn Display]| lines.lock().push(sink::join_values(values)),
            move |message: &str| formatted.lock().push(message.to_string()),
            Noise::Moderate,
            Noise::Subtle,
        );

        printline!(p, Noise::Moderate, "a", 1);
        printf!(p, Noise::Subtle, "b{}", 2);
        assert_eq!(
            *seen.lock(),
            vec!["[fn][L] a 1".to_string(), "[fn][F] b2".to_string()]
        );
    }
}

//! Diagnostics for elements the converters do not recognize.
//!
//! Unknown elements are expected: the exchange format gains new elements
//! across data releases. Each one is skipped and reported to a
//! [`DiagnosticSink`]. Sinks are best-effort and never fail an import.

use std::fmt;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::error::Result;
use crate::xml::ElementName;

/// Notice about a skipped element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    /// The skipped element.
    pub element: ElementName,
    /// Approximate byte offset of the element's opening tag: the end of the
    /// preceding markup, so it may point at whitespace before the tag.
    pub position: u64,
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Ignoring unknown element {} at byte {}",
            self.element, self.position
        )
    }
}

/// Append-only destination for diagnostics.
pub trait DiagnosticSink: Send {
    /// Record one diagnostic. Must not fail.
    fn record(&mut self, diagnostic: Diagnostic);

    /// Number of diagnostics recorded so far.
    fn recorded(&self) -> usize;
}

impl DiagnosticSink for Vec<Diagnostic> {
    fn record(&mut self, diagnostic: Diagnostic) {
        self.push(diagnostic);
    }

    fn recorded(&self) -> usize {
        self.len()
    }
}

/// Sink that emits every diagnostic as a `tracing` warning.
#[derive(Debug, Default)]
pub struct TracingSink {
    count: usize,
}

impl TracingSink {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl DiagnosticSink for TracingSink {
    fn record(&mut self, diagnostic: Diagnostic) {
        self.count += 1;
        tracing::warn!(
            namespace = %diagnostic.element.namespace_uri(),
            element = %diagnostic.element.local_name(),
            position = diagnostic.position,
            "Ignoring unknown element"
        );
    }

    fn recorded(&self) -> usize {
        self.count
    }
}

/// Sink writing one line per diagnostic to a log file.
///
/// Write failures are reported once through `tracing` and then ignored.
pub struct LogFileSink<W: Write + Send> {
    writer: W,
    count: usize,
    write_failed: bool,
}

impl LogFileSink<BufWriter<File>> {
    /// Create (or truncate) a log file.
    pub fn create(path: &Path) -> Result<Self> {
        let file = File::create(path)?;
        Ok(Self::new(BufWriter::new(file)))
    }
}

impl<W: Write + Send> LogFileSink<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            count: 0,
            write_failed: false,
        }
    }

    /// Flush buffered lines, ignoring failures like every other write.
    pub fn flush(&mut self) {
        if let Err(err) = self.writer.flush() {
            self.report_failure(&err);
        }
    }

    /// Consume the sink and return the underlying writer.
    pub fn into_inner(self) -> W {
        self.writer
    }

    fn report_failure(&mut self, err: &std::io::Error) {
        if !self.write_failed {
            self.write_failed = true;
            tracing::warn!(error = %err, "Failed to write to diagnostics log, further failures are ignored");
        }
    }
}

impl<W: Write + Send> DiagnosticSink for LogFileSink<W> {
    fn record(&mut self, diagnostic: Diagnostic) {
        self.count += 1;
        if let Err(err) = writeln!(self.writer, "{diagnostic}") {
            self.report_failure(&err);
        }
    }

    fn recorded(&self) -> usize {
        self.count
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::xml::Namespace;

    fn diagnostic() -> Diagnostic {
        Diagnostic {
            element: ElementName::qualified(Namespace::Common, "Extra"),
            position: 512,
        }
    }

    struct FailingWriter;

    impl Write for FailingWriter {
        fn write(&mut self, _buf: &[u8]) -> std::io::Result<usize> {
            Err(std::io::Error::other("disk full"))
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Err(std::io::Error::other("disk full"))
        }
    }

    #[test]
    fn test_diagnostic_display() {
        assert_eq!(
            diagnostic().to_string(),
            "Ignoring unknown element {urn:cz:isvs:ruian:schemas:CommonTypy:v1}Extra at byte 512"
        );
    }

    #[test]
    fn test_log_file_sink_writes_lines() {
        let mut sink = LogFileSink::new(Vec::new());
        sink.record(diagnostic());
        sink.record(diagnostic());

        assert_eq!(sink.recorded(), 2);
        let text = String::from_utf8(sink.into_inner()).unwrap();
        assert_eq!(text.lines().count(), 2);
        assert!(text.starts_with("Ignoring unknown element"));
    }

    #[test]
    fn test_log_file_sink_survives_write_failures() {
        let mut sink = LogFileSink::new(FailingWriter);
        sink.record(diagnostic());
        sink.record(diagnostic());
        sink.flush();

        assert_eq!(sink.recorded(), 2);
    }

    #[test]
    fn test_log_file_sink_create() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("diagnostics.log");

        let mut sink = LogFileSink::create(&path).unwrap();
        sink.record(diagnostic());
        sink.flush();

        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.contains("Extra"));
    }
}

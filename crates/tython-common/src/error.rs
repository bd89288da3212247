//! The Tython error model.
//!
//! Errors are ordinary values threaded through the pipeline, never panics.
//! Every error carries the span it occurred at; runtime errors additionally
//! carry the call trace that was live when they were created. Rendering
//! against the source text produces the interpreter's diagnostic format:
//! a `Kind: details` headline, a `File '<fn>', line <n>` locator (or a
//! traceback for runtime errors), and the offending source lines with caret
//! arrows under the span.

use std::fmt;

use crate::span::{LineIndex, Span};

/// Category of a pipeline error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The lexer met a character it has no rule for.
    IllegalChar,
    /// The lexer needed a specific character that was not there (`!` not
    /// followed by `=`).
    ExpectedChar,
    /// The parser could not match the grammar.
    Syntax,
    /// A typed assignment was given a value of the wrong type.
    Type,
    /// The evaluator failed (undefined name, illegal operation, bad index,
    /// division by zero, arity mismatch).
    Runtime,
}

impl ErrorKind {
    /// Name used in the rendered headline.
    pub fn name(self) -> &'static str {
        match self {
            ErrorKind::IllegalChar => "IllegalChar",
            ErrorKind::ExpectedChar => "ExpectedChar",
            ErrorKind::Syntax => "SyntaxError",
            ErrorKind::Type => "TypeError",
            ErrorKind::Runtime => "RuntimeError",
        }
    }
}

/// One frame of a runtime error's call trace.
///
/// `span` is the position at which the named context was entered (for the
/// innermost frame, the error site itself).
#[derive(Debug, Clone, PartialEq)]
pub struct TraceFrame {
    pub display_name: String,
    pub span: Span,
}

/// A categorized, span-annotated pipeline error.
#[derive(Debug, Clone, PartialEq)]
pub struct Error {
    pub kind: ErrorKind,
    pub span: Span,
    pub details: String,
    /// Call trace, outermost context first. Only runtime errors carry one.
    pub trace: Vec<TraceFrame>,
}

impl Error {
    pub fn new(kind: ErrorKind, span: Span, details: impl Into<String>) -> Self {
        Self {
            kind,
            span,
            details: details.into(),
            trace: Vec::new(),
        }
    }

    pub fn illegal_char(span: Span, ch: char) -> Self {
        Self::new(ErrorKind::IllegalChar, span, format!("'{ch}'"))
    }

    pub fn expected_char(span: Span, details: impl Into<String>) -> Self {
        Self::new(ErrorKind::ExpectedChar, span, details)
    }

    pub fn syntax(span: Span, details: impl Into<String>) -> Self {
        Self::new(ErrorKind::Syntax, span, details)
    }

    pub fn type_error(span: Span, details: impl Into<String>) -> Self {
        Self::new(ErrorKind::Type, span, details)
    }

    pub fn runtime(span: Span, details: impl Into<String>, trace: Vec<TraceFrame>) -> Self {
        Self {
            kind: ErrorKind::Runtime,
            span,
            details: details.into(),
            trace,
        }
    }

    /// Render the full diagnostic against the source it refers to.
    ///
    /// Non-runtime errors get a `File '<fn>', line <n>` locator; runtime
    /// errors get a `Traceback (most recent call last):` section listing
    /// each enclosing context instead.
    pub fn render(&self, filename: &str, source: &str) -> String {
        let index = LineIndex::new(source);
        let (line, _) = index.line_col(self.span.start);

        let mut out = String::new();
        if self.kind == ErrorKind::Runtime {
            out.push_str("Traceback (most recent call last):\n");
            for frame in &self.trace {
                let (frame_line, _) = index.line_col(frame.span.start);
                out.push_str(&format!(
                    "  File {filename}, line {frame_line}, in {}\n",
                    frame.display_name
                ));
            }
            out.push_str(&format!("{}: {}\n", self.kind.name(), self.details));
        } else {
            out.push_str(&format!("{}: {}\n", self.kind.name(), self.details));
            out.push_str(&format!("File '{filename}', line {line}\n"));
        }
        out.push('\n');
        out.push_str(&underline_span(source, &index, self.span));
        out
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.kind.name(), self.details)
    }
}

/// Reproduce the offending source lines with `^` arrows under the span.
///
/// Multi-line spans underline from the start column to each line end, and
/// from each line start to the end column on the last line. Tabs are
/// stripped so the arrows line up with what was printed.
fn underline_span(source: &str, index: &LineIndex, span: Span) -> String {
    let (start_line, start_col) = index.line_col(span.start);
    let (end_line, end_col) = index.line_col(span.end);

    let mut out = String::new();
    for line_no in start_line..=end_line {
        let line_start = index.line_start(line_no) as usize;
        let line_end = source[line_start..]
            .find('\n')
            .map(|i| line_start + i)
            .unwrap_or(source.len());
        let line_text = &source[line_start..line_end];

        let col_start = if line_no == start_line {
            (start_col - 1) as usize
        } else {
            0
        };
        let col_end = if line_no == end_line {
            (end_col - 1) as usize
        } else {
            line_text.len()
        };
        let arrows = (col_end.saturating_sub(col_start)).max(1);

        out.push_str(line_text);
        out.push('\n');
        out.push_str(&" ".repeat(col_start));
        out.push_str(&"^".repeat(arrows));
        if line_no != end_line {
            out.push('\n');
        }
    }
    out.replace('\t', "")
}

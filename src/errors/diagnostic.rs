//! Pretty error reporting using ariadne
//!
//! Provides colorful, user-friendly error messages with source context.

use crate::errors::LoamError;
use ariadne::{Color, Label, Report, ReportKind, Source};

fn error_parts(error: &LoamError) -> (&str, Option<crate::errors::Span>, &'static str) {
    match error {
        LoamError::Syntax { message, span } => (message.as_str(), Some(*span), "Syntax error"),
        LoamError::Type { message, span } => (message.as_str(), *span, "Type error"),
        LoamError::Resolution { message, span } => (message.as_str(), *span, "Resolution error"),
        LoamError::InvalidAst { message, span } => (message.as_str(), *span, "Invalid AST"),
    }
}

/// Print an error with source context
pub fn print_error(source: &str, filename: &str, error: &LoamError) {
    let (message, span, kind) = error_parts(error);

    let span_range = span.map(|s| s.range()).unwrap_or(0..0);

    let header = if filename.is_empty() {
        kind.to_string()
    } else {
        format!("{} in {}", kind, filename)
    };

    let mut report = Report::build(ReportKind::Error, span_range.clone()).with_message(header);

    if let Some(s) = span {
        report = report.with_label(
            Label::new(s.range())
                .with_message(message)
                .with_color(Color::Red),
        );
    }

    report
        .finish()
        .print(Source::from(source))
        .expect("failed to print error report");
}

/// Print multiple errors
pub fn print_errors(source: &str, filename: &str, errors: &[LoamError]) {
    for error in errors {
        print_error(source, filename, error);
    }
}

/// Format an error as a string (for testing)
pub fn format_error(source: &str, filename: &str, error: &LoamError) -> String {
    let (message, span, kind) = error_parts(error);

    let mut output = Vec::new();
    let span_range = span.map(|s| s.range()).unwrap_or(0..0);

    let header = if filename.is_empty() {
        kind.to_string()
    } else {
        format!("{} in {}", kind, filename)
    };

    let mut report = Report::build(ReportKind::Error, span_range.clone()).with_message(header);

    if let Some(s) = span {
        report = report.with_label(
            Label::new(s.range())
                .with_message(message)
                .with_color(Color::Red),
        );
    }

    report
        .finish()
        .write(Source::from(source), &mut output)
        .expect("failed to write error report");

    String::from_utf8(output).expect("error report should be valid UTF-8")
}

//! A single recorded assertion failure.

use std::io::{self, Write};

/// One failure observed while a test method ran.
///
/// `expected` separates failures raised through an assertion (the test
/// anticipated the check could fail) from unanticipated errors such as a
/// panic escaping the test body. Both make the test fail; only the latter
/// count towards the "unexpected" total.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FailureRecord {
    message: String,
    failure_description: String,
    expected: bool,
    file: String,
    line: u32,
}

impl FailureRecord {
    pub fn new(
        message: impl Into<String>,
        failure_description: impl Into<String>,
        expected: bool,
        file: impl Into<String>,
        line: u32,
    ) -> Self {
        FailureRecord {
            message: message.into(),
            failure_description: failure_description.into(),
            expected,
            file: file.into(),
            line,
        }
    }

    /// User-supplied (or default) failure text.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// What kind of check failed, e.g. `assert_eq failed: (1) is not equal to (2)`.
    pub fn failure_description(&self) -> &str {
        &self.failure_description
    }

    pub fn expected(&self) -> bool {
        self.expected
    }

    pub fn is_unexpected(&self) -> bool {
        !self.expected
    }

    pub fn file(&self) -> &str {
        &self.file
    }

    pub fn line(&self) -> u32 {
        self.line
    }

    /// Render the compiler-style diagnostic line for this failure.
    ///
    /// `{file}:{line}: [unexpected ]error: {method} : {description} - {message}`
    pub fn render(&self, method: &str) -> String {
        let prefix = if self.expected { "" } else { "unexpected " };
        format!(
            "{}:{}: {prefix}error: {method} : {} - {}",
            self.file, self.line, self.failure_description, self.message
        )
    }

    /// Write the rendered line to `out` and flush it right away, so the
    /// line survives even if the process dies before the summary.
    pub fn emit<W: Write + ?Sized>(&self, method: &str, out: &mut W) -> io::Result<()> {
        writeln!(out, "{}", self.render(method))?;
        out.flush()
    }
}

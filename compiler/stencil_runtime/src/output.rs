//! The output sink contract.

use std::fmt;

/// Sink that generated render functions write into.
pub trait TemplateOutput {
    /// Write text exactly as given.
    fn write_raw(&mut self, value: &str);

    /// Write the result of a `${...}` expression.
    ///
    /// Plain sinks do not escape; wrap one in [`HtmlOutput`](crate::HtmlOutput)
    /// to escape markup.
    fn write_escaped(&mut self, value: &str) {
        self.write_raw(value);
    }

    /// Write a slice of a binary text payload.
    fn write_raw_bytes(&mut self, value: &[u8]) {
        self.write_raw(&String::from_utf8_lossy(value));
    }
}

impl<T: TemplateOutput + ?Sized> TemplateOutput for &mut T {
    fn write_raw(&mut self, value: &str) {
        (**self).write_raw(value);
    }

    fn write_escaped(&mut self, value: &str) {
        (**self).write_escaped(value);
    }

    fn write_raw_bytes(&mut self, value: &[u8]) {
        (**self).write_raw_bytes(value);
    }
}

/// Collects output into a `String`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct StringOutput {
    buffer: String,
}

impl StringOutput {
    pub fn new() -> Self {
        StringOutput::default()
    }

    pub fn as_str(&self) -> &str {
        &self.buffer
    }

    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    pub fn into_string(self) -> String {
        self.buffer
    }
}

impl TemplateOutput for StringOutput {
    fn write_raw(&mut self, value: &str) {
        self.buffer.push_str(value);
    }

    fn write_raw_bytes(&mut self, value: &[u8]) {
        match std::str::from_utf8(value) {
            Ok(text) => self.buffer.push_str(text),
            Err(_) => self.buffer.push_str(&String::from_utf8_lossy(value)),
        }
    }
}

impl fmt::Display for StringOutput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.buffer)
    }
}

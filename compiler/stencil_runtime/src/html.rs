//! HTML escaping.

use crate::TemplateOutput;

/// Escapes `write_escaped` content for HTML text and attribute values.
///
/// Raw writes pass through unchanged.
pub struct HtmlOutput<O> {
    inner: O,
}

impl<O: TemplateOutput> HtmlOutput<O> {
    pub fn new(inner: O) -> Self {
        HtmlOutput { inner }
    }

    pub fn into_inner(self) -> O {
        self.inner
    }

    pub fn get_ref(&self) -> &O {
        &self.inner
    }
}

impl<O: TemplateOutput> TemplateOutput for HtmlOutput<O> {
    fn write_raw(&mut self, value: &str) {
        self.inner.write_raw(value);
    }

    fn write_escaped(&mut self, value: &str) {
        let mut rest = value;
        while let Some(pos) = next_special(rest.as_bytes()) {
            if pos > 0 {
                self.inner.write_raw(&rest[..pos]);
            }
            self.inner.write_raw(entity(rest.as_bytes()[pos]));
            rest = &rest[pos + 1..];
        }
        if !rest.is_empty() {
            self.inner.write_raw(rest);
        }
    }

    fn write_raw_bytes(&mut self, value: &[u8]) {
        self.inner.write_raw_bytes(value);
    }
}

/// Escape `value` into a new string.
pub fn escape_html(value: &str) -> String {
    let mut out = crate::StringOutput::new();
    HtmlOutput::new(&mut out).write_escaped(value);
    out.into_string()
}

/// Combine two optional positions, keeping the earliest.
///
/// `memchr3` handles at most three needles, so the five HTML specials take
/// two searches.
fn earliest_of(a: Option<usize>, b: Option<usize>) -> Option<usize> {
    match (a, b) {
        (Some(x), Some(y)) => Some(x.min(y)),
        (Some(x), None) | (None, Some(x)) => Some(x),
        (None, None) => None,
    }
}

fn next_special(bytes: &[u8]) -> Option<usize> {
    earliest_of(
        memchr::memchr3(b'&', b'<', b'>', bytes),
        memchr::memchr2(b'"', b'\'', bytes),
    )
}

fn entity(byte: u8) -> &'static str {
    match byte {
        b'&' => "&amp;",
        b'<' => "&lt;",
        b'>' => "&gt;",
        b'"' => "&#34;",
        _ => "&#39;",
    }
}

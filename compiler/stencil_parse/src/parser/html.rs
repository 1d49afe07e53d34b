//! HTML interception sub-machine.
//!
//! Active only in `Text` mode with a non-empty [`HtmlConfig`]. Tracks the
//! configured tags while their attributes are written:
//!
//! ```text
//! <form action="${url}" method="post">  ...  </form>
//! │     │      │      │               │       │
//! │     │      │      └ 2nd quote:     │       └ `</form`: HtmlTagClosed
//! │     │      │        value end     └ `>`: HtmlTagOpened
//! │     │      └ 1st quote: HtmlAttributeStarted (configured names only)
//! │     └ `=`: attribute name scanned backwards
//! └ `<form` + whitespace: start tracking
//! ```
//!
//! Void elements are popped right after they open and never close.

use stencil_ir::{EventKind, HtmlAttribute, HtmlConfig, HtmlTag};

use super::Parser;
use crate::Visitor;

impl<'src, V: Visitor<'src>> Parser<'src, '_, V> {
    pub(super) fn intercept_html(&mut self, i: usize, c: u8) {
        let Some(html) = self.html else {
            return;
        };

        if c == b'<' {
            let rest = &self.bytes[i + 1..];
            let opened = html.tags.iter().find(|name| {
                rest.starts_with(name.as_bytes())
                    && rest.get(name.len()).is_some_and(u8::is_ascii_whitespace)
            });
            if let Some(name) = opened {
                self.html_stack.push(HtmlTag::new(name.as_str()));
                self.html_tag_closed = false;
            }
            return;
        }

        let Some(tag) = self.html_stack.last() else {
            return;
        };
        let prev = i.checked_sub(1).map(|p| self.bytes[p]);
        if prev == Some(b'<') && c == b'/' {
            self.close_html_tag(i);
            return;
        }
        if tag.attributes_processed {
            return;
        }
        let value_open = tag
            .attributes
            .last()
            .is_some_and(|attribute| attribute.quote_count == 1);

        match c {
            b'=' if !value_open => self.start_attribute(i),
            b'"' => self.attribute_quote(i, html),
            b'>' if !value_open => {
                if prev == Some(b'/') {
                    self.open_html_tag(i - 1, true);
                } else if self.html_tag_closed {
                    self.html_tag_closed = false;
                } else {
                    self.open_html_tag(i, false);
                }
            }
            _ => {}
        }
    }

    /// Scan the attribute name backwards from the `=` at `i`.
    fn start_attribute(&mut self, i: usize) {
        let mut end = i;
        while end > 0 && self.bytes[end - 1].is_ascii_whitespace() {
            end -= 1;
        }
        let mut start = end;
        while start > 0 && !self.bytes[start - 1].is_ascii_whitespace() && self.bytes[start - 1] != b'<'
        {
            start -= 1;
        }
        if start == end {
            return;
        }
        let name = &self.source[start..end];
        if let Some(tag) = self.html_stack.last_mut() {
            tag.attributes.push(HtmlAttribute::new(name));
        }
    }

    fn attribute_quote(&mut self, i: usize, html: &HtmlConfig) {
        let source = self.source;
        let Some(tag) = self.html_stack.last_mut() else {
            return;
        };
        let Some(attribute) = tag.attributes.last_mut() else {
            return;
        };
        match attribute.quote_count {
            0 => {
                attribute.quote_count = 1;
                attribute.value_start = i + 1;
                if html.intercepts_attribute(&attribute.name) {
                    let attribute = attribute.clone();
                    let tag = tag.clone();
                    self.flush_text(i + 1);
                    self.last_index = i + 1;
                    self.emit(EventKind::HtmlAttributeStarted { tag, attribute });
                }
            }
            1 => {
                attribute.quote_count = 2;
                attribute.value = Some(source[attribute.value_start..i].to_string());
            }
            _ => {}
        }
    }

    /// The tag's `>` (or the `/` of `/>`) sits at `end`.
    fn open_html_tag(&mut self, end: usize, self_closing: bool) {
        self.flush_text(end);
        self.last_index = end;
        let Some(tag) = self.html_stack.last_mut() else {
            return;
        };
        tag.attributes_processed = true;
        let tag = tag.clone();
        let pop = self_closing || tag.void;
        self.emit(EventKind::HtmlTagOpened(tag));
        if pop {
            self.html_stack.pop();
        }
    }

    /// `</` at `i - 1..=i`; closes the current tag if the name matches.
    fn close_html_tag(&mut self, i: usize) {
        let Some(tag) = self.html_stack.last() else {
            return;
        };
        if !self.bytes[i + 1..].starts_with(tag.name.as_bytes()) {
            return;
        }
        self.html_tag_closed = true;
        if tag.void {
            return;
        }
        let tag = tag.clone();
        self.flush_text(i - 1);
        self.last_index = i - 1;
        self.emit(EventKind::HtmlTagClosed(tag));
        self.html_stack.pop();
    }
}

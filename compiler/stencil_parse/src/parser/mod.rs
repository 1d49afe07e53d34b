//! Template parser state machine.
//!
//! A single left-to-right scan over the template bytes. Keywords are found by
//! checking whether the bytes consumed so far end with the keyword, so the
//! parser never needs a tokenizer. Lookahead is limited to one byte (`@else`
//! versus `@elseif`) and to finding the `>` of a generic inside tag
//! arguments.
//!
//! # Architecture
//!
//! ```text
//! step(i, c)
//!   ├─ Comment / StringLiteral / Import / Param   opaque until their end marker
//!   ├─ code modes   ${ $unsafe{ !{ { ( @for( @if( @tag.x(   braces, parens,
//!   │               strings, argument commas
//!   └─ structural   Text, Condition, ForLoop, TagName, LayoutBody, ...
//!                   keywords, then the HTML sub-machine in Text
//! ```
//!
//! # Depth
//!
//! Pushing `Text` increments the depth, popping it decrements. `@define`
//! adds two more levels for the deferred slot body and `@enddefine` removes
//! them again.
//!
//! # Errors
//!
//! Problems are reported through [`Visitor::error`] and the scan continues,
//! so one pass reports every malformed declaration. The root `Text` frame is
//! never popped; closing directives without an opener are reported instead.

mod html;
mod mode;

use smallvec::SmallVec;
use stencil_diagnostic::{Diagnostic, ErrorCode};
use stencil_ir::{CallKind, EventKind, HtmlConfig, HtmlTag, ParseEvent, TemplateKind};

use crate::param::scan_param;
use crate::Visitor;
use mode::{CallSite, Frame, Mode};

/// Fallback for the (unreachable) empty stack.
static ROOT_TEXT: Mode<'static> = Mode::Text;

/// Parser for one template text. Not reusable.
pub struct Parser<'src, 'a, V> {
    source: &'src str,
    bytes: &'src [u8],
    kind: TemplateKind,
    html: Option<&'a HtmlConfig>,
    visitor: &'a mut V,
    stack: SmallVec<[Frame<'src>; 8]>,
    html_stack: Vec<HtmlTag>,
    html_tag_closed: bool,
    depth: u32,
    line: u32,
    last_index: usize,
    params_complete: bool,
}

impl<'src, 'a, V: Visitor<'src>> Parser<'src, 'a, V> {
    pub fn new(source: &'src str, kind: TemplateKind, visitor: &'a mut V) -> Self {
        let mut stack = SmallVec::new();
        stack.push(Frame {
            mode: Mode::Text,
            line: 1,
        });
        Parser {
            source,
            bytes: source.as_bytes(),
            kind,
            html: None,
            visitor,
            stack,
            html_stack: Vec::new(),
            html_tag_closed: false,
            depth: 0,
            line: 1,
            last_index: 0,
            params_complete: false,
        }
    }

    /// Intercept the configured HTML tags and attributes.
    #[must_use]
    pub fn with_html(mut self, html: Option<&'a HtmlConfig>) -> Self {
        self.html = html.filter(|config| !config.is_empty());
        self
    }

    /// Scan the whole template, ending with a `Complete` event.
    pub fn parse(mut self) {
        for (i, &c) in self.bytes.iter().enumerate() {
            self.step(i, c);
            if c == b'\n' {
                self.emit(EventKind::LineFinished);
                self.line += 1;
            }
        }
        self.finish();
    }

    fn step(&mut self, i: usize, c: u8) {
        match self.stack.last_mut().map(|frame| &mut frame.mode) {
            Some(Mode::Comment) => {
                if self.ends_with(i, b"--%>") {
                    self.pop();
                    self.last_index = i + 1;
                }
                return;
            }
            Some(Mode::StringLiteral { escaped }) => {
                if *escaped {
                    *escaped = false;
                } else if c == b'\\' {
                    *escaped = true;
                } else if c == b'"' {
                    self.pop();
                }
                return;
            }
            Some(Mode::Import | Mode::Param) => {
                if c == b'\n' {
                    self.finish_declaration(i);
                }
                return;
            }
            _ => {}
        }

        if self.top().is_code() {
            self.step_code(i, c);
        } else {
            self.step_structural(i, c);
        }
    }

    // Code modes

    fn step_code(&mut self, i: usize, c: u8) {
        match c {
            b'"' => self.push(Mode::StringLiteral { escaped: false }),
            b'{' => self.push(Mode::CodeBlock),
            b'}' => self.close_brace(i),
            b'(' => match self.top() {
                Mode::CodeArgs | Mode::TagArgs { .. } => self.push(Mode::CodeArgs),
                Mode::ForLoopArgs => self.push(Mode::ForLoopArgs),
                _ => {}
            },
            b')' => self.close_paren(i),
            b',' => self.split_argument(i),
            b'<' | b'>' => self.track_angle(i, c),
            _ => {}
        }
    }

    fn close_brace(&mut self, i: usize) {
        let kind = match self.top() {
            Mode::CodeBlock => {
                self.pop();
                return;
            }
            Mode::CodeExpr => EventKind::SafeCode,
            Mode::UnsafeCodeExpr => EventKind::UnsafeCode,
            Mode::CodeStatement => EventKind::CodeStatement,
            _ => return,
        };
        self.pop();
        let code = &self.source[self.last_index..i];
        self.last_index = i + 1;
        if matches!(self.top(), Mode::Text) {
            self.emit(kind(code));
        } else {
            tracing::debug!(line = self.line, code, "dropping code outside a text block");
        }
    }

    fn close_paren(&mut self, i: usize) {
        match self.top() {
            Mode::CodeArgs => {
                self.pop();
                let event = match self.top() {
                    Mode::Condition => EventKind::ConditionStart,
                    Mode::ConditionElse => EventKind::ConditionElseIf,
                    _ => return,
                };
                let condition = &self.source[self.last_index..i];
                self.last_index = i + 1;
                self.emit(event(condition));
                self.push(Mode::Text);
            }
            Mode::ForLoopArgs => {
                self.pop();
                if matches!(self.top(), Mode::ForLoop) {
                    let header = &self.source[self.last_index..i];
                    self.last_index = i + 1;
                    self.emit(EventKind::ForStart(header));
                    self.push(Mode::Text);
                }
            }
            Mode::TagArgs { .. } => self.finish_call(i),
            _ => {}
        }
    }

    fn split_argument(&mut self, i: usize) {
        let source = self.source;
        if let Some(Frame {
            mode:
                Mode::TagArgs {
                    call,
                    angle_depth: 0,
                    arg_start,
                },
            ..
        }) = self.stack.last_mut()
        {
            let arg = source[*arg_start..i].trim();
            if !arg.is_empty() {
                call.args.push(arg);
            }
            *arg_start = i + 1;
        }
    }

    /// Keep commas inside `Vec::<(A, B)>`-style generics from splitting.
    fn track_angle(&mut self, i: usize, c: u8) {
        let prev = i.checked_sub(1).map(|p| self.bytes[p]);
        let next = self.bytes.get(i + 1).copied();
        let opens = c == b'<' && self.opens_generic(i);
        if let Some(Frame {
            mode: Mode::TagArgs { angle_depth, .. },
            ..
        }) = self.stack.last_mut()
        {
            if c == b'<' {
                let after_name =
                    prev.is_some_and(|p| p == b':' || p == b'_' || p.is_ascii_alphanumeric());
                let spaced = next.map_or(true, |n| n.is_ascii_whitespace() || n == b'=');
                if after_name && !spaced && opens {
                    *angle_depth += 1;
                }
            } else if *angle_depth > 0 && !matches!(prev, Some(b'-' | b'=')) {
                *angle_depth -= 1;
            }
        }
    }

    /// A `<` opens generics after a turbofish, or when its `>` closes before
    /// the enclosing argument list does. `count<max, name)` stays a comparison.
    fn opens_generic(&self, i: usize) -> bool {
        if self.bytes[..i].ends_with(b"::") {
            return true;
        }
        let mut depth = 1u32;
        let mut nested = 0u32;
        let mut prev = b'<';
        for &c in &self.bytes[i + 1..] {
            match c {
                b'<' => depth += 1,
                b'>' if prev != b'-' && prev != b'=' => {
                    depth -= 1;
                    if depth == 0 {
                        return true;
                    }
                }
                b'(' | b'[' => nested += 1,
                b')' | b']' if nested == 0 => return false,
                b')' | b']' => nested -= 1,
                b'&' | b'|' if prev == c => return false,
                b'"' | b';' | b'{' | b'}' | b'\n' => return false,
                _ => {}
            }
            prev = c;
        }
        false
    }

    fn finish_call(&mut self, i: usize) {
        let Some(Frame {
            mode: Mode::TagArgs {
                mut call, arg_start, ..
            },
            ..
        }) = self.stack.pop()
        else {
            return;
        };
        let last = self.source[arg_start..i].trim();
        if !last.is_empty() {
            call.args.push(last);
        }
        self.last_index = i + 1;
        match call.kind {
            CallKind::Tag => self.emit(EventKind::TagCall {
                name: call.name,
                args: call.args,
            }),
            CallKind::Layout => {
                self.emit(EventKind::LayoutCall {
                    name: call.name,
                    args: call.args,
                });
                self.push(Mode::LayoutBody);
            }
        }
    }

    // Structural modes

    fn step_structural(&mut self, i: usize, c: u8) {
        if let Mode::TagName { kind, name_start } = *self.top() {
            if c == b'(' {
                self.open_arguments(i, kind, name_start);
            }
            return;
        }

        if self.ends_with(i, b"<%--") {
            self.flush_text(i - 3);
            self.push(Mode::Comment);
        } else if self.ends_with(i, b"@import") {
            self.begin_declaration(i, 7, Mode::Import);
        } else if self.ends_with(i, b"@param") {
            self.begin_declaration(i, 6, Mode::Param);
        } else if self.ends_with(i, b"${") {
            self.open_code(i, 2, Mode::CodeExpr);
        } else if self.ends_with(i, b"$unsafe{") {
            self.open_code(i, 8, Mode::UnsafeCodeExpr);
        } else if self.ends_with(i, b"!{") {
            self.open_code(i, 2, Mode::CodeStatement);
        } else if self.ends_with(i, b"@if") {
            self.flush_text(i - 2);
            self.last_index = i + 1;
            self.push(Mode::Condition);
        } else if c == b'(' && self.top().is_condition() {
            self.last_index = i + 1;
            self.push(Mode::CodeArgs);
        } else if self.ends_with(i, b"@else") && self.bytes.get(i + 1) != Some(&b'i') {
            self.else_branch(i);
        } else if self.ends_with(i, b"@elseif") {
            self.elseif_branch(i);
        } else if self.ends_with(i, b"@endif") {
            self.end_block(i, 6, Mode::is_condition, EventKind::ConditionEnd, "@endif");
        } else if self.ends_with(i, b"@for") {
            self.flush_text(i - 3);
            self.last_index = i + 1;
            self.push(Mode::ForLoop);
        } else if c == b'(' && matches!(self.top(), Mode::ForLoop) {
            self.last_index = i + 1;
            self.push(Mode::ForLoopArgs);
        } else if self.ends_with(i, b"@endfor") {
            self.end_block(
                i,
                7,
                |mode| matches!(mode, Mode::ForLoop),
                EventKind::ForEnd,
                "@endfor",
            );
        } else if self.ends_with(i, b"@tag.") {
            self.open_call(i, 5, CallKind::Tag);
        } else if self.ends_with(i, b"@layout.") {
            self.open_call(i, 8, CallKind::Layout);
        } else if self.ends_with(i, b"@endlayout") {
            self.end_layout(i);
        } else if self.ends_with(i, b"@define") {
            self.begin_define(i);
        } else if matches!(self.top(), Mode::LayoutDefine) && (c == b'(' || c == b')') {
            if c == b'(' {
                self.last_index = i + 1;
            } else {
                self.define_slot(i);
            }
        } else if self.ends_with(i, b"@enddefine") {
            self.end_define(i);
        } else if self.ends_with(i, b"@render") {
            self.flush_text(i - 6);
            self.last_index = i + 1;
            self.push(Mode::LayoutRender);
        } else if matches!(self.top(), Mode::LayoutRender) && (c == b'(' || c == b')') {
            if c == b'(' {
                self.last_index = i + 1;
            } else {
                self.render_slot(i);
            }
        } else if matches!(self.top(), Mode::Text) {
            self.intercept_html(i, c);
        }
    }

    /// Whitespace between header declarations is dropped; anything else is
    /// template content and closes the header.
    fn begin_declaration(&mut self, i: usize, keyword_len: usize, mode: Mode<'src>) {
        let start = i + 1 - keyword_len;
        let pending = self.source.get(self.last_index..start).unwrap_or_default();
        if self.params_complete || !pending.trim().is_empty() {
            self.flush_text(start);
        }
        self.last_index = i + 1;
        self.push(mode);
    }

    /// Complete an `@import`/`@param` line ending at `end`.
    fn finish_declaration(&mut self, end: usize) {
        let is_param = matches!(self.top(), Mode::Param);
        let text = self.source[self.last_index..end].trim();
        self.pop();
        self.last_index = (end + 1).min(self.bytes.len());

        if self.params_complete {
            let keyword = if is_param { "@param" } else { "@import" };
            self.report(
                ErrorCode::E1004,
                self.line,
                format!("`{keyword}` must come before any template content"),
            );
            return;
        }
        if !is_param {
            self.emit(EventKind::Import(text));
            return;
        }
        match scan_param(text) {
            Ok(param) => self.emit(EventKind::Param(param)),
            Err(error) => self.report(ErrorCode::E1001, self.line, error.to_string()),
        }
    }

    fn open_code(&mut self, i: usize, marker_len: usize, mode: Mode<'src>) {
        self.flush_text(i + 1 - marker_len);
        self.last_index = i + 1;
        self.push(mode);
    }

    fn else_branch(&mut self, i: usize) {
        if !self.in_text_below(Mode::is_condition) {
            self.report_unbalanced("@else", "@if");
            return;
        }
        self.flush_text(i - 4);
        self.last_index = i + 1;
        self.pop();
        self.emit(EventKind::ConditionElse);
        self.push(Mode::Text);
    }

    fn elseif_branch(&mut self, i: usize) {
        if !self.in_text_below(Mode::is_condition) {
            self.report_unbalanced("@elseif", "@if");
            return;
        }
        self.flush_text(i - 6);
        self.last_index = i + 1;
        self.pop();
        self.pop();
        self.push(Mode::ConditionElse);
    }

    /// `@endif` / `@endfor`: close the text scope and its opener.
    fn end_block(
        &mut self,
        i: usize,
        keyword_len: usize,
        opener: fn(&Mode<'src>) -> bool,
        event: EventKind<'src>,
        keyword: &str,
    ) {
        if !self.in_text_below(opener) {
            let expected = if keyword == "@endif" { "@if" } else { "@for" };
            self.report_unbalanced(keyword, expected);
            return;
        }
        self.flush_text(i + 1 - keyword_len);
        self.last_index = i + 1;
        self.pop();
        self.emit(event);
        self.pop();
    }

    fn open_call(&mut self, i: usize, keyword_len: usize, kind: CallKind) {
        self.flush_text(i + 1 - keyword_len);
        self.last_index = i + 1;
        self.push(Mode::TagName {
            kind,
            name_start: i + 1,
        });
    }

    fn open_arguments(&mut self, i: usize, kind: CallKind, name_start: usize) {
        let name: String = self.source[name_start..i]
            .chars()
            .filter(|c| !c.is_whitespace())
            .collect();
        if name.is_empty() {
            self.report(
                ErrorCode::E1003,
                self.line,
                format!("`{}.` is missing a name", kind.keyword()),
            );
        }
        self.last_index = i + 1;
        if let Some(frame) = self.stack.last_mut() {
            frame.mode = Mode::TagArgs {
                call: CallSite {
                    kind,
                    name,
                    args: Vec::new(),
                },
                angle_depth: 0,
                arg_start: i + 1,
            };
        }
    }

    fn end_layout(&mut self, i: usize) {
        if !matches!(self.top(), Mode::LayoutBody) {
            self.report_unbalanced("@endlayout", "@layout");
            return;
        }
        self.pop();
        self.last_index = i + 1;
        self.emit(EventKind::LayoutEnd);
    }

    fn begin_define(&mut self, i: usize) {
        if !matches!(self.top(), Mode::LayoutBody) {
            self.report(
                ErrorCode::E1003,
                self.line,
                "`@define` is only allowed inside a `@layout` call",
            );
            return;
        }
        self.last_index = i + 1;
        self.push(Mode::LayoutDefine);
    }

    fn define_slot(&mut self, i: usize) {
        let slot = self.source[self.last_index..i].trim();
        self.last_index = i + 1;
        self.emit(EventKind::LayoutDefine(slot));
        self.push(Mode::Text);
        self.depth += 2;
    }

    fn end_define(&mut self, i: usize) {
        if !self.in_text_below(|mode| matches!(mode, Mode::LayoutDefine)) {
            self.report_unbalanced("@enddefine", "@define");
            return;
        }
        self.flush_text(i - 9);
        self.last_index = i + 1;
        self.pop();
        self.pop();
        self.depth = self.depth.saturating_sub(2);
        self.emit(EventKind::LayoutDefineEnd);
    }

    fn render_slot(&mut self, i: usize) {
        let slot = self.source[self.last_index..i].trim();
        self.last_index = i + 1;
        self.pop();
        if self.kind.is_layout() {
            self.emit(EventKind::LayoutRender(slot));
        } else {
            self.report(
                ErrorCode::E1005,
                self.line,
                format!("`@render({slot})` is only allowed in layouts"),
            );
        }
    }

    // End of input

    fn finish(&mut self) {
        let len = self.bytes.len();
        if matches!(self.top(), Mode::Import | Mode::Param) {
            self.finish_declaration(len);
        }
        self.flush_text(len);
        self.last_index = len;

        if let Some(frame) = self
            .stack
            .iter()
            .skip(1)
            .rev()
            .find(|frame| !matches!(frame.mode, Mode::Text))
        {
            let (line, what) = (frame.line, frame.mode.describe());
            tracing::debug!(line, what, "unterminated construct at end of input");
            self.report(
                ErrorCode::E1002,
                line,
                format!("unterminated {what} (reached end of input)"),
            );
        }
        self.emit(EventKind::Complete);
    }

    // Stack and emission primitives

    fn top(&self) -> &Mode<'src> {
        self.stack.last().map_or(&ROOT_TEXT, |frame| &frame.mode)
    }

    /// Whether the top is `Text` directly above a frame matching `opener`.
    fn in_text_below(&self, opener: impl Fn(&Mode<'src>) -> bool) -> bool {
        let len = self.stack.len();
        len >= 2
            && matches!(self.stack[len - 1].mode, Mode::Text)
            && opener(&self.stack[len - 2].mode)
    }

    fn push(&mut self, mode: Mode<'src>) {
        if matches!(mode, Mode::Text) {
            self.depth += 1;
        }
        self.stack.push(Frame {
            mode,
            line: self.line,
        });
    }

    fn pop(&mut self) {
        if self.stack.len() <= 1 {
            return;
        }
        if let Some(frame) = self.stack.pop() {
            if matches!(frame.mode, Mode::Text) {
                self.depth = self.depth.saturating_sub(1);
            }
        }
    }

    #[inline]
    fn ends_with(&self, i: usize, keyword: &[u8]) -> bool {
        self.bytes[..=i].ends_with(keyword)
    }

    /// Emit the pending text run up to `end` if the parser is in `Text`.
    fn flush_text(&mut self, end: usize) {
        if !matches!(self.top(), Mode::Text) || end <= self.last_index {
            return;
        }
        let text = &self.source[self.last_index..end];
        self.emit(EventKind::Text(text));
    }

    fn emit(&mut self, kind: EventKind<'src>) {
        if !self.params_complete && !kind.is_header() {
            self.params_complete = true;
            self.visitor.visit(ParseEvent {
                depth: self.depth,
                line: self.line,
                kind: EventKind::ParamsComplete,
            });
        }
        self.visitor.visit(ParseEvent {
            depth: self.depth,
            line: self.line,
            kind,
        });
    }

    fn report(&mut self, code: ErrorCode, line: u32, message: impl Into<String>) {
        self.visitor.error(Diagnostic::error(code, line, message));
    }

    fn report_unbalanced(&mut self, keyword: &str, opener: &str) {
        self.report(
            ErrorCode::E1003,
            self.line,
            format!("`{keyword}` without a matching `{opener}`"),
        );
    }
}

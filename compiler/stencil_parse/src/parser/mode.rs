//! Parser modes.

use stencil_ir::CallKind;

/// A `@tag`/`@layout` call being collected.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct CallSite<'src> {
    pub kind: CallKind,
    pub name: String,
    pub args: Vec<&'src str>,
}

/// One element of the mode stack.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) enum Mode<'src> {
    Text,
    Import,
    Param,
    Comment,
    CodeExpr,
    UnsafeCodeExpr,
    CodeStatement,
    /// `{ ... }` nested in code.
    CodeBlock,
    /// `@if` before its `(`.
    Condition,
    /// `@elseif` before its `(`; also marks an `@if` chain that saw one.
    ConditionElse,
    ForLoop,
    /// Inside the loop header parentheses, one per open `(`.
    ForLoopArgs,
    /// Balanced parentheses inside code.
    CodeArgs,
    StringLiteral {
        escaped: bool,
    },
    /// Dotted name after `@tag.`/`@layout.`, starting at `name_start`.
    TagName {
        kind: CallKind,
        name_start: usize,
    },
    /// Argument list of a call; `arg_start` is where the current argument
    /// begins.
    TagArgs {
        call: CallSite<'src>,
        angle_depth: u32,
        arg_start: usize,
    },
    /// Between a layout call's `)` and `@endlayout`.
    LayoutBody,
    LayoutDefine,
    LayoutRender,
}

impl Mode<'_> {
    /// Modes whose content is target-language code.
    pub fn is_code(&self) -> bool {
        matches!(
            self,
            Mode::CodeExpr
                | Mode::UnsafeCodeExpr
                | Mode::CodeStatement
                | Mode::CodeBlock
                | Mode::CodeArgs
                | Mode::ForLoopArgs
                | Mode::TagArgs { .. }
        )
    }

    pub fn is_condition(&self) -> bool {
        matches!(self, Mode::Condition | Mode::ConditionElse)
    }

    /// How the construct reads in a diagnostic.
    pub fn describe(&self) -> &'static str {
        match self {
            Mode::Text => "text block",
            Mode::Import => "`@import` declaration",
            Mode::Param => "`@param` declaration",
            Mode::Comment => "`<%--` comment",
            Mode::CodeExpr => "`${` expression",
            Mode::UnsafeCodeExpr => "`$unsafe{` expression",
            Mode::CodeStatement => "`!{` statement",
            Mode::CodeBlock => "`{` block",
            Mode::Condition => "`@if` block",
            Mode::ConditionElse => "`@elseif` block",
            Mode::ForLoop => "`@for` loop",
            Mode::ForLoopArgs => "`@for` header",
            Mode::CodeArgs => "parenthesis",
            Mode::StringLiteral { .. } => "string literal",
            Mode::TagName { kind, .. } | Mode::TagArgs { call: CallSite { kind, .. }, .. } => {
                match kind {
                    CallKind::Tag => "`@tag` call",
                    CallKind::Layout => "`@layout` call",
                }
            }
            Mode::LayoutBody => "`@layout` call",
            Mode::LayoutDefine => "`@define` block",
            Mode::LayoutRender => "`@render` call",
        }
    }
}

/// A mode plus the line it was entered on.
#[derive(Clone, Debug)]
pub(crate) struct Frame<'src> {
    pub mode: Mode<'src>,
    pub line: u32,
}

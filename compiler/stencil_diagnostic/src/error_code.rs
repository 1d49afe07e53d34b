//! Error codes for all compiler diagnostics.
//!
//! Each error code is a unique identifier (e.g., `E1001`) with the first digit
//! indicating the compiler phase.

use std::fmt;

/// Error codes for all compiler diagnostics.
///
/// Format: E#### where first digit indicates phase:
/// - E1xxx: Template parser errors
/// - E2xxx: Resolution and argument binding errors
/// - E3xxx: Batch and backend errors
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum ErrorCode {
    // Parser Errors (E1xxx)
    /// `@param` declaration without a parameter name
    E1001,
    /// End of input inside an open construct
    E1002,
    /// Closing directive without its opening counterpart
    E1003,
    /// `@param`/`@import` after the template body started
    E1004,
    /// `@render` outside a layout
    E1005,
    /// Parameter without a type for a target that requires one
    E1006,

    // Resolution Errors (E2xxx)
    /// Template not found
    E2001,
    /// Missing required argument
    E2002,
    /// Named argument matches no parameter
    E2003,
    /// Parameter bound twice
    E2004,
    /// More positional arguments than parameters
    E2005,
    /// Two templates map to the same generated identifier
    E2006,

    // Batch Errors (E3xxx)
    /// Batch mixes target languages
    E3001,
    /// Backend reported compilation errors
    E3002,
}

impl ErrorCode {
    /// Every error code, in numeric order.
    pub const ALL: [ErrorCode; 14] = [
        ErrorCode::E1001,
        ErrorCode::E1002,
        ErrorCode::E1003,
        ErrorCode::E1004,
        ErrorCode::E1005,
        ErrorCode::E1006,
        ErrorCode::E2001,
        ErrorCode::E2002,
        ErrorCode::E2003,
        ErrorCode::E2004,
        ErrorCode::E2005,
        ErrorCode::E2006,
        ErrorCode::E3001,
        ErrorCode::E3002,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::E1001 => "E1001",
            ErrorCode::E1002 => "E1002",
            ErrorCode::E1003 => "E1003",
            ErrorCode::E1004 => "E1004",
            ErrorCode::E1005 => "E1005",
            ErrorCode::E1006 => "E1006",
            ErrorCode::E2001 => "E2001",
            ErrorCode::E2002 => "E2002",
            ErrorCode::E2003 => "E2003",
            ErrorCode::E2004 => "E2004",
            ErrorCode::E2005 => "E2005",
            ErrorCode::E2006 => "E2006",
            ErrorCode::E3001 => "E3001",
            ErrorCode::E3002 => "E3002",
        }
    }

    /// Short title shown next to the code.
    pub fn title(&self) -> &'static str {
        match self {
            ErrorCode::E1001 => "malformed parameter declaration",
            ErrorCode::E1002 => "unterminated construct",
            ErrorCode::E1003 => "unbalanced directive",
            ErrorCode::E1004 => "misplaced declaration",
            ErrorCode::E1005 => "render outside layout",
            ErrorCode::E1006 => "missing parameter type",
            ErrorCode::E2001 => "template not found",
            ErrorCode::E2002 => "missing required argument",
            ErrorCode::E2003 => "unknown argument",
            ErrorCode::E2004 => "duplicate argument",
            ErrorCode::E2005 => "too many arguments",
            ErrorCode::E2006 => "generated name collision",
            ErrorCode::E3001 => "mixed unit kinds unsupported",
            ErrorCode::E3002 => "backend compilation failed",
        }
    }

    pub fn is_parser_error(&self) -> bool {
        self.as_str().starts_with("E1")
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Parse an error code string like `"E2001"`. Case-insensitive.
impl std::str::FromStr for ErrorCode {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let upper = s.to_ascii_uppercase();
        ErrorCode::ALL
            .iter()
            .find(|code| code.as_str() == upper)
            .copied()
            .ok_or(())
    }
}

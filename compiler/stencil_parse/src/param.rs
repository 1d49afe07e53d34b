//! `@param` declaration scanner.
//!
//! Declarations read `name: Type = default`. The scan is a single pass with
//! a generic-angle depth counter, so neither `=` nor whitespace inside
//! `< >` is structural:
//!
//! ```text
//! lookup: HashMap<String, Vec<i32>> = HashMap::new()
//! ^----^  ^-----------------------^   ^------------^
//!  name              type                 default
//! ```
//!
//! A `...` before the default marks the parameter variadic and is removed
//! from the type.

use std::fmt;

use stencil_ir::ParamInfo;

const VARIADIC_MARKER: &str = "...";

/// Why a declaration could not be scanned.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ParamError {
    MissingName,
    EmptyDefault { name: String },
}

impl fmt::Display for ParamError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParamError::MissingName => write!(f, "parameter declaration has no name"),
            ParamError::EmptyDefault { name } => {
                write!(f, "parameter `{name}` has `=` but no default expression")
            }
        }
    }
}

impl std::error::Error for ParamError {}

/// Scan one declaration (the text after `@param`).
pub fn scan_param(declaration: &str) -> Result<ParamInfo, ParamError> {
    let bytes = declaration.as_bytes();
    let default_boundary = find_default_boundary(bytes);
    let head_end = default_boundary.unwrap_or(bytes.len());
    let variadic = declaration[..head_end].contains(VARIADIC_MARKER);

    let name_start = skip_whitespace(bytes, 0, head_end);
    let name_end = bytes[name_start..head_end]
        .iter()
        .position(|&b| b.is_ascii_whitespace() || b == b':')
        .map_or(head_end, |offset| name_start + offset);
    let name = declaration[name_start..name_end].replace(VARIADIC_MARKER, "");
    if name.is_empty() {
        return Err(ParamError::MissingName);
    }

    let mut type_start = skip_whitespace(bytes, name_end, head_end);
    if bytes.get(type_start) == Some(&b':') {
        type_start = skip_whitespace(bytes, type_start + 1, head_end);
    }
    let ty = declaration[type_start..head_end]
        .replace(VARIADIC_MARKER, "")
        .trim()
        .to_string();

    let default = match default_boundary {
        Some(eq) => {
            let expression = declaration[eq + 1..].trim();
            if expression.is_empty() {
                return Err(ParamError::EmptyDefault { name });
            }
            Some(expression.to_string())
        }
        None => None,
    };

    Ok(ParamInfo {
        ty,
        name,
        default,
        variadic,
    })
}

/// Index of the first `=` outside generic brackets.
fn find_default_boundary(bytes: &[u8]) -> Option<usize> {
    let mut generic_depth = 0u32;
    for (i, &b) in bytes.iter().enumerate() {
        match b {
            b'<' => generic_depth += 1,
            // `->` in a function type does not close a generic.
            b'>' if i == 0 || bytes[i - 1] != b'-' => {
                generic_depth = generic_depth.saturating_sub(1);
            }
            b'=' if generic_depth == 0 => return Some(i),
            _ => {}
        }
    }
    None
}

fn skip_whitespace(bytes: &[u8], mut index: usize, end: usize) -> usize {
    while index < end && bytes[index].is_ascii_whitespace() {
        index += 1;
    }
    index
}

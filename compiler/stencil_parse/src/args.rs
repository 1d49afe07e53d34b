//! Tag and layout argument binding.
//!
//! Call sites pass raw expression strings. Each one is either positional or
//! `name = expression`; binding matches them to the callee's declared
//! parameters with keyword-argument semantics:
//!
//! ```text
//! @param one: i32 = 1
//! @param two: i32
//! @param three: &str = "x"
//!
//! @tag.t(5, three = "y", two = 2)   // two bound twice: error
//! @tag.t(two = 2)                   // [1, 2, "x"]
//! @tag.t(7, two = 2)                // [7, 2, "x"]
//! ```

use stencil_diagnostic::BindingProblem;
use stencil_ir::ParamInfo;

/// One call-site argument.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Argument<'a> {
    Positional(&'a str),
    Named { name: &'a str, value: &'a str },
}

impl<'a> Argument<'a> {
    /// Classify a raw argument.
    ///
    /// An argument is named when it starts with an identifier followed by a
    /// single top-level `=` (not `==`, `!=`, `<=`, `>=` or `=>`).
    pub fn classify(raw: &'a str) -> Self {
        let raw = raw.trim();
        let Some(eq) = find_assignment(raw.as_bytes()) else {
            return Argument::Positional(raw);
        };
        let name = raw[..eq].trim();
        if is_identifier(name) {
            Argument::Named {
                name,
                value: raw[eq + 1..].trim(),
            }
        } else {
            Argument::Positional(raw)
        }
    }
}

/// The expression(s) bound to one declared parameter.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum BoundArgument {
    Single(String),
    Variadic(Vec<String>),
}

/// Bind `args` to `params`, producing one entry per parameter in declared
/// order.
pub fn bind_arguments(
    params: &[ParamInfo],
    args: &[&str],
) -> Result<Vec<BoundArgument>, BindingProblem> {
    let arguments: Vec<Argument<'_>> = args.iter().map(|arg| Argument::classify(arg)).collect();
    let variadic_index = params.iter().position(|param| param.variadic);
    let positional_count = arguments
        .iter()
        .filter(|arg| matches!(arg, Argument::Positional(_)))
        .count();

    let mut slots: Vec<Option<String>> = vec![None; params.len()];
    let mut rest: Vec<String> = Vec::new();
    let mut rest_named = false;
    let mut next_positional = 0usize;

    for argument in arguments {
        match argument {
            Argument::Positional(expression) => {
                match variadic_index {
                    Some(index) if next_positional >= index => {
                        if rest_named {
                            return Err(BindingProblem::Duplicate {
                                param: params[index].name.clone(),
                            });
                        }
                        rest.push(expression.to_string());
                    }
                    _ if next_positional >= params.len() => {
                        return Err(BindingProblem::TooMany {
                            expected: params.len(),
                            found: positional_count,
                        });
                    }
                    _ => {
                        if slots[next_positional].is_some() {
                            return Err(BindingProblem::Duplicate {
                                param: params[next_positional].name.clone(),
                            });
                        }
                        slots[next_positional] = Some(expression.to_string());
                    }
                }
                next_positional += 1;
            }
            Argument::Named { name, value } => {
                let Some(index) = params.iter().position(|param| param.name == name) else {
                    return Err(BindingProblem::UnknownName {
                        name: name.to_string(),
                    });
                };
                if params[index].variadic {
                    if rest_named || !rest.is_empty() {
                        return Err(BindingProblem::Duplicate {
                            param: name.to_string(),
                        });
                    }
                    rest_named = true;
                    rest.push(value.to_string());
                } else {
                    if slots[index].is_some() {
                        return Err(BindingProblem::Duplicate {
                            param: name.to_string(),
                        });
                    }
                    slots[index] = Some(value.to_string());
                }
            }
        }
    }

    let mut bound = Vec::with_capacity(params.len());
    for (param, slot) in params.iter().zip(slots) {
        if param.variadic {
            bound.push(BoundArgument::Variadic(std::mem::take(&mut rest)));
            continue;
        }
        match (slot, &param.default) {
            (Some(expression), _) => bound.push(BoundArgument::Single(expression)),
            (None, Some(default)) => bound.push(BoundArgument::Single(default.clone())),
            (None, None) => {
                return Err(BindingProblem::MissingRequired {
                    param: param.name.clone(),
                })
            }
        }
    }
    Ok(bound)
}

/// Index of the first top-level assignment `=` in an argument.
fn find_assignment(bytes: &[u8]) -> Option<usize> {
    let mut depth = 0u32;
    let mut in_string = false;
    let mut escaped = false;
    for (i, &b) in bytes.iter().enumerate() {
        if in_string {
            match b {
                _ if escaped => escaped = false,
                b'\\' => escaped = true,
                b'"' => in_string = false,
                _ => {}
            }
            continue;
        }
        match b {
            b'"' => in_string = true,
            b'(' | b'[' | b'{' => depth += 1,
            b')' | b']' | b'}' => depth = depth.saturating_sub(1),
            b'=' if depth == 0 => {
                let prev = i.checked_sub(1).map(|p| bytes[p]);
                let next = bytes.get(i + 1).copied();
                let comparison = matches!(prev, Some(b'=' | b'!' | b'<' | b'>'))
                    || matches!(next, Some(b'=' | b'>'));
                if !comparison {
                    return Some(i);
                }
            }
            _ => {}
        }
    }
    None
}

fn is_identifier(text: &str) -> bool {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) if first.is_alphabetic() || first == '_' => {
            chars.all(|c| c.is_alphanumeric() || c == '_')
        }
        _ => false,
    }
}

#[cfg(test)]
mod tests;

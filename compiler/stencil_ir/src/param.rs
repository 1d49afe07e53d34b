//! Parameter declarations.

/// One `@param` declaration.
///
/// Declared once per template, in source order. The order is what positional
/// arguments bind against.
#[derive(Clone, Eq, PartialEq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ParamInfo {
    /// Declared type, empty when omitted.
    pub ty: String,
    pub name: String,
    /// Default expression, re-emitted verbatim into generated code.
    pub default: Option<String>,
    pub variadic: bool,
}

impl ParamInfo {
    pub fn new(name: impl Into<String>, ty: impl Into<String>) -> Self {
        ParamInfo {
            ty: ty.into(),
            name: name.into(),
            default: None,
            variadic: false,
        }
    }

    #[must_use]
    pub fn with_default(mut self, default: impl Into<String>) -> Self {
        self.default = Some(default.into());
        self
    }

    #[must_use]
    pub fn variadic(mut self) -> Self {
        self.variadic = true;
        self
    }

    /// Whether a caller must supply an argument for this parameter.
    pub fn is_required(&self) -> bool {
        self.default.is_none() && !self.variadic
    }
}

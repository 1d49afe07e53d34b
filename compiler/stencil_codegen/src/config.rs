//! Generator settings.

use stencil_ir::HtmlConfig;

/// Longest string literal written in one piece by default.
pub const DEFAULT_MAX_LITERAL_LEN: usize = 8 * 1024;

/// Settings shared by every unit of a batch.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GeneratorConfig {
    /// Tags and attributes handed to the HTML sub-machine.
    pub html: Option<HtmlConfig>,
    /// Text runs longer than this go to the unit's binary payload.
    pub binary_text_threshold: Option<usize>,
    /// Longer text runs are split across several writes.
    pub max_literal_len: usize,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        GeneratorConfig {
            html: None,
            binary_text_threshold: None,
            max_literal_len: DEFAULT_MAX_LITERAL_LEN,
        }
    }
}

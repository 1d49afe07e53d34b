//! Line-oriented source writer with a template line map.

use stencil_ir::LineMap;

/// Accumulates generated source one line at a time.
///
/// Every line written is recorded in the line map against the current
/// template line, so a diagnostic on generated line `n` can be traced back.
#[derive(Clone, Debug)]
pub struct CodeBuilder {
    indent_unit: &'static str,
    code: String,
    line_map: LineMap,
    template_line: u32,
}

impl CodeBuilder {
    pub fn new(indent_unit: &'static str) -> Self {
        CodeBuilder {
            indent_unit,
            code: String::with_capacity(4096),
            line_map: LineMap::new(),
            template_line: 1,
        }
    }

    /// Template line that subsequent lines map to.
    #[inline]
    pub fn template_line(&self) -> u32 {
        self.template_line
    }

    pub fn set_template_line(&mut self, line: u32) {
        self.template_line = line;
    }

    /// Write one line at indentation `level`.
    pub fn writeln(&mut self, level: u32, line: &str) {
        for _ in 0..level {
            self.code.push_str(self.indent_unit);
        }
        self.code.push_str(line);
        self.code.push('\n');
        self.line_map.push(self.template_line);
    }

    /// Write an empty line.
    pub fn newline(&mut self) {
        self.code.push('\n');
        self.line_map.push(self.template_line);
    }

    /// Append another builder's lines and line map.
    pub fn append(&mut self, other: CodeBuilder) {
        self.code.push_str(&other.code);
        self.line_map.extend(&other.line_map);
    }

    pub fn line_count(&self) -> usize {
        self.line_map.len()
    }

    pub fn into_parts(self) -> (String, LineMap) {
        (self.code, self.line_map)
    }
}

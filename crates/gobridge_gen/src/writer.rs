//! Indented text output for generated declarations.

/// Accumulates target-language text with tab indentation.
///
/// Every emitted declaration is built through one of these; the writer is
/// the only place that knows about indentation and line endings, so output
/// stays byte-stable across runs.
pub struct CodeWriter {
    output: String,
    indent_level: u32,
}

impl CodeWriter {
    pub fn new() -> Self {
        Self {
            output: String::with_capacity(256),
            indent_level: 0,
        }
    }

    /// Write one indented line.
    pub fn line(&mut self, text: &str) {
        for _ in 0..self.indent_level {
            self.output.push('\t');
        }
        self.output.push_str(text);
        self.output.push('\n');
    }

    /// Write an empty line (never indented).
    pub fn blank(&mut self) {
        self.output.push('\n');
    }

    /// Write `prefix {` and indent the following lines.
    pub fn open(&mut self, prefix: &str) {
        self.line(&format!("{} {{", prefix));
        self.indent_level += 1;
    }

    /// Dedent and close the block.
    pub fn close(&mut self) {
        self.indent_level = self.indent_level.saturating_sub(1);
        self.line("}");
    }

    /// Close the block with a trailing suffix, e.g. `})` or `},`.
    pub fn close_with(&mut self, suffix: &str) {
        self.indent_level = self.indent_level.saturating_sub(1);
        self.line(&format!("}}{}", suffix));
    }

    /// Indent without opening a brace block (multi-line call arguments).
    pub fn indent(&mut self) {
        self.indent_level += 1;
    }

    pub fn dedent(&mut self) {
        self.indent_level = self.indent_level.saturating_sub(1);
    }

    pub fn finish(self) -> String {
        self.output
    }
}

impl Default for CodeWriter {
    fn default() -> Self {
        Self::new()
    }
}

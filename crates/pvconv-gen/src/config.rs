// SPDX-License-Identifier: (MIT OR Apache-2.0)

#[derive(Debug, Clone)]
pub struct GenConfig {
    /// Spaces before each statement inside a `CHECK` block.
    pub indent_width: usize,
    /// Start the document with the generated-file banner.
    pub emit_header: bool,
}

impl Default for GenConfig {
    fn default() -> Self {
        Self {
            indent_width: 2,
            emit_header: true,
        }
    }
}

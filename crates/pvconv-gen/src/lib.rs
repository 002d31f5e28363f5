// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! SVRF generation from a parsed PVS deck.

mod config;
mod generator;

use std::io::Write;

use pvconv_ast::RootNode;

pub use config::GenConfig;
pub use generator::{ConstructKind, Generator, UnhandledConstruct};

/// First lines of every generated deck.
pub const HEADER: &str = "// SVRF file generated from PVS\n\n";

/// Generate the SVRF blocks for every declaration, without the header.
pub fn generate(root: &RootNode) -> String {
    let config = GenConfig { emit_header: false, ..GenConfig::default() };
    let mut g = Generator::new(&config);
    g.emit_root(root);
    g.finish().text
}

/// Generate a complete SVRF document: header followed by every block.
pub fn generate_document(root: &RootNode) -> String {
    generate_with_config(root, &GenConfig::default()).text
}

/// Generate with a custom configuration, keeping the unhandled-construct report.
pub fn generate_with_config(root: &RootNode, config: &GenConfig) -> Generated {
    let mut g = Generator::new(config);
    g.emit_root(root);
    g.finish()
}

/// Generate and write the document to `out`.
///
/// The text is built in memory first, so a failing writer never sees a
/// half-generated block; it may still hold a partial document.
pub fn write_document<W: Write>(
    root: &RootNode,
    config: &GenConfig,
    out: &mut W,
) -> std::io::Result<Generated> {
    let generated = generate_with_config(root, config);
    out.write_all(generated.text.as_bytes())?;
    out.flush()?;
    Ok(generated)
}

/// Generated SVRF text plus the constructs that were left as comments.
#[derive(Debug, Clone, Default)]
pub struct Generated {
    pub text: String,
    pub unhandled: Vec<UnhandledConstruct>,
}

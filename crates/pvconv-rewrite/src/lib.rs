// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! Pattern-based PVS → SVRF rewriting.
//!
//! Works on raw deck text without tokens or a syntax tree. The conversion is
//! an ordered list of passes (see [`passes`]); each pass is a pure, total
//! `&str -> String` function that copies unmatched text through unchanged
//! and returns its input as-is when nothing matches.

pub mod header;
pub mod layer;
pub mod operation;
pub mod passes;
pub mod rule;

pub use passes::{passes, Pass};

/// Options for [`transform_with`].
#[derive(Debug, Clone, Default)]
pub struct RewriteOpts {
    /// Run only passes with these ids (all passes when empty).
    pub passes: Vec<String>,
    /// Skip passes with these ids. Exclusion wins over inclusion.
    pub excludes: Vec<String>,
}

/// Apply every pass in order.
pub fn transform(content: &str) -> String {
    transform_with(content, &RewriteOpts::default())
}

/// Apply the selected passes, still in their fixed order.
pub fn transform_with(content: &str, opts: &RewriteOpts) -> String {
    let mut text = content.to_string();
    for pass in passes() {
        if !should_run(pass.id, opts) {
            tracing::debug!(pass = pass.id, "pass skipped");
            continue;
        }
        let next = (pass.apply)(&text);
        tracing::debug!(pass = pass.id, changed = next != text, "pass applied");
        text = next;
    }
    text
}

/// Check if a pass should run based on include/exclude filters.
fn should_run(pass_id: &str, opts: &RewriteOpts) -> bool {
    if opts.excludes.iter().any(|p| p == pass_id) {
        return false;
    }
    opts.passes.is_empty() || opts.passes.iter().any(|p| p == pass_id)
}

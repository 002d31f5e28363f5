// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! Pass registry.
//!
//! Order is part of the contract: each pass sees the complete output of the
//! one before it. `layer` assumes `header` has already commented out
//! directive lines, and `rule` expects layer and operation lines in their
//! SVRF form.

use crate::{header, layer, operation, rule};

/// A rewrite pass: id, text transform.
pub struct Pass {
    pub id: &'static str,
    pub apply: fn(&str) -> String,
}

static PASSES: [Pass; 4] = [
    Pass { id: "header", apply: header::apply },
    Pass { id: "layer", apply: layer::apply },
    Pass { id: "operation", apply: operation::apply },
    Pass { id: "rule", apply: rule::apply },
];

/// All passes, in the order they run.
pub fn passes() -> &'static [Pass] {
    &PASSES
}

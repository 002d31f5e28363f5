// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! Conversion jobs.
//!
//! A [`Job`] takes one PVS deck to one SVRF file, either through the token
//! and syntax-tree pipeline ([`Strategy::Ast`]) or through the text rewrite
//! passes ([`Strategy::Pattern`]).

mod error;
mod include;
mod job;

pub use error::ConvertError;
pub use include::{LineCounter, MAX_INCLUDE_DEPTH};
pub use job::{default_output_path, Job, JobReport, Strategy};

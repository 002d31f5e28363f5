// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! One conversion job: input deck in, SVRF file out.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use pvconv_gen::{GenConfig, UnhandledConstruct};
use pvconv_parser::Parser;
use pvconv_rewrite::RewriteOpts;

use crate::include::{IncludeExpander, LineCounter};
use crate::ConvertError;

/// How a job turns PVS text into SVRF.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Strategy {
    /// Tokenize, parse, generate from the syntax tree.
    #[default]
    Ast,
    /// Regex passes over the raw text. `INCLUDE` is not expanded.
    Pattern,
}

impl Strategy {
    fn describe(self) -> &'static str {
        match self {
            Strategy::Ast => "parser-based approach",
            Strategy::Pattern => "pattern-based approach",
        }
    }
}

/// Summary of a finished job.
#[derive(Debug, Clone, Default)]
pub struct JobReport {
    /// Top-level declarations parsed. Always 0 for [`Strategy::Pattern`].
    pub declarations: usize,
    /// Constructs written out as comments.
    pub unhandled: Vec<UnhandledConstruct>,
    pub output_bytes: usize,
}

/// `input` with its extension replaced by `svrf`.
pub fn default_output_path(input: &Path) -> PathBuf {
    input.with_extension("svrf")
}

pub struct Job {
    input: PathBuf,
    output: PathBuf,
    strategy: Strategy,
    gen_config: GenConfig,
    rewrite_opts: RewriteOpts,
    lines: LineCounter,
}

impl Job {
    pub fn new(input: impl Into<PathBuf>, output: impl Into<PathBuf>, strategy: Strategy) -> Self {
        Self {
            input: input.into(),
            output: output.into(),
            strategy,
            gen_config: GenConfig::default(),
            rewrite_opts: RewriteOpts::default(),
            lines: LineCounter::new(),
        }
    }

    pub fn with_gen_config(mut self, config: GenConfig) -> Self {
        self.gen_config = config;
        self
    }

    pub fn with_rewrite_opts(mut self, opts: RewriteOpts) -> Self {
        self.rewrite_opts = opts;
        self
    }

    /// Last global line numbered by the most recent run.
    pub fn last_global_line(&self) -> u32 {
        self.lines.last()
    }

    /// Run the job and report progress to `status`.
    ///
    /// Writes a start message, then either `Conversion complete.` or one
    /// message naming the failed stage. Never fails itself; status write
    /// errors are ignored.
    pub fn execute(&mut self, status: &mut dyn Write) -> bool {
        let _ = writeln!(
            status,
            "Converting {} to {} ({})",
            self.input.display(),
            self.output.display(),
            self.strategy.describe()
        );

        match self.run() {
            Ok(report) => {
                for construct in &report.unhandled {
                    let _ = writeln!(status, "Warning: {}", construct);
                }
                let _ = writeln!(status, "Conversion complete.");
                true
            }
            Err(err) => {
                tracing::debug!(stage = err.stage(), "job failed");
                let _ = writeln!(status, "Error: {}", err);
                for detail in err.details() {
                    let _ = writeln!(status, "  {}", detail);
                }
                false
            }
        }
    }

    /// Run the job, returning the first fatal error.
    ///
    /// An output file that was opened before the failure is left as written.
    pub fn run(&mut self) -> Result<JobReport, ConvertError> {
        self.lines.reset();
        let report = match self.strategy {
            Strategy::Ast => self.run_ast()?,
            Strategy::Pattern => self.run_pattern()?,
        };
        tracing::info!(
            input = %self.input.display(),
            output = %self.output.display(),
            declarations = report.declarations,
            unhandled = report.unhandled.len(),
            bytes = report.output_bytes,
            "conversion finished"
        );
        Ok(report)
    }

    fn run_ast(&mut self) -> Result<JobReport, ConvertError> {
        let mut expander = IncludeExpander::new(&mut self.lines);
        let tokens = expander.tokenize(&self.input)?;
        tracing::debug!(tokens = tokens.len(), files = expander.files(), "tokenize stage done");

        let parsed = Parser::new(tokens).parse();
        if !parsed.is_ok() {
            return Err(ConvertError::Parse { path: self.input.clone(), errors: parsed.errors });
        }
        let root = parsed.root;
        tracing::debug!(declarations = root.children.len(), "parse stage done");

        let mut out = self.open_output()?;
        let generated = pvconv_gen::write_document(&root, &self.gen_config, &mut out)
            .map_err(|source| self.write_error(source))?;

        Ok(JobReport {
            declarations: root.children.len(),
            unhandled: generated.unhandled,
            output_bytes: generated.text.len(),
        })
    }

    fn run_pattern(&mut self) -> Result<JobReport, ConvertError> {
        let source = std::fs::read_to_string(&self.input).map_err(|source| {
            ConvertError::ReadInput { path: self.input.clone(), source }
        })?;
        let mut text = String::new();
        if self.gen_config.emit_header {
            text.push_str(pvconv_gen::HEADER);
        }
        text.push_str(&pvconv_rewrite::transform_with(&source, &self.rewrite_opts));

        let mut out = self.open_output()?;
        out.write_all(text.as_bytes()).map_err(|source| self.write_error(source))?;
        out.flush().map_err(|source| self.write_error(source))?;

        Ok(JobReport { declarations: 0, unhandled: Vec::new(), output_bytes: text.len() })
    }

    fn open_output(&self) -> Result<BufWriter<File>, ConvertError> {
        let file = File::create(&self.output).map_err(|source| ConvertError::OutputOpen {
            path: self.output.clone(),
            source,
        })?;
        Ok(BufWriter::new(file))
    }

    fn write_error(&self, source: std::io::Error) -> ConvertError {
        ConvertError::OutputWrite { path: self.output.clone(), source }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_output_replaces_extension() {
        assert_eq!(default_output_path(Path::new("decks/top.pvs")), PathBuf::from("decks/top.svrf"));
        assert_eq!(default_output_path(Path::new("rules")), PathBuf::from("rules.svrf"));
    }

    #[test]
    fn ast_is_the_default_strategy() {
        assert_eq!(Strategy::default(), Strategy::Ast);
    }

    #[test]
    fn missing_input_is_a_read_failure() {
        let mut job = Job::new("/definitely/not/here.pvs", "/tmp/unused.svrf", Strategy::Ast);
        let err = job.run().unwrap_err();
        assert!(matches!(err, ConvertError::ReadInput { .. }), "{:?}", err);
    }
}

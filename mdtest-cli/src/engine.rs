//! Markdown engines selectable from the command line.

use clap::ValueEnum;
use mdtest_harness::{Identity, TransformFault, Transformer};
use pulldown_cmark::{html, Options, Parser};

/// Engine selected with `--engine`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum EngineKind {
    /// CommonMark engine (pulldown-cmark).
    #[default]
    Cmark,
    /// Passthrough; output equals input. Useful as a benchmark baseline.
    Identity,
}

impl EngineKind {
    pub fn build(self) -> Box<dyn Transformer> {
        match self {
            EngineKind::Cmark => Box::new(CmarkEngine::new()),
            EngineKind::Identity => Box::new(Identity),
        }
    }
}

/// Markdown to HTML via pulldown-cmark.
#[derive(Debug, Clone, Copy)]
pub struct CmarkEngine {
    options: Options,
}

impl CmarkEngine {
    /// Strict CommonMark, no extensions.
    pub fn new() -> Self {
        Self {
            options: Options::empty(),
        }
    }

    pub fn with_options(options: Options) -> Self {
        Self { options }
    }
}

impl Default for CmarkEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl Transformer for CmarkEngine {
    fn transform(&self, input: &str) -> Result<String, TransformFault> {
        let parser = Parser::new_ext(input, self.options);
        let mut out = String::with_capacity(input.len() + input.len() / 2);
        html::push_html(&mut out, parser);
        Ok(out)
    }
}

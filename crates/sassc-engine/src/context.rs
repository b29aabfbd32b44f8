//! The compilation context: one file, one engine run, one result.

use crate::engine::{Compiled, Engine};
use crate::error::CompileError;
use crate::options::SassOptions;
use crate::source_map::{self, SourceMap};

/// What a finished compilation produced. Exactly one of CSS or an error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Success {
        css: String,
        source_map: Option<String>,
    },
    Failure {
        status: i32,
        json: String,
    },
}

/// A single file compilation. The engine runs at most once per context;
/// results live as long as the context and are released with it.
#[derive(Debug)]
pub struct FileContext {
    options: SassOptions,
    outcome: Option<Outcome>,
}

impl FileContext {
    pub fn new(options: SassOptions) -> Self {
        Self {
            options,
            outcome: None,
        }
    }

    /// Run the engine and record the outcome. Returns the error status.
    ///
    /// A context that already compiled keeps its first outcome.
    pub fn compile(&mut self, engine: &impl Engine) -> i32 {
        if self.outcome.is_some() {
            tracing::debug!(
                input = %self.options.input_path.display(),
                "context already compiled"
            );
            return self.error_status();
        }

        let outcome = match self.run(engine) {
            Ok((css, source_map)) => {
                tracing::debug!(
                    input = %self.options.input_path.display(),
                    css_len = css.len(),
                    has_map = source_map.is_some(),
                    "compiled"
                );
                Outcome::Success { css, source_map }
            }
            Err(e) => {
                tracing::debug!(
                    input = %self.options.input_path.display(),
                    error = %e,
                    "compilation failed"
                );
                Outcome::Failure {
                    status: e.status(),
                    json: e.report().to_json(),
                }
            }
        };

        self.outcome = Some(outcome);
        self.error_status()
    }

    fn run(&self, engine: &impl Engine) -> Result<(String, Option<String>), CompileError> {
        let Compiled { mut css, source } = engine.compile_file(&self.options)?;

        if !self.options.wants_source_map() {
            return Ok((css, None));
        }

        let contents = if self.options.source_map_contents {
            if source.is_none() {
                tracing::debug!("engine kept no source text, omitting sourcesContent");
            }
            source
        } else {
            None
        };

        let map_json = SourceMap::new(&self.options, contents)
            .to_json()
            .map_err(|e| CompileError::Other(format!("failed to serialize source map: {e}")))?;

        if let Some(url) = source_map::mapping_url(&self.options, &map_json) {
            source_map::append_url_comment(&mut css, &url);
        }

        Ok((css, Some(map_json)))
    }

    /// 0 until a compilation fails, then the engine's status.
    pub fn error_status(&self) -> i32 {
        match &self.outcome {
            Some(Outcome::Failure { status, .. }) => *status,
            _ => 0,
        }
    }

    pub fn error_json(&self) -> Option<&str> {
        match &self.outcome {
            Some(Outcome::Failure { json, .. }) => Some(json.as_str()),
            _ => None,
        }
    }

    pub fn output_string(&self) -> Option<&str> {
        match &self.outcome {
            Some(Outcome::Success { css, .. }) => Some(css.as_str()),
            _ => None,
        }
    }

    pub fn source_map_string(&self) -> Option<&str> {
        match &self.outcome {
            Some(Outcome::Success { source_map, .. }) => source_map.as_deref(),
            _ => None,
        }
    }

    pub fn outcome(&self) -> Option<&Outcome> {
        self.outcome.as_ref()
    }
}

use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use crate::error::CompileError;
use crate::options::{DEFAULT_PRECISION, SassOptions};

/// What an engine hands back for a successful compile.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Compiled {
    pub css: String,

    /// The input text exactly as the engine read it, when the engine keeps
    /// it. Used for the source map's `sourcesContent`.
    pub source: Option<String>,
}

impl Compiled {
    /// A result carrying CSS only.
    pub fn new(css: impl Into<String>) -> Self {
        Self {
            css: css.into(),
            source: None,
        }
    }

    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }
}

/// A Sass compiler that turns the file named by the options into CSS.
pub trait Engine {
    fn compile_file(&self, options: &SassOptions) -> Result<Compiled, CompileError>;
}

impl<F> Engine for F
where
    F: Fn(&SassOptions) -> Result<Compiled, CompileError>,
{
    fn compile_file(&self, options: &SassOptions) -> Result<Compiled, CompileError> {
        self(options)
    }
}

/// Engine backed by grass.
///
/// grass always prints numbers with a precision of 10 and has no source
/// comment support, so those options are checked and otherwise ignored.
#[derive(Debug, Default, Clone, Copy)]
pub struct GrassEngine;

impl Engine for GrassEngine {
    fn compile_file(&self, options: &SassOptions) -> Result<Compiled, CompileError> {
        if options.precision != DEFAULT_PRECISION {
            tracing::warn!(
                requested = options.precision,
                used = DEFAULT_PRECISION,
                "grass has a fixed numeric precision"
            );
        }
        if options.source_comments {
            tracing::warn!("grass does not emit source comments, ignoring");
        }

        let input = options.input_path.as_path();
        let fs = RecordingFs::new(input);
        let grass_options = grass::Options::default().fs(&fs);
        let grass_options = match input.parent() {
            Some(parent) => grass_options.load_path(parent),
            None => grass_options,
        };

        tracing::debug!(input = %input.display(), "compiling with grass");
        let css = grass::from_path(input, &grass_options)
            .map_err(|e| CompileError::from_grass(e, input))?;

        Ok(Compiled {
            css,
            source: fs.input_text(),
        })
    }
}

/// Real filesystem for grass that keeps the bytes of the input file, so the
/// source map is built from the same text that was compiled.
#[derive(Debug)]
struct RecordingFs {
    input: PathBuf,
    input_bytes: OnceLock<Vec<u8>>,
}

impl RecordingFs {
    fn new(input: &Path) -> Self {
        Self {
            input: input.to_path_buf(),
            input_bytes: OnceLock::new(),
        }
    }

    fn input_text(&self) -> Option<String> {
        let bytes = self.input_bytes.get()?;
        std::str::from_utf8(bytes).ok().map(str::to_owned)
    }
}

impl grass::Fs for RecordingFs {
    fn is_dir(&self, path: &Path) -> bool {
        path.is_dir()
    }

    fn is_file(&self, path: &Path) -> bool {
        path.is_file()
    }

    fn read(&self, path: &Path) -> std::io::Result<Vec<u8>> {
        let bytes = fs_err::read(path)?;
        if path == self.input {
            let _ = self.input_bytes.set(bytes.clone());
        }
        Ok(bytes)
    }
}

//! Scoped Sass file compilation.
//!
//! A [`FileContext`] is created from one [`SassOptions`] value, compiled once
//! by an [`Engine`] (normally [`GrassEngine`]), then queried for the CSS, the
//! source map, or the status and JSON error report. Dropping the context
//! releases everything it produced.
//!
//! # Example
//!
//! ```no_run
//! use sassc_engine::{FileContext, GrassEngine, SassOptions};
//!
//! let mut context = FileContext::new(SassOptions::for_file("style.scss", "style.css"));
//! if context.compile(&GrassEngine) > 0 {
//!     println!("{}", context.error_json().unwrap_or_default());
//! } else {
//!     println!("{}", context.output_string().unwrap_or_default());
//! }
//! ```

mod context;
mod engine;
mod error;
mod options;
mod source_map;

pub use context::{FileContext, Outcome};
pub use engine::{Compiled, Engine, GrassEngine};
pub use error::{
    CompileError, ErrorReport, STATUS_IO_ERROR, STATUS_SASS_ERROR, STATUS_UNKNOWN_ERROR,
    SourceLocation,
};
pub use options::{DEFAULT_PRECISION, SOURCE_MAP_SUFFIX, SassOptions, source_map_path};
pub use source_map::SourceMap;

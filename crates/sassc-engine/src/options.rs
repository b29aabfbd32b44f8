//! Compiler configuration for a single file compilation.

use std::ffi::OsString;
use std::path::{Path, PathBuf};

/// Suffix appended to the output path to name the source map file.
pub const SOURCE_MAP_SUFFIX: &str = ".map";

/// Number of decimal digits kept in numeric output.
pub const DEFAULT_PRECISION: usize = 10;

/// Every knob handed to the engine for one compilation, in one place.
///
/// Paths are kept as given, byte for byte. They are only converted (lossily)
/// to UTF-8 where they end up in JSON: error reports and source maps.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SassOptions {
    /// Decimal digits kept when printing numbers.
    pub precision: usize,

    /// Emit `/* line N, file */` comments above each rule.
    pub source_comments: bool,

    /// File to compile. Also reported in error locations and map `sources`.
    pub input_path: PathBuf,

    /// Where the CSS is meant to live. Only recorded as the map's `file`;
    /// nothing is written there.
    pub output_path: PathBuf,

    /// Name of the source map file referenced by the `sourceMappingURL`
    /// comment when the map is not embedded.
    pub source_map_file: Option<PathBuf>,

    /// Inline the source map into the CSS as a base64 `data:` URL.
    pub source_map_embed: bool,

    /// Copy the source text into the map's `sourcesContent`.
    pub source_map_contents: bool,

    /// Leave the `sourceMappingURL` comment out of the CSS.
    pub omit_source_map_url: bool,
}

impl SassOptions {
    /// Options used by the `sassc` command for `input` compiled towards `output`.
    ///
    /// Precision is 10, source comments are off, the source map is embedded
    /// with its contents, and the map URL comment is kept.
    pub fn for_file(input: impl Into<PathBuf>, output: impl Into<PathBuf>) -> Self {
        let output_path = output.into();
        let source_map_file = source_map_path(&output_path);

        Self {
            precision: DEFAULT_PRECISION,
            source_comments: false,
            input_path: input.into(),
            output_path,
            source_map_file: Some(source_map_file),
            source_map_embed: true,
            source_map_contents: true,
            omit_source_map_url: false,
        }
    }

    /// Whether a source map is produced at all.
    pub fn wants_source_map(&self) -> bool {
        self.source_map_embed || self.source_map_file.is_some()
    }
}

/// Source map path for a given output path: the output path plus `.map`.
pub fn source_map_path(output_path: &Path) -> PathBuf {
    let mut path = OsString::with_capacity(output_path.as_os_str().len() + SOURCE_MAP_SUFFIX.len());
    path.push(output_path);
    path.push(SOURCE_MAP_SUFFIX);
    PathBuf::from(path)
}

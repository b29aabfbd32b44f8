//! Version 3 source map documents and the `sourceMappingURL` comment.
//!
//! The map names the compiled sources and optionally carries their text.
//! It carries no segment mappings; grass does not report output positions.

use std::path::Path;

use base64::Engine as _;
use serde::Serialize;

use crate::options::SassOptions;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SourceMap {
    pub version: u8,
    pub file: String,
    pub sources: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sources_content: Option<Vec<String>>,
    pub names: Vec<String>,
    pub mappings: String,
}

impl SourceMap {
    /// Map for `options.input_path`, with paths relative to the map's directory.
    pub fn new(options: &SassOptions, contents: Option<String>) -> Self {
        let map_path = options
            .source_map_file
            .as_deref()
            .unwrap_or(&options.output_path);
        let map_dir = map_path.parent().unwrap_or(Path::new(""));

        Self {
            version: 3,
            file: relative_to(&options.output_path, map_dir),
            sources: vec![relative_to(&options.input_path, map_dir)],
            sources_content: contents.map(|c| vec![c]),
            names: Vec::new(),
            mappings: String::new(),
        }
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

/// The URL the CSS should point at, or `None` when the comment is omitted.
pub fn mapping_url(options: &SassOptions, map_json: &str) -> Option<String> {
    if options.omit_source_map_url {
        return None;
    }

    if options.source_map_embed {
        let encoded = base64::engine::general_purpose::STANDARD.encode(map_json.as_bytes());
        return Some(format!("data:application/json;base64,{encoded}"));
    }

    let map_file = options.source_map_file.as_deref()?;
    let css_dir = options.output_path.parent().unwrap_or(Path::new(""));
    Some(relative_to(map_file, css_dir))
}

/// Append the `sourceMappingURL` comment after a blank line.
pub fn append_url_comment(css: &mut String, url: &str) {
    css.push_str("\n/*# sourceMappingURL=");
    css.push_str(url);
    css.push_str(" */");
}

/// `path` relative to `dir` when it lives underneath it, otherwise untouched.
/// Non-UTF-8 bytes become U+FFFD; JSON has no way to carry them.
fn relative_to(path: &Path, dir: &Path) -> String {
    match path.strip_prefix(dir) {
        Ok(rel) if !dir.as_os_str().is_empty() => rel.to_string_lossy().into_owned(),
        _ => path.to_string_lossy().into_owned(),
    }
}

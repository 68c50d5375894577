//! Front-matter codec: a YAML metadata block delimited by `---` lines.

use regex::Regex;
use serde_yaml::{Mapping, Value};
use std::sync::LazyLock;

// Anchored at the start of the text: an opening `---` line, at least the
// empty YAML region, and the first subsequent `---` line. Trailing blanks on
// the delimiter lines are tolerated.
static FRONT_MATTER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?sm)\A---[ \t]*\r?\n(.*?)^---[ \t]*(?:\r?\n|\z)").expect("front-matter pattern")
});

/// Splits raw note text into its front-matter mapping and body.
///
/// Returns the parsed mapping plus everything after the closing delimiter
/// line. When the block is absent, fails to parse, or parses to something
/// other than a mapping, the metadata degrades to an empty mapping and the
/// entire input is returned as the body. This never fails: a corrupted
/// front-matter block must not make a note unloadable.
pub fn parse(raw: &str) -> (Mapping, &str) {
    let Some(caps) = FRONT_MATTER.captures(raw) else {
        return (Mapping::new(), raw);
    };
    let yaml = caps.get(1).map_or("", |m| m.as_str());
    match serde_yaml::from_str::<Value>(yaml) {
        Ok(Value::Mapping(metadata)) => {
            let body_start = caps.get(0).map_or(0, |m| m.end());
            (metadata, &raw[body_start..])
        }
        // Malformed YAML, or a scalar/sequence where a mapping was expected:
        // treat the whole file as body-only.
        _ => (Mapping::new(), raw),
    }
}

/// Serializes a metadata mapping to a front-matter block.
///
/// Key order follows the mapping's insertion order so emitted files diff
/// stably. An empty mapping produces an empty string (no block at all). A
/// serialization failure produces a marked placeholder block instead of an
/// error.
pub fn generate(metadata: &Mapping) -> String {
    if metadata.is_empty() {
        return String::new();
    }
    match serde_yaml::to_string(metadata) {
        Ok(yaml) => format!("---\n{yaml}---\n"),
        Err(_) => "---\n# error generating front-matter\n---\n".to_string(),
    }
}

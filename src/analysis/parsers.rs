//! Lightweight manifest parsers for per-ecosystem dependency extraction.
//!
//! These are deliberately shallow text parsers: they pull package names out
//! of manifests without resolving versions or transitive graphs.

use serde_json::Value;
use std::collections::HashSet;

/// Characters that begin a version specifier in a requirements entry.
const VERSION_SPECIFIER_CHARS: &[char] = &['>', '=', '<', '!'];

/// Parses `requirements.txt` content into bare package names.
///
/// Blank lines, comments and pip option lines contribute nothing. A version
/// specifier and everything after it is stripped, so `flask==2.3.2` yields
/// `flask` and an already-clean name passes through unchanged.
pub fn parse_requirements_txt(content: &str) -> Vec<String> {
    let mut dependencies = Vec::new();

    for line in content.lines() {
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') || trimmed.starts_with('-') {
            continue;
        }

        let name = match trimmed.find(VERSION_SPECIFIER_CHARS) {
            Some(idx) => trimmed[..idx].trim(),
            None => trimmed,
        };

        if !name.is_empty() {
            dependencies.push(name.to_string());
        }
    }

    dependencies
}

/// Parses the `[project] dependencies` array of a `pyproject.toml`.
///
/// Entries are stripped with the same rule as requirements lines. A manifest
/// that fails to parse as TOML yields an empty list rather than an error.
pub fn parse_pyproject_dependencies(content: &str) -> Vec<String> {
    let parsed: toml::Value = match toml::from_str(content) {
        Ok(v) => v,
        Err(_) => return Vec::new(),
    };

    let mut dependencies = Vec::new();

    if let Some(deps) = parsed
        .get("project")
        .and_then(|p| p.get("dependencies"))
        .and_then(|d| d.as_array())
    {
        for entry in deps {
            if let Some(raw) = entry.as_str() {
                let name = match raw.find(VERSION_SPECIFIER_CHARS) {
                    Some(idx) => raw[..idx].trim(),
                    None => raw.trim(),
                };
                if !name.is_empty() {
                    dependencies.push(name.to_string());
                }
            }
        }
    }

    dependencies
}

/// Extracts required module paths from `go.mod` content.
///
/// Handles both single-line `require path version` directives and
/// `require ( ... )` blocks. `// indirect` trailers and comment lines
/// inside a block are ignored.
pub fn parse_go_mod(content: &str) -> Vec<String> {
    let mut dependencies = Vec::new();
    let mut seen = HashSet::new();
    let mut in_require_block = false;

    for line in content.lines() {
        let trimmed = line.trim();

        if in_require_block {
            if trimmed == ")" {
                in_require_block = false;
                continue;
            }
            if trimmed.is_empty() || trimmed.starts_with("//") {
                continue;
            }
            if let Some(path) = trimmed.split_whitespace().next() {
                if seen.insert(path.to_string()) {
                    dependencies.push(path.to_string());
                }
            }
            continue;
        }

        if let Some(rest) = trimmed.strip_prefix("require") {
            let rest = rest.trim_start();
            if rest.starts_with('(') {
                in_require_block = true;
                continue;
            }
            if let Some(path) = rest.split_whitespace().next() {
                if seen.insert(path.to_string()) {
                    dependencies.push(path.to_string());
                }
            }
        }
    }

    dependencies
}

/// The subset of `package.json` the analyzer cares about.
#[derive(Debug, Default)]
pub struct PackageJsonInfo {
    pub dependencies: Vec<String>,
    pub main: Option<String>,
}

/// Parses `package.json`, returning dependency names and the `main` entry.
///
/// Malformed JSON is not a failure: the result is simply empty, and the
/// scan carries on with whatever the other markers say.
pub fn parse_package_json(content: &str) -> PackageJsonInfo {
    let parsed: Value = match serde_json::from_str(content) {
        Ok(v) => v,
        Err(_) => return PackageJsonInfo::default(),
    };

    let mut info = PackageJsonInfo::default();

    for section in ["dependencies", "devDependencies"] {
        if let Some(deps) = parsed.get(section).and_then(|d| d.as_object()) {
            for name in deps.keys() {
                info.dependencies.push(name.clone());
            }
        }
    }

    info.main = parsed
        .get("main")
        .and_then(|m| m.as_str())
        .map(String::from);

    info
}

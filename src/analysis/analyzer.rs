use crate::analysis::collector::{AnalysisError, FileCollector};
use crate::analysis::ecosystems::{classify, EcosystemProfile};
use crate::analysis::parsers;
use crate::analysis::types::{FileRecord, ProjectAnalysis, ProjectType};
use std::path::Path;
use tracing::{debug, info};

const PYTHON_ENTRY_NAMES: &[&str] = &["main.py", "app.py", "server.py"];
const PYTHON_MAIN_GUARD: &str = "if __name__ == '__main__':";
const NODE_ENTRY_NAMES: &[&str] = &["index.js", "server.js", "app.js"];
const GO_MAIN_SIGNATURE: &str = "func main()";

/// Classifies a project tree and extracts ecosystem-specific detail.
///
/// Classification scores marker files and extensions per ecosystem
/// (see [`crate::analysis::ecosystems`]); the winning ecosystem then gets a
/// type-specific extraction pass for package manager, dependencies,
/// framework and entry points.
pub struct ProjectAnalyzer {
    collector: FileCollector,
}

impl Default for ProjectAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

impl ProjectAnalyzer {
    pub fn new() -> Self {
        Self {
            collector: FileCollector::new(),
        }
    }

    pub fn with_collector(collector: FileCollector) -> Self {
        Self { collector }
    }

    /// Analyzes the project at `root`.
    ///
    /// Fails only when the root is missing or not a directory; problems
    /// with individual files are absorbed during collection.
    pub async fn analyze(&self, root: &Path) -> Result<ProjectAnalysis, AnalysisError> {
        let files = self.collector.collect(root)?;
        let project_type = classify(&files);

        info!(
            root = %root.display(),
            project_type = %project_type,
            files = files.len(),
            "project classified"
        );

        let mut analysis = ProjectAnalysis::empty(root.to_path_buf(), project_type);

        let profile = match EcosystemProfile::for_type(project_type) {
            Some(p) => p,
            None => return Ok(analysis),
        };

        analysis.language = profile.language.to_string();
        bucket_files(profile, &files, &mut analysis);

        match project_type {
            ProjectType::Python => extract_python(profile, &mut analysis),
            ProjectType::Go => extract_go(profile, &mut analysis),
            ProjectType::Node => extract_node(profile, &mut analysis),
            ProjectType::Rust => {
                analysis.package_manager = Some("cargo".to_string());
            }
            ProjectType::Java | ProjectType::Unknown => {}
        }

        debug!(
            dependencies = analysis.dependencies.len(),
            entry_points = analysis.entry_points.len(),
            framework = ?analysis.framework,
            "extraction complete"
        );

        Ok(analysis)
    }
}

/// Assigns each collected file to at most one bucket: config by exact
/// name, then source by extension, then static by extension.
fn bucket_files(profile: &EcosystemProfile, files: &[FileRecord], analysis: &mut ProjectAnalysis) {
    for file in files {
        if profile.is_config_file(file) {
            analysis.config_files.push(file.clone());
        } else if profile.is_source_file(file) {
            analysis.source_files.push(file.clone());
        } else if profile.is_static_file(file) {
            analysis.static_files.push(file.clone());
        }
    }
}

/// Walks source files in collection order and returns the first framework
/// whose signature appears in a file. Matching is case-sensitive.
fn detect_framework(profile: &EcosystemProfile, sources: &[FileRecord]) -> Option<String> {
    for file in sources {
        let content = match file.content.as_deref() {
            Some(c) => c,
            None => continue,
        };
        for (framework, signatures) in profile.framework_signatures {
            if signatures.iter().any(|sig| content.contains(sig)) {
                return Some(framework.to_string());
            }
        }
    }
    None
}

fn extract_python(profile: &EcosystemProfile, analysis: &mut ProjectAnalysis) {
    analysis.package_manager = if analysis.has_config_file("pyproject.toml") {
        Some("uv/pip".to_string())
    } else if analysis.has_config_file("Pipfile") {
        Some("pipenv".to_string())
    } else if analysis.has_config_file("requirements.txt") {
        Some("pip".to_string())
    } else {
        None
    };

    if let Some(content) = analysis
        .config_file("requirements.txt")
        .and_then(|f| f.content.clone())
    {
        analysis
            .dependencies
            .extend(parsers::parse_requirements_txt(&content));
    }
    if let Some(content) = analysis
        .config_file("pyproject.toml")
        .and_then(|f| f.content.clone())
    {
        analysis
            .dependencies
            .extend(parsers::parse_pyproject_dependencies(&content));
    }

    analysis.framework = detect_framework(profile, &analysis.source_files);

    for file in &analysis.source_files {
        let named_entry = file
            .file_name()
            .map(|n| PYTHON_ENTRY_NAMES.contains(&n))
            .unwrap_or(false);
        let has_guard = file
            .content
            .as_deref()
            .map(|c| c.contains(PYTHON_MAIN_GUARD))
            .unwrap_or(false);
        if named_entry || has_guard {
            analysis.entry_points.push(file.path.clone());
        }
    }
}

fn extract_go(profile: &EcosystemProfile, analysis: &mut ProjectAnalysis) {
    analysis.package_manager = Some("go".to_string());

    if let Some(content) = analysis.config_file("go.mod").and_then(|f| f.content.clone()) {
        analysis.dependencies.extend(parsers::parse_go_mod(&content));
    }

    analysis.framework = detect_framework(profile, &analysis.source_files);

    for file in &analysis.source_files {
        let is_main = file.file_name() == Some("main.go");
        let has_main_fn = file
            .content
            .as_deref()
            .map(|c| c.contains(GO_MAIN_SIGNATURE))
            .unwrap_or(false);
        if is_main || has_main_fn {
            analysis.entry_points.push(file.path.clone());
        }
    }
}

fn extract_node(profile: &EcosystemProfile, analysis: &mut ProjectAnalysis) {
    analysis.package_manager = if analysis.has_config_file("yarn.lock") {
        Some("yarn".to_string())
    } else if analysis.has_config_file("pnpm-lock.yaml") {
        Some("pnpm".to_string())
    } else {
        Some("npm".to_string())
    };

    let package_info = analysis
        .config_file("package.json")
        .and_then(|f| f.content.as_deref())
        .map(parsers::parse_package_json)
        .unwrap_or_default();

    analysis.dependencies.extend(package_info.dependencies);

    if let Some(main) = package_info.main {
        analysis.entry_points.push(main.into());
    } else {
        for file in &analysis.source_files {
            if file
                .file_name()
                .map(|n| NODE_ENTRY_NAMES.contains(&n))
                .unwrap_or(false)
            {
                analysis.entry_points.push(file.path.clone());
            }
        }
    }

    analysis.framework = detect_framework(profile, &analysis.source_files);
}

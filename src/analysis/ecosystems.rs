//! Ecosystem indicator tables and classification scoring.
//!
//! Each supported ecosystem declares marker files, marker extensions and the
//! file-bucket rules used after classification. Scoring weighs exact marker
//! filenames far above bare extensions so one `go.mod` outvotes a pile of
//! stray `.js` helpers.

use crate::analysis::types::{FileRecord, ProjectType};

const MARKER_FILE_SCORE: u32 = 10;
const MARKER_EXTENSION_SCORE: u32 = 1;

#[derive(Debug)]
pub struct EcosystemProfile {
    pub project_type: ProjectType,
    pub language: &'static str,
    pub marker_files: &'static [&'static str],
    pub marker_extensions: &'static [&'static str],
    pub config_files: &'static [&'static str],
    pub source_extensions: &'static [&'static str],
    pub static_extensions: &'static [&'static str],
    /// Framework name to content signatures, in detection order.
    pub framework_signatures: &'static [(&'static str, &'static [&'static str])],
}

/// Declaration order doubles as the tie-break priority: when two ecosystems
/// reach the same nonzero score, the earlier entry wins.
pub const ECOSYSTEMS: &[EcosystemProfile] = &[
    EcosystemProfile {
        project_type: ProjectType::Python,
        language: "python",
        marker_files: &[
            "requirements.txt",
            "setup.py",
            "pyproject.toml",
            "Pipfile",
            "setup.cfg",
        ],
        marker_extensions: &[".py"],
        config_files: &["requirements.txt", "pyproject.toml", "Pipfile", "setup.py"],
        source_extensions: &[".py"],
        static_extensions: &[".html", ".css", ".js", ".json"],
        framework_signatures: &[
            ("flask", &["from flask", "import flask", "Flask("]),
            ("django", &["from django", "import django", "DJANGO_SETTINGS"]),
            ("fastapi", &["from fastapi", "import fastapi", "FastAPI("]),
            ("tornado", &["import tornado", "tornado.web"]),
        ],
    },
    EcosystemProfile {
        project_type: ProjectType::Go,
        language: "go",
        marker_files: &["go.mod", "go.sum", "Gopkg.toml", "main.go"],
        marker_extensions: &[".go"],
        config_files: &["go.mod", "go.sum"],
        source_extensions: &[".go"],
        static_extensions: &[".html", ".css", ".js", ".json"],
        framework_signatures: &[
            ("gin", &["github.com/gin-gonic/gin", "gin.Default", "gin.New"]),
            ("echo", &["github.com/labstack/echo", "echo.New"]),
            ("fiber", &["github.com/gofiber/fiber", "fiber.New"]),
        ],
    },
    EcosystemProfile {
        project_type: ProjectType::Node,
        language: "javascript",
        marker_files: &[
            "package.json",
            "package-lock.json",
            "yarn.lock",
            "pnpm-lock.yaml",
        ],
        marker_extensions: &[".js", ".ts", ".tsx", ".jsx"],
        config_files: &[
            "package.json",
            "package-lock.json",
            "yarn.lock",
            "pnpm-lock.yaml",
        ],
        source_extensions: &[".js", ".ts", ".tsx", ".jsx"],
        static_extensions: &[".html", ".css", ".json"],
        framework_signatures: &[
            ("express", &["express", "app.listen"]),
            ("react", &["react", "ReactDOM"]),
            ("vue", &["vue", "new Vue"]),
            ("angular", &["@angular", "platformBrowserDynamic"]),
        ],
    },
    EcosystemProfile {
        project_type: ProjectType::Java,
        language: "java",
        marker_files: &["pom.xml", "build.gradle", "build.xml"],
        marker_extensions: &[".java", ".kt"],
        config_files: &["pom.xml", "build.gradle", "build.xml"],
        source_extensions: &[".java", ".kt"],
        static_extensions: &[".html", ".css", ".js", ".json"],
        framework_signatures: &[],
    },
    EcosystemProfile {
        project_type: ProjectType::Rust,
        language: "rust",
        marker_files: &["Cargo.toml", "Cargo.lock"],
        marker_extensions: &[".rs"],
        config_files: &["Cargo.toml", "Cargo.lock"],
        source_extensions: &[".rs"],
        static_extensions: &[".html", ".css", ".js", ".json"],
        framework_signatures: &[],
    },
];

impl EcosystemProfile {
    pub fn for_type(project_type: ProjectType) -> Option<&'static EcosystemProfile> {
        ECOSYSTEMS.iter().find(|p| p.project_type == project_type)
    }

    pub fn score(&self, files: &[FileRecord]) -> u32 {
        let mut score = 0;
        for file in files {
            if let Some(name) = file.file_name() {
                if self.marker_files.contains(&name) {
                    score += MARKER_FILE_SCORE;
                }
            }
            if let Some(ext) = file.extension() {
                if self.marker_extensions.contains(&ext.as_str()) {
                    score += MARKER_EXTENSION_SCORE;
                }
            }
        }
        score
    }

    pub fn is_config_file(&self, record: &FileRecord) -> bool {
        record
            .file_name()
            .map(|name| self.config_files.contains(&name))
            .unwrap_or(false)
    }

    pub fn is_source_file(&self, record: &FileRecord) -> bool {
        record
            .extension()
            .map(|ext| self.source_extensions.contains(&ext.as_str()))
            .unwrap_or(false)
    }

    pub fn is_static_file(&self, record: &FileRecord) -> bool {
        record
            .extension()
            .map(|ext| self.static_extensions.contains(&ext.as_str()))
            .unwrap_or(false)
    }
}

/// Scores every ecosystem over the collected file list and keeps the one
/// with the strictly highest total. A zero maximum classifies as unknown.
pub fn classify(files: &[FileRecord]) -> ProjectType {
    let mut best_type = ProjectType::Unknown;
    let mut best_score = 0;

    for profile in ECOSYSTEMS {
        let score = profile.score(files);
        if score > best_score {
            best_score = score;
            best_type = profile.project_type;
        }
    }

    best_type
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn record(path: &str) -> FileRecord {
        FileRecord::new(PathBuf::from(path), 1)
    }

    #[test]
    fn test_marker_file_dominates() {
        let files = vec![record("requirements.txt"), record("app.py")];
        assert_eq!(classify(&files), ProjectType::Python);
    }

    #[test]
    fn test_no_markers_is_unknown() {
        let files = vec![record("README.md"), record("notes.txt")];
        assert_eq!(classify(&files), ProjectType::Unknown);
    }

    #[test]
    fn test_empty_list_is_unknown() {
        assert_eq!(classify(&[]), ProjectType::Unknown);
    }

    #[test]
    fn test_node_markers() {
        let files = vec![record("package.json"), record("index.js"), record("lib.ts")];
        assert_eq!(classify(&files), ProjectType::Node);
    }

    #[test]
    fn test_go_outscores_stray_js() {
        // go.mod scores 10, three .js files only 3
        let files = vec![
            record("go.mod"),
            record("static/a.js"),
            record("static/b.js"),
            record("static/c.js"),
        ];
        assert_eq!(classify(&files), ProjectType::Go);
    }

    #[test]
    fn test_tie_resolves_to_declaration_order() {
        // One .py and one .go score 1 each; python is declared first
        let files = vec![record("tool.py"), record("tool.go")];
        assert_eq!(classify(&files), ProjectType::Python);
    }

    #[test]
    fn test_java_markers() {
        let files = vec![record("pom.xml"), record("src/Main.java")];
        assert_eq!(classify(&files), ProjectType::Java);
    }

    #[test]
    fn test_rust_markers() {
        let files = vec![record("Cargo.toml"), record("src/main.rs")];
        assert_eq!(classify(&files), ProjectType::Rust);
    }

    #[test]
    fn test_profile_buckets() {
        let profile = EcosystemProfile::for_type(ProjectType::Node).unwrap();
        assert!(profile.is_config_file(&record("package.json")));
        assert!(profile.is_source_file(&record("src/index.ts")));
        assert!(profile.is_static_file(&record("public/index.html")));
        // .js is source for node, and json is static even though it is
        // also a config extension elsewhere
        assert!(!profile.static_extensions.contains(&".js"));
    }
}

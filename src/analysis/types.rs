use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProjectType {
    Python,
    Go,
    Node,
    Java,
    Rust,
    Unknown,
}

impl ProjectType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProjectType::Python => "python",
            ProjectType::Go => "go",
            ProjectType::Node => "node",
            ProjectType::Java => "java",
            ProjectType::Rust => "rust",
            ProjectType::Unknown => "unknown",
        }
    }
}

impl fmt::Display for ProjectType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One regular file discovered during collection. `content` is populated only
/// for text files under the read threshold; everything else stays `None`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FileRecord {
    pub path: PathBuf,
    pub size: u64,
    pub content: Option<String>,
    pub is_binary: bool,
}

impl FileRecord {
    pub fn new(path: PathBuf, size: u64) -> Self {
        Self {
            path,
            size,
            content: None,
            is_binary: false,
        }
    }

    pub fn with_content(mut self, content: String) -> Self {
        self.content = Some(content);
        self
    }

    pub fn binary(mut self) -> Self {
        self.is_binary = true;
        self.content = None;
        self
    }

    pub fn file_name(&self) -> Option<&str> {
        self.path.file_name().and_then(|n| n.to_str())
    }

    pub fn extension(&self) -> Option<String> {
        self.path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| format!(".{}", e))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectAnalysis {
    pub root_path: PathBuf,
    pub project_type: ProjectType,
    pub language: String,
    pub framework: Option<String>,
    pub package_manager: Option<String>,
    pub dependencies: Vec<String>,
    pub entry_points: Vec<PathBuf>,
    pub config_files: Vec<FileRecord>,
    pub source_files: Vec<FileRecord>,
    pub static_files: Vec<FileRecord>,
}

impl ProjectAnalysis {
    pub fn empty(root_path: PathBuf, project_type: ProjectType) -> Self {
        Self {
            root_path,
            project_type,
            language: project_type.as_str().to_string(),
            framework: None,
            package_manager: None,
            dependencies: Vec::new(),
            entry_points: Vec::new(),
            config_files: Vec::new(),
            source_files: Vec::new(),
            static_files: Vec::new(),
        }
    }

    pub fn file_count(&self) -> usize {
        self.source_files.len() + self.config_files.len() + self.static_files.len()
    }

    pub fn has_config_file(&self, name: &str) -> bool {
        self.config_files
            .iter()
            .any(|f| f.file_name() == Some(name))
    }

    pub fn config_file(&self, name: &str) -> Option<&FileRecord> {
        self.config_files.iter().find(|f| f.file_name() == Some(name))
    }
}

impl fmt::Display for ProjectAnalysis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Project: {}", self.root_path.display())?;
        writeln!(f, "Type: {}", self.project_type)?;
        if let Some(ref framework) = self.framework {
            writeln!(f, "Framework: {}", framework)?;
        }
        writeln!(f, "Dependencies: {}", self.dependencies.len())?;
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanResult {
    pub success: bool,
    pub analysis: Option<ProjectAnalysis>,
    pub error: Option<String>,
    pub files_scanned: usize,
}

impl ScanResult {
    pub fn ok(analysis: ProjectAnalysis) -> Self {
        let files_scanned = analysis.file_count();
        Self {
            success: true,
            analysis: Some(analysis),
            error: None,
            files_scanned,
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            analysis: None,
            error: Some(message.into()),
            files_scanned: 0,
        }
    }
}

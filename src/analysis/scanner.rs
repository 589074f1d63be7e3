use crate::analysis::analyzer::ProjectAnalyzer;
use crate::analysis::types::ScanResult;
use std::path::Path;
use tracing::warn;

const MAX_LISTED_DEPENDENCIES: usize = 10;

/// Thin wrapper around [`ProjectAnalyzer`] that never fails at the call
/// boundary: every problem becomes a `ScanResult` with `success = false`.
pub struct RepositoryScanner {
    analyzer: ProjectAnalyzer,
}

impl Default for RepositoryScanner {
    fn default() -> Self {
        Self::new()
    }
}

impl RepositoryScanner {
    pub fn new() -> Self {
        Self {
            analyzer: ProjectAnalyzer::new(),
        }
    }

    pub fn with_analyzer(analyzer: ProjectAnalyzer) -> Self {
        Self { analyzer }
    }

    pub async fn scan(&self, path: &Path) -> ScanResult {
        // Resolve to an absolute path when possible so reported paths do
        // not depend on the caller's working directory.
        let resolved = path.canonicalize().unwrap_or_else(|_| path.to_path_buf());

        match self.analyzer.analyze(&resolved).await {
            Ok(analysis) => ScanResult::ok(analysis),
            Err(e) => {
                warn!(path = %resolved.display(), error = %e, "repository scan failed");
                ScanResult::failure(e.to_string())
            }
        }
    }
}

/// Renders a scan result as the human-readable summary returned by the
/// `scan_repository` tool and the `scan` subcommand.
pub fn format_scan_result(result: &ScanResult) -> String {
    let analysis = match (&result.analysis, &result.error) {
        (Some(a), _) => a,
        (None, error) => {
            return format!(
                "❌ **Repository Scan Failed**\n💥 **Error:** {}",
                error.as_deref().unwrap_or("unknown error")
            );
        }
    };

    let mut output = Vec::new();
    output.push("✅ **Repository Scan Results**".to_string());
    output.push(format!("📁 **Project Path:** {}", analysis.root_path.display()));
    output.push(format!("🏷️  **Project Type:** {}", analysis.project_type));
    output.push(format!("💬 **Language:** {}", analysis.language));

    if let Some(ref framework) = analysis.framework {
        output.push(format!("🧩 **Framework:** {}", framework));
    }
    if let Some(ref package_manager) = analysis.package_manager {
        output.push(format!("📦 **Package Manager:** {}", package_manager));
    }

    output.push(format!(
        "📄 **Files Scanned:** {} (source: {}, config: {}, static: {})",
        result.files_scanned,
        analysis.source_files.len(),
        analysis.config_files.len(),
        analysis.static_files.len()
    ));

    if !analysis.dependencies.is_empty() {
        let listed: Vec<&str> = analysis
            .dependencies
            .iter()
            .take(MAX_LISTED_DEPENDENCIES)
            .map(String::as_str)
            .collect();
        let mut line = format!(
            "🔗 **Dependencies ({}):** {}",
            analysis.dependencies.len(),
            listed.join(", ")
        );
        if analysis.dependencies.len() > MAX_LISTED_DEPENDENCIES {
            line.push_str(&format!(
                " … and {} more",
                analysis.dependencies.len() - MAX_LISTED_DEPENDENCIES
            ));
        }
        output.push(line);
    }

    if !analysis.entry_points.is_empty() {
        let entries: Vec<String> = analysis
            .entry_points
            .iter()
            .map(|p| p.display().to_string())
            .collect();
        output.push(format!("🎯 **Entry Points:** {}", entries.join(", ")));
    }

    output.join("\n")
}

//! Dockerfile generation keyed off project analysis.
//!
//! Each supported ecosystem has a template; options select slim/alpine base
//! images, multi-stage builds where the ecosystem benefits from them, and
//! custom trailing instructions.

use crate::analysis::{ProjectAnalysis, ProjectType};
use crate::process::run_command;
use regex::Regex;
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, warn};

const DEFAULT_GO_VERSION: &str = "1.21";
const GO_VERSION_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Clone)]
pub struct DockerfileOptions {
    pub port: u16,
    pub optimize_for_size: bool,
    pub multi_stage: bool,
    pub custom_instructions: Vec<String>,
}

impl Default for DockerfileOptions {
    fn default() -> Self {
        Self {
            port: 80,
            optimize_for_size: false,
            multi_stage: false,
            custom_instructions: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct DockerfileGenerationResult {
    pub success: bool,
    pub dockerfile_path: Option<PathBuf>,
    pub content: Option<String>,
    pub error: Option<String>,
}

impl DockerfileGenerationResult {
    pub fn ok(dockerfile_path: PathBuf, content: String) -> Self {
        Self {
            success: true,
            dockerfile_path: Some(dockerfile_path),
            content: Some(content),
            error: None,
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            dockerfile_path: None,
            content: None,
            error: Some(message.into()),
        }
    }
}

pub struct DockerfileGenerator {
    go_binary: PathBuf,
}

impl Default for DockerfileGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl DockerfileGenerator {
    pub fn new() -> Self {
        Self {
            go_binary: PathBuf::from("go"),
        }
    }

    /// Overrides the `go` binary used for toolchain version detection.
    pub fn with_go_binary(go_binary: PathBuf) -> Self {
        Self { go_binary }
    }

    /// Renders Dockerfile content for the analyzed project.
    pub async fn generate(&self, analysis: &ProjectAnalysis, options: &DockerfileOptions) -> String {
        let mut content = match analysis.project_type {
            ProjectType::Python => python_dockerfile(analysis, options),
            ProjectType::Node => node_dockerfile(analysis, options),
            ProjectType::Go => {
                let go_version = self.detect_go_version().await;
                go_dockerfile(options, &go_version)
            }
            ProjectType::Rust => rust_dockerfile(options),
            ProjectType::Java => java_dockerfile(analysis, options),
            ProjectType::Unknown => generic_dockerfile(options),
        };

        if !options.custom_instructions.is_empty() {
            content.push_str("\n# Custom instructions\n");
            for instruction in &options.custom_instructions {
                content.push_str(instruction);
                content.push('\n');
            }
        }

        content
    }

    /// Writes Dockerfile content into the project (or an explicit path).
    pub fn write(
        &self,
        project_path: &Path,
        content: &str,
        output_path: Option<&Path>,
    ) -> DockerfileGenerationResult {
        let dockerfile_path = output_path
            .map(Path::to_path_buf)
            .unwrap_or_else(|| project_path.join("Dockerfile"));

        match fs::write(&dockerfile_path, content) {
            Ok(()) => {
                debug!(path = %dockerfile_path.display(), "Dockerfile written");
                DockerfileGenerationResult::ok(dockerfile_path, content.to_string())
            }
            Err(e) => DockerfileGenerationResult::failure(format!(
                "Error saving Dockerfile to {}: {}",
                dockerfile_path.display(),
                e
            )),
        }
    }

    pub async fn generate_and_write(
        &self,
        analysis: &ProjectAnalysis,
        options: &DockerfileOptions,
        output_path: Option<&Path>,
    ) -> DockerfileGenerationResult {
        let content = self.generate(analysis, options).await;
        self.write(&analysis.root_path, &content, output_path)
    }

    /// Queries the local `go` toolchain for its version so generated images
    /// match the developer's environment. Falls back to a known-good
    /// release when the toolchain is absent or unparseable.
    async fn detect_go_version(&self) -> String {
        let output = match run_command(&self.go_binary, &["version"], GO_VERSION_TIMEOUT).await {
            Ok(o) if o.status_code == Some(0) => o,
            Ok(_) | Err(_) => {
                warn!("go toolchain not detected, using default version");
                return DEFAULT_GO_VERSION.to_string();
            }
        };

        // Output looks like "go version go1.24.4 linux/amd64"
        let re = Regex::new(r"go version go(\d+\.\d+(?:\.\d+)?)").expect("valid version pattern");
        re.captures(output.stdout.trim())
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str().to_string())
            .unwrap_or_else(|| DEFAULT_GO_VERSION.to_string())
    }
}

fn has_top_level_file(analysis: &ProjectAnalysis, name: &str) -> bool {
    analysis
        .source_files
        .iter()
        .chain(analysis.config_files.iter())
        .any(|f| f.path == Path::new(name))
}

fn python_dockerfile(analysis: &ProjectAnalysis, options: &DockerfileOptions) -> String {
    let base_image = if options.optimize_for_size {
        "python:3.11-slim"
    } else {
        "python:3.11"
    };

    let mut main_file = "app.py";
    if has_top_level_file(analysis, "main.py") {
        main_file = "main.py";
    } else if has_top_level_file(analysis, "server.py") {
        main_file = "server.py";
    }

    format!(
        r#"FROM {base_image}

WORKDIR /app

COPY requirements.txt .
RUN pip install --no-cache-dir -r requirements.txt

COPY . .

EXPOSE {port}

CMD ["python", "{main_file}"]
"#,
        base_image = base_image,
        port = options.port,
        main_file = main_file,
    )
}

fn node_dockerfile(analysis: &ProjectAnalysis, options: &DockerfileOptions) -> String {
    let base_image = if options.optimize_for_size {
        "node:18-alpine"
    } else {
        "node:18"
    };

    let mut main_file = "index.js";
    if has_top_level_file(analysis, "server.js") {
        main_file = "server.js";
    } else if has_top_level_file(analysis, "app.js") {
        main_file = "app.js";
    }

    format!(
        r#"FROM {base_image}

WORKDIR /app

COPY package*.json ./
RUN npm ci --only=production

COPY . .

EXPOSE {port}

CMD ["node", "{main_file}"]
"#,
        base_image = base_image,
        port = options.port,
        main_file = main_file,
    )
}

fn go_dockerfile(options: &DockerfileOptions, go_version: &str) -> String {
    if options.multi_stage {
        format!(
            r#"FROM golang:{go_version}-alpine AS builder

WORKDIR /app
COPY go.mod go.sum ./
RUN go mod download

COPY . .
RUN CGO_ENABLED=0 GOOS=linux go build -o main .

FROM alpine:latest
RUN apk --no-cache add ca-certificates
WORKDIR /root/

COPY --from=builder /app/main .

EXPOSE {port}

CMD ["./main"]
"#,
            go_version = go_version,
            port = options.port,
        )
    } else {
        let base_image = if options.optimize_for_size {
            format!("golang:{}-alpine", go_version)
        } else {
            format!("golang:{}", go_version)
        };
        format!(
            r#"FROM {base_image}

WORKDIR /app

COPY go.mod go.sum ./
RUN go mod download

COPY . .
RUN go build -o main .

EXPOSE {port}

CMD ["./main"]
"#,
            base_image = base_image,
            port = options.port,
        )
    }
}

fn rust_dockerfile(options: &DockerfileOptions) -> String {
    if options.multi_stage {
        format!(
            r#"FROM rust:1.70 AS builder

WORKDIR /app
COPY Cargo.toml Cargo.lock ./
RUN cargo fetch

COPY . .
RUN cargo build --release

FROM debian:bullseye-slim
RUN apt-get update && apt-get install -y ca-certificates && rm -rf /var/lib/apt/lists/*
WORKDIR /app

COPY --from=builder /app/target/release/* ./

EXPOSE {port}

CMD ["./main"]
"#,
            port = options.port,
        )
    } else {
        let base_image = if options.optimize_for_size {
            "rust:1.70-slim"
        } else {
            "rust:1.70"
        };
        format!(
            r#"FROM {base_image}

WORKDIR /app

COPY Cargo.toml Cargo.lock ./
RUN cargo fetch

COPY . .
RUN cargo build --release

EXPOSE {port}

CMD ["./target/release/main"]
"#,
            base_image = base_image,
            port = options.port,
        )
    }
}

fn java_dockerfile(analysis: &ProjectAnalysis, options: &DockerfileOptions) -> String {
    let base_image = if options.optimize_for_size {
        "openjdk:11-jre-slim"
    } else {
        "openjdk:11"
    };

    if analysis.has_config_file("pom.xml") {
        if options.multi_stage {
            format!(
                r#"FROM maven:3.8-openjdk-11 AS builder

WORKDIR /app
COPY pom.xml .
RUN mvn dependency:go-offline

COPY . .
RUN mvn package -DskipTests

FROM {base_image}
WORKDIR /app

COPY --from=builder /app/target/*.jar app.jar

EXPOSE {port}

CMD ["java", "-jar", "app.jar"]
"#,
                base_image = base_image,
                port = options.port,
            )
        } else {
            format!(
                r#"FROM maven:3.8-openjdk-11

WORKDIR /app

COPY pom.xml .
RUN mvn dependency:go-offline

COPY . .
RUN mvn package -DskipTests

EXPOSE {port}

CMD ["java", "-jar", "target/*.jar"]
"#,
                port = options.port,
            )
        }
    } else {
        format!(
            r#"FROM {base_image}

WORKDIR /app

COPY . .
RUN ./gradlew build

EXPOSE {port}

CMD ["java", "-jar", "build/libs/*.jar"]
"#,
            base_image = base_image,
            port = options.port,
        )
    }
}

fn generic_dockerfile(options: &DockerfileOptions) -> String {
    format!(
        r#"FROM alpine:latest

WORKDIR /app

COPY . .

EXPOSE {port}

CMD ["./app"]
"#,
        port = options.port,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::{FileRecord, ProjectAnalysis};
    use tempfile::TempDir;

    fn python_analysis() -> ProjectAnalysis {
        let mut analysis =
            ProjectAnalysis::empty(PathBuf::from("/proj"), ProjectType::Python);
        analysis
            .config_files
            .push(FileRecord::new(PathBuf::from("requirements.txt"), 10));
        analysis
            .source_files
            .push(FileRecord::new(PathBuf::from("app.py"), 10));
        analysis
    }

    #[tokio::test]
    async fn test_python_dockerfile_defaults() {
        let generator = DockerfileGenerator::new();
        let options = DockerfileOptions {
            port: 8000,
            ..Default::default()
        };

        let content = generator.generate(&python_analysis(), &options).await;

        assert!(content.starts_with("FROM python:3.11\n"));
        assert!(content.contains("pip install --no-cache-dir -r requirements.txt"));
        assert!(content.contains("EXPOSE 8000"));
        assert!(content.contains(r#"CMD ["python", "app.py"]"#));
    }

    #[tokio::test]
    async fn test_python_dockerfile_prefers_main_py() {
        let mut analysis = python_analysis();
        analysis
            .source_files
            .push(FileRecord::new(PathBuf::from("main.py"), 10));

        let generator = DockerfileGenerator::new();
        let content = generator
            .generate(&analysis, &DockerfileOptions::default())
            .await;

        assert!(content.contains(r#"CMD ["python", "main.py"]"#));
    }

    #[tokio::test]
    async fn test_python_dockerfile_size_optimized() {
        let generator = DockerfileGenerator::new();
        let options = DockerfileOptions {
            optimize_for_size: true,
            ..Default::default()
        };

        let content = generator.generate(&python_analysis(), &options).await;
        assert!(content.starts_with("FROM python:3.11-slim\n"));
    }

    #[tokio::test]
    async fn test_node_dockerfile() {
        let mut analysis = ProjectAnalysis::empty(PathBuf::from("/proj"), ProjectType::Node);
        analysis
            .config_files
            .push(FileRecord::new(PathBuf::from("package.json"), 10));
        analysis
            .source_files
            .push(FileRecord::new(PathBuf::from("server.js"), 10));

        let generator = DockerfileGenerator::new();
        let options = DockerfileOptions {
            port: 3000,
            optimize_for_size: true,
            ..Default::default()
        };

        let content = generator.generate(&analysis, &options).await;

        assert!(content.starts_with("FROM node:18-alpine\n"));
        assert!(content.contains("npm ci --only=production"));
        assert!(content.contains(r#"CMD ["node", "server.js"]"#));
    }

    #[tokio::test]
    async fn test_go_dockerfile_multi_stage_with_fallback_version() {
        let analysis = ProjectAnalysis::empty(PathBuf::from("/proj"), ProjectType::Go);
        let generator = DockerfileGenerator::with_go_binary(PathBuf::from("/nonexistent/go"));
        let options = DockerfileOptions {
            multi_stage: true,
            ..Default::default()
        };

        let content = generator.generate(&analysis, &options).await;

        assert!(content.starts_with("FROM golang:1.21-alpine AS builder\n"));
        assert!(content.contains("CGO_ENABLED=0 GOOS=linux go build -o main ."));
        assert!(content.contains("FROM alpine:latest"));
        assert!(content.contains("ca-certificates"));
    }

    #[tokio::test]
    async fn test_rust_dockerfile_single_stage() {
        let analysis = ProjectAnalysis::empty(PathBuf::from("/proj"), ProjectType::Rust);
        let generator = DockerfileGenerator::new();

        let content = generator
            .generate(&analysis, &DockerfileOptions::default())
            .await;

        assert!(content.starts_with("FROM rust:1.70\n"));
        assert!(content.contains("cargo build --release"));
        assert!(content.contains(r#"CMD ["./target/release/main"]"#));
    }

    #[tokio::test]
    async fn test_java_dockerfile_maven_multi_stage() {
        let mut analysis = ProjectAnalysis::empty(PathBuf::from("/proj"), ProjectType::Java);
        analysis
            .config_files
            .push(FileRecord::new(PathBuf::from("pom.xml"), 10));

        let generator = DockerfileGenerator::new();
        let options = DockerfileOptions {
            multi_stage: true,
            ..Default::default()
        };

        let content = generator.generate(&analysis, &options).await;

        assert!(content.starts_with("FROM maven:3.8-openjdk-11 AS builder\n"));
        assert!(content.contains("mvn package -DskipTests"));
        assert!(content.contains(r#"CMD ["java", "-jar", "app.jar"]"#));
    }

    #[tokio::test]
    async fn test_unknown_project_gets_generic_dockerfile() {
        let analysis = ProjectAnalysis::empty(PathBuf::from("/proj"), ProjectType::Unknown);
        let generator = DockerfileGenerator::new();

        let content = generator
            .generate(&analysis, &DockerfileOptions::default())
            .await;

        assert!(content.starts_with("FROM alpine:latest\n"));
        assert!(content.contains("EXPOSE 80"));
    }

    #[tokio::test]
    async fn test_custom_instructions_appended() {
        let generator = DockerfileGenerator::new();
        let options = DockerfileOptions {
            custom_instructions: vec![
                "RUN apk add --no-cache curl".to_string(),
                "ENV APP_ENV=production".to_string(),
            ],
            ..Default::default()
        };

        let content = generator.generate(&python_analysis(), &options).await;

        assert!(content.contains("# Custom instructions"));
        assert!(content.contains("RUN apk add --no-cache curl"));
        assert!(content.ends_with("ENV APP_ENV=production\n"));
    }

    #[tokio::test]
    async fn test_write_dockerfile_to_project() {
        let temp_dir = TempDir::new().unwrap();
        let generator = DockerfileGenerator::new();

        let result = generator.write(temp_dir.path(), "FROM alpine:latest\n", None);

        assert!(result.success);
        let path = result.dockerfile_path.unwrap();
        assert_eq!(path, temp_dir.path().join("Dockerfile"));
        assert_eq!(
            fs::read_to_string(path).unwrap(),
            "FROM alpine:latest\n"
        );
    }

    #[tokio::test]
    async fn test_write_dockerfile_failure_becomes_result() {
        let generator = DockerfileGenerator::new();
        let result = generator.write(Path::new("/nonexistent/dir"), "FROM alpine\n", None);

        assert!(!result.success);
        assert!(result.error.unwrap().contains("Error saving Dockerfile"));
    }
}

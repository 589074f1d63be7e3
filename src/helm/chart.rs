//! Helm chart scaffolding.
//!
//! Produces a `helm create`-style chart (Chart.yaml, values.yaml,
//! deployment/service templates and label helpers) under
//! `<project>/helm/<chart_name>/`.

use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

#[derive(Debug, Clone)]
pub struct ChartRequest {
    pub chart_name: String,
    pub app_version: String,
    pub chart_version: String,
    pub image_name: String,
    pub image_tag: String,
    pub port: u16,
    pub namespace: String,
}

impl ChartRequest {
    /// A request with standard defaults; the image repository defaults to
    /// the chart name.
    pub fn new(chart_name: impl Into<String>) -> Self {
        let chart_name = chart_name.into();
        Self {
            image_name: chart_name.clone(),
            chart_name,
            app_version: "1.0.0".to_string(),
            chart_version: "0.1.0".to_string(),
            image_tag: "latest".to_string(),
            port: 80,
            namespace: "default".to_string(),
        }
    }

    pub fn with_app_version(mut self, app_version: impl Into<String>) -> Self {
        self.app_version = app_version.into();
        self
    }

    pub fn with_chart_version(mut self, chart_version: impl Into<String>) -> Self {
        self.chart_version = chart_version.into();
        self
    }

    pub fn with_image_name(mut self, image_name: impl Into<String>) -> Self {
        self.image_name = image_name.into();
        self
    }

    pub fn with_image_tag(mut self, image_tag: impl Into<String>) -> Self {
        self.image_tag = image_tag.into();
        self
    }

    pub fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    pub fn with_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = namespace.into();
        self
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ChartGenerationResult {
    pub success: bool,
    pub chart_path: Option<PathBuf>,
    pub error: Option<String>,
}

impl ChartGenerationResult {
    pub fn ok(chart_path: PathBuf) -> Self {
        Self {
            success: true,
            chart_path: Some(chart_path),
            error: None,
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            chart_path: None,
            error: Some(message.into()),
        }
    }
}

#[derive(Default)]
pub struct HelmChartGenerator;

impl HelmChartGenerator {
    pub fn new() -> Self {
        Self
    }

    /// Writes the chart under `<project>/helm/<chart_name>/`, creating
    /// directories as needed and overwriting existing files.
    pub fn generate(&self, project_path: &Path, request: &ChartRequest) -> ChartGenerationResult {
        if !project_path.exists() {
            return ChartGenerationResult::failure("Project path does not exist");
        }

        let chart_dir = project_path.join("helm").join(&request.chart_name);
        let templates_dir = chart_dir.join("templates");

        if let Err(e) = fs::create_dir_all(&templates_dir) {
            return ChartGenerationResult::failure(format!(
                "Failed to create chart directories: {}",
                e
            ));
        }

        let files = [
            (chart_dir.join("Chart.yaml"), chart_yaml(request)),
            (chart_dir.join("values.yaml"), values_yaml(request)),
            (
                templates_dir.join("deployment.yaml"),
                deployment_template(request),
            ),
            (
                templates_dir.join("service.yaml"),
                service_template(&request.chart_name),
            ),
            (
                templates_dir.join("_helpers.tpl"),
                helpers_template(&request.chart_name),
            ),
        ];

        for (path, content) in files {
            if let Err(e) = fs::write(&path, content) {
                return ChartGenerationResult::failure(format!(
                    "Failed to write {}: {}",
                    path.display(),
                    e
                ));
            }
        }

        info!(chart = %request.chart_name, path = %chart_dir.display(), "Helm chart generated");
        ChartGenerationResult::ok(chart_dir)
    }
}

fn chart_yaml(request: &ChartRequest) -> String {
    format!(
        r#"apiVersion: v2
name: {name}
description: A Helm chart for {name}
type: application
version: {chart_version}
appVersion: {app_version}
"#,
        name = request.chart_name,
        chart_version = request.chart_version,
        app_version = request.app_version,
    )
}

fn values_yaml(request: &ChartRequest) -> String {
    format!(
        r#"# Default values for {name}
replicaCount: 1

image:
  repository: {image_name}
  pullPolicy: IfNotPresent
  tag: {image_tag}

service:
  type: ClusterIP
  port: {port}

ingress:
  enabled: false

resources: {{}}

autoscaling:
  enabled: false
  minReplicas: 1
  maxReplicas: 100
  targetCPUUtilizationPercentage: 80

nodeSelector: {{}}

tolerations: []

affinity: {{}}
"#,
        name = request.chart_name,
        image_name = request.image_name,
        image_tag = request.image_tag,
        port = request.port,
    )
}

fn deployment_template(request: &ChartRequest) -> String {
    format!(
        r#"apiVersion: apps/v1
kind: Deployment
metadata:
  name: {{{{ include "{name}.fullname" . }}}}
  labels:
    {{{{- include "{name}.labels" . | nindent 4 }}}}
spec:
  {{{{- if not .Values.autoscaling.enabled }}}}
  replicas: {{{{ .Values.replicaCount }}}}
  {{{{- end }}}}
  selector:
    matchLabels:
      {{{{- include "{name}.selectorLabels" . | nindent 6 }}}}
  template:
    metadata:
      labels:
        {{{{- include "{name}.selectorLabels" . | nindent 8 }}}}
    spec:
      containers:
        - name: {{{{ .Chart.Name }}}}
          image: "{{{{ .Values.image.repository }}}}:{{{{ .Values.image.tag | default .Chart.AppVersion }}}}"
          imagePullPolicy: {{{{ .Values.image.pullPolicy }}}}
          ports:
            - name: http
              containerPort: {port}
              protocol: TCP
          livenessProbe:
            httpGet:
              path: /
              port: http
          readinessProbe:
            httpGet:
              path: /
              port: http
          resources:
            {{{{- toYaml .Values.resources | nindent 12 }}}}
"#,
        name = request.chart_name,
        port = request.port,
    )
}

fn service_template(name: &str) -> String {
    format!(
        r#"apiVersion: v1
kind: Service
metadata:
  name: {{{{ include "{name}.fullname" . }}}}
  labels:
    {{{{- include "{name}.labels" . | nindent 4 }}}}
spec:
  type: {{{{ .Values.service.type }}}}
  ports:
    - port: {{{{ .Values.service.port }}}}
      targetPort: http
      protocol: TCP
      name: http
  selector:
    {{{{- include "{name}.selectorLabels" . | nindent 4 }}}}
"#,
        name = name,
    )
}

fn helpers_template(name: &str) -> String {
    format!(
        r#"{{{{/*
Expand the name of the chart.
*/}}}}
{{{{- define "{name}.name" -}}}}
{{{{- default .Chart.Name .Values.nameOverride | trunc 63 | trimSuffix "-" }}}}
{{{{- end }}}}

{{{{/*
Create a default fully qualified app name.
We truncate at 63 chars because some Kubernetes name fields are limited to this (by the DNS naming spec).
If release name contains chart name it will be used as a full name.
*/}}}}
{{{{- define "{name}.fullname" -}}}}
{{{{- if .Values.fullnameOverride }}}}
{{{{- .Values.fullnameOverride | trunc 63 | trimSuffix "-" }}}}
{{{{- else }}}}
{{{{- $name := default .Chart.Name .Values.nameOverride }}}}
{{{{- if contains $name .Release.Name }}}}
{{{{- .Release.Name | trunc 63 | trimSuffix "-" }}}}
{{{{- else }}}}
{{{{- printf "%s-%s" .Release.Name $name | trunc 63 | trimSuffix "-" }}}}
{{{{- end }}}}
{{{{- end }}}}
{{{{- end }}}}

{{{{/*
Create chart name and version as used by the chart label.
*/}}}}
{{{{- define "{name}.chart" -}}}}
{{{{- printf "%s-%s" .Chart.Name .Chart.Version | replace "+" "_" | trunc 63 | trimSuffix "-" }}}}
{{{{- end }}}}

{{{{/*
Common labels
*/}}}}
{{{{- define "{name}.labels" -}}}}
helm.sh/chart: {{{{ include "{name}.chart" . }}}}
{{{{ include "{name}.selectorLabels" . }}}}
{{{{- if .Chart.AppVersion }}}}
app.kubernetes.io/version: {{{{ .Chart.AppVersion | quote }}}}
{{{{- end }}}}
app.kubernetes.io/managed-by: {{{{ .Release.Service }}}}
{{{{- end }}}}

{{{{/*
Selector labels
*/}}}}
{{{{- define "{name}.selectorLabels" -}}}}
app.kubernetes.io/name: {{{{ include "{name}.name" . }}}}
app.kubernetes.io/instance: {{{{ .Release.Name }}}}
{{{{- end }}}}
"#,
        name = name,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_request_defaults() {
        let request = ChartRequest::new("my-app");

        assert_eq!(request.chart_name, "my-app");
        assert_eq!(request.image_name, "my-app");
        assert_eq!(request.app_version, "1.0.0");
        assert_eq!(request.chart_version, "0.1.0");
        assert_eq!(request.image_tag, "latest");
        assert_eq!(request.port, 80);
        assert_eq!(request.namespace, "default");
    }

    #[test]
    fn test_request_builders() {
        let request = ChartRequest::new("api")
            .with_image_name("registry.local/api")
            .with_image_tag("v3")
            .with_port(8080)
            .with_namespace("staging");

        assert_eq!(request.image_name, "registry.local/api");
        assert_eq!(request.image_tag, "v3");
        assert_eq!(request.port, 8080);
        assert_eq!(request.namespace, "staging");
    }

    #[test]
    fn test_generate_writes_chart_files() {
        let temp_dir = TempDir::new().unwrap();
        let generator = HelmChartGenerator::new();
        let request = ChartRequest::new("my-app").with_port(8080);

        let result = generator.generate(temp_dir.path(), &request);

        assert!(result.success);
        let chart_dir = result.chart_path.unwrap();
        assert_eq!(chart_dir, temp_dir.path().join("helm").join("my-app"));
        for file in [
            "Chart.yaml",
            "values.yaml",
            "templates/deployment.yaml",
            "templates/service.yaml",
            "templates/_helpers.tpl",
        ] {
            assert!(chart_dir.join(file).exists(), "missing {}", file);
        }
    }

    #[test]
    fn test_chart_yaml_fields() {
        let request = ChartRequest::new("my-app").with_chart_version("0.2.0");
        let content = chart_yaml(&request);

        assert!(content.contains("name: my-app"));
        assert!(content.contains("version: 0.2.0"));
        assert!(content.contains("appVersion: 1.0.0"));
        assert!(content.contains("type: application"));
    }

    #[test]
    fn test_values_yaml_parses_and_carries_overrides() {
        let request = ChartRequest::new("my-app")
            .with_image_tag("v2")
            .with_port(9090);
        let content = values_yaml(&request);

        let values: serde_yaml::Value = serde_yaml::from_str(&content).unwrap();
        assert_eq!(values["image"]["repository"], "my-app");
        assert_eq!(values["image"]["tag"], "v2");
        assert_eq!(values["service"]["port"], 9090);
        assert_eq!(values["replicaCount"], 1);
        assert_eq!(values["autoscaling"]["enabled"], false);
    }

    #[test]
    fn test_deployment_template_references_chart_helpers() {
        let request = ChartRequest::new("my-app").with_port(3000);
        let content = deployment_template(&request);

        assert!(content.contains(r#"{{ include "my-app.fullname" . }}"#));
        assert!(content.contains("containerPort: 3000"));
        assert!(content.contains(".Values.image.repository"));
    }

    #[test]
    fn test_helpers_template_defines_labels() {
        let content = helpers_template("my-app");

        assert!(content.contains(r#"{{- define "my-app.fullname" -}}"#));
        assert!(content.contains(r#"{{- define "my-app.selectorLabels" -}}"#));
        assert!(content.contains("app.kubernetes.io/name"));
    }

    #[test]
    fn test_generate_missing_project_path() {
        let generator = HelmChartGenerator::new();
        let result = generator.generate(Path::new("/nonexistent/project"), &ChartRequest::new("x"));

        assert!(!result.success);
        assert_eq!(result.error.unwrap(), "Project path does not exist");
    }
}

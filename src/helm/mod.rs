//! Helm integration: chart scaffolding and release management.

pub mod chart;
pub mod cli;

pub use chart::{ChartGenerationResult, ChartRequest, HelmChartGenerator};
pub use cli::{HelmCli, HelmInstallRequest};

pub mod analyzer;
pub mod collector;
pub mod ecosystems;
pub mod parsers;
pub mod scanner;
pub mod types;

pub use analyzer::ProjectAnalyzer;
pub use collector::{AnalysisError, CollectorConfig, FileCollector};
pub use ecosystems::{classify, EcosystemProfile, ECOSYSTEMS};
pub use scanner::{format_scan_result, RepositoryScanner};
pub use types::{FileRecord, ProjectAnalysis, ProjectType, ScanResult};

pub mod docker;
pub mod internal;
pub mod kubernetes;
pub mod registry;
pub mod repository;
pub mod trait_def;
pub mod workflow;

pub use registry::ToolRegistry;
pub use trait_def::Tool;

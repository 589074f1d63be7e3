//! Docker integration: Dockerfile generation and image builds.

pub mod cli;
pub mod dockerfile;

pub use cli::{image_reference, DockerCli};
pub use dockerfile::{
    DockerfileGenerationResult, DockerfileGenerator, DockerfileOptions,
};

//! Renders a cluster configuration as deployable artifacts: Spring XML,
//! Java code, a Dockerfile and a datasource properties stub.

pub mod buffer;
pub mod common;
pub mod docker;
mod error;
pub mod java;
pub mod properties;
pub mod registry;
pub mod xml;

use chrono::{DateTime, Utc};
use gridcfg_models::{Cluster, NearCacheConfiguration, is_plain_file_name};
use tracing::debug;

pub use buffer::OutputBuffer;
pub use error::GenerateError;
pub use registry::{Generator, GeneratorRegistry, RenderContext};

#[derive(Debug, Clone, Default)]
pub struct GenerateOptions {
    /// Client near cache; when set the artifacts configure a client node.
    pub client_near: Option<NearCacheConfiguration>,
    /// Dockerfile base image.
    pub os: Option<String>,
    /// Stamped into the banner when present.
    pub generated_at: Option<DateTime<Utc>>,
}

impl GenerateOptions {
    pub fn is_client(&self) -> bool {
        self.client_near.is_some()
    }
}

/// One named output file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artifact {
    pub name: String,
    pub content: String,
}

impl Artifact {
    fn new(name: impl Into<String>, content: String) -> Self {
        Self {
            name: name.into(),
            content,
        }
    }
}

pub fn generate(
    cluster: &Cluster,
    format: &str,
    options: &GenerateOptions,
) -> Result<String, GenerateError> {
    let ctx = RenderContext { cluster, options };
    GeneratorRegistry::new().render(format, &ctx)
}

/// All artifacts for one cluster. Server bundles also carry the Dockerfile
/// and, when any store references a datasource, `secret.properties`.
pub fn bundle(
    cluster: &Cluster,
    options: &GenerateOptions,
) -> Result<Vec<Artifact>, GenerateError> {
    if !is_plain_file_name(&cluster.name) {
        return Err(GenerateError::InvalidClusterName(cluster.name.clone()));
    }

    let registry = GeneratorRegistry::new();
    let ctx = RenderContext { cluster, options };
    let mut artifacts = Vec::new();

    if !options.is_client() {
        artifacts.push(Artifact::new("Dockerfile", registry.render("dockerfile", &ctx)?));

        let props = registry.render("properties", &ctx)?;
        if !props.is_empty() {
            artifacts.push(Artifact::new("secret.properties", props));
        }
    }

    artifacts.push(Artifact::new(
        format!("{}.xml", cluster.name),
        registry.render("xml", &ctx)?,
    ));
    artifacts.push(Artifact::new(
        format!("{}.snippet.java", cluster.name),
        registry.render("java-snippet", &ctx)?,
    ));
    artifacts.push(Artifact::new(
        "ConfigurationFactory.java",
        registry.render("java-factory-class", &ctx)?,
    ));

    debug!(
        cluster = %cluster.name,
        artifacts = artifacts.len(),
        client = options.is_client(),
        "bundle rendered"
    );
    Ok(artifacts)
}

/// Base name of the bundle archive, e.g. `grid-server-configuration`.
pub fn bundle_name(cluster: &Cluster, client: bool) -> String {
    format!(
        "{}-{}-configuration",
        cluster.name,
        if client { "client" } else { "server" }
    )
}

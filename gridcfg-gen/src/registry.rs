use gridcfg_models::Cluster;

use crate::common::main_comment;
use crate::{GenerateError, GenerateOptions, docker, java, properties, xml};

/// Selects one output format by name or alias.
#[derive(Debug)]
pub struct GeneratorRegistry {
    generators: Vec<Box<dyn Generator + Send + Sync>>,
}

pub trait Generator: std::fmt::Debug {
    fn name(&self) -> &'static str;
    fn aliases(&self) -> &'static [&'static str] {
        &[]
    }
    fn render(&self, ctx: &RenderContext<'_>) -> Result<String, GenerateError>;
}

#[derive(Clone, Copy, Debug)]
pub struct RenderContext<'a> {
    pub cluster: &'a Cluster,
    pub options: &'a GenerateOptions,
}

impl RenderContext<'_> {
    pub fn banner(&self) -> String {
        main_comment(self.options.generated_at)
    }
}

impl Default for GeneratorRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl GeneratorRegistry {
    pub fn new() -> Self {
        let generators: Vec<Box<dyn Generator + Send + Sync>> = vec![
            Box::new(XmlGenerator),
            Box::new(JavaSnippetGenerator),
            Box::new(JavaFactoryGenerator),
            Box::new(DockerGenerator),
            Box::new(PropertiesGenerator),
        ];
        Self { generators }
    }

    pub fn find(&self, name: &str) -> Option<&(dyn Generator + Send + Sync)> {
        let name = name.trim();
        self.generators
            .iter()
            .find(|g| {
                g.name().eq_ignore_ascii_case(name)
                    || g.aliases().iter().any(|a| a.eq_ignore_ascii_case(name))
            })
            .map(|g| g.as_ref())
    }

    pub fn generators(&self) -> impl Iterator<Item = &(dyn Generator + Send + Sync)> {
        self.generators.iter().map(|g| g.as_ref())
    }

    pub fn render(&self, format: &str, ctx: &RenderContext<'_>) -> Result<String, GenerateError> {
        let generator = self
            .find(format)
            .ok_or_else(|| GenerateError::UnknownFormat(format.to_string()))?;
        generator.render(ctx)
    }
}

#[derive(Clone, Copy, Debug, Default)]
pub struct XmlGenerator;

impl Generator for XmlGenerator {
    fn name(&self) -> &'static str {
        "xml"
    }
    fn aliases(&self) -> &'static [&'static str] {
        &["spring"]
    }
    fn render(&self, ctx: &RenderContext<'_>) -> Result<String, GenerateError> {
        xml::cluster(ctx.cluster, ctx.options.client_near.as_ref(), &ctx.banner())
    }
}

#[derive(Clone, Copy, Debug, Default)]
pub struct JavaSnippetGenerator;

impl Generator for JavaSnippetGenerator {
    fn name(&self) -> &'static str {
        "java-snippet"
    }
    fn aliases(&self) -> &'static [&'static str] {
        &["snippet", "java"]
    }
    fn render(&self, ctx: &RenderContext<'_>) -> Result<String, GenerateError> {
        java::cluster(ctx.cluster, false, ctx.options.client_near.as_ref(), &ctx.banner())
    }
}

#[derive(Clone, Copy, Debug, Default)]
pub struct JavaFactoryGenerator;

impl Generator for JavaFactoryGenerator {
    fn name(&self) -> &'static str {
        "java-factory-class"
    }
    fn aliases(&self) -> &'static [&'static str] {
        &["factory", "class"]
    }
    fn render(&self, ctx: &RenderContext<'_>) -> Result<String, GenerateError> {
        java::cluster(ctx.cluster, true, ctx.options.client_near.as_ref(), &ctx.banner())
    }
}

#[derive(Clone, Copy, Debug, Default)]
pub struct DockerGenerator;

impl Generator for DockerGenerator {
    fn name(&self) -> &'static str {
        "dockerfile"
    }
    fn aliases(&self) -> &'static [&'static str] {
        &["docker"]
    }
    fn render(&self, ctx: &RenderContext<'_>) -> Result<String, GenerateError> {
        Ok(docker::cluster_docker(
            ctx.cluster,
            ctx.options.os.as_deref(),
            &ctx.banner(),
        ))
    }
}

#[derive(Clone, Copy, Debug, Default)]
pub struct PropertiesGenerator;

impl Generator for PropertiesGenerator {
    fn name(&self) -> &'static str {
        "properties"
    }
    fn aliases(&self) -> &'static [&'static str] {
        &["props", "secret"]
    }
    fn render(&self, ctx: &RenderContext<'_>) -> Result<String, GenerateError> {
        Ok(properties::datasources_properties(ctx.cluster, &ctx.banner()))
    }
}

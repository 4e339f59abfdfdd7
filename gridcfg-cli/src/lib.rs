mod archive;
mod config;
mod input;
mod types;

use std::path::PathBuf;

use anyhow::Context;
use chrono::Utc;
use envconfig::Envconfig;
use gridcfg_gen::{GenerateOptions, GeneratorRegistry};
use gridcfg_models::NearCacheConfiguration;
use tracing::{debug, info};

pub use archive::{ArchiveFormat, write_artifacts};
pub use config::CliConfig;
pub use input::{load_cluster, parse_cluster};
pub use types::{BundleOperation, GenerateOperation, GridcfgCli, GridcfgCommands, RenderArgs};

pub fn run(cli: GridcfgCli) -> anyhow::Result<()> {
    let config = CliConfig::init_from_env().context("invalid GRIDCFG_* environment")?;
    debug!("use option {cli:?} with {config:?}");

    match &cli.command {
        GridcfgCommands::Generate { opt } => handle_generate(opt, &config),
        GridcfgCommands::Bundle { opt } => handle_bundle(opt, &config),
        GridcfgCommands::Formats => {
            handle_formats();
            Ok(())
        }
    }
}

fn options(args: &RenderArgs, config: &CliConfig) -> anyhow::Result<GenerateOptions> {
    let client_near = match &args.client_near {
        Some(path) => Some(input::load_near_configuration(path)?),
        None if args.client => Some(NearCacheConfiguration::default()),
        None => None,
    };
    let generated_at = (config.timestamp && !args.no_timestamp).then(Utc::now);

    Ok(GenerateOptions {
        client_near,
        os: Some(args.os.clone().unwrap_or_else(|| config.default_os.clone())),
        generated_at,
    })
}

fn handle_generate(opt: &GenerateOperation, config: &CliConfig) -> anyhow::Result<()> {
    let cluster = load_cluster(&opt.render.input)?;
    let options = options(&opt.render, config)?;
    let text = gridcfg_gen::generate(&cluster, &opt.format, &options)?;

    match &opt.output {
        Some(path) => {
            std::fs::write(path, &text)
                .with_context(|| format!("failed to write {}", path.display()))?;
            info!(output = %path.display(), format = %opt.format, "artifact written");
        }
        None => print!("{}", text),
    }
    Ok(())
}

fn handle_bundle(opt: &BundleOperation, config: &CliConfig) -> anyhow::Result<()> {
    let cluster = load_cluster(&opt.render.input)?;
    let options = options(&opt.render, config)?;
    let artifacts = gridcfg_gen::bundle(&cluster, &options)?;

    let root = gridcfg_gen::bundle_name(&cluster, options.is_client());
    let output = opt
        .output
        .clone()
        .unwrap_or_else(|| PathBuf::from(&config.output_dir).join(&root));

    write_artifacts(&output, &root, &artifacts)?;
    println!("{}", output.display());
    Ok(())
}

fn handle_formats() {
    for generator in GeneratorRegistry::new().generators() {
        let aliases = generator.aliases();
        if aliases.is_empty() {
            println!("{}", generator.name());
        } else {
            println!("{} ({})", generator.name(), aliases.join(", "));
        }
    }
}

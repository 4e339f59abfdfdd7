use std::path::PathBuf;

/// Render cache cluster configurations as deployable artifacts
#[derive(clap::Parser, Clone, Debug)]
#[clap(author, version, about, long_about = None)]
pub struct GridcfgCli {
    #[command(subcommand)]
    pub command: GridcfgCommands,
}

#[derive(clap::Subcommand, Clone, Debug)]
pub enum GridcfgCommands {
    /// Render one artifact
    #[clap(aliases = &["gen", "g"])]
    Generate {
        #[clap(flatten)]
        opt: GenerateOperation,
    },
    /// Render every artifact into a directory or a tarball
    #[clap(aliases = &["b"])]
    Bundle {
        #[clap(flatten)]
        opt: BundleOperation,
    },
    /// List output formats and their aliases
    #[clap(aliases = &["f"])]
    Formats,
}

#[derive(clap::Args, Clone, Debug)]
pub struct GenerateOperation {
    /// Output format, see `gridcfg formats`
    #[arg(short, long, default_value = "xml")]
    pub format: String,
    /// File to write, stdout if not given
    #[arg(short, long)]
    pub output: Option<PathBuf>,
    #[clap(flatten)]
    pub render: RenderArgs,
}

#[derive(clap::Args, Clone, Debug)]
pub struct BundleOperation {
    /// Target directory, or a `.tar`, `.tar.gz` or `.tgz` file.
    /// Defaults to `<GRIDCFG_OUTPUT_DIR>/<cluster>-<server|client>-configuration`
    #[arg(short, long)]
    pub output: Option<PathBuf>,
    #[clap(flatten)]
    pub render: RenderArgs,
}

#[derive(clap::Args, Clone, Debug)]
pub struct RenderArgs {
    /// Cluster description (JSON or YAML) as file path or stdin (use `-` for stdin).
    /// Example: `cat cluster.json | gridcfg generate -i -`
    #[arg(short, long, default_value = "-")]
    pub input: clap_stdin::FileOrStdin,
    /// Client near cache configuration file (JSON or YAML); renders client artifacts
    #[arg(long)]
    pub client_near: Option<PathBuf>,
    /// Render client artifacts with a default near cache
    #[arg(long, conflicts_with = "client_near")]
    pub client: bool,
    /// Dockerfile base image
    #[arg(long)]
    pub os: Option<String>,
    /// Leave the generation time out of the banner
    #[arg(long)]
    pub no_timestamp: bool,
}

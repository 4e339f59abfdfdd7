use envconfig::Envconfig;

#[derive(Envconfig, Clone, Debug)]
pub struct CliConfig {
    #[envconfig(from = "GRIDCFG_DEFAULT_OS", default = "debian:8")]
    pub default_os: String,
    #[envconfig(from = "GRIDCFG_OUTPUT_DIR", default = ".")]
    pub output_dir: String,
    /// Stamp the generation time into banners.
    #[envconfig(from = "GRIDCFG_TIMESTAMP", default = "true")]
    pub timestamp: bool,
}

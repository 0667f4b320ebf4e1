use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// JSON file holding the announced service descriptors
    #[arg(long)]
    pub services: PathBuf,

    /// Service type to watch
    #[arg(long = "type")]
    pub service_type: String,

    /// Pool to watch (overrides the configuration file)
    #[arg(long)]
    pub pool: Option<String>,

    /// Selector configuration file (TOML, JSON or YAML)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Refresh interval in milliseconds (overrides the configuration file)
    #[arg(long)]
    pub interval_ms: Option<u64>,

    /// Exit after printing this many snapshots; runs until Ctrl-C when absent
    #[arg(long)]
    pub ticks: Option<u64>,
}

//! CLI argument parsing using clap derive

use std::path::PathBuf;

use clap::Parser;

/// Default directory holding `<connector>_connector.yaml` templates
pub const DEFAULT_TEMPLATES_DIR: &str = "./dex_templates";

/// Default credential hashing executable
pub const DEFAULT_HASH_SCRIPT: &str = "./generate-hash.sh";

/// Customize a cloud-init template for a controller node
#[derive(Parser, Debug)]
#[command(name = "cloud-init-gen")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Input cloud-init YAML file path
    #[arg(long)]
    pub input: PathBuf,

    /// Directory containing the Dex connector templates
    #[arg(long, default_value = DEFAULT_TEMPLATES_DIR, env = "CIG_TEMPLATES_DIR")]
    pub templates_dir: PathBuf,

    /// Connector registry file (TOML, JSON or YAML) replacing the built-in list
    #[arg(long)]
    pub connectors: Option<PathBuf>,

    /// Executable that turns an email and password into a credential line
    #[arg(long, default_value = DEFAULT_HASH_SCRIPT, env = "CIG_HASH_SCRIPT")]
    pub hash_script: PathBuf,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

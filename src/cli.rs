// cli.rs - Command-line interface configuration
use std::path::PathBuf;

use clap::Parser;

#[derive(Parser, Debug, Clone)]
#[command(name = "mascot-viewer")]
#[command(about = "Interactive 3D mascot viewer", long_about = None)]
pub struct Cli {
    /// Path to a glTF/GLB model; the procedural bee is used if loading fails
    #[arg(long = "model", default_value = "assets/bee.glb")]
    pub model: PathBuf,

    /// Initial viewport width in pixels
    #[arg(long, default_value = "800")]
    pub width: u32,

    /// Initial viewport height in pixels
    #[arg(long, default_value = "600")]
    pub height: u32,

    /// JSON file overriding the built-in viewer configuration
    #[arg(long)]
    pub config: Option<PathBuf>,
}

use clap::Parser;

use mascot_viewer::app;
use mascot_viewer::cli::Cli;
use mascot_viewer::config::ViewerConfig;

type Result<T> = std::result::Result<T, Box<dyn std::error::Error>>;

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let config = match &cli.config {
        Some(path) => ViewerConfig::from_json_file(path)?,
        None => ViewerConfig::default(),
    };

    app::run(cli, config)
}

use std::path::PathBuf;

use clap::Parser;
use version_index::config::Config;

#[derive(Parser)]
#[command(name = "version-index")]
#[command(version, about = "HTTP index of artifact versions on a filesystem or in S3")]
struct Cli {
    /// Path to the configuration file (.json, .yaml or .yml)
    #[arg(default_value = "config.yml")]
    config: PathBuf,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = Config::load(&cli.config)?;
    let _log_guard = version_index::logging::init_logging(&config.logging)?;

    tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?
        .block_on(version_index::server::serve(config))?;

    Ok(())
}

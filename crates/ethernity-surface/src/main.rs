use std::io;
use std::path::PathBuf;

use clap::Parser;
use ethernity_surface::{run, SurfaceConfig};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "ethernity-surface",
    version,
    about = "List the externally callable functions of a compiled contract, \
             including inherited ones."
)]
struct Cli {
    /// Path to the contract's JSON artifact (e.g. out/Token.sol/Token.json)
    artifact: PathBuf,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    let config = SurfaceConfig::default();

    let stdout = io::stdout();
    let mut out = stdout.lock();
    run(&cli.artifact, &config, &mut out)?;
    Ok(())
}

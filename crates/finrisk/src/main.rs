use clap::Parser;
use finrisk::{Cli, init_logging, run};

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();
    init_logging(cli.log_dir.as_deref(), &cli.log_level)?;

    tracing::debug!(command = ?cli.command, "Starting finrisk");
    let output = run(&cli)?;

    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

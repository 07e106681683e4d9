use std::process::ExitCode;

use anyhow::Context as _;
use clap::Parser as _;

#[tokio::main]
async fn main() -> ExitCode {
    if let Err(err) = try_main().await {
        eprintln!("{err:#}");
        return ExitCode::FAILURE;
    }

    ExitCode::SUCCESS
}

async fn try_main() -> anyhow::Result<()> {
    novelpress::logging::init().context("init logging")?;

    let cli = novelpress::cli::Cli::parse();
    tracing::debug!(?cli, "parsed cli");

    match cli.command {
        novelpress::cli::Command::Build(args) => {
            novelpress::build::run(args).await.context("build")?;
        }
    }

    Ok(())
}

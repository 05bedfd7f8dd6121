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
    bindery::logging::init().context("init logging")?;

    let cli = bindery::cli::Cli::parse();
    tracing::debug!(?cli, "parsed cli");

    match cli.command {
        bindery::cli::Command::Build(args) => {
            bindery::build::run(args).await.context("build")?;
        }
        bindery::cli::Command::Init(args) => {
            bindery::build::init(args).context("init")?;
        }
    }

    Ok(())
}

use std::process::ExitCode;

use anyhow::Context;
use anyhow::Result;
use clap::Parser;
use colored::Colorize;
use gitmenu::App;
use gitmenu::Config;
use gitmenu::logging::setup_logging;
use gitmenu::ops::git::RealGit;
use gitmenu::ops::prompt::TerminalPrompt;

#[derive(Parser)]
#[command(name = "gitmenu", version)]
#[command(about = "Interactive menu for everyday git operations", long_about = None)]
pub struct Cli {}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let _cli = Cli::parse();

    if let Err(err) = setup_logging() {
        eprintln!("Failed to set up logging: {err:#}");
    }

    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{} {:#}", "✗".red(), err);
            ExitCode::FAILURE
        }
    }
}

async fn run() -> Result<()> {
    let workdir = std::env::current_dir().context("Failed to read current directory")?;
    let config = Config::load(&workdir)?;
    let app = App::new(config, RealGit::new(workdir), TerminalPrompt::new());
    app.run(&mut std::io::stdout()).await
}

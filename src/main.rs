use clap::{ArgAction, Parser};
use dotenv::dotenv;
use std::path::PathBuf;
use std::process::ExitCode;

use waypoint_rs::waypoint::config::WorkspaceConfig;
use waypoint_rs::waypoint::dispatch::{report_failure, ExitSignal};
use waypoint_rs::waypoint::runner::Runner;

/// Run one addressed step of a workflow
///
/// The base name of the output directory is the step address, e.g. `3` or
/// `4-web-small`.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None, disable_version_flag = true)]
struct Args {
    /// Path to the workspace
    #[arg(short, long)]
    workspace: PathBuf,

    /// Name of the workflow document inside the workspace
    #[arg(short, long)]
    json: String,

    /// Directory holding the step's input files
    #[arg(short, long)]
    input: PathBuf,

    /// Output directory; its name addresses the step to run
    #[arg(short, long)]
    output: PathBuf,

    /// Print version info and exit
    #[arg(short = 'v', long = "version", action = ArgAction::Version)]
    version: Option<bool>,
}

#[tokio::main]
async fn main() -> ExitCode {
    dotenv().ok();
    env_logger::init();

    let args = Args::parse();

    let config = match WorkspaceConfig::from_env(&args.workspace) {
        Ok(config) => config,
        Err(err) => return report_failure(&err).into(),
    };

    let runner = match Runner::from_workspace(config).await {
        Ok(runner) => runner,
        Err(err) => return report_failure(&err).into(),
    };

    let signal: ExitSignal = runner.run(&args.json, &args.input, &args.output).await;
    signal.into()
}

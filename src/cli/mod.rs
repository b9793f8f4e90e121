mod config;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use config::*;

use crate::app::App;

#[derive(Parser)]
#[clap(version, long_about = None)]
struct Cli {
    #[clap(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Runs the configured processes
    Run {
        /// Sets a custom config file
        #[clap(
            short,
            long,
            env = "PLEDGER_CONFIG",
            default_value = "pledger.yml",
            value_name = "FILE"
        )]
        config: PathBuf,

        #[clap(env = "CRASH_REPORT_CONFIG")]
        crash_report_config: Option<bool>,
    },
}

pub async fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Command::Run {
            config,
            crash_report_config,
        } => {
            let config = Config::from_path(config)?;
            match (run_cmd(config.clone()).await, crash_report_config) {
                (Err(e), Some(true)) => {
                    println!("Pledger was started with the following config:");
                    println!("{}", serde_yaml::to_string(&config).unwrap());
                    return Err(e);
                }
                (Err(e), _) => return Err(e),
                _ => (),
            }
        }
    }
    Ok(())
}

async fn run_cmd(Config { app, tracing }: Config) -> anyhow::Result<()> {
    crate::tracing::init_tracer(tracing)?;
    println!("Starting wallet processes");
    App::new(app)?.run().await?;
    Ok(())
}

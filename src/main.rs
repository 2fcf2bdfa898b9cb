// OpsBot - Remote administration bot for browser-automation sessions
use clap::Parser;
use opsbot::cli::args::Args;
use opsbot::cli::commands::execute_command;
use opsbot::domain::error::OpsBotError;

#[tokio::main]
async fn main() -> Result<(), OpsBotError> {
    let args = Args::parse();

    match execute_command(args).await {
        Ok(()) => Ok(()),
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}

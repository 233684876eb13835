use std::process::ExitCode;

use clap::Parser;
use scripts::{
    cli::Cli,
    constants::{FAILURE_CODE, SUCCESS_CODE},
};
use tracing::error;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .pretty()
        .with_writer(std::io::stderr)
        .init();

    match cli.run().await {
        Ok(()) => ExitCode::from(SUCCESS_CODE),
        Err(e) => {
            error!("{e}");
            ExitCode::from(FAILURE_CODE)
        }
    }
}

use bib_middleware::cli::{Cli, Commands, fetch_command, read_command, write_command};
use bib_middleware::logging::init_logging;
use clap::Parser;
use tracing::error;

#[tokio::main]
async fn main() {
    let args = Cli::parse();

    if let Err(e) = init_logging(args.cmd.args().log_file.as_deref()) {
        eprintln!("Failed to set up logging: {}", e);
        std::process::exit(1);
    }

    if let Err(e) = run(args).await {
        error!("{}", e);
        std::process::exit(1);
    }
}

async fn run(args: Cli) -> bib_middleware::Result<()> {
    match &args.cmd {
        Commands::Read(stack) => read_command(stack).await?,
        Commands::Write(stack) => write_command(stack).await?,
        Commands::Fetch { args, target } => fetch_command(args, target.clone()).await?,
    }
    Ok(())
}

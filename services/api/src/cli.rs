use crate::adjust::{run_adjust, AdjustArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use comp_adjust::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "Comp Adjust",
    about = "Price comparable sales against a subject property from the command line or over HTTP",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP service (default command)
    Serve(ServeArgs),
    /// Compute adjustments for one batch of comps and print the grid
    Adjust(AdjustArgs),
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Adjust(args) => run_adjust(args).await,
    }
}

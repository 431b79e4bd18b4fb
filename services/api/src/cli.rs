use crate::demo::{run_batch, run_demo, BatchArgs, DemoArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use credit_ai::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "Credit Decision Console",
    about = "Serve and demonstrate the credit-product decision engine from the command line",
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
    /// Run a scripted set of scoring exchanges through the engine
    Demo(DemoArgs),
    /// Replay a CSV scenario deck through the engine
    Batch(BatchArgs),
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
        Command::Demo(args) => run_demo(args),
        Command::Batch(args) => run_batch(args),
    }
}

use crate::report::{run_city_index, run_city_report, CityReportArgs, DataArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use facility_intel::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "Facility Intelligence Directory",
    about = "Serve and inspect city safety hubs built from facility intelligence",
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
    /// Print the statewide overview and the alphabetical city index
    Cities(DataArgs),
    /// Print one city's hub statistics and ranking panels
    City(CityReportArgs),
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
    #[command(flatten)]
    pub(crate) data: DataArgs,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Cities(args) => run_city_index(args),
        Command::City(args) => run_city_report(args),
    }
}

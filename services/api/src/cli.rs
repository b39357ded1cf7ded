use crate::demo::{run_demo, run_factors, run_rankings, run_scorecard, ScorecardArgs};
use crate::server;
use civic_engine::error::AppError;
use clap::{Args, Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(
    name = "Civic Engine",
    about = "Serve and inspect policy methodology scorecards for classroom deliberation",
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
    /// List the scoring factors and what their extremes mean
    Factors,
    /// Print a policy scorecard, optionally with modifiers applied
    Scorecard(ScorecardArgs),
    /// Rank every scored policy by overall score
    Rankings,
    /// Walk through a scorecard, modifier impacts, and rankings in one run
    Demo,
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
        Command::Factors => run_factors(),
        Command::Scorecard(args) => run_scorecard(args),
        Command::Rankings => run_rankings(),
        Command::Demo => run_demo(),
    }
}

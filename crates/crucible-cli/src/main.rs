use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use crucible_cli::commands::bounds::{handle_bounds_command, BoundsCommandArgs};
use crucible_cli::commands::solve::{handle_solve_command, SolveCommandArgs};
use crucible_cli::output::OutputFormat;
use crucible_cli::terminal::ColorPalette;

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Minimum-cost paths across digit grids with run-length limits"
)]
struct Cli {
    /// Output format for results.
    #[arg(long, value_enum, default_value_t = OutputFormat::Text, global = true)]
    format: OutputFormat,

    /// Disable ANSI colors (also honours NO_COLOR and TERM=dumb).
    #[arg(long, global = true)]
    no_color: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Compute the minimum path cost for one or more run-length configurations.
    Solve(SolveCommandArgs),
    /// Print the unconstrained lower-bound table used for pruning.
    Bounds(BoundsCommandArgs),
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();
    let palette = ColorPalette::resolve(cli.no_color);
    let mut stdout = std::io::stdout().lock();

    match &cli.command {
        Command::Solve(args) => handle_solve_command(args, cli.format, palette, &mut stdout),
        Command::Bounds(args) => handle_bounds_command(args, cli.format, palette, &mut stdout),
    }
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .finish();

    let _ = tracing::subscriber::set_global_default(subscriber);
}

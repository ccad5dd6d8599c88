use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use navnet_cli::options::ShortestStrategy;
use navnet_cli::output::OutputFormat;

mod commands;

#[derive(Parser, Debug)]
#[command(author, version, about = "Transport network queries over places and mode-tagged links")]
struct Cli {
    /// Places table (`name,reference,latitude,longitude`).
    #[arg(long, env = "NAVNET_PLACES", default_value = "Places.csv", global = true)]
    places: PathBuf,

    /// Links table (`start,end,mode`).
    #[arg(long, env = "NAVNET_LINKS", default_value = "Links.csv", global = true)]
    links: PathBuf,

    /// Algorithm answering `FindShortestRoute`.
    #[arg(long, value_enum, default_value_t = ShortestStrategy::Bfs, global = true)]
    shortest: ShortestStrategy,

    /// Log at debug level unless `RUST_LOG` says otherwise.
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Build the network and process every line of a command file.
    Run {
        /// File with one command per line.
        #[arg(long, default_value = "commands.txt")]
        commands: PathBuf,
        /// File receiving the result blocks (overwritten).
        #[arg(long, default_value = "Output.txt")]
        output: PathBuf,
    },
    /// Build the network and run a single command, printing its block.
    Query {
        /// Output format.
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
        /// Command name followed by its arguments, e.g. `FindRoute Car 1 2`.
        #[arg(
            required = true,
            num_args = 1..,
            trailing_var_arg = true,
            allow_hyphen_values = true
        )]
        tokens: Vec<String>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let inputs = commands::NetworkInputs {
        places: &cli.places,
        links: &cli.links,
        shortest: cli.shortest.into(),
    };

    match &cli.command {
        Command::Run {
            commands: commands_path,
            output,
        } => commands::run::handle_run(&inputs, commands_path, output),
        Command::Query { format, tokens } => {
            commands::query::handle_query(&inputs, *format, tokens)
        }
    }
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .finish();

    let _ = tracing::subscriber::set_global_default(subscriber);
}

#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line adapter that plays snake in the terminal.

mod game;
mod settings;
mod terminal;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use snake_rendering::SnakeColor;
use snake_system_obstacles::Registry;

use crate::{
    game::{PlayOptions, Report},
    settings::Settings,
};

#[derive(Parser, Debug)]
#[command(
    name = "snake",
    version,
    about = "Snake on a wraparound grid",
    args_conflicts_with_subcommands = true
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,

    #[command(flatten)]
    play: PlayArgs,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the game (default).
    Play(PlayArgs),
    /// List all obstacle placement variants.
    ListOps,
}

#[derive(Args, Debug)]
struct PlayArgs {
    /// Path to a configuration file; a default one is created when missing.
    #[arg(short, long, default_value = "Config.json")]
    config: PathBuf,
    /// Colon-separated obstacle placement variants, e.g. `dispersion` or `corners:cross`.
    #[arg(short, long)]
    ops: Option<String>,
    /// Let a bot steer the snake.
    #[arg(long)]
    bot: bool,
    /// Seed for obstacles, food and the snake color.
    #[arg(long)]
    seed: Option<u64>,
    /// Color of the snake (green/cyan/yellow); random when omitted.
    #[arg(long)]
    color: Option<SnakeColor>,
}

/// Entry point for the snake command-line interface.
fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    match cli.command {
        Some(Command::ListOps) => {
            println!("{}", list_ops());
            Ok(())
        }
        Some(Command::Play(args)) => run_play(args),
        None => run_play(cli.play),
    }
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .try_init();
}

fn list_ops() -> String {
    format!("{}.", Registry::standard().names().join(", "))
}

fn run_play(args: PlayArgs) -> Result<()> {
    let settings = Settings::load_or_create(&args.config)?;
    let options = PlayOptions {
        ops: args.ops,
        bot: args.bot,
        seed: args.seed,
        color: args.color,
    };
    let setup = game::prepare(&settings, &options)?;

    match game::play(setup, options.bot)? {
        Report::Finished {
            outcome,
            last_frame,
        } => {
            if let Some(frame) = last_frame {
                print!("{frame}");
            }
            let status = if outcome.is_win() { "Win" } else { "Loss" };
            println!("{status}! Score: {}", outcome.score());
        }
        Report::Canceled { last_frame } => {
            if let Some(frame) = last_frame {
                print!("{frame}");
            }
            println!("The game has been canceled");
        }
    }
    Ok(())
}

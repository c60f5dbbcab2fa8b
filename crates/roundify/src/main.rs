mod commands;

use clap::{ArgAction, Parser, Subcommand};

use roundify_core::args::{normalize_args, radius_values, resolve_radius};
use roundify_core::config;

#[derive(Parser)]
#[command(
    name = "roundify",
    version,
    about = "Rounded screen corners for every display"
)]
struct Cli {
    // Declared for parsing and --help only. Values are read from the raw
    // arguments, since a subcommand's occurrences replace the parent's here.
    /// Corner radius in pixels; zero or negative hides the overlays
    #[allow(dead_code)]
    #[arg(
        long,
        global = true,
        value_name = "NUMBER",
        action = ArgAction::Append,
        num_args = 0..=1,
        default_missing_value = "",
        allow_hyphen_values = true
    )]
    radius: Vec<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Debugging and inspection tools
    Debug {
        #[command(subcommand)]
        command: DebugCommands,
    },
}

#[derive(Subcommand)]
enum DebugCommands {
    /// Print the four corner outlines as SVG path data
    Masks,
    /// List detected displays and their bounds
    Monitors,
    /// Watch foreground changes in real time
    Events,
}

fn main() {
    let args = normalize_args(std::env::args_os());
    let values = radius_values(&args);
    let cli = Cli::parse_from(args);
    let config = config::load();
    let radius = resolve_radius(&values, config.overlay.radius);

    match cli.command {
        None => commands::run::execute(radius, &config),
        Some(Commands::Debug { command }) => match command {
            DebugCommands::Masks => commands::debug::masks::execute(radius),
            DebugCommands::Monitors => commands::debug::monitors::execute(),
            DebugCommands::Events => commands::debug::events::execute(&config),
        },
    }
}

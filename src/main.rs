use clap::{Parser, Subcommand};

mod commands;
mod output;
mod tty;

use commands::GlobalArgs;
use commands::{context, pot, prefix, rename, version};

const VERSION: &str = env!("CARGO_PKG_VERSION");

#[derive(Parser)]
#[command(name = "wpmoo")]
#[command(version = VERSION)]
#[command(about = "CLI tool for WPMoo plugin development automation")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Rename a plugin's identifiers across its file tree
    Rename(rename::RenameArgs),
    /// Show what kind of project the current directory holds
    Context(context::ContextArgs),
    /// Bump the project version across manifest files
    Version(version::VersionArgs),
    /// Generate a translation template (.pot) file
    Pot(pot::PotArgs),
    /// Rewrite the text-domain-derived CSS class prefix
    Prefix(prefix::PrefixArgs),
}

fn main() -> std::process::ExitCode {
    let cli = Cli::parse();

    // Rename is interactive end to end; refuse early without a terminal.
    if matches!(cli.command, Commands::Rename(_)) && !tty::require_tty_for_interactive() {
        let err = wpmoo::Error::validation_invalid_argument(
            "tty",
            "The rename command requires an interactive TTY",
            None,
            None,
        );
        let (result, exit_code) = output::map_cmd_result_to_json::<serde_json::Value>(Err(err));
        let _ = output::print_json_result(result);
        return std::process::ExitCode::from(exit_code_to_u8(exit_code));
    }

    let global = GlobalArgs {};
    let (json_result, exit_code) = commands::run_json(cli.command, &global);
    if output::print_json_result(json_result).is_err() {
        return std::process::ExitCode::from(1);
    }

    std::process::ExitCode::from(exit_code_to_u8(exit_code))
}

fn exit_code_to_u8(code: i32) -> u8 {
    if code <= 0 {
        0
    } else if code >= 255 {
        255
    } else {
        code as u8
    }
}

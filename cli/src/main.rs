mod commands;
mod terminal;

use std::process::ExitCode;

use commands::{CommandLine, Commands, scan};
use groper_common::NetworkError;
use terminal::{logging, print};

#[tokio::main]
async fn main() -> ExitCode {
    let commands = CommandLine::parse_args();

    if let Err(e) = logging::init_logging(commands.verbose, commands.quiet) {
        eprintln!("Failed to initialize logging: {e}");
    }

    match run(commands).await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("{}", error_line(&e));
            ExitCode::FAILURE
        }
    }
}

async fn run(commands: CommandLine) -> anyhow::Result<ExitCode> {
    match commands.command {
        Commands::Scan(args) => {
            let cfg = args.to_config(commands.quiet, commands.no_banner);
            print::banner(cfg.no_banner, cfg.quiet);
            scan::scan(args.subnet, &cfg).await
        }
    }
}

/// Domain errors carry their stable code; anything else prints its chain.
fn error_line(err: &anyhow::Error) -> String {
    match err.downcast_ref::<NetworkError>() {
        Some(network_err) => format!("Error [{}]: {}", network_err.code(), network_err),
        None => format!("Error: {err:#}"),
    }
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝

use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::Parser;

use openmate::config::{self, SOCKET_ENV};
use openmate::ipc::IpcError;
use openmate::ipc::client::{Client, forward};
use openmate::logging;
use openmate::resolver::absolutize;

/// Open files in the editor window that already has their folder open.
#[derive(Debug, Parser)]
#[command(name = "openmate", version)]
struct Cli {
    /// Editor socket path
    #[arg(long, env = SOCKET_ENV)]
    socket: Option<PathBuf>,

    /// Increase log verbosity (repeatable)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Check that the editor is listening, then exit
    #[arg(long, conflicts_with = "paths")]
    ping: bool,

    /// Files or folders to open, in order
    #[arg(required_unless_present = "ping")]
    paths: Vec<OsString>,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    let socket = config::socket_path(cli.socket);
    tracing::debug!(socket = %socket.display(), "using socket");

    if cli.ping {
        return match ping(&socket).await {
            Ok(()) => ExitCode::SUCCESS,
            Err(e) => {
                eprintln!("openmate: {e}");
                ExitCode::FAILURE
            }
        };
    }

    let mut failed = false;
    let mut absolute = Vec::with_capacity(cli.paths.len());
    for arg in cli.paths {
        let path = PathBuf::from(arg);
        if path.as_os_str().is_empty() {
            eprintln!("openmate: empty path argument");
            failed = true;
            continue;
        }
        match absolutize(&path) {
            Ok(abs) => absolute.push(abs),
            Err(e) => {
                eprintln!("openmate: {}: {e}", path.display());
                failed = true;
            }
        }
    }

    for outcome in forward(&socket, &absolute).await {
        if let Err(e) = outcome.result {
            eprintln!("openmate: {}: {e}", outcome.path.display());
            failed = true;
        }
    }

    if failed {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}

async fn ping(socket: &Path) -> Result<(), IpcError> {
    let mut client = Client::connect(socket).await?;
    client.ping().await
}

//! pfmview - portable float/half map viewer front end.
//!
//! Selects an input stream (piped stdin, path argument, or an external
//! file picker), decodes it and builds the initial display buffer.
//! Exit codes: 0 ok or nothing to show, 2 empty image, 3 image over
//! 1 GB, 4 parse or I/O fault.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use pfm_view::{InputSource, Viewer};

#[derive(Parser)]
#[command(name = "pfmview", version, about = "Portable float/half map (PFM/PHM) viewer")]
struct Cli {
    /// Image path; a leading `-` (or piped stdin) reads standard input
    #[arg(allow_hyphen_values = true)]
    path: Option<PathBuf>,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    ExitCode::from(run())
}

fn run() -> u8 {
    let cli = Cli::parse();

    // The interactive file-picker dialog lives in the windowing layer;
    // headless builds fall through to "nothing to show".
    let Some(source) = InputSource::select(cli.path, pfm_view::input::stdin_is_piped(), || None)
    else {
        return 0;
    };

    let image = match source.load() {
        Ok(image) => image,
        Err(e) => {
            error!("{e}");
            return e.exit_code() as u8;
        }
    };

    info!(
        magic = %image.header.magic,
        width = image.header.width,
        height = image.header.height,
        scale_endian = image.header.scale_endian,
        "image decoded"
    );

    let viewer = Viewer::new(image);
    let buffer = viewer.display();
    info!(
        width = buffer.width(),
        height = buffer.height(),
        "display buffer ready"
    );

    0
}

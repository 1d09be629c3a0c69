//! Input source selection.
//!
//! The viewer takes its byte stream from exactly one place: piped
//! standard input, a path argument, or a file picked through an
//! injected dialog callback. Nothing available is not an error; the
//! caller exits cleanly with status 0.

use std::io::{self, IsTerminal};
use std::path::PathBuf;

use pfm_io::{LoadResult, PortableMap};
use tracing::debug;

/// Where the image bytes come from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputSource {
    /// Piped/redirected standard input.
    Stdin,
    /// A file on disk.
    File(PathBuf),
}

impl InputSource {
    /// Picks the input source.
    ///
    /// Priority: a leading-`-` argument or piped stdin forces
    /// [`InputSource::Stdin`]; otherwise a path argument wins; with
    /// neither, `picker` (the external file dialog) gets a chance.
    /// Returns `None` when nothing yields a stream.
    pub fn select(
        arg: Option<PathBuf>,
        stdin_piped: bool,
        picker: impl FnOnce() -> Option<PathBuf>,
    ) -> Option<Self> {
        let dash_arg = arg
            .as_ref()
            .is_some_and(|p| p.to_string_lossy().starts_with('-'));

        if dash_arg || stdin_piped {
            return Some(InputSource::Stdin);
        }
        match arg {
            Some(path) => Some(InputSource::File(path)),
            None => picker().map(InputSource::File),
        }
    }

    /// Opens the source and decodes the image from it.
    ///
    /// # Errors
    ///
    /// See [`PortableMap::read_from`].
    pub fn load(&self) -> LoadResult<PortableMap> {
        match self {
            InputSource::Stdin => {
                debug!("reading image from stdin");
                let stdin = io::stdin();
                PortableMap::read_from(&mut stdin.lock())
            }
            InputSource::File(path) => {
                debug!(path = %path.display(), "reading image file");
                PortableMap::read(path)
            }
        }
    }
}

/// True when stdin is redirected or piped rather than a terminal.
pub fn stdin_is_piped() -> bool {
    !io::stdin().is_terminal()
}

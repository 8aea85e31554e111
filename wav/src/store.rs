//! Seekable byte storage backing an audio payload.

use std::io::{self, Cursor, Read, Seek, Write};

/// A seekable byte store.
///
/// Every audio object owns exactly one store. Temp-file stores are unlinked
/// by the OS when the handle is closed, so dropping the store releases the
/// storage.
pub trait Store: Read + Write + Seek + Send {}

impl<T: Read + Write + Seek + Send> Store for T {}

/// Where new stores are allocated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Backing {
    /// Anonymous temporary file. Keeps memory use bounded for large inputs.
    #[default]
    TempFile,
    /// Growable in-memory buffer.
    Memory,
}

impl Backing {
    /// Allocates an empty store.
    pub fn create(self) -> io::Result<Box<dyn Store>> {
        match self {
            Backing::TempFile => Ok(Box::new(tempfile::tempfile()?)),
            Backing::Memory => Ok(Box::new(Cursor::new(Vec::new()))),
        }
    }
}

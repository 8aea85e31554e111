//! Storage-backed PCM audio objects.

use std::fmt;
use std::io::{Read, Seek, SeekFrom};
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use crate::error::{Result, WavError};
use crate::metadata::Metadata;
use crate::options::Options;
use crate::store::Store;
use crate::stream::{self, BurstWriter};

/// Raw interleaved PCM data plus the metadata describing it.
///
/// Each `Audio` exclusively owns its store. Transforms never modify their
/// input; they allocate a fresh store and return a new `Audio`. The store
/// (and any temporary file behind it) is released when the `Audio` is
/// dropped.
///
/// The payload length is always a whole number of frames.
pub struct Audio {
    /// Guards the store's read cursor so transforms can take `&self`.
    store: Mutex<Box<dyn Store>>,
    byte_count: u64,
    metadata: Metadata,
    options: Options,
}

impl Audio {
    /// Creates audio from interleaved little-endian PCM bytes using default
    /// options.
    pub fn from_pcm(data: &[u8], metadata: Metadata) -> Result<Self> {
        Self::from_pcm_with(data, metadata, Options::default())
    }

    /// Creates audio from interleaved little-endian PCM bytes.
    pub fn from_pcm_with(data: &[u8], metadata: Metadata, options: Options) -> Result<Self> {
        options.validate()?;
        check_frame_aligned(data.len() as u64, &metadata)?;

        let mut store = options.create_store()?;
        let mut writer = BurstWriter::new(&mut *store, options.burst_bytes);
        for burst in data.chunks(options.burst_bytes) {
            writer.write(burst)?;
        }
        let byte_count = writer.finish()?;
        Self::from_store(store, byte_count, metadata, options)
    }

    pub(crate) fn from_store(
        store: Box<dyn Store>,
        byte_count: u64,
        metadata: Metadata,
        options: Options,
    ) -> Result<Self> {
        check_frame_aligned(byte_count, &metadata)?;
        Ok(Self {
            store: Mutex::new(store),
            byte_count,
            metadata,
            options,
        })
    }

    pub fn metadata(&self) -> Metadata {
        self.metadata
    }

    pub fn options(&self) -> Options {
        self.options
    }

    /// Total PCM bytes.
    pub fn byte_count(&self) -> u64 {
        self.byte_count
    }

    pub fn frame_count(&self) -> u64 {
        self.metadata.frames(self.byte_count)
    }

    /// Seconds of audio.
    pub fn duration_secs(&self) -> f64 {
        self.metadata.duration_secs(self.byte_count)
    }

    pub fn duration(&self) -> Duration {
        self.metadata.duration(self.byte_count)
    }

    /// Bits of data per second of audio.
    pub fn bitrate(&self) -> u64 {
        self.metadata.bitrate()
    }

    /// Reads the whole payload into memory.
    pub fn to_vec(&self) -> Result<Vec<u8>> {
        let mut store = self.store();
        store.seek(SeekFrom::Start(0))?;
        let mut data = Vec::with_capacity(self.byte_count as usize);
        (&mut **store).take(self.byte_count).read_to_end(&mut data)?;
        if (data.len() as u64) < self.byte_count {
            return Err(std::io::Error::from(std::io::ErrorKind::UnexpectedEof).into());
        }
        Ok(data)
    }

    /// Returns an independent copy with its own storage.
    pub fn try_clone(&self) -> Result<Self> {
        let byte_count = self.byte_count;
        let burst = self.options.burst_bytes;
        self.derive(self.metadata, |src, dst| {
            Ok(stream::copy(src, byte_count, dst, burst)?)
        })
    }

    /// Locks the store. A poisoned lock is recovered: every pass over the
    /// store seeks before reading, so a panicked holder leaves nothing
    /// behind but the cursor position.
    pub(crate) fn store(&self) -> MutexGuard<'_, Box<dyn Store>> {
        self.store.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Runs `fill` from this audio's store into a freshly allocated store
    /// and wraps the result. `fill` returns the number of bytes written.
    ///
    /// The new store is dropped, and its storage released, if `fill` fails.
    pub(crate) fn derive<F>(&self, metadata: Metadata, fill: F) -> Result<Self>
    where
        F: FnOnce(&mut dyn Store, &mut dyn Store) -> Result<u64>,
    {
        let mut dst = self.options.create_store()?;
        let byte_count = {
            let mut src = self.store();
            fill(&mut **src, &mut *dst)?
        };
        Self::from_store(dst, byte_count, metadata, self.options)
    }
}

impl fmt::Debug for Audio {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Audio")
            .field("metadata", &self.metadata)
            .field("byte_count", &self.byte_count)
            .field("options", &self.options)
            .finish()
    }
}

fn check_frame_aligned(byte_count: u64, metadata: &Metadata) -> Result<()> {
    let frame = metadata.bytes_per_frame() as u64;
    if byte_count % frame != 0 {
        return Err(WavError::validation(format!(
            "{byte_count} bytes is not a whole number of {frame}-byte frames"
        )));
    }
    Ok(())
}

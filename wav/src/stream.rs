//! Frame streams over a seekable store.
//!
//! Readers pull the payload in bounded bursts and hand out fixed-size
//! chunks (frames or samples) without materializing the whole stream.
//! [`BurstWriter`] mirrors this on the output side.

use std::io::{self, Read, Seek, SeekFrom, Write};

use tracing::warn;

/// Rounds `burst` down to a multiple of `stride`, never below one stride.
fn align_burst(burst: usize, stride: usize) -> usize {
    (burst / stride).max(1) * stride
}

/// Forward cursor yielding `stride`-sized chunks of a store.
///
/// Only the first `byte_count` bytes of the store are visited. The last
/// chunk is shorter than `stride` only when `byte_count` is not a multiple
/// of it.
pub struct ChunkReader<'a, S: Read + Seek + ?Sized> {
    store: &'a mut S,
    byte_count: u64,
    stride: usize,
    burst: usize,
    buf: Vec<u8>,
    /// Next unread offset in `buf`.
    pos: usize,
    /// Valid bytes in `buf`.
    len: usize,
    /// Bytes pulled from the store so far.
    loaded: u64,
}

impl<'a, S: Read + Seek + ?Sized> ChunkReader<'a, S> {
    /// Creates a reader positioned at offset 0.
    ///
    /// # Panics
    ///
    /// Panics if `stride` is 0.
    pub fn new(store: &'a mut S, byte_count: u64, stride: usize, burst: usize) -> io::Result<Self> {
        assert!(stride > 0, "stride must be positive");
        let mut reader = Self {
            store,
            byte_count,
            stride,
            burst: align_burst(burst, stride),
            buf: Vec::new(),
            pos: 0,
            len: 0,
            loaded: 0,
        };
        reader.reset()?;
        Ok(reader)
    }

    /// Rewinds to the start of the stream.
    pub fn reset(&mut self) -> io::Result<()> {
        self.store.seek(SeekFrom::Start(0))?;
        self.pos = 0;
        self.len = 0;
        self.loaded = 0;
        Ok(())
    }

    /// Returns true if another chunk is available.
    pub fn has_next(&self) -> bool {
        self.pos < self.len || self.loaded < self.byte_count
    }

    /// Returns the next chunk, or `None` at the end of the stream.
    pub fn next_chunk(&mut self) -> io::Result<Option<&[u8]>> {
        if self.pos >= self.len {
            if self.loaded >= self.byte_count {
                return Ok(None);
            }
            let want = (self.byte_count - self.loaded).min(self.burst as u64) as usize;
            self.buf.resize(want, 0);
            self.store.read_exact(&mut self.buf[..want])?;
            self.loaded += want as u64;
            self.pos = 0;
            self.len = want;
        }

        let start = self.pos;
        let end = (start + self.stride).min(self.len);
        self.pos = end;
        Ok(Some(&self.buf[start..end]))
    }
}

/// Backward cursor yielding `stride`-sized chunks from the end of a store
/// to its start.
///
/// Windows of at most one burst are read by seeking from the end, so the
/// stream is never loaded whole. Chunk boundaries are the same as those of
/// [`ChunkReader`]; a short trailing chunk is emitted first.
pub struct ReverseChunkReader<'a, S: Read + Seek + ?Sized> {
    store: &'a mut S,
    byte_count: u64,
    stride: usize,
    burst: usize,
    buf: Vec<u8>,
    /// Chunks of the current window not yet emitted.
    pending: usize,
    /// Bytes at the front of the stream not yet loaded.
    remaining: u64,
}

impl<'a, S: Read + Seek + ?Sized> ReverseChunkReader<'a, S> {
    /// # Panics
    ///
    /// Panics if `stride` is 0.
    pub fn new(store: &'a mut S, byte_count: u64, stride: usize, burst: usize) -> Self {
        assert!(stride > 0, "stride must be positive");
        Self {
            store,
            byte_count,
            stride,
            burst: align_burst(burst, stride),
            buf: Vec::new(),
            pending: 0,
            remaining: byte_count,
        }
    }

    /// Restarts from the end of the stream.
    pub fn reset(&mut self) {
        self.pending = 0;
        self.remaining = self.byte_count;
    }

    pub fn has_next(&self) -> bool {
        self.pending > 0 || self.remaining > 0
    }

    /// Returns the previous chunk, or `None` once the start is reached.
    pub fn next_chunk(&mut self) -> io::Result<Option<&[u8]>> {
        if self.pending == 0 {
            if self.remaining == 0 {
                return Ok(None);
            }
            let stride = self.stride as u64;
            let window = self.remaining.min(self.burst as u64);
            // Window starts stay stride-aligned so chunk boundaries match
            // the forward reader.
            let start = (self.remaining - window).div_ceil(stride) * stride;
            let len = (self.remaining - start) as usize;

            self.store.seek(SeekFrom::Start(start))?;
            self.buf.resize(len, 0);
            self.store.read_exact(&mut self.buf[..len])?;
            self.remaining = start;
            self.pending = len.div_ceil(self.stride);
        }

        self.pending -= 1;
        let start = self.pending * self.stride;
        let end = (start + self.stride).min(self.buf.len());
        Ok(Some(&self.buf[start..end]))
    }
}

/// Buffered writer that flushes to its sink once more than `threshold`
/// bytes are pending.
///
/// Call [`BurstWriter::finish`] to flush the tail and learn the byte total.
/// A writer dropped without `finish` (an error path) still flushes what it
/// holds so the sink never misses accepted bytes.
pub struct BurstWriter<'a, W: Write + ?Sized> {
    sink: &'a mut W,
    buf: Vec<u8>,
    threshold: usize,
    written: u64,
    finished: bool,
}

impl<'a, W: Write + ?Sized> BurstWriter<'a, W> {
    pub fn new(sink: &'a mut W, threshold: usize) -> Self {
        Self {
            sink,
            buf: Vec::with_capacity(threshold.saturating_add(1).min(1 << 20)),
            threshold,
            written: 0,
            finished: false,
        }
    }

    /// Appends `bytes`.
    pub fn write(&mut self, bytes: &[u8]) -> io::Result<()> {
        self.buf.extend_from_slice(bytes);
        self.commit()
    }

    /// Appends `bytes` `count` times back to back.
    pub fn write_repeated(&mut self, bytes: &[u8], count: u64) -> io::Result<()> {
        for _ in 0..count {
            self.buf.extend_from_slice(bytes);
            self.commit()?;
        }
        Ok(())
    }

    /// Gives direct access to the pending buffer. Follow with
    /// [`BurstWriter::commit`].
    pub fn pending(&mut self) -> &mut Vec<u8> {
        &mut self.buf
    }

    /// Flushes the pending buffer if it exceeds the threshold.
    pub fn commit(&mut self) -> io::Result<()> {
        if self.buf.len() > self.threshold {
            self.flush_pending()?;
        }
        Ok(())
    }

    /// Total bytes accepted so far, flushed or not.
    pub fn len(&self) -> u64 {
        self.written + self.buf.len() as u64
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Flushes everything and returns the total number of bytes written.
    pub fn finish(mut self) -> io::Result<u64> {
        self.finished = true;
        self.flush_pending()?;
        self.sink.flush()?;
        Ok(self.written)
    }

    fn flush_pending(&mut self) -> io::Result<()> {
        if !self.buf.is_empty() {
            self.sink.write_all(&self.buf)?;
            self.written += self.buf.len() as u64;
            self.buf.clear();
        }
        Ok(())
    }
}

impl<W: Write + ?Sized> Drop for BurstWriter<'_, W> {
    fn drop(&mut self) {
        if self.finished {
            return;
        }
        if let Err(e) = self.flush_pending().and_then(|_| self.sink.flush()) {
            warn!(error = %e, pending = self.buf.len(), "wav: burst writer dropped with unflushed data");
        }
    }
}

/// Copies the first `byte_count` bytes of `src` into `dst` in bursts.
pub fn copy<S, W>(src: &mut S, byte_count: u64, dst: &mut W, burst: usize) -> io::Result<u64>
where
    S: Read + Seek + ?Sized,
    W: Write + ?Sized,
{
    let mut reader = ChunkReader::new(src, byte_count, burst, burst)?;
    let mut writer = BurstWriter::new(dst, burst);
    while let Some(chunk) = reader.next_chunk()? {
        writer.write(chunk)?;
    }
    writer.finish()
}

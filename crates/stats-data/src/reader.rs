//! Character-at-a-time reading over files, stdin and in-memory buffers.
//!
//! A [`CharacterSource`] owns its underlying medium, so the file handle is
//! released whenever the source is dropped, including on error paths.

use std::fs::File;
use std::io::{self, BufRead, BufReader, Cursor, Read, Seek, SeekFrom};
use std::path::Path;

use stats_core::error::{Result, StatsError};
use stats_core::models::Decoding;
use tracing::{debug, trace, warn};

/// Path that selects standard input instead of a file.
pub const STDIN_PATH: &str = "-";

// ── Medium ────────────────────────────────────────────────────────────────────

/// Buffered byte medium a [`CharacterSource`] reads from.
pub trait Medium: BufRead {
    /// Move back to byte zero. Returns `false` when the medium cannot seek.
    fn rewind_to_start(&mut self) -> io::Result<bool>;
}

impl<R: Read + Seek> Medium for BufReader<R> {
    fn rewind_to_start(&mut self) -> io::Result<bool> {
        self.seek(SeekFrom::Start(0))?;
        Ok(true)
    }
}

impl<T: AsRef<[u8]>> Medium for Cursor<T> {
    fn rewind_to_start(&mut self) -> io::Result<bool> {
        self.set_position(0);
        Ok(true)
    }
}

/// Adapter for media that can only be read forward (pipes, stdin).
pub struct ForwardOnly<R>(pub R);

impl<R: Read> Read for ForwardOnly<R> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.0.read(buf)
    }
}

impl<R: BufRead> BufRead for ForwardOnly<R> {
    fn fill_buf(&mut self) -> io::Result<&[u8]> {
        self.0.fill_buf()
    }

    fn consume(&mut self, amt: usize) {
        self.0.consume(amt)
    }
}

impl<R: BufRead> Medium for ForwardOnly<R> {
    fn rewind_to_start(&mut self) -> io::Result<bool> {
        Ok(false)
    }
}

// ── CharacterSource ───────────────────────────────────────────────────────────

/// Sequential, resettable character reader with an end-of-stream flag.
///
/// `is_at_end()` is kept current after every operation by peeking the
/// buffered medium, so it is `true` exactly when the cursor sits at or past
/// the last byte.
pub struct CharacterSource {
    label: String,
    medium: Option<Box<dyn Medium>>,
    decoding: Decoding,
    at_end: bool,
    position: u64,
    characters_read: u64,
}

impl CharacterSource {
    /// Open `path` for reading (`-` selects stdin).
    pub fn open(path: &Path, decoding: Decoding) -> Result<Self> {
        if is_stdin_path(path) {
            // Unlocked handle: the stdin lock is taken per read, never held.
            let stdin = ForwardOnly(BufReader::new(io::stdin()));
            return Self::from_medium("<stdin>", Box::new(stdin), decoding);
        }

        let file = File::open(path).map_err(|source| StatsError::FileOpen {
            path: path.to_path_buf(),
            source,
        })?;
        debug!("Opened {}", path.display());
        // A directory opens fine but fails on the first read.
        Self::from_medium(
            path.display().to_string(),
            Box::new(BufReader::new(file)),
            decoding,
        )
        .map_err(|e| match e {
            StatsError::Io(source) => StatsError::FileOpen {
                path: path.to_path_buf(),
                source,
            },
            other => other,
        })
    }

    /// Open `path`, degrading to a permanently exhausted source on failure.
    pub fn open_or_empty(path: &Path, decoding: Decoding) -> Self {
        match Self::open(path, decoding) {
            Ok(source) => source,
            Err(e) => {
                warn!("{}; treating it as empty", e);
                Self::unopened(path.display().to_string(), decoding)
            }
        }
    }

    /// Wrap an already-acquired medium.
    pub fn from_medium(
        label: impl Into<String>,
        medium: Box<dyn Medium>,
        decoding: Decoding,
    ) -> Result<Self> {
        let mut source = Self {
            label: label.into(),
            medium: Some(medium),
            decoding,
            at_end: false,
            position: 0,
            characters_read: 0,
        };
        source.refresh_end_flag()?;
        Ok(source)
    }

    /// A source whose medium never opened. It is at end forever.
    pub fn unopened(label: impl Into<String>, decoding: Decoding) -> Self {
        Self {
            label: label.into(),
            medium: None,
            decoding,
            at_end: true,
            position: 0,
            characters_read: 0,
        }
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn is_opened(&self) -> bool {
        self.medium.is_some()
    }

    pub fn is_at_end(&self) -> bool {
        self.at_end
    }

    /// Byte offset of the cursor.
    pub fn position(&self) -> u64 {
        self.position
    }

    /// Characters read since the last successful reset.
    pub fn characters_read(&self) -> u64 {
        self.characters_read
    }

    /// Read the next character and advance the cursor past it.
    ///
    /// Fails with [`StatsError::SourceNotOpened`] on an unopened source and
    /// with [`StatsError::EndOfStream`] once the medium is exhausted.
    pub fn read_next_character(&mut self) -> Result<char> {
        let Some(medium) = self.medium.as_deref_mut() else {
            return Err(StatsError::SourceNotOpened);
        };
        if self.at_end {
            return Err(StatsError::EndOfStream);
        }

        let Some(first) = next_byte(medium)? else {
            self.at_end = true;
            return Err(StatsError::EndOfStream);
        };

        let (ch, width) = match self.decoding {
            Decoding::Byte => (char::from(first), 1),
            Decoding::Utf8 => decode_utf8(first, medium)?,
        };

        self.position += width as u64;
        self.characters_read += 1;
        self.at_end = peek_byte(medium)?.is_none();
        Ok(ch)
    }

    /// Move the cursor back to byte zero.
    ///
    /// Silently does nothing when the medium cannot seek or never opened.
    pub fn reset_to_start(&mut self) -> Result<()> {
        let Some(medium) = self.medium.as_deref_mut() else {
            return Ok(());
        };
        if !medium.rewind_to_start()? {
            trace!("{} cannot seek; reset skipped", self.label);
            return Ok(());
        }

        self.position = 0;
        self.characters_read = 0;
        self.at_end = peek_byte(medium)?.is_none();
        trace!("Reset {} to start", self.label);
        Ok(())
    }

    fn refresh_end_flag(&mut self) -> Result<()> {
        if let Some(medium) = self.medium.as_deref_mut() {
            self.at_end = peek_byte(medium)?.is_none();
        }
        Ok(())
    }
}

impl Drop for CharacterSource {
    fn drop(&mut self) {
        if self.medium.take().is_some() {
            trace!("Released {}", self.label);
        }
    }
}

/// `true` when `path` selects standard input.
pub fn is_stdin_path(path: &Path) -> bool {
    path.as_os_str() == STDIN_PATH
}

// ── Internal helpers ──────────────────────────────────────────────────────────

fn peek_byte(medium: &mut dyn Medium) -> io::Result<Option<u8>> {
    Ok(medium.fill_buf()?.first().copied())
}

fn next_byte(medium: &mut dyn Medium) -> io::Result<Option<u8>> {
    let byte = peek_byte(medium)?;
    if byte.is_some() {
        medium.consume(1);
    }
    Ok(byte)
}

/// Decode one UTF-8 scalar whose leading byte is `first`.
///
/// Malformed or truncated sequences decode to U+FFFD; only the bytes that
/// belong to the sequence are consumed. Returns the char and its byte width.
fn decode_utf8(first: u8, medium: &mut dyn Medium) -> io::Result<(char, usize)> {
    let expected = match first {
        0x00..=0x7F => return Ok((char::from(first), 1)),
        0xC2..=0xDF => 2,
        0xE0..=0xEF => 3,
        0xF0..=0xF4 => 4,
        _ => return Ok((char::REPLACEMENT_CHARACTER, 1)),
    };

    let mut bytes = [first, 0, 0, 0];
    let mut len = 1;
    while len < expected {
        match peek_byte(medium)? {
            Some(b) if b & 0xC0 == 0x80 => {
                medium.consume(1);
                bytes[len] = b;
                len += 1;
            }
            _ => return Ok((char::REPLACEMENT_CHARACTER, len)),
        }
    }

    let ch = std::str::from_utf8(&bytes[..len])
        .ok()
        .and_then(|s| s.chars().next())
        .unwrap_or(char::REPLACEMENT_CHARACTER);
    Ok((ch, len))
}

// ── Tests ─────────────────────────────────────────────────────────────────────

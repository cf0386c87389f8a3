//! RIFF/WAVE container parsing for the resona playback engine.
//!
//! This crate turns a raw WAV byte buffer into a playback-ready
//! [`WaveFormat`] descriptor plus a [`DataWindow`] locating the sample
//! payload. It performs no I/O and no device interaction; every chunk
//! advance is bounds-checked against the buffer length.
//!
//! ```
//! let mut bytes = Vec::new();
//! bytes.extend_from_slice(b"RIFF");
//! bytes.extend_from_slice(&36u32.to_le_bytes());
//! bytes.extend_from_slice(b"WAVE");
//! bytes.extend_from_slice(b"fmt ");
//! bytes.extend_from_slice(&16u32.to_le_bytes());
//! bytes.extend_from_slice(&1u16.to_le_bytes()); // PCM
//! bytes.extend_from_slice(&1u16.to_le_bytes()); // mono
//! bytes.extend_from_slice(&44100u32.to_le_bytes());
//! bytes.extend_from_slice(&88200u32.to_le_bytes()); // byte rate
//! bytes.extend_from_slice(&2u16.to_le_bytes()); // block align
//! bytes.extend_from_slice(&16u16.to_le_bytes());
//! bytes.extend_from_slice(b"data");
//! bytes.extend_from_slice(&0u32.to_le_bytes());
//!
//! let wav = resona_wave::parse(&bytes).unwrap();
//! assert_eq!(wav.format.sample_rate, 44100);
//! assert_eq!(wav.format.channels, 1);
//! assert!(wav.format.is_signed());
//! ```

mod format;
mod parser;

pub use format::{SampleEncoding, WaveFormat};
pub use parser::{DataWindow, MIN_HEADER_LEN, ParsedWave, parse};

/// Error types for container parsing.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FormatError {
    /// The buffer is shorter than the fixed 44-byte header prefix.
    #[error("buffer too short for a WAV header: {len} bytes (need {MIN_HEADER_LEN})")]
    TooShort {
        /// Length of the rejected buffer.
        len: usize,
    },

    /// A required magic tag was missing or corrupted.
    #[error("expected {expected:?} tag at byte {offset}")]
    BadMagic {
        /// The tag that should have been present.
        expected: &'static str,
        /// Byte offset where it was expected.
        offset: usize,
    },

    /// The chunk scan ran past the end of the buffer without finding `data`.
    #[error("no data chunk within {len}-byte buffer")]
    MissingData {
        /// Length of the scanned buffer.
        len: usize,
    },

    /// The fmt chunk declares a format the playback layer cannot render.
    #[error("unsupported format: {channels} ch, {sample_rate} Hz, {bits} bits per sample")]
    Unsupported {
        /// Declared channel count.
        channels: u16,
        /// Declared sample rate in Hz.
        sample_rate: u32,
        /// Declared bit depth.
        bits: u16,
    },
}

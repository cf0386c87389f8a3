//! Bounds-checked RIFF/WAVE chunk parsing.
//!
//! The container is a sequence of chunks, each a 4-byte tag plus a 4-byte
//! little-endian size. The fixed prefix (RIFF header, `fmt ` chunk, `data`
//! header) is 44 bytes; anything shorter is rejected outright. Every chunk
//! advance during the `data` scan is validated against the buffer length
//! before any byte is read, so truncated or lying chunk sizes can never
//! cause an out-of-bounds access.

use crate::{FormatError, SampleEncoding, WaveFormat};

/// Fixed header prefix: 12-byte RIFF header + 24-byte fmt chunk + 8-byte
/// data chunk header.
pub const MIN_HEADER_LEN: usize = 44;

const RIFF_TAG: &[u8; 4] = b"RIFF";
const WAVE_TAG: &[u8; 4] = b"WAVE";
const FMT_TAG: &[u8; 4] = b"fmt ";
const DATA_TAG: &[u8; 4] = b"data";

/// Read-only window locating the `data` chunk payload inside the source
/// buffer.
///
/// The length is clipped at parse time to the bytes physically present, so
/// the window never extends past the buffer even when the chunk header
/// declares a larger size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DataWindow {
    /// Byte offset of the first sample.
    pub offset: usize,
    /// Payload length in bytes.
    pub len: usize,
}

/// Result of parsing a WAV buffer: the format descriptor plus the location
/// of the sample payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParsedWave {
    /// Playback format derived from the `fmt ` chunk.
    pub format: WaveFormat,
    /// Location of the `data` chunk payload.
    pub data: DataWindow,
}

impl ParsedWave {
    /// Borrow the sample payload out of the buffer this was parsed from.
    pub fn data_bytes<'a>(&self, bytes: &'a [u8]) -> &'a [u8] {
        &bytes[self.data.offset..self.data.offset + self.data.len]
    }
}

fn expect_tag(
    bytes: &[u8],
    offset: usize,
    tag: &'static [u8; 4],
    name: &'static str,
) -> Result<(), FormatError> {
    if &bytes[offset..offset + 4] == tag {
        Ok(())
    } else {
        Err(FormatError::BadMagic {
            expected: name,
            offset,
        })
    }
}

fn read_u16_le(bytes: &[u8], offset: usize) -> u16 {
    u16::from_le_bytes([bytes[offset], bytes[offset + 1]])
}

fn read_u32_le(bytes: &[u8], offset: usize) -> u32 {
    u32::from_le_bytes([
        bytes[offset],
        bytes[offset + 1],
        bytes[offset + 2],
        bytes[offset + 3],
    ])
}

/// Parse a WAV byte buffer into a format descriptor and data window.
///
/// Fails with [`FormatError`] on any magic mismatch, truncated chunk,
/// unsupported format field, or a chunk scan that runs past the buffer end.
/// Performs no device interaction.
pub fn parse(bytes: &[u8]) -> Result<ParsedWave, FormatError> {
    if bytes.len() < MIN_HEADER_LEN {
        return Err(FormatError::TooShort { len: bytes.len() });
    }

    expect_tag(bytes, 0, RIFF_TAG, "RIFF")?;
    // The declared RIFF size at bytes 4..8 is not trusted; the buffer length
    // is authoritative.
    expect_tag(bytes, 8, WAVE_TAG, "WAVE")?;
    expect_tag(bytes, 12, FMT_TAG, "fmt ")?;

    // fmt chunk payload starts at 20; fields at fixed relative offsets.
    let channels = read_u16_le(bytes, 22);
    let sample_rate = read_u32_le(bytes, 24);
    let bits_per_sample = read_u16_le(bytes, 34);

    if channels == 0 || sample_rate == 0 || SampleEncoding::from_bits(bits_per_sample).is_none() {
        return Err(FormatError::Unsupported {
            channels,
            sample_rate,
            bits: bits_per_sample,
        });
    }

    let format = WaveFormat {
        sample_rate,
        channels,
        bits_per_sample,
    };

    // Scan chunk headers from the fmt chunk until `data` turns up. A header
    // must lie fully within the buffer before it is read.
    let mut offset = 12usize;
    loop {
        let header_end = offset
            .checked_add(8)
            .ok_or(FormatError::MissingData { len: bytes.len() })?;
        if header_end > bytes.len() {
            return Err(FormatError::MissingData { len: bytes.len() });
        }

        let chunk_size = read_u32_le(bytes, offset + 4) as usize;
        if &bytes[offset..offset + 4] == DATA_TAG {
            // Clip the declared size to what is physically present.
            let len = chunk_size.min(bytes.len() - header_end);
            return Ok(ParsedWave {
                format,
                data: DataWindow {
                    offset: header_end,
                    len,
                },
            });
        }

        offset = header_end
            .checked_add(chunk_size)
            .ok_or(FormatError::MissingData { len: bytes.len() })?;
    }
}

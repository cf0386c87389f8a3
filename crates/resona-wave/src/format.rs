//! Playback format descriptors derived from the `fmt ` chunk.

/// How raw PCM bytes in the data chunk are encoded.
///
/// WAV convention: 8-bit samples are unsigned offset-binary (silence at 128),
/// everything wider is signed little-endian.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SampleEncoding {
    /// 8-bit unsigned.
    Unsigned8,
    /// 16-bit signed little-endian.
    Signed16,
    /// 24-bit signed little-endian.
    Signed24,
    /// 32-bit signed little-endian.
    Signed32,
}

impl SampleEncoding {
    /// Map a declared bit depth to an encoding, or `None` if the depth is
    /// not one the playback layer can render.
    pub fn from_bits(bits: u16) -> Option<Self> {
        match bits {
            8 => Some(Self::Unsigned8),
            16 => Some(Self::Signed16),
            24 => Some(Self::Signed24),
            32 => Some(Self::Signed32),
            _ => None,
        }
    }

    /// Width of one sample in bytes.
    pub fn bytes_per_sample(self) -> usize {
        match self {
            Self::Unsigned8 => 1,
            Self::Signed16 => 2,
            Self::Signed24 => 3,
            Self::Signed32 => 4,
        }
    }

    /// Whether samples are signed.
    pub fn is_signed(self) -> bool {
        !matches!(self, Self::Unsigned8)
    }
}

/// Playback-ready format descriptor.
///
/// Created once by [`parse`](crate::parse) from the `fmt ` chunk and
/// immutable thereafter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WaveFormat {
    /// Sample rate in Hz.
    pub sample_rate: u32,
    /// Number of interleaved channels.
    pub channels: u16,
    /// Bit depth per sample.
    pub bits_per_sample: u16,
}

impl WaveFormat {
    /// Samples wider than 8 bits are signed.
    pub fn is_signed(&self) -> bool {
        self.bits_per_sample > 8
    }

    /// The sample encoding for this descriptor, if the bit depth is supported.
    pub fn encoding(&self) -> Option<SampleEncoding> {
        SampleEncoding::from_bits(self.bits_per_sample)
    }

    /// Width of one sample in bytes.
    pub fn bytes_per_sample(&self) -> usize {
        usize::from(self.bits_per_sample / 8)
    }
}

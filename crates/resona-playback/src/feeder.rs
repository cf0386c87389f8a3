//! Pull-based sample supply shared between the audio callback thread and
//! the polling driver.
//!
//! The feeder owns a copy of the `data` chunk payload plus an atomic cursor
//! tracking how much has been delivered to the device. [`SampleFeeder::fill`]
//! is the only write path to the cursor and is invoked from the backend's
//! callback thread; the driver thread only reads
//! [`SampleFeeder::remaining_bytes`] to detect exhaustion. Release stores
//! paired with Acquire loads make the handoff race-free.

use resona_wave::SampleEncoding;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Shared sample source for one playback session.
pub struct SampleFeeder {
    bytes: Vec<u8>,
    encoding: SampleEncoding,
    gain: f32,
    // Bytes consumed so far. Single writer (the audio callback thread).
    pos: AtomicUsize,
}

impl SampleFeeder {
    /// Create a feeder over the raw sample payload.
    ///
    /// `gain` is a linear volume multiplier, already validated to [0.0, 1.0].
    /// A trailing partial sample (payload not a multiple of the sample
    /// width) is dropped so decoding never straddles the end.
    pub fn new(mut bytes: Vec<u8>, encoding: SampleEncoding, gain: f32) -> Self {
        let step = encoding.bytes_per_sample();
        bytes.truncate(bytes.len() - bytes.len() % step);
        Self {
            bytes,
            encoding,
            gain,
            pos: AtomicUsize::new(0),
        }
    }

    /// Bytes not yet delivered to the device. Poll-side read.
    pub fn remaining_bytes(&self) -> usize {
        self.bytes.len() - self.pos.load(Ordering::Acquire)
    }

    /// Whether the payload has been fully delivered.
    pub fn is_exhausted(&self) -> bool {
        self.remaining_bytes() == 0
    }

    /// Fill `out` with the next decoded, gain-scaled samples.
    ///
    /// Supplies at most the remaining payload; whatever the window cannot
    /// cover is zero-filled (silence). Never reads past the payload bounds
    /// regardless of how much the device requests. Called only from the
    /// backend's callback thread.
    pub fn fill(&self, out: &mut [f32]) {
        let step = self.encoding.bytes_per_sample();
        // Relaxed is enough here: this thread is the only writer, so it
        // always sees its own last store.
        let pos = self.pos.load(Ordering::Relaxed);
        let remaining = self.bytes.len() - pos;
        let take = (out.len() * step).min(remaining);
        let supplied = take / step;

        let src = self.bytes[pos..pos + supplied * step].chunks_exact(step);
        for (slot, raw) in out[..supplied].iter_mut().zip(src) {
            *slot = self.gain * decode(self.encoding, raw);
        }
        out[supplied..].fill(0.0);

        self.pos.store(pos + supplied * step, Ordering::Release);
    }
}

/// Decode one little-endian PCM sample to f32 in [-1.0, 1.0).
fn decode(encoding: SampleEncoding, raw: &[u8]) -> f32 {
    match encoding {
        SampleEncoding::Unsigned8 => (f32::from(raw[0]) - 128.0) / 128.0,
        SampleEncoding::Signed16 => f32::from(i16::from_le_bytes([raw[0], raw[1]])) / 32_768.0,
        SampleEncoding::Signed24 => {
            // Sign-extend the 3-byte value through the top of an i32.
            let wide = i32::from_le_bytes([0, raw[0], raw[1], raw[2]]) >> 8;
            wide as f32 / 8_388_608.0
        }
        SampleEncoding::Signed32 => {
            i32::from_le_bytes([raw[0], raw[1], raw[2], raw[3]]) as f32 / 2_147_483_648.0
        }
    }
}

//! Pull-based WAV playback for the resona engine.
//!
//! This crate drives a parsed WAV buffer ([`resona_wave`]) through a
//! platform audio output until the payload is fully consumed:
//!
//! - **Entry points**: [`play_file`] and [`play_bytes`], synchronous
//!   end-to-end with an optional volume in [0.0, 1.0]
//! - **Feeder**: [`SampleFeeder`], the pull-based sample supply shared with
//!   the audio callback thread
//! - **Session**: [`PlaybackSession`], the open/stream/drain/close driver
//! - **Backends**: the [`OutputBackend`] trait with [`CpalBackend`] as the
//!   default implementation
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! // Full volume
//! resona_playback::play_file("chime.wav", None)?;
//!
//! // Half volume, from memory
//! let bytes = std::fs::read("chime.wav")?;
//! resona_playback::play_bytes(&bytes, Some(0.5))?;
//! ```

mod backend;
mod cpal_backend;
mod feeder;
mod session;

pub use backend::{ErrorCallback, OutputBackend, OutputCallback, OutputConfig, StreamHandle};
pub use cpal_backend::CpalBackend;
pub use feeder::SampleFeeder;
pub use session::{DRAIN_DELAY, POLL_INTERVAL, PlaybackSession};

use resona_wave::FormatError;
use std::path::Path;
use std::sync::Arc;

/// Error types for playback operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The source file could not be opened or read.
    #[error("cannot read source file: {0}")]
    Io(#[from] std::io::Error),

    /// The buffer is not a playable WAV container.
    #[error(transparent)]
    Format(#[from] FormatError),

    /// The output stream could not be opened or started.
    #[error("audio device error: {0}")]
    Device(String),

    /// No audio output device is available on the system.
    #[error("no audio output device available")]
    NoDevice,

    /// The volume argument lies outside [0.0, 1.0].
    #[error("volume {0} outside [0.0, 1.0]")]
    InvalidGain(f32),
}

/// Convenience result type for playback operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Full-scale gain used when no volume argument is given.
const DEFAULT_GAIN: f32 = 1.0;

fn validate_gain(volume: Option<f32>) -> Result<f32> {
    match volume {
        None => Ok(DEFAULT_GAIN),
        Some(v) if (0.0..=1.0).contains(&v) => Ok(v),
        Some(v) => Err(Error::InvalidGain(v)),
    }
}

/// Play a WAV file through the default output device, blocking until the
/// audio has fully emitted.
///
/// The file is read fully into memory before parsing. `volume` of `None`
/// plays at full scale; `Some(v)` must lie in [0.0, 1.0] or the call fails
/// with [`Error::InvalidGain`] before any file or device interaction.
pub fn play_file<P: AsRef<Path>>(path: P, volume: Option<f32>) -> Result<()> {
    let gain = validate_gain(volume)?;
    let bytes = std::fs::read(path)?;
    play_gain(&CpalBackend::new(), &bytes, gain)
}

/// Play a WAV buffer through the default output device, blocking until the
/// audio has fully emitted.
///
/// Same pipeline as [`play_file`] starting at the container parser.
pub fn play_bytes(bytes: &[u8], volume: Option<f32>) -> Result<()> {
    let gain = validate_gain(volume)?;
    play_gain(&CpalBackend::new(), bytes, gain)
}

/// Run the playback pipeline on a caller-supplied backend.
///
/// Identical semantics to [`play_bytes`]; used by embedders with their own
/// [`OutputBackend`] and by the test suite's mock backend.
pub fn play_on(backend: &dyn OutputBackend, bytes: &[u8], volume: Option<f32>) -> Result<()> {
    let gain = validate_gain(volume)?;
    play_gain(backend, bytes, gain)
}

fn play_gain(backend: &dyn OutputBackend, bytes: &[u8], gain: f32) -> Result<()> {
    let wav = resona_wave::parse(bytes)?;
    let encoding = wav.format.encoding().ok_or(FormatError::Unsupported {
        channels: wav.format.channels,
        sample_rate: wav.format.sample_rate,
        bits: wav.format.bits_per_sample,
    })?;

    let feeder = Arc::new(SampleFeeder::new(
        wav.data_bytes(bytes).to_vec(),
        encoding,
        gain,
    ));

    tracing::info!(
        sample_rate = wav.format.sample_rate,
        channels = wav.format.channels,
        bits = wav.format.bits_per_sample,
        payload_bytes = feeder.remaining_bytes(),
        "starting playback"
    );

    let session = PlaybackSession::open(backend, &wav.format, feeder)?;
    session.run_to_end();
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gain_bounds_accepted() {
        assert_eq!(validate_gain(None).unwrap(), 1.0);
        assert_eq!(validate_gain(Some(0.0)).unwrap(), 0.0);
        assert_eq!(validate_gain(Some(1.0)).unwrap(), 1.0);
        assert_eq!(validate_gain(Some(0.35)).unwrap(), 0.35);
    }

    #[test]
    fn out_of_range_gain_rejected() {
        assert!(matches!(
            validate_gain(Some(-0.1)),
            Err(Error::InvalidGain(_))
        ));
        assert!(matches!(
            validate_gain(Some(1.1)),
            Err(Error::InvalidGain(_))
        ));
        assert!(matches!(
            validate_gain(Some(f32::NAN)),
            Err(Error::InvalidGain(_))
        ));
    }

    #[test]
    fn invalid_gain_fails_before_any_device_work() {
        // Garbage buffer: the gain check must fire first.
        let err = play_bytes(&[0u8; 4], Some(2.0)).unwrap_err();
        assert!(matches!(err, Error::InvalidGain(v) if (v - 2.0).abs() < 1e-6));
    }
}

//! Playback session driver.
//!
//! One session runs the whole device lifecycle for a single buffer:
//! Opening (build and start the output stream), Streaming (the backend pulls
//! the feeder on its callback thread while this thread sleeps and re-checks
//! the cursor), Draining (a fixed extra wait so queued device buffers finish
//! emitting), Closed (the stream handle drops, stopping output). There is no
//! pause, seek, or cancel; the call blocks end-to-end.

use crate::backend::{ErrorCallback, OutputBackend, OutputCallback, OutputConfig};
use crate::feeder::SampleFeeder;
use crate::{Result, StreamHandle};
use resona_wave::WaveFormat;
use std::sync::Arc;
use std::thread;
use std::time::Duration;

/// How often the caller thread re-checks the cursor while streaming.
pub const POLL_INTERVAL: Duration = Duration::from_millis(50);

/// Extra wait after the cursor empties, so samples already queued in the
/// device finish emitting before teardown. Skipping this truncates the tail
/// of the audio audibly.
pub const DRAIN_DELAY: Duration = Duration::from_millis(350);

/// A live playback session: the shared feeder plus the open stream handle.
///
/// The handle is the sole owner of the device stream; it is released on
/// every exit path when the session drops.
pub struct PlaybackSession {
    feeder: Arc<SampleFeeder>,
    _stream: StreamHandle,
}

impl PlaybackSession {
    /// Open an output stream for `format` and start it.
    ///
    /// The backend begins pulling `feeder` on its own callback thread as
    /// soon as this returns. On failure the session is abandoned with no
    /// further side effects.
    pub fn open(
        backend: &dyn OutputBackend,
        format: &WaveFormat,
        feeder: Arc<SampleFeeder>,
    ) -> Result<Self> {
        let config = OutputConfig {
            sample_rate: format.sample_rate,
            channels: format.channels,
        };

        let cb_feeder = Arc::clone(&feeder);
        let callback: OutputCallback = Box::new(move |data: &mut [f32]| cb_feeder.fill(data));
        let error_callback: ErrorCallback =
            Box::new(|err| tracing::warn!(error = err, "output stream error"));

        let stream = backend.open_output(&config, callback, error_callback)?;
        tracing::debug!(backend = backend.name(), "playback session opened");

        Ok(Self {
            feeder,
            _stream: stream,
        })
    }

    /// Block until the feeder is exhausted, then drain and close.
    pub fn run_to_end(self) {
        while !self.feeder.is_exhausted() {
            thread::sleep(POLL_INTERVAL);
        }

        tracing::debug!("buffer exhausted, draining");
        thread::sleep(DRAIN_DELAY);
        // Dropping self releases the stream handle, stopping the device.
    }
}

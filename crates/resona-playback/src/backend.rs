//! Pluggable audio output backend abstraction.
//!
//! Decouples the playback session from any specific platform audio API. The
//! default implementation wraps [cpal](https://crates.io/crates/cpal)
//! ([`CpalBackend`](crate::CpalBackend)); tests substitute a deterministic
//! thread-backed mock so the full session path runs without audio hardware.
//!
//! Callbacks are boxed closures rather than generic parameters, keeping the
//! trait object-safe. Stream handles are type-erased [`StreamHandle`]s that
//! stop the stream on drop, so platform types never leak into session code.

use crate::Result;

/// Output stream shape, taken from the parsed WAV descriptor.
#[derive(Debug, Clone, Copy)]
pub struct OutputConfig {
    /// Sample rate in Hz.
    pub sample_rate: u32,
    /// Number of interleaved channels.
    pub channels: u16,
}

/// Audio output callback signature.
///
/// Invoked by the backend on its own callback thread with a buffer of
/// interleaved f32 samples to fill. Runs on the real-time audio path:
/// implementations must not allocate, lock, or perform I/O.
pub type OutputCallback = Box<dyn FnMut(&mut [f32]) + Send>;

/// Error callback signature, invoked with a human-readable message when the
/// backend hits a streaming error.
pub type ErrorCallback = Box<dyn FnMut(&str) + Send>;

/// Type-erased audio stream handle.
///
/// The stream is live while this handle exists; dropping it stops output.
/// RAII teardown holds regardless of which backend produced the stream.
pub struct StreamHandle {
    _inner: Box<dyn Send>,
}

impl StreamHandle {
    /// Wrap a backend-specific stream object, keeping it alive until this
    /// handle is dropped.
    pub fn new<T: Send + 'static>(stream: T) -> Self {
        Self {
            _inner: Box::new(stream),
        }
    }
}

impl std::fmt::Debug for StreamHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StreamHandle").finish_non_exhaustive()
    }
}

/// Pluggable audio output backend.
///
/// Object-safe so callers can hold a `&dyn OutputBackend` and tests can swap
/// in a mock.
pub trait OutputBackend {
    /// Human-readable backend name (e.g. "cpal", "mock").
    fn name(&self) -> &'static str;

    /// Build and start an output stream.
    ///
    /// `callback` is pulled on the backend's callback thread to fill each
    /// buffer of interleaved f32 samples. The returned handle keeps the
    /// stream alive; dropping it stops playback.
    fn open_output(
        &self,
        config: &OutputConfig,
        callback: OutputCallback,
        error_callback: ErrorCallback,
    ) -> Result<StreamHandle>;
}

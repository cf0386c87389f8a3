//! cpal-based audio output backend.
//!
//! Default [`OutputBackend`] implementation over the platform's audio system:
//! ALSA (Linux), CoreAudio (macOS), WASAPI (Windows).

use crate::backend::{ErrorCallback, OutputBackend, OutputCallback, OutputConfig, StreamHandle};
use crate::{Error, Result};
use cpal::Host;
use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};

/// cpal-based output backend.
///
/// Holds a cpal [`Host`], the connection to the platform audio system.
/// Constructing the backend is the explicit process-wide init point; there
/// is no hidden lazy-init flag, and teardown is simply drop.
pub struct CpalBackend {
    host: Host,
}

impl CpalBackend {
    /// Create a backend on the platform's default audio host.
    pub fn new() -> Self {
        tracing::debug!(
            host = cpal::default_host().id().name(),
            "cpal backend initialized"
        );
        Self {
            host: cpal::default_host(),
        }
    }
}

impl Default for CpalBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl OutputBackend for CpalBackend {
    fn name(&self) -> &'static str {
        "cpal"
    }

    fn open_output(
        &self,
        config: &OutputConfig,
        mut callback: OutputCallback,
        mut error_callback: ErrorCallback,
    ) -> Result<StreamHandle> {
        let device = self.host.default_output_device().ok_or(Error::NoDevice)?;

        let stream_config = cpal::StreamConfig {
            channels: config.channels,
            sample_rate: config.sample_rate,
            buffer_size: cpal::BufferSize::Default,
        };

        let stream = device
            .build_output_stream(
                &stream_config,
                move |data: &mut [f32], _: &cpal::OutputCallbackInfo| {
                    callback(data);
                },
                move |err| {
                    error_callback(&err.to_string());
                },
                None,
            )
            .map_err(|e| Error::Device(e.to_string()))?;

        stream.play().map_err(|e| Error::Device(e.to_string()))?;
        tracing::info!(
            channels = config.channels,
            sample_rate = config.sample_rate,
            "output stream started"
        );

        Ok(StreamHandle::new(stream))
    }
}

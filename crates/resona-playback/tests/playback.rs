//! End-to-end playback tests against a deterministic mock backend.
//!
//! The mock spawns a plain thread that pulls the output callback at a fixed
//! cadence, standing in for the platform audio callback thread. This runs
//! the real feeder/session/entry-point path in CI with no audio hardware.

use resona_playback::{
    Error, ErrorCallback, OutputBackend, OutputCallback, OutputConfig, StreamHandle, play_on,
};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::thread::JoinHandle;
use std::time::{Duration, Instant};
use tempfile::NamedTempFile;

/// Backend whose "device" is a thread pulling the callback every millisecond.
struct MockBackend {
    opened: AtomicUsize,
    /// Samples the callback thread requests per pull.
    pull_size: usize,
}

impl MockBackend {
    fn new(pull_size: usize) -> Self {
        Self {
            opened: AtomicUsize::new(0),
            pull_size,
        }
    }

    fn opened(&self) -> usize {
        self.opened.load(Ordering::SeqCst)
    }
}

struct MockStream {
    stop: Arc<AtomicBool>,
    worker: Option<JoinHandle<()>>,
}

impl Drop for MockStream {
    fn drop(&mut self) {
        self.stop.store(true, Ordering::Release);
        if let Some(worker) = self.worker.take() {
            let _ = worker.join();
        }
    }
}

impl OutputBackend for MockBackend {
    fn name(&self) -> &'static str {
        "mock"
    }

    fn open_output(
        &self,
        _config: &OutputConfig,
        mut callback: OutputCallback,
        _error_callback: ErrorCallback,
    ) -> resona_playback::Result<StreamHandle> {
        self.opened.fetch_add(1, Ordering::SeqCst);

        let stop = Arc::new(AtomicBool::new(false));
        let thread_stop = Arc::clone(&stop);
        let pull_size = self.pull_size;

        let worker = std::thread::spawn(move || {
            let mut buf = vec![0.0f32; pull_size];
            while !thread_stop.load(Ordering::Acquire) {
                callback(&mut buf);
                std::thread::sleep(Duration::from_millis(1));
            }
        });

        Ok(StreamHandle::new(MockStream {
            stop,
            worker: Some(worker),
        }))
    }
}

/// Backend that always fails to open, for error-path coverage.
struct BrokenBackend;

impl OutputBackend for BrokenBackend {
    fn name(&self) -> &'static str {
        "broken"
    }

    fn open_output(
        &self,
        _config: &OutputConfig,
        _callback: OutputCallback,
        _error_callback: ErrorCallback,
    ) -> resona_playback::Result<StreamHandle> {
        Err(Error::Device("stream refused".into()))
    }
}

/// Write a mono 16-bit WAV via hound and return its raw bytes.
fn wav_fixture(sample_rate: u32, samples: &[i16]) -> Vec<u8> {
    let spec = hound::WavSpec {
        channels: 1,
        sample_rate,
        bits_per_sample: 16,
        sample_format: hound::SampleFormat::Int,
    };

    let file = NamedTempFile::new().unwrap();
    let mut writer = hound::WavWriter::create(file.path(), spec).unwrap();
    for &s in samples {
        writer.write_sample(s).unwrap();
    }
    writer.finalize().unwrap();
    std::fs::read(file.path()).unwrap()
}

#[test]
fn plays_wav_to_completion() {
    let samples: Vec<i16> = (0..2048).map(|i| (i * 13) as i16).collect();
    let bytes = wav_fixture(44100, &samples);

    // The descriptor the session will open the stream with.
    let wav = resona_wave::parse(&bytes).unwrap();
    assert_eq!(wav.format.sample_rate, 44100);
    assert_eq!(wav.format.channels, 1);
    assert_eq!(wav.format.bits_per_sample, 16);
    assert!(wav.format.is_signed());

    let backend = MockBackend::new(256);
    play_on(&backend, &bytes, Some(0.8)).unwrap();
    assert_eq!(backend.opened(), 1);
}

#[test]
fn blocks_through_the_drain_delay() {
    let bytes = wav_fixture(44100, &[0i16; 64]);
    let backend = MockBackend::new(256);

    let start = Instant::now();
    play_on(&backend, &bytes, None).unwrap();

    // Exhaustion is near-instant; the call must still have waited out the
    // post-exhaustion drain.
    assert!(start.elapsed() >= resona_playback::DRAIN_DELAY);
}

#[test]
fn malformed_buffer_never_touches_the_device() {
    let backend = MockBackend::new(256);

    let err = play_on(&backend, b"definitely not a wav", None).unwrap_err();
    assert!(matches!(err, Error::Format(_)));
    assert_eq!(backend.opened(), 0);
}

#[test]
fn out_of_range_volume_never_touches_the_device() {
    let bytes = wav_fixture(44100, &[0i16; 16]);
    let backend = MockBackend::new(256);

    for bad in [-0.1f32, 1.1] {
        let err = play_on(&backend, &bytes, Some(bad)).unwrap_err();
        assert!(matches!(err, Error::InvalidGain(_)));
    }
    assert_eq!(backend.opened(), 0);
}

#[test]
fn boundary_volumes_accepted() {
    let bytes = wav_fixture(44100, &[0i16; 16]);
    let backend = MockBackend::new(64);

    play_on(&backend, &bytes, Some(0.0)).unwrap();
    play_on(&backend, &bytes, Some(1.0)).unwrap();
    assert_eq!(backend.opened(), 2);
}

#[test]
fn device_failure_propagates() {
    let bytes = wav_fixture(44100, &[0i16; 16]);

    let err = play_on(&BrokenBackend, &bytes, None).unwrap_err();
    assert!(matches!(err, Error::Device(_)));
}

#[test]
fn tiny_pulls_still_complete() {
    // A pull size much smaller than the payload exercises many
    // cursor-advance cycles.
    let samples: Vec<i16> = vec![1000; 512];
    let bytes = wav_fixture(22050, &samples);

    let backend = MockBackend::new(16);
    play_on(&backend, &bytes, Some(0.5)).unwrap();
    assert_eq!(backend.opened(), 1);
}

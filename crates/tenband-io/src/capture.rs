//! System loopback capture through the equalizer.
//!
//! [`LoopbackCapture`] opens the audio being played to the default render
//! endpoint as a capture stream (a "loopback" stream, where the host audio
//! API supports one), runs each packet through a shared [`Equalizer`], and
//! forwards the processed frames to a consumer channel.
//!
//! The device callback never touches the equalizer: it hands raw packets to
//! a dedicated processing thread over a bounded channel. That thread is the
//! only place filter state is advanced, and it polls the capture flag every
//! iteration so `stop_capture` can join it cooperatively. Control-plane
//! writes (gains, presets, enable) go through the same short mutex the
//! processing thread locks per packet, so the cascade never runs on
//! mixed-generation coefficients.

use crate::{Error, Result};
use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use cpal::{Device, SampleFormat, Stream};
use crossbeam_channel::{bounded, Receiver, RecvTimeoutError, Sender};
use parking_lot::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::JoinHandle;
use std::time::Duration;
use tenband_core::Equalizer;

/// Equalizer handle shared between the capture thread and a control surface.
pub type SharedEqualizer = Arc<Mutex<Equalizer>>;

/// Queue depth for raw packets between the device callback and the
/// processing thread. At typical callback sizes this is well under 100 ms
/// of audio; a stalled consumer drops packets rather than blocking the
/// device.
const PACKET_QUEUE: usize = 16;

/// Queue depth for processed frames handed to the consumer.
const FRAME_QUEUE: usize = 64;

/// Audio device information.
#[derive(Debug, Clone)]
pub struct AudioDevice {
    pub name: String,
    pub is_input: bool,
    pub is_output: bool,
    pub default_sample_rate: u32,
}

/// List all available audio devices.
pub fn list_devices() -> Result<Vec<AudioDevice>> {
    let host = cpal::default_host();
    let mut devices = Vec::new();

    if let Ok(inputs) = host.input_devices() {
        for device in inputs {
            if let Ok(name) = device.name() {
                let sample_rate = device
                    .default_input_config()
                    .map(|c| c.sample_rate().0)
                    .unwrap_or(48000);
                let is_output = device.default_output_config().is_ok();

                devices.push(AudioDevice {
                    name,
                    is_input: true,
                    is_output,
                    default_sample_rate: sample_rate,
                });
            }
        }
    }

    if let Ok(outputs) = host.output_devices() {
        for device in outputs {
            if let Ok(name) = device.name() {
                if devices.iter().any(|d| d.name == name) {
                    continue;
                }
                let sample_rate = device
                    .default_output_config()
                    .map(|c| c.sample_rate().0)
                    .unwrap_or(48000);

                devices.push(AudioDevice {
                    name,
                    is_input: false,
                    is_output: true,
                    default_sample_rate: sample_rate,
                });
            }
        }
    }

    Ok(devices)
}

/// Find the device whose playback we can capture.
///
/// Hosts with loopback support (WASAPI) let the default render endpoint be
/// opened as an input; elsewhere a monitor source usually shows up as the
/// default input device.
pub fn default_loopback_device() -> Result<Device> {
    let host = cpal::default_host();

    if let Some(output) = host.default_output_device() {
        if output.default_input_config().is_ok() {
            return Ok(output);
        }
    }

    host.default_input_device().ok_or(Error::NoDevice)
}

/// Find a capturable device by name.
fn find_device(host: &cpal::Host, name: &str) -> Result<Device> {
    let inputs = host
        .input_devices()
        .map_err(|e| Error::Stream(e.to_string()))?;
    for device in inputs {
        if device.name().map(|n| n == name).unwrap_or(false) {
            return Ok(device);
        }
    }

    let outputs = host
        .output_devices()
        .map_err(|e| Error::Stream(e.to_string()))?;
    for device in outputs {
        if device.name().map(|n| n == name).unwrap_or(false)
            && device.default_input_config().is_ok()
        {
            return Ok(device);
        }
    }

    Err(Error::DeviceNotFound(name.to_string()))
}

/// System loopback capture driving a shared equalizer.
///
/// Lifecycle: [`initialize`](LoopbackCapture::initialize) discovers the
/// device and reconfigures the equalizer at its mix rate, then
/// [`start_capture`](LoopbackCapture::start_capture) /
/// [`stop_capture`](LoopbackCapture::stop_capture) are idempotent
/// transitions. Dropping the adapter stops capture.
pub struct LoopbackCapture {
    equalizer: SharedEqualizer,
    enabled: Arc<AtomicBool>,
    capturing: Arc<AtomicBool>,
    sample_rate: u32,
    channels: u16,
    device: Option<Device>,
    stream: Option<Stream>,
    worker: Option<JoinHandle<()>>,
    frames_tx: Sender<Vec<f32>>,
    frames_rx: Receiver<Vec<f32>>,
}

impl LoopbackCapture {
    /// Creates an adapter with a default equalizer at 44.1 kHz, not yet
    /// bound to a device.
    pub fn new() -> Self {
        let (frames_tx, frames_rx) = bounded(FRAME_QUEUE);
        Self {
            equalizer: Arc::new(Mutex::new(Equalizer::new(44100.0))),
            enabled: Arc::new(AtomicBool::new(true)),
            capturing: Arc::new(AtomicBool::new(false)),
            sample_rate: 44100,
            channels: 2,
            device: None,
            stream: None,
            worker: None,
            frames_tx,
            frames_rx,
        }
    }

    /// Discovers the loopback device (or opens the named device) and
    /// reconfigures the shared equalizer at the device's mix rate. Gains set
    /// before this call are discarded with the old equalizer, matching a
    /// fresh engine at the new rate.
    pub fn initialize(&mut self, device_name: Option<&str>) -> Result<()> {
        let device = match device_name {
            Some(name) => find_device(&cpal::default_host(), name)?,
            None => default_loopback_device()?,
        };
        let config = device
            .default_input_config()
            .map_err(|e| Error::Stream(e.to_string()))?;

        if config.sample_format() != SampleFormat::F32 {
            return Err(Error::UnsupportedFormat(format!(
                "{:?}",
                config.sample_format()
            )));
        }

        self.sample_rate = config.sample_rate().0;
        self.channels = config.channels();
        *self.equalizer.lock() = Equalizer::new(f64::from(self.sample_rate));
        self.device = Some(device);
        Ok(())
    }

    /// Starts the capture stream and processing thread. Returns `Ok(())`
    /// without side effects when already capturing.
    pub fn start_capture(&mut self) -> Result<()> {
        if self.capturing.load(Ordering::SeqCst) {
            return Ok(());
        }

        let device = self.device.as_ref().ok_or(Error::NoDevice)?;
        let config = device
            .default_input_config()
            .map_err(|e| Error::Stream(e.to_string()))?;

        let (packet_tx, packet_rx) = bounded::<Vec<f32>>(PACKET_QUEUE);

        self.capturing.store(true, Ordering::SeqCst);

        let callback_capturing = Arc::clone(&self.capturing);
        let stream = device
            .build_input_stream(
                &config.into(),
                move |data: &[f32], _: &cpal::InputCallbackInfo| {
                    if callback_capturing.load(Ordering::SeqCst) {
                        let _ = packet_tx.try_send(data.to_vec());
                    }
                },
                |err| eprintln!("capture stream error: {err}"),
                None,
            )
            .map_err(|e| {
                self.capturing.store(false, Ordering::SeqCst);
                Error::Stream(e.to_string())
            })?;

        stream.play().map_err(|e| {
            self.capturing.store(false, Ordering::SeqCst);
            Error::Stream(e.to_string())
        })?;

        let equalizer = Arc::clone(&self.equalizer);
        let enabled = Arc::clone(&self.enabled);
        let capturing = Arc::clone(&self.capturing);
        let frames_tx = self.frames_tx.clone();
        let channels = usize::from(self.channels);
        let worker = std::thread::spawn(move || {
            capture_loop(packet_rx, frames_tx, equalizer, enabled, capturing, channels);
        });

        self.stream = Some(stream);
        self.worker = Some(worker);
        Ok(())
    }

    /// Stops capture: clears the flag, joins the processing thread (so the
    /// in-flight packet finishes), and tears down the stream. Returns
    /// `Ok(())` without side effects when not capturing.
    pub fn stop_capture(&mut self) -> Result<()> {
        if !self.capturing.swap(false, Ordering::SeqCst) {
            return Ok(());
        }

        if let Some(worker) = self.worker.take() {
            let _ = worker.join();
        }
        self.stream = None;
        Ok(())
    }

    /// Returns whether the capture loop is running.
    pub fn is_capturing(&self) -> bool {
        self.capturing.load(Ordering::SeqCst)
    }

    /// Enables or disables equalization of captured packets. Disabled
    /// packets are forwarded untouched.
    pub fn set_enabled(&self, enabled: bool) {
        self.enabled.store(enabled, Ordering::SeqCst);
    }

    /// Returns whether captured packets are being equalized.
    pub fn is_enabled(&self) -> bool {
        self.enabled.load(Ordering::SeqCst)
    }

    /// Returns a handle to the shared equalizer for control-plane use
    /// (gains, presets, enable/bypass).
    pub fn equalizer(&self) -> SharedEqualizer {
        Arc::clone(&self.equalizer)
    }

    /// Replaces the shared equalizer. The next packet processes through the
    /// new one.
    pub fn set_equalizer(&mut self, equalizer: SharedEqualizer) {
        self.equalizer = equalizer;
    }

    /// Receiver for processed packets, in the device's channel layout.
    pub fn frames(&self) -> Receiver<Vec<f32>> {
        self.frames_rx.clone()
    }

    /// Sample rate of the capture device, valid after `initialize`.
    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    /// Channel count of the capture device, valid after `initialize`.
    pub fn channels(&self) -> u16 {
        self.channels
    }
}

impl Default for LoopbackCapture {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for LoopbackCapture {
    fn drop(&mut self) {
        let _ = self.stop_capture();
    }
}

/// Processing loop run on the dedicated capture thread.
fn capture_loop(
    packet_rx: Receiver<Vec<f32>>,
    frames_tx: Sender<Vec<f32>>,
    equalizer: SharedEqualizer,
    enabled: Arc<AtomicBool>,
    capturing: Arc<AtomicBool>,
    channels: usize,
) {
    let mut left = Vec::new();
    let mut right = Vec::new();

    while capturing.load(Ordering::SeqCst) {
        let mut packet = match packet_rx.recv_timeout(Duration::from_millis(10)) {
            Ok(packet) => packet,
            Err(RecvTimeoutError::Timeout) => continue,
            Err(RecvTimeoutError::Disconnected) => break,
        };

        if enabled.load(Ordering::SeqCst) && !is_silent(&packet) {
            apply_equalizer(&equalizer, channels, &mut packet, &mut left, &mut right);
        }

        let _ = frames_tx.try_send(packet);
    }
}

/// Runs one packet through the equalizer in place.
///
/// Mono packets are duplicated into both cascades and the two (identical)
/// outputs averaged back, so both channel states stay consistent. Packets
/// with more than two channels equalize the first two and pass the rest
/// through.
fn apply_equalizer(
    equalizer: &SharedEqualizer,
    channels: usize,
    packet: &mut [f32],
    left: &mut Vec<f32>,
    right: &mut Vec<f32>,
) {
    if channels == 0 {
        return;
    }
    let frames = packet.len() / channels;
    if frames == 0 {
        return;
    }

    left.clear();
    right.clear();
    if channels == 1 {
        left.extend_from_slice(packet);
        right.extend_from_slice(packet);
    } else {
        for frame in packet.chunks_exact(channels) {
            left.push(frame[0]);
            right.push(frame[1]);
        }
    }

    equalizer.lock().process_stereo(left, right);

    if channels == 1 {
        for (dst, (l, r)) in packet.iter_mut().zip(left.iter().zip(right.iter())) {
            *dst = (l + r) * 0.5;
        }
    } else {
        for (frame, (l, r)) in packet.chunks_exact_mut(channels).zip(left.iter().zip(right.iter())) {
            frame[0] = *l;
            frame[1] = *r;
        }
    }
}

/// A packet of exact digital silence needs no filtering.
fn is_silent(samples: &[f32]) -> bool {
    samples.iter().all(|&s| s == 0.0)
}

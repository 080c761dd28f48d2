//! Device command channel
//!
//! Angle updates are fire-and-forget. Each update is encoded immediately and
//! placed into a single-slot outbound queue that a writer thread drains. When
//! a new frame arrives before the previous one was written, the older frame is
//! overwritten: only the latest pose matters to the servos.
//!
//! A reader thread logs the text the controller prints back. Read errors or
//! end-of-stream mark the channel as disconnected.

use crate::protocol::{ServoCommand, FRAME_LEN};
use crate::serial::{open_port, ConnectionParams, ReadWrite};
use armkit_core::{ConnectionError, EventDispatcher, SceneEvent};
use parking_lot::{Condvar, Mutex};
use std::io::{ErrorKind, Read, Write};
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;
use std::thread::JoinHandle;

/// Consumer of joint angle updates.
pub trait AngleSink: Send {
    /// Queue the angles for transmission. Never blocks on I/O.
    fn send_angles(&mut self, theta0: f64, theta1: f64);

    /// Whether angles are currently being delivered anywhere.
    fn is_connected(&self) -> bool;
}

/// Sink that discards everything, for running as a pure visualizer.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSink;

impl AngleSink for NullSink {
    fn send_angles(&mut self, _theta0: f64, _theta1: f64) {}

    fn is_connected(&self) -> bool {
        false
    }
}

/// Single-slot outbound queue with latest-wins overwrite.
#[derive(Debug, Default)]
pub struct OutboundSlot {
    state: Mutex<SlotState>,
    ready: Condvar,
}

#[derive(Debug, Default)]
struct SlotState {
    pending: Option<[u8; FRAME_LEN]>,
    closed: bool,
}

impl OutboundSlot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a frame, returning the unsent frame it replaced.
    pub fn put(&self, frame: [u8; FRAME_LEN]) -> Option<[u8; FRAME_LEN]> {
        let replaced = self.state.lock().pending.replace(frame);
        self.ready.notify_one();
        replaced
    }

    /// Take the pending frame without waiting.
    pub fn try_take(&self) -> Option<[u8; FRAME_LEN]> {
        self.state.lock().pending.take()
    }

    /// Block until a frame is available. Returns `None` once closed.
    pub fn take(&self) -> Option<[u8; FRAME_LEN]> {
        let mut state = self.state.lock();
        loop {
            if state.closed {
                return None;
            }
            if let Some(frame) = state.pending.take() {
                return Some(frame);
            }
            self.ready.wait(&mut state);
        }
    }

    /// Wake the writer and make every further `take` return `None`.
    pub fn close(&self) {
        self.state.lock().closed = true;
        self.ready.notify_all();
    }
}

/// Counters for the outbound path.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ChannelStats {
    /// Frames written to the port.
    pub sent: u64,
    /// Frames overwritten before they were written.
    pub dropped: u64,
}

#[derive(Debug, Default)]
struct Shared {
    slot: OutboundSlot,
    connected: AtomicBool,
    stopping: AtomicBool,
    sent: AtomicU64,
    dropped: AtomicU64,
}

impl Shared {
    fn mark_lost(&self, reason: &str, events: &Option<EventDispatcher>) {
        if self.connected.swap(false, Ordering::SeqCst) {
            tracing::warn!("Device connection lost: {}", reason);
            self.slot.close();
            if let Some(events) = events {
                events.publish(SceneEvent::Disconnected);
            }
        }
    }
}

/// Serial channel to the servo controller.
pub struct DeviceChannel {
    shared: Arc<Shared>,
    port: Option<String>,
    writer: Option<JoinHandle<()>>,
    reader: Option<JoinHandle<()>>,
    events: Option<EventDispatcher>,
}

impl DeviceChannel {
    pub fn new() -> Self {
        Self {
            shared: Arc::new(Shared::default()),
            port: None,
            writer: None,
            reader: None,
            events: None,
        }
    }

    /// Publish `Connected`/`Disconnected` on the given dispatcher.
    pub fn with_events(mut self, events: EventDispatcher) -> Self {
        self.events = Some(events);
        self
    }

    /// Open the serial port described by `params`.
    ///
    /// Failures are logged and leave the channel disconnected; there is no
    /// automatic retry.
    pub fn connect(&mut self, params: &ConnectionParams) -> Result<(), ConnectionError> {
        if let Some(port) = self.connected_port() {
            return Err(ConnectionError::AlreadyConnected {
                port: port.to_string(),
            });
        }

        match open_port(params) {
            Ok((writer, reader)) => self.attach(&params.port, writer, Some(reader)),
            Err(e) => {
                tracing::error!("Failed to connect to serial port: {}", e);
                Err(e)
            }
        }
    }

    /// Start the channel on already-open transports.
    ///
    /// `reader` is optional for write-only links.
    pub fn attach(
        &mut self,
        name: &str,
        writer: Box<dyn ReadWrite>,
        reader: Option<Box<dyn ReadWrite>>,
    ) -> Result<(), ConnectionError> {
        self.stop_workers();

        let shared = Arc::new(Shared::default());
        shared.connected.store(true, Ordering::SeqCst);
        self.shared = Arc::clone(&shared);

        let spawn_failed = |e: std::io::Error| {
            tracing::error!("Failed to start serial worker: {}", e);
            ConnectionError::FailedToOpen {
                port: name.to_string(),
                reason: e.to_string(),
            }
        };

        let writer = spawn_writer(Arc::clone(&shared), writer, self.events.clone());
        self.writer = Some(writer.map_err(|e| {
            shared.connected.store(false, Ordering::SeqCst);
            spawn_failed(e)
        })?);

        if let Some(reader) = reader {
            match spawn_reader(Arc::clone(&shared), reader, self.events.clone()) {
                Ok(handle) => self.reader = Some(handle),
                Err(e) => {
                    shared.connected.store(false, Ordering::SeqCst);
                    self.stop_workers();
                    return Err(spawn_failed(e));
                }
            }
        }

        self.port = Some(name.to_string());
        tracing::info!("Connected to {}", name);
        if let Some(events) = &self.events {
            events.publish(SceneEvent::Connected(name.to_string()));
        }
        Ok(())
    }

    /// Close the port and stop the worker threads.
    pub fn disconnect(&mut self) {
        let was_connected = self.shared.connected.swap(false, Ordering::SeqCst);
        self.stop_workers();
        if was_connected {
            tracing::info!("Disconnected from {}", self.port.as_deref().unwrap_or("device"));
            if let Some(events) = &self.events {
                events.publish(SceneEvent::Disconnected);
            }
        }
        self.port = None;
    }

    /// Name of the connected port, if any.
    pub fn connected_port(&self) -> Option<&str> {
        if self.shared.connected.load(Ordering::SeqCst) {
            self.port.as_deref()
        } else {
            None
        }
    }

    pub fn stats(&self) -> ChannelStats {
        ChannelStats {
            sent: self.shared.sent.load(Ordering::SeqCst),
            dropped: self.shared.dropped.load(Ordering::SeqCst),
        }
    }

    fn stop_workers(&mut self) {
        self.shared.stopping.store(true, Ordering::SeqCst);
        self.shared.slot.close();
        if let Some(handle) = self.writer.take() {
            if handle.join().is_err() {
                tracing::error!("Serial writer thread panicked");
            }
        }
        // The reader exits on its next timeout or EOF.
        if let Some(handle) = self.reader.take() {
            if handle.join().is_err() {
                tracing::error!("Serial reader thread panicked");
            }
        }
    }
}

impl Default for DeviceChannel {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for DeviceChannel {
    fn drop(&mut self) {
        self.shared.connected.store(false, Ordering::SeqCst);
        self.stop_workers();
    }
}

impl std::fmt::Debug for DeviceChannel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DeviceChannel")
            .field("port", &self.connected_port())
            .field("stats", &self.stats())
            .finish()
    }
}

impl AngleSink for DeviceChannel {
    fn send_angles(&mut self, theta0: f64, theta1: f64) {
        if !self.shared.connected.load(Ordering::SeqCst) {
            tracing::trace!("not connected, dropping angles");
            return;
        }

        let frame = match ServoCommand::from_angles(theta0, theta1) {
            Ok(command) => command.encode(),
            Err(e) => {
                tracing::warn!("Not sending angles: {}", e);
                return;
            }
        };

        tracing::debug!("Writing {:02X?}", frame);
        if self.shared.slot.put(frame).is_some() {
            self.shared.dropped.fetch_add(1, Ordering::SeqCst);
            tracing::debug!("Overwrote unsent frame");
        }
    }

    fn is_connected(&self) -> bool {
        self.shared.connected.load(Ordering::SeqCst)
    }
}

fn spawn_writer(
    shared: Arc<Shared>,
    mut port: Box<dyn ReadWrite>,
    events: Option<EventDispatcher>,
) -> std::io::Result<JoinHandle<()>> {
    std::thread::Builder::new()
        .name("armkit-serial-tx".to_string())
        .spawn(move || {
            while let Some(frame) = shared.slot.take() {
                match port.write_all(&frame).and_then(|_| port.flush()) {
                    Ok(()) => {
                        shared.sent.fetch_add(1, Ordering::SeqCst);
                    }
                    Err(e) => {
                        tracing::error!("Serial write failed: {}", e);
                        shared.mark_lost(&e.to_string(), &events);
                        break;
                    }
                }
            }
        })
}

fn spawn_reader(
    shared: Arc<Shared>,
    mut port: Box<dyn ReadWrite>,
    events: Option<EventDispatcher>,
) -> std::io::Result<JoinHandle<()>> {
    std::thread::Builder::new()
        .name("armkit-serial-rx".to_string())
        .spawn(move || {
            let mut buf = [0u8; 64];
            let mut line = Vec::new();
            while !shared.stopping.load(Ordering::SeqCst) {
                match port.read(&mut buf) {
                    Ok(0) => {
                        shared.mark_lost("end of stream", &events);
                        break;
                    }
                    Ok(n) => {
                        for &byte in &buf[..n] {
                            if byte == b'\n' {
                                log_device_line(&line);
                                line.clear();
                            } else {
                                line.push(byte);
                            }
                        }
                    }
                    Err(e) if e.kind() == ErrorKind::TimedOut || e.kind() == ErrorKind::WouldBlock => {}
                    Err(e) if e.kind() == ErrorKind::Interrupted => {}
                    Err(e) => {
                        tracing::error!("Error reading serial port: {}", e);
                        shared.mark_lost(&e.to_string(), &events);
                        break;
                    }
                }
            }
            if !line.is_empty() {
                log_device_line(&line);
            }
        })
}

fn log_device_line(line: &[u8]) {
    let text = String::from_utf8_lossy(line);
    let text = text.trim_end_matches('\r');
    if !text.is_empty() {
        tracing::info!(target: "armkit::device", "{}", text);
    }
}

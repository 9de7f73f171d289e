//! Gesture/error event log and the host seam it is persisted through.
//!
//! The log is append-only and exists for post-hoc bug reports. It is never replayed into a
//! live graph.

use crate::algorithms::invariants::{Violation, ViolationKind};
use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use web_time::Instant;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum LogEntry {
    MouseDown { time: u64, x: f64, y: f64, shift: bool, button: u8 },
    MouseMove { time: u64, x: f64, y: f64 },
    MouseDrag { time: u64, x: f64, y: f64 },
    MouseUp { time: u64 },
    KeyDown { time: u64, key: String },
    Error { time: u64, kind: ViolationKind, message: String },
}

impl LogEntry {
    pub fn time(&self) -> u64 {
        match *self {
            LogEntry::MouseDown { time, .. }
            | LogEntry::MouseMove { time, .. }
            | LogEntry::MouseDrag { time, .. }
            | LogEntry::MouseUp { time }
            | LogEntry::KeyDown { time, .. }
            | LogEntry::Error { time, .. } => time,
        }
    }
}

/// Ordered, timestamped record of everything the session was asked to do.
#[derive(Clone, Debug)]
pub struct EventLog {
    start: Instant,
    entries: Vec<LogEntry>,
}

impl Default for EventLog {
    fn default() -> Self {
        Self::new()
    }
}

impl EventLog {
    pub fn new() -> Self {
        EventLog { start: Instant::now(), entries: Vec::new() }
    }
    /// Milliseconds since the session started
    pub fn now(&self) -> u64 {
        self.start.elapsed().as_millis() as u64
    }
    pub fn push(&mut self, entry: LogEntry) {
        self.entries.push(entry);
    }
    pub fn record_violation(&mut self, v: &Violation) {
        let time = self.now();
        self.entries.push(LogEntry::Error { time, kind: v.kind(), message: v.to_string() });
    }
    pub fn entries(&self) -> &[LogEntry] {
        &self.entries
    }
    pub fn len(&self) -> usize {
        self.entries.len()
    }
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(&self.entries)?)
    }
    pub fn parse(json: &str) -> Result<Vec<LogEntry>> {
        Ok(serde_json::from_str(json)?)
    }
}

/// Everything the session needs from its environment: durable storage for the log,
/// a developer console, and a user-visible alert.
pub trait DiagnosticsHost {
    /// Overwrite the value stored under `key`.
    fn persist(&mut self, key: &str, value: &str);
    fn load(&self, key: &str) -> Option<String>;
    fn console(&mut self, text: &str);
    /// Show `message` to the user after roughly `delay_ms`.
    fn alert(&mut self, message: &str, delay_ms: u32);
}

/// In-process host: storage in a map, console and alerts captured as strings.
#[derive(Clone, Debug, Default)]
pub struct MemoryHost {
    pub storage: HashMap<String, String>,
    pub console: Vec<String>,
    pub alerts: Vec<String>,
}

impl DiagnosticsHost for MemoryHost {
    fn persist(&mut self, key: &str, value: &str) {
        self.storage.insert(key.to_string(), value.to_string());
    }
    fn load(&self, key: &str) -> Option<String> {
        self.storage.get(key).cloned()
    }
    fn console(&mut self, text: &str) {
        self.console.push(text.to_string());
    }
    fn alert(&mut self, message: &str, _delay_ms: u32) {
        self.alerts.push(message.to_string());
    }
}

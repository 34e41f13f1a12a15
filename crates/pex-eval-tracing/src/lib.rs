#![doc = include_str!("../README.md")]

use core::fmt::Write;
use core::sync::atomic::{AtomicU64, Ordering};
use spin::Mutex;
use tracing_core::dispatcher::Dispatch;
use tracing_core::field::{Field, Visit};
use tracing_core::span::{Attributes, Id, Record};
use tracing_core::{Event, Level, Metadata, Subscriber};

static LOGS: Mutex<Vec<String>> = Mutex::new(Vec::new());
static NEXT_SPAN_ID: AtomicU64 = AtomicU64::new(1);
static LOG_LEVEL: Mutex<Option<Level>> = Mutex::new(None);

#[derive(Default)]
struct FieldVisitor {
    message: Option<String>,
    fields: Vec<(String, String)>,
}

impl FieldVisitor {
    fn record_value(&mut self, field: &Field, value: String) {
        if field.name() == "message" {
            self.message = Some(value);
        } else {
            self.fields.push((field.name().to_string(), value));
        }
    }

    /// Renders `LEVEL: message key=value ...`.
    fn into_line(self, level: Level) -> String {
        let mut out = String::new();
        let _ = write!(&mut out, "{}:", level.as_str());
        if let Some(message) = self.message {
            let _ = write!(&mut out, " {message}");
        }
        for (key, value) in &self.fields {
            let _ = write!(&mut out, " {key}={value}");
        }
        out
    }
}

impl Visit for FieldVisitor {
    fn record_debug(&mut self, field: &Field, value: &dyn core::fmt::Debug) {
        self.record_value(field, format!("{value:?}"));
    }

    fn record_i64(&mut self, field: &Field, value: i64) {
        self.record_value(field, value.to_string());
    }

    fn record_u64(&mut self, field: &Field, value: u64) {
        self.record_value(field, value.to_string());
    }

    fn record_bool(&mut self, field: &Field, value: bool) {
        self.record_value(field, value.to_string());
    }

    fn record_str(&mut self, field: &Field, value: &str) {
        self.record_value(field, value.to_string());
    }
}

struct Collector;

impl Subscriber for Collector {
    // Level filtering happens per event so `set_level` takes effect on already
    // registered callsites.
    fn enabled(&self, _metadata: &Metadata<'_>) -> bool {
        true
    }

    fn new_span(&self, _attrs: &Attributes<'_>) -> Id {
        let id = NEXT_SPAN_ID.fetch_add(1, Ordering::Relaxed);
        Id::from_u64(id)
    }

    fn record(&self, _span: &Id, _values: &Record<'_>) {}

    fn record_follows_from(&self, _span: &Id, _follows: &Id) {}

    fn event(&self, event: &Event<'_>) {
        match *LOG_LEVEL.lock() {
            Some(level) if event.metadata().level() <= &level => {}
            _ => return,
        }
        let mut visitor = FieldVisitor::default();
        event.record(&mut visitor);
        LOGS.lock()
            .push(visitor.into_line(*event.metadata().level()));
    }

    fn enter(&self, _span: &Id) {}

    fn exit(&self, _span: &Id) {}
}

/// Clears collected logs for a new evaluation.
pub fn begin() {
    LOGS.lock().clear();
}

/// Sets the collected log level. `None` disables collection.
pub fn set_level(level: Option<Level>) {
    *LOG_LEVEL.lock() = level;
}

/// Currently collected log level.
pub fn level() -> Option<Level> {
    *LOG_LEVEL.lock()
}

/// Installs the collector as the global default.
///
/// This should be called once at program start. Subsequent calls are ignored.
pub fn set_global_default() {
    let _ = tracing_core::dispatcher::set_global_default(Dispatch::new(Collector));
}

/// Runs `f` with the collector as the thread's default subscriber.
pub fn with_collector<T>(f: impl FnOnce() -> T) -> T {
    tracing_core::dispatcher::with_default(&Dispatch::new(Collector), f)
}

/// Returns and clears collected log lines.
pub fn take() -> Vec<String> {
    core::mem::take(&mut *LOGS.lock())
}

use log::{info, warn};

use crate::point::GpsPoint;

/// Display / recording boundary consumed by the pipeline.
///
/// Side-effect only: implementations must not fail back into the
/// pipeline, whatever their I/O does.
pub trait Sink {
    /// An accepted (possibly filter-transformed) fix.
    fn show_point(&mut self, point: &GpsPoint);

    /// A correlated fix the receiver itself marked invalid.
    fn show_invalid_fix(&mut self, timestamp_ms: u64);

    /// A line that failed structural decoding.
    fn show_parse_error(&mut self, message: &str);

    /// A fix rejected by a filter unit.
    fn show_rejected(&mut self, reason: &str);

    /// Clears whatever surface the sink renders to.
    fn clear(&mut self);
}

/// Routes every notification to the `log` facade.
#[derive(Default, Debug, Clone, Copy)]
pub struct LogSink {}

impl Sink for LogSink {
    fn show_point(&mut self, point: &GpsPoint) {
        info!(
            "fix t={}ms lat={:.6} lon={:.6} speed={:.1}km/h sats={} hdop={:.1}",
            point.timestamp_ms,
            point.latitude,
            point.longitude,
            point.speed_kmh,
            point.satellites,
            point.hdop,
        );
    }

    fn show_invalid_fix(&mut self, timestamp_ms: u64) {
        warn!("invalid fix t={}ms", timestamp_ms);
    }

    fn show_parse_error(&mut self, message: &str) {
        warn!("parse error: {}", message);
    }

    fn show_rejected(&mut self, reason: &str) {
        info!("rejected: {}", reason);
    }

    fn clear(&mut self) {}
}

/// Lets a sink be observed from outside the pipeline that owns it
/// (reporting threads, test assertions).
impl<S: Sink> Sink for std::sync::Arc<std::sync::Mutex<S>> {
    fn show_point(&mut self, point: &GpsPoint) {
        self.lock().unwrap_or_else(|e| e.into_inner()).show_point(point);
    }

    fn show_invalid_fix(&mut self, timestamp_ms: u64) {
        self.lock()
            .unwrap_or_else(|e| e.into_inner())
            .show_invalid_fix(timestamp_ms);
    }

    fn show_parse_error(&mut self, message: &str) {
        self.lock()
            .unwrap_or_else(|e| e.into_inner())
            .show_parse_error(message);
    }

    fn show_rejected(&mut self, reason: &str) {
        self.lock().unwrap_or_else(|e| e.into_inner()).show_rejected(reason);
    }

    fn clear(&mut self) {
        self.lock().unwrap_or_else(|e| e.into_inner()).clear();
    }
}

/// Records every notification, for assertions in tests.
#[derive(Default, Debug, Clone)]
pub struct MemorySink {
    pub points: Vec<GpsPoint>,
    pub invalid_fixes: Vec<u64>,
    pub parse_errors: Vec<String>,
    pub rejections: Vec<String>,
    pub cleared: usize,
}

impl Sink for MemorySink {
    fn show_point(&mut self, point: &GpsPoint) {
        self.points.push(point.clone());
    }

    fn show_invalid_fix(&mut self, timestamp_ms: u64) {
        self.invalid_fixes.push(timestamp_ms);
    }

    fn show_parse_error(&mut self, message: &str) {
        self.parse_errors.push(message.to_string());
    }

    fn show_rejected(&mut self, reason: &str) {
        self.rejections.push(reason.to_string());
    }

    fn clear(&mut self) {
        self.cleared += 1;
    }
}

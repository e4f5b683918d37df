use log::debug;

use crate::{
    filters::{GpsFilter, Verdict},
    history::History,
    point::GpsPoint,
};

/// Default stop-detection speed threshold [km/h].
pub const DEFAULT_STOP_THRESHOLD_KMH: f64 = 3.0;

/// Default dwell time before a stop is acted upon [s].
pub const DEFAULT_MIN_STOP_TIME_S: u64 = 0;

/// Stationary-period detector with a dwell-time debounce.
///
/// Moving → Stopped: the first fix below the speed threshold latches
/// its position and timestamp but still passes through. While below
/// the threshold, once the dwell reaches `min_stop_time` every fix is
/// classified [Verdict::Stop] with its position pinned to the latched
/// one and its speed forced to zero. Any fix at or above the threshold
/// clears the latch instantly.
#[derive(Debug, Clone)]
pub struct StopFilter {
    enabled: bool,
    threshold_kmh: f64,
    min_stop_time_s: u64,
    latch: Option<Latch>,
}

#[derive(Debug, Clone)]
struct Latch {
    /// Timestamp at which speed first dropped below the threshold
    since_ms: u64,
    /// Position of that first slow fix
    latitude: f64,
    longitude: f64,
}

impl Default for StopFilter {
    fn default() -> Self {
        Self::new(DEFAULT_STOP_THRESHOLD_KMH, DEFAULT_MIN_STOP_TIME_S)
    }
}

impl StopFilter {
    pub fn new(threshold_kmh: f64, min_stop_time_s: u64) -> Self {
        Self {
            enabled: true,
            threshold_kmh,
            min_stop_time_s,
            latch: None,
        }
    }

    pub fn threshold(&self) -> f64 {
        self.threshold_kmh
    }

    pub fn set_threshold(&mut self, threshold_kmh: f64) {
        self.threshold_kmh = threshold_kmh;
    }

    pub fn min_stop_time(&self) -> u64 {
        self.min_stop_time_s
    }

    pub fn set_min_stop_time(&mut self, seconds: u64) {
        self.min_stop_time_s = seconds;
    }

    /// True while a below-threshold dwell is latched.
    pub fn is_stopped(&self) -> bool {
        self.latch.is_some()
    }
}

impl GpsFilter for StopFilter {
    fn process(&mut self, point: &mut GpsPoint, _history: &History) -> Verdict {
        if !self.enabled || !point.valid || !point.has_position() {
            return Verdict::Pass;
        }

        if point.speed_kmh >= self.threshold_kmh {
            // movement resumed (or never stopped)
            if self.latch.take().is_some() {
                debug!("movement resumed at {:.1}km/h", point.speed_kmh);
            }
            return Verdict::Pass;
        }

        match &self.latch {
            None => {
                self.latch = Some(Latch {
                    since_ms: point.timestamp_ms,
                    latitude: point.latitude,
                    longitude: point.longitude,
                });
                Verdict::Pass
            },
            Some(latch) => {
                let dwell_ms = point.timestamp_ms.saturating_sub(latch.since_ms);
                if dwell_ms >= self.min_stop_time_s * 1000 {
                    point.latitude = latch.latitude;
                    point.longitude = latch.longitude;
                    point.speed_kmh = 0.0;
                    Verdict::Stop
                } else {
                    Verdict::Pass
                }
            },
        }
    }

    fn name(&self) -> &'static str {
        "StopFilter"
    }

    fn is_enabled(&self) -> bool {
        self.enabled
    }

    fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    fn reset(&mut self) {
        self.latch = None;
    }
}

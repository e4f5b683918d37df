use std::collections::VecDeque;
use std::f64::consts::PI;

use crate::{
    filters::{GpsFilter, Verdict},
    history::History,
    point::GpsPoint,
};

/// Default low-pass cutoff frequency [Hz].
pub const DEFAULT_CUTOFF_HZ: f64 = 0.1;

/// Default input sample rate [Hz].
pub const DEFAULT_SAMPLE_RATE_HZ: f64 = 1.0;

/// Retained window of prior fixes.
const WINDOW: usize = 5;

/// Single-pole low-pass smoothing of coordinates, and of speed and
/// altitude when they carry a non-zero reading. Never rejects.
///
/// `alpha = dt / (RC + dt)` with `dt = 1 / sample_rate` and
/// `RC = 1 / (2π·cutoff)`.
#[derive(Debug, Clone)]
pub struct SmoothingFilter {
    enabled: bool,
    cutoff_hz: f64,
    sample_rate_hz: f64,
    window: VecDeque<GpsPoint>,
}

impl Default for SmoothingFilter {
    fn default() -> Self {
        Self::new(DEFAULT_CUTOFF_HZ, DEFAULT_SAMPLE_RATE_HZ)
    }
}

fn low_pass(current: f64, previous: f64, alpha: f64) -> f64 {
    previous + alpha * (current - previous)
}

impl SmoothingFilter {
    pub fn new(cutoff_hz: f64, sample_rate_hz: f64) -> Self {
        Self {
            enabled: true,
            cutoff_hz,
            sample_rate_hz,
            window: VecDeque::with_capacity(WINDOW),
        }
    }

    pub fn cutoff_frequency(&self) -> f64 {
        self.cutoff_hz
    }

    pub fn set_cutoff_frequency(&mut self, cutoff_hz: f64) {
        self.cutoff_hz = cutoff_hz;
    }

    pub fn sample_rate(&self) -> f64 {
        self.sample_rate_hz
    }

    pub fn set_sample_rate(&mut self, sample_rate_hz: f64) {
        self.sample_rate_hz = sample_rate_hz;
    }

    pub fn alpha(&self) -> f64 {
        let dt = 1.0 / self.sample_rate_hz;
        let rc = 1.0 / (2.0 * PI * self.cutoff_hz);
        dt / (rc + dt)
    }
}

impl GpsFilter for SmoothingFilter {
    fn process(&mut self, point: &mut GpsPoint, _history: &History) -> Verdict {
        if !self.enabled || !point.valid {
            return Verdict::Pass;
        }

        self.window.push_back(point.clone());
        while self.window.len() > WINDOW {
            self.window.pop_front();
        }

        // need at least one genuinely prior sample
        if self.window.len() < 2 {
            return Verdict::Pass;
        }

        let alpha = self.alpha();
        let prev = &self.window[self.window.len() - 2];

        point.latitude = low_pass(point.latitude, prev.latitude, alpha);
        point.longitude = low_pass(point.longitude, prev.longitude, alpha);

        if point.speed_kmh > 0.0 {
            point.speed_kmh = low_pass(point.speed_kmh, prev.speed_kmh, alpha);
        }

        if point.altitude_m > 0.0 {
            point.altitude_m = low_pass(point.altitude_m, prev.altitude_m, alpha);
        }

        Verdict::Pass
    }

    fn name(&self) -> &'static str {
        "SmoothingFilter"
    }

    fn is_enabled(&self) -> bool {
        self.enabled
    }

    fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    fn reset(&mut self) {
        self.window.clear();
    }
}

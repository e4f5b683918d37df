use crate::{
    filters::{GpsFilter, Verdict},
    history::History,
    point::GpsPoint,
};

/// Default speed ceiling [km/h].
pub const DEFAULT_MAX_SPEED_KMH: f64 = 300.0;

/// Rejects physically implausible reported speeds: above the ceiling,
/// or negative (which a sane receiver never emits, but the decoder is
/// permissive).
#[derive(Debug, Clone)]
pub struct SpeedFilter {
    enabled: bool,
    max_speed_kmh: f64,
}

impl Default for SpeedFilter {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_SPEED_KMH)
    }
}

impl SpeedFilter {
    pub fn new(max_speed_kmh: f64) -> Self {
        Self {
            enabled: true,
            max_speed_kmh,
        }
    }

    pub fn max_speed(&self) -> f64 {
        self.max_speed_kmh
    }

    pub fn set_max_speed(&mut self, max_speed_kmh: f64) {
        self.max_speed_kmh = max_speed_kmh;
    }
}

impl GpsFilter for SpeedFilter {
    fn process(&mut self, point: &mut GpsPoint, _history: &History) -> Verdict {
        if !self.enabled || !point.valid {
            return Verdict::Pass;
        }

        if point.speed_kmh > self.max_speed_kmh || point.speed_kmh < 0.0 {
            return Verdict::Reject;
        }

        Verdict::Pass
    }

    fn name(&self) -> &'static str {
        "SpeedFilter"
    }

    fn is_enabled(&self) -> bool {
        self.enabled
    }

    fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }
}

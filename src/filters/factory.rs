use log::warn;

use crate::{
    cfg::FilterSpec,
    filters::{
        jump::DEFAULT_MAX_JUMP,
        satellite::DEFAULT_MIN_SATELLITES,
        smoothing::{DEFAULT_CUTOFF_HZ, DEFAULT_SAMPLE_RATE_HZ},
        speed::DEFAULT_MAX_SPEED_KMH,
        stop::{DEFAULT_MIN_STOP_TIME_S, DEFAULT_STOP_THRESHOLD_KMH},
        GpsFilter, JumpFilter, JumpPolicy, SatelliteFilter, SmoothingFilter, SpeedFilter,
        StopFilter,
    },
};

/// Builds one filter unit from its [FilterSpec]. Missing parameters
/// fall back to the unit defaults; an unknown type discriminator is
/// skipped with a warning so a partially wrong configuration still
/// yields a (shorter) working chain.
pub fn build(spec: &FilterSpec) -> Option<Box<dyn GpsFilter>> {
    let mut filter: Box<dyn GpsFilter> = match spec.kind.as_str() {
        "SatelliteFilter" => {
            let min = spec.param_or("minSatellites", DEFAULT_MIN_SATELLITES as f64);
            Box::new(SatelliteFilter::new(min as u32))
        },
        "SpeedFilter" => {
            let max = spec.param_or("maxSpeed", DEFAULT_MAX_SPEED_KMH);
            Box::new(SpeedFilter::new(max))
        },
        "JumpFilter" => {
            let max = spec.param_or("maxJump", DEFAULT_MAX_JUMP);
            let policy = if spec.param_or("useElapsedTime", 0.0) != 0.0 {
                JumpPolicy::ImpliedSpeed
            } else {
                JumpPolicy::Distance
            };
            Box::new(JumpFilter::new(max, policy))
        },
        "StopFilter" => {
            let threshold = spec.param_or("threshold", DEFAULT_STOP_THRESHOLD_KMH);
            let min_stop = spec.param_or("minStopTime", DEFAULT_MIN_STOP_TIME_S as f64);
            Box::new(StopFilter::new(threshold, min_stop as u64))
        },
        "SmoothingFilter" => {
            let cutoff = spec.param_or("cutoffFrequency", DEFAULT_CUTOFF_HZ);
            let rate = spec.param_or("sampleRate", DEFAULT_SAMPLE_RATE_HZ);
            Box::new(SmoothingFilter::new(cutoff, rate))
        },
        unknown => {
            warn!("unknown filter type \"{}\": skipped", unknown);
            return None;
        },
    };

    filter.set_enabled(spec.enabled);
    Some(filter)
}

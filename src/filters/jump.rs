use log::debug;

use crate::{
    filters::{GpsFilter, Verdict},
    history::History,
    point::GpsPoint,
};

/// Default jump threshold. Meters under [JumpPolicy::Distance],
/// meters per second under [JumpPolicy::ImpliedSpeed].
pub const DEFAULT_MAX_JUMP: f64 = 100.0;

/// Two jump-detection policies shipped over the project's history.
/// An instance applies exactly one of them, never a mix.
#[derive(Default, Debug, Clone, Copy, PartialEq, Eq)]
pub enum JumpPolicy {
    /// Reject when the raw displacement from the last valid fix
    /// exceeds the threshold [m].
    #[default]
    Distance,
    /// Reject when displacement / elapsed-time exceeds the threshold
    /// [m/s]. Zero or negative elapsed time degrades to Pass: no
    /// meaningful rate can be computed.
    ImpliedSpeed,
}

/// Rejects coordinate teleports, measured against the last valid
/// fix in history. Passes unconditionally while no valid fix exists.
#[derive(Debug, Clone)]
pub struct JumpFilter {
    enabled: bool,
    policy: JumpPolicy,
    max_jump: f64,
}

impl Default for JumpFilter {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_JUMP, JumpPolicy::default())
    }
}

impl JumpFilter {
    pub fn new(max_jump: f64, policy: JumpPolicy) -> Self {
        Self {
            enabled: true,
            policy,
            max_jump,
        }
    }

    pub fn policy(&self) -> JumpPolicy {
        self.policy
    }

    pub fn max_jump(&self) -> f64 {
        self.max_jump
    }

    pub fn set_max_jump(&mut self, max_jump: f64) {
        self.max_jump = max_jump;
    }
}

impl GpsFilter for JumpFilter {
    fn process(&mut self, point: &mut GpsPoint, history: &History) -> Verdict {
        if !self.enabled || !point.valid {
            return Verdict::Pass;
        }

        let last = match history.last_valid() {
            Some(last) => last,
            None => return Verdict::Pass,
        };

        let distance_m = last.distance_to(point);

        match self.policy {
            JumpPolicy::Distance => {
                if distance_m > self.max_jump {
                    debug!("jump of {:.1}m exceeds {:.1}m", distance_m, self.max_jump);
                    return Verdict::Reject;
                }
            },
            JumpPolicy::ImpliedSpeed => {
                if point.timestamp_ms <= last.timestamp_ms {
                    return Verdict::Pass;
                }
                let elapsed_s = (point.timestamp_ms - last.timestamp_ms) as f64 / 1000.0;
                let implied_m_s = distance_m / elapsed_s;
                if implied_m_s > self.max_jump {
                    debug!(
                        "implied {:.1}m/s exceeds {:.1}m/s",
                        implied_m_s, self.max_jump
                    );
                    return Verdict::Reject;
                }
            },
        }

        Verdict::Pass
    }

    fn name(&self) -> &'static str {
        "JumpFilter"
    }

    fn is_enabled(&self) -> bool {
        self.enabled
    }

    fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }
}

#[cfg(test)]
mod test {
    use super::{JumpFilter, JumpPolicy};
    use crate::filters::{GpsFilter, Verdict};
    use crate::history::History;
    use crate::point::GpsPoint;

    fn fix(latitude: f64, timestamp_ms: u64) -> GpsPoint {
        let mut p = GpsPoint::default();
        p.latitude = latitude;
        p.longitude = 11.5167;
        p.timestamp_ms = timestamp_ms;
        p.valid = true;
        p
    }

    fn seeded_history(latitude: f64, timestamp_ms: u64) -> History {
        let history = History::default();
        history.append(fix(latitude, timestamp_ms));
        history
    }

    #[test]
    fn no_prior_fix_passes() {
        let mut filter = JumpFilter::default();
        let history = History::default();
        assert_eq!(
            filter.process(&mut fix(48.0, 1000), &history),
            Verdict::Pass
        );
    }

    #[test]
    fn distance_policy_thresholds() {
        let mut filter = JumpFilter::new(100.0, JumpPolicy::Distance);
        let history = seeded_history(48.0, 0);

        // ~11m displacement
        let mut near = fix(48.0001, 1000);
        assert_eq!(filter.process(&mut near, &history), Verdict::Pass);

        // ~1.1km displacement
        let mut far = fix(48.01, 1000);
        assert_eq!(filter.process(&mut far, &history), Verdict::Reject);
    }

    #[test]
    fn implied_speed_policy_thresholds() {
        let mut filter = JumpFilter::new(100.0, JumpPolicy::ImpliedSpeed);
        let history = seeded_history(48.0, 0);

        // ~11m in one second: ~11m/s, under 100m/s
        let mut near = fix(48.0001, 1000);
        assert_eq!(filter.process(&mut near, &history), Verdict::Pass);

        // ~1.1km in one second: ~1100m/s, way over
        let mut far = fix(48.01, 1000);
        assert_eq!(filter.process(&mut far, &history), Verdict::Reject);
    }

    #[test]
    fn implied_speed_degrades_on_zero_elapsed() {
        let mut filter = JumpFilter::new(100.0, JumpPolicy::ImpliedSpeed);
        let history = seeded_history(48.0, 1000);

        // same timestamp, huge displacement: rate is undefined, Pass
        let mut point = fix(49.0, 1000);
        assert_eq!(filter.process(&mut point, &history), Verdict::Pass);

        // timestamp going backwards behaves the same
        let mut point = fix(49.0, 500);
        assert_eq!(filter.process(&mut point, &history), Verdict::Pass);
    }

    #[test]
    fn measures_against_last_valid_not_last() {
        let mut filter = JumpFilter::new(100.0, JumpPolicy::Distance);
        let history = seeded_history(48.0, 0);

        // an invalid entry after the valid one must be ignored
        let mut bogus = fix(20.0, 500);
        bogus.valid = false;
        history.append(bogus);

        let mut near = fix(48.0001, 1000);
        assert_eq!(filter.process(&mut near, &history), Verdict::Pass);
    }

    #[test]
    fn disabled_always_passes() {
        let mut filter = JumpFilter::default();
        filter.set_enabled(false);
        let history = seeded_history(48.0, 0);
        assert_eq!(filter.process(&mut fix(49.0, 1000), &history), Verdict::Pass);
    }
}

use crate::{
    filters::{GpsFilter, Verdict},
    history::History,
    point::GpsPoint,
};

/// Default minimum satellite count for a trustworthy fix.
pub const DEFAULT_MIN_SATELLITES: u32 = 4;

/// Rejects fixes computed from too few satellites.
#[derive(Debug, Clone)]
pub struct SatelliteFilter {
    enabled: bool,
    min_satellites: u32,
}

impl Default for SatelliteFilter {
    fn default() -> Self {
        Self::new(DEFAULT_MIN_SATELLITES)
    }
}

impl SatelliteFilter {
    pub fn new(min_satellites: u32) -> Self {
        Self {
            enabled: true,
            min_satellites,
        }
    }

    pub fn min_satellites(&self) -> u32 {
        self.min_satellites
    }

    pub fn set_min_satellites(&mut self, min: u32) {
        self.min_satellites = min;
    }
}

impl GpsFilter for SatelliteFilter {
    fn process(&mut self, point: &mut GpsPoint, _history: &History) -> Verdict {
        if !self.enabled || !point.valid {
            return Verdict::Pass;
        }

        if point.satellites < self.min_satellites {
            return Verdict::Reject;
        }

        Verdict::Pass
    }

    fn name(&self) -> &'static str {
        "SatelliteFilter"
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
    use super::SatelliteFilter;
    use crate::filters::{GpsFilter, Verdict};
    use crate::history::History;
    use crate::point::GpsPoint;
    use rstest::rstest;

    fn fix(satellites: u32) -> GpsPoint {
        let mut p = GpsPoint::default();
        p.satellites = satellites;
        p.valid = true;
        p
    }

    #[rstest]
    #[case(3, Verdict::Reject)]
    #[case(0, Verdict::Reject)]
    #[case(4, Verdict::Pass)]
    #[case(12, Verdict::Pass)]
    fn thresholding(#[case] satellites: u32, #[case] expected: Verdict) {
        let mut filter = SatelliteFilter::default();
        let history = History::default();
        assert_eq!(filter.process(&mut fix(satellites), &history), expected);
    }

    #[test]
    fn disabled_always_passes() {
        let mut filter = SatelliteFilter::default();
        filter.set_enabled(false);
        let history = History::default();
        assert_eq!(filter.process(&mut fix(0), &history), Verdict::Pass);
    }

    #[test]
    fn invalid_fix_passes_untouched() {
        let mut filter = SatelliteFilter::default();
        let history = History::default();
        let mut point = fix(0);
        point.valid = false;
        assert_eq!(filter.process(&mut point, &history), Verdict::Pass);
    }
}

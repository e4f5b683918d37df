use log::debug;

use crate::{
    nmea::{ddmm_to_degrees, knots_to_kmh, GgaData, GsvData, RmcData, Sentence},
    point::GpsPoint,
};

/// [FixCorrelator] pairs the two sentence kinds that describe the same
/// moment: RMC carries validity / position / velocity, GGA carries
/// altitude / satellite count / HDOP. The most recent record of each
/// kind is retained; a fix is emitted only when both kinds agree on
/// the decoded timestamp **exactly**.
///
/// Known limitation: there is no tolerance window. A receiver whose
/// RMC and GGA timestamps ever differ (even by one millisecond), or
/// that emits only one of the two kinds, never produces a fix.
#[derive(Default, Debug, Clone)]
pub struct FixCorrelator {
    last_rmc: Option<RmcData>,
    last_gga: Option<GgaData>,
    last_gsv: Option<GsvData>,
}

impl FixCorrelator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feeds one decoded [Sentence]. Returns a complete [GpsPoint]
    /// when this sentence completes a timestamp-matched RMC/GGA pair;
    /// both stored records are consumed in that case.
    pub fn feed(&mut self, sentence: Sentence) -> Option<GpsPoint> {
        match sentence {
            Sentence::Rmc(rmc) => {
                self.last_rmc = Some(rmc);
            },
            Sentence::Gga(gga) => {
                self.last_gga = Some(gga);
            },
            Sentence::Gsv(gsv) => {
                // in-view inventory, retained for inspection only
                self.last_gsv = Some(gsv);
                return None;
            },
        }

        match (&self.last_rmc, &self.last_gga) {
            (Some(rmc), Some(gga)) if rmc.timestamp_ms == gga.timestamp_ms => {
                let point = Self::merge(rmc, gga);
                debug!(
                    "correlated fix t={}ms valid={}",
                    point.timestamp_ms, point.valid
                );
                self.last_rmc = None;
                self.last_gga = None;
                Some(point)
            },
            _ => None,
        }
    }

    /// Most recent satellites-in-view inventory, if any was decoded.
    pub fn last_gsv(&self) -> Option<&GsvData> {
        self.last_gsv.as_ref()
    }

    /// Clears all retained records (test isolation, receiver restart).
    pub fn reset(&mut self) {
        self.last_rmc = None;
        self.last_gga = None;
        self.last_gsv = None;
    }

    fn merge(rmc: &RmcData, gga: &GgaData) -> GpsPoint {
        GpsPoint {
            timestamp_ms: rmc.timestamp_ms,
            latitude: ddmm_to_degrees(rmc.latitude, rmc.lat_hemisphere),
            longitude: ddmm_to_degrees(rmc.longitude, rmc.lon_hemisphere),
            speed_kmh: knots_to_kmh(rmc.speed_knots),
            course_deg: rmc.course_deg.rem_euclid(360.0),
            altitude_m: gga.altitude_m,
            satellites: gga.satellites,
            hdop: gga.hdop,
            valid: rmc.valid && gga.quality > 0,
        }
    }
}

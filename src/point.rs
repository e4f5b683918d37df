use std::f64::consts::PI;

/// Mean Earth radius, in meters.
pub const EARTH_RADIUS_M: f64 = 6_371_000.0;

/// [GpsPoint] is one correlated GPS reading: position, velocity,
/// quality metadata and a receiver validity flag. Filters may mutate
/// the point they are handed; the history only ever stores accepted
/// values by copy.
#[derive(Default, Debug, Clone, PartialEq)]
pub struct GpsPoint {
    /// Latitude in signed decimal degrees (WGS84)
    pub latitude: f64,
    /// Longitude in signed decimal degrees (WGS84)
    pub longitude: f64,
    /// Ground speed [km/h]
    pub speed_kmh: f64,
    /// Course over ground [°], within [0, 360)
    pub course_deg: f64,
    /// Altitude above mean sea level [m]
    pub altitude_m: f64,
    /// Number of satellites used in the fix
    pub satellites: u32,
    /// Horizontal dilution of precision (unitless)
    pub hdop: f64,
    /// Milliseconds since UTC midnight
    pub timestamp_ms: u64,
    /// Receiver validity flag. When false, numeric fields
    /// must not be trusted downstream.
    pub valid: bool,
}

impl GpsPoint {
    /// True if the point carries an actual position
    /// (the permissive decoder leaves missing coordinates at 0.0).
    pub fn has_position(&self) -> bool {
        self.latitude != 0.0 || self.longitude != 0.0
    }

    /// Great-circle distance to `other` in meters (haversine).
    pub fn distance_to(&self, other: &Self) -> f64 {
        let lat1 = self.latitude * PI / 180.0;
        let lat2 = other.latitude * PI / 180.0;
        let dlat = (other.latitude - self.latitude) * PI / 180.0;
        let dlon = (other.longitude - self.longitude) * PI / 180.0;

        let a = (dlat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (dlon / 2.0).sin().powi(2);
        let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

        EARTH_RADIUS_M * c
    }
}

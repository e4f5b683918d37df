#![doc = include_str!("../README.md")]

// private modules
mod cfg;
mod filters;
mod history;
mod nmea;
mod pipeline;
mod point;
mod sink;

// prelude
pub mod prelude {
    pub use crate::cfg::{Config, Error as ConfigError, FilterSpec};
    pub use crate::filters::{
        build, GpsFilter, JumpFilter, JumpPolicy, SatelliteFilter, SmoothingFilter, SpeedFilter,
        StopFilter, Verdict,
    };
    pub use crate::history::History;
    pub use crate::nmea::{
        ddmm_to_degrees, decode, knots_to_kmh, time_to_ms, FixCorrelator, GgaData, GsvData,
        ParseError, RmcData, Sentence,
    };
    pub use crate::pipeline::Pipeline;
    pub use crate::point::{GpsPoint, EARTH_RADIUS_M};
    pub use crate::sink::{LogSink, MemorySink, Sink};
}

#[cfg(test)]
mod tests;

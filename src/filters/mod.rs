//! Quality / plausibility filter units.
use crate::{history::History, point::GpsPoint};

mod factory;
mod jump;
mod satellite;
mod smoothing;
mod speed;
mod stop;

pub use factory::build;
pub use jump::{JumpFilter, JumpPolicy};
pub use satellite::SatelliteFilter;
pub use smoothing::SmoothingFilter;
pub use speed::SpeedFilter;
pub use stop::StopFilter;

/// Outcome of one filter unit for one fix.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    /// Fix is plausible so far, hand it to the next unit.
    Pass,
    /// Fix is implausible: drop it, skip the remaining units.
    Reject,
    /// Fix was handled in place (possibly mutated): skip the remaining
    /// units but record and display it as accepted.
    Stop,
}

/// One unit of the filter chain.
///
/// Units may mutate the fix they are handed (stop pinning, smoothing).
/// A disabled unit and an invalid fix both pass through untouched:
/// validity gating is the pipeline's job, not the units'.
pub trait GpsFilter {
    /// Classifies (and possibly transforms) one fix.
    fn process(&mut self, point: &mut GpsPoint, history: &History) -> Verdict;

    /// Stable unit name, used in rejection notifications.
    fn name(&self) -> &'static str;

    fn is_enabled(&self) -> bool;

    fn set_enabled(&mut self, enabled: bool);

    /// Drops any accumulated internal state. Default: stateless.
    fn reset(&mut self) {}
}

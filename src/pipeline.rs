//! decode → correlate → filter → record orchestration.
use log::debug;

use crate::{
    cfg::Config,
    filters::{self, GpsFilter, Verdict},
    history::History,
    nmea::{self, FixCorrelator},
    point::GpsPoint,
    sink::Sink,
};

/// [Pipeline] drives one sentence at a time through decoding,
/// RMC/GGA correlation, the priority-ordered filter chain and, on
/// acceptance, the history buffer and the sink. Strictly synchronous:
/// a line is fully resolved before the next one is accepted.
pub struct Pipeline {
    correlator: FixCorrelator,
    /// (priority, unit), kept sorted ascending, insertion-stable
    filters: Vec<(i32, Box<dyn GpsFilter>)>,
    history: History,
    sink: Box<dyn Sink>,
    processed: u64,
    valid: u64,
    rejected: u64,
    errors: u64,
}

impl Pipeline {
    /// Builds an empty pipeline (no filters) over a bounded history.
    pub fn new(history_size: usize, sink: Box<dyn Sink>) -> Self {
        Self {
            correlator: FixCorrelator::new(),
            filters: Vec::new(),
            history: History::new(history_size),
            sink,
            processed: 0,
            valid: 0,
            rejected: 0,
            errors: 0,
        }
    }

    /// Builds the pipeline a [Config] describes. Filter specs the
    /// factory cannot realize are skipped, so the resulting chain may
    /// be shorter than the specification list.
    pub fn from_config(config: &Config, sink: Box<dyn Sink>) -> Self {
        let mut pipeline = Self::new(config.history_size, sink);
        for spec in &config.filters {
            if let Some(filter) = filters::build(spec) {
                pipeline.add_filter(filter, spec.priority);
            }
        }
        pipeline
    }

    /// Inserts a filter unit. Lower priority runs earlier; equal
    /// priorities keep their insertion order.
    pub fn add_filter(&mut self, filter: Box<dyn GpsFilter>, priority: i32) {
        self.filters.push((priority, filter));
        self.filters.sort_by_key(|(priority, _)| *priority);
    }

    /// Processes one raw NMEA line.
    pub fn process(&mut self, line: &str) {
        self.processed += 1;

        let sentence = match nmea::decode(line) {
            Ok(sentence) => sentence,
            Err(error) => {
                self.errors += 1;
                self.sink.show_parse_error(&error.to_string());
                return;
            },
        };

        // a decoded sentence whose counterpart has not arrived yet is
        // not an error: the correlator is still waiting
        let point = match self.correlator.feed(sentence) {
            Some(point) => point,
            None => return,
        };

        if !point.valid {
            // semantic invalidity bypasses the chain entirely
            self.sink.show_invalid_fix(point.timestamp_ms);
            return;
        }

        self.apply_filters(point);
    }

    fn apply_filters(&mut self, mut point: GpsPoint) {
        for (_, filter) in self.filters.iter_mut() {
            if !filter.is_enabled() {
                continue;
            }

            match filter.process(&mut point, &self.history) {
                Verdict::Reject => {
                    self.rejected += 1;
                    self.sink
                        .show_rejected(&format!("{}: point rejected", filter.name()));
                    return;
                },
                Verdict::Stop => {
                    debug!("{} classified stop at t={}ms", filter.name(), point.timestamp_ms);
                    break;
                },
                Verdict::Pass => {},
            }
        }

        self.valid += 1;
        self.history.append(point.clone());
        self.sink.show_point(&point);
    }

    /// Accepted-fix history, safe to read concurrently.
    pub fn history(&self) -> &History {
        &self.history
    }

    /// Resizes the history, truncating oldest entries if needed.
    pub fn set_history_size(&mut self, size: usize) {
        self.history.set_capacity(size);
    }

    /// Clears correlator and filter state (not counters, not history).
    pub fn reset(&mut self) {
        self.correlator.reset();
        for (_, filter) in self.filters.iter_mut() {
            filter.reset();
        }
    }

    /// Lines fed in so far.
    pub fn processed_count(&self) -> u64 {
        self.processed
    }

    /// Fixes accepted (all filters passed, or a Stop classification).
    pub fn valid_count(&self) -> u64 {
        self.valid
    }

    /// Fixes a filter unit rejected.
    pub fn rejected_count(&self) -> u64 {
        self.rejected
    }

    /// Lines that failed structural decoding.
    pub fn error_count(&self) -> u64 {
        self.errors
    }
}
